use modifier_core::{
    DamageCategory, DamageType, DiceModifier, EngineConfig, Modifier, ModifierKind, ModifierType,
    RollOptions, StatisticModifier,
};

#[test]
fn modifiers_load_from_permissive_json() {
    let json = r#"[
        {"label": "Flanking", "modifier": 2, "type": "circumstance",
         "predicate": [{"atom": "target:flanked"}]},
        {"label": "Mystery Bonus", "modifier": 1, "type": "luck"},
        {"label": "Serrated", "modifier": 1, "type": "item",
         "damageType": "bleed", "damageCategory": "precision"},
        {"label": "Odd Damage", "modifier": 1, "type": "item", "damageType": "positive"}
    ]"#;

    let modifiers: Vec<Modifier> = serde_json::from_str(json).unwrap();

    assert_eq!(modifiers[0].slug(), "flanking");
    assert_eq!(modifiers[1].modifier_type(), ModifierType::Untyped);
    assert_eq!(modifiers[1].kind(), ModifierKind::Modifier);
    assert_eq!(modifiers[2].damage_type(), Some(DamageType::Bleed));
    assert_eq!(modifiers[2].damage_category(), Some(DamageCategory::Persistent));
    assert_eq!(modifiers[3].damage_type(), None);

    let statistic = StatisticModifier::new(
        "attack",
        modifiers,
        Some(&RollOptions::new().with("target:flanked")),
    );
    // The two +1 item bonuses tie, so only the first one counts
    assert_eq!(statistic.total_modifier(), 4);
    let enabled: Vec<bool> = statistic.evaluated().iter().map(|m| m.enabled()).collect();
    assert_eq!(enabled, vec![true, true, true, false]);
    assert_eq!(
        statistic.breakdown(),
        "Flanking +2, Mystery Bonus +1, Serrated +1"
    );
}

#[test]
fn forced_untyped_fails_to_load() {
    let json = r#"{"label": "Broken", "modifier": 2, "force": true}"#;
    let error = serde_json::from_str::<Modifier>(json).unwrap_err();
    assert!(error.to_string().contains("untyped"));
}

#[test]
fn adjustments_load_with_modes() {
    let json = r#"{
        "label": "Clumsy", "modifier": -2, "type": "status",
        "adjustments": [
            {"mode": {"add": 1}, "relabel": "Clumsy (eased)",
             "predicate": [{"atom": "self:nimble"}]}
        ]
    }"#;
    let modifier: Modifier = serde_json::from_str(json).unwrap();

    let evaluated = modifier.evaluate(&RollOptions::new().with("self:nimble"));
    assert_eq!(evaluated.value(), -1);
    assert_eq!(evaluated.label(), "Clumsy (eased)");
}

#[test]
fn dice_modifier_requires_selector_in_data() {
    let json = r#"{"label": "Flaming", "diceNumber": 1, "dieSize": "d6", "damageType": "fire"}"#;
    assert!(serde_json::from_str::<DiceModifier>(json).is_err());

    let json = r#"{"label": "Flaming", "selector": "strike-damage",
                   "diceNumber": 1, "dieSize": "d6", "damageType": "fire"}"#;
    let dice: DiceModifier = serde_json::from_str(json).unwrap();
    assert!(dice.is_additive());
    assert_eq!(dice.selector(), "strike-damage");
}

#[test]
fn config_loads_from_toml() {
    let config: EngineConfig = toml::from_str(
        r#"
        breakdown_separator = " | "
        base_roll_options = ["system:remaster"]
        "#,
    )
    .unwrap();

    assert_eq!(config.breakdown_separator, " | ");
    assert!(config.context(["attack"]).contains("system:remaster"));

    let defaults: EngineConfig = toml::from_str("").unwrap();
    assert_eq!(defaults, EngineConfig::default());
}
