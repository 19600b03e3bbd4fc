use modifier_core::{
    Ability, AdjustmentMode, CheckModifier, Modifier, ModifierAdjustment, ModifierParams,
    ModifierType, Predicate, RollOptions, StatisticModifier,
};

fn modifier(slug: &str, modifier_type: ModifierType, value: i32) -> Modifier {
    Modifier::new(
        ModifierParams::new(slug, value)
            .slug(slug)
            .with_type(modifier_type),
    )
    .unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("modifier_core=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn round_trip_character_attack() {
    init_tracing();

    let strength = Modifier::new(
        ModifierParams::new("Strength", 2)
            .slug("str")
            .with_type(ModifierType::Ability)
            .ability(Ability::Str),
    )
    .unwrap();

    let statistic = StatisticModifier::new(
        "attack",
        [
            strength,
            modifier("item-sword", ModifierType::Item, 1),
            modifier("frightened", ModifierType::Status, -2),
            modifier("cover", ModifierType::Circumstance, -4),
        ],
        Some(&RollOptions::new()),
    );

    // Penalties of different types both apply
    assert_eq!(statistic.total_modifier(), 2 + 1 - 2 - 4);
    assert!(statistic.evaluated().iter().all(|m| m.enabled()));
    assert_eq!(
        statistic.breakdown(),
        "Strength +2, item-sword +1, frightened -2, cover -4"
    );
}

#[test]
fn dedup_follows_larger_absolute_value() {
    let mut statistic = StatisticModifier::new(
        "attack",
        [modifier("item-sword", ModifierType::Item, 1)],
        None,
    );

    statistic.push(modifier("item-sword", ModifierType::Item, 2));
    assert_eq!(statistic.modifiers()[0].value(), 2);

    statistic.push(modifier("item-sword", ModifierType::Item, 1));
    assert_eq!(statistic.modifiers().len(), 1);
    assert_eq!(statistic.modifiers()[0].value(), 2);
    assert_eq!(statistic.total_modifier(), 2);
}

#[test]
fn untyped_never_disable_each_other() {
    let values = [3, -1, 0, 7, -4];
    let statistic = StatisticModifier::new(
        "perception",
        values
            .iter()
            .enumerate()
            .map(|(i, v)| modifier(&format!("untyped-{i}"), ModifierType::Untyped, *v)),
        None,
    );

    assert_eq!(statistic.total_modifier(), values.iter().sum::<i32>());
    assert!(statistic.evaluated().iter().all(|m| m.enabled()));
}

#[test]
fn suppressed_modifier_is_ignored_even_when_predicate_matches() {
    let frightened = Modifier::new(
        ModifierParams::new("Frightened", -2)
            .with_type(ModifierType::Status)
            .predicate(Predicate::new().and("check"))
            .adjustment(
                ModifierAdjustment::for_slug("frightened")
                    .when(Predicate::new().and("self:immune:fear"))
                    .suppress(),
            ),
    )
    .unwrap();

    let statistic = StatisticModifier::new(
        "will",
        [frightened, modifier("bless", ModifierType::Status, 1)],
        Some(&RollOptions::new().with("check").with("self:immune:fear")),
    );

    assert_eq!(statistic.total_modifier(), 1);
    assert!(statistic.evaluated()[0].ignored());
    assert!(!statistic.evaluated()[0].enabled());
    assert_eq!(statistic.breakdown(), "bless +1");
}

#[test]
fn statistic_re_evaluates_against_new_context() {
    let inspire = Modifier::new(
        ModifierParams::new("Inspire Courage", 1)
            .with_type(ModifierType::Status)
            .adjustment(
                ModifierAdjustment::new()
                    .when(Predicate::new().and("self:lingering"))
                    .value(AdjustmentMode::Upgrade(2))
                    .relabel("Lingering Composition"),
            ),
    )
    .unwrap();

    let mut statistic = StatisticModifier::new(
        "attack",
        [inspire.clone()],
        Some(&RollOptions::new().with("self:lingering")),
    );
    assert_eq!(statistic.total_modifier(), 2);
    assert_eq!(statistic.breakdown(), "Lingering Composition +2");

    // Adjustments from the first context do not accumulate
    statistic.calculate_total(Some(&RollOptions::new().with("attack")));
    assert_eq!(statistic.total_modifier(), 1);
    assert_eq!(statistic.breakdown(), "Inspire Courage +1");
    assert_eq!(statistic.modifiers()[0], inspire);
}

#[test]
fn check_modifier_leaves_statistic_untouched() {
    let base = StatisticModifier::new(
        "stealth",
        [
            modifier("dex", ModifierType::Ability, 4),
            modifier("proficiency", ModifierType::Proficiency, 5),
        ],
        Some(&RollOptions::new()),
    );

    let armor = Modifier::new(
        ModifierParams::new("Armor Check Penalty", -2)
            .with_type(ModifierType::Item)
            .predicate(Predicate::new().and("armor:noisy")),
    )
    .unwrap();
    let check = CheckModifier::new(
        "stealth-check",
        &base,
        [armor],
        &RollOptions::new().with("armor:noisy"),
    );

    assert_eq!(check.total_modifier(), 7);
    assert_eq!(base.total_modifier(), 9);
    assert_eq!(base.modifiers().len(), 2);
}
