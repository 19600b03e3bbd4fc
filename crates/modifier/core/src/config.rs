use roll_predicate::RollOptions;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Separator placed between entries of a statistic breakdown.
    pub breakdown_separator: String,

    /// Roll options merged into every context built through [`EngineConfig::context`].
    pub base_roll_options: Vec<String>,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BREAKDOWN_SEPARATOR: &'static str = ", ";

    pub fn new() -> Self {
        Self {
            breakdown_separator: Self::DEFAULT_BREAKDOWN_SEPARATOR.to_owned(),
            base_roll_options: Vec::new(),
        }
    }

    pub fn with_base_roll_options<S: Into<String>>(
        mut self,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        self.base_roll_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Build an evaluation context from the base options plus `extra`.
    pub fn context<S: Into<String>>(&self, extra: impl IntoIterator<Item = S>) -> RollOptions {
        let mut options: RollOptions = self.base_roll_options.iter().cloned().collect();
        options.extend(extra);
        options
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
