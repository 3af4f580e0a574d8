//! Tunables for an import run.

/// Upper bound on unit-creation passes.
pub const DEFAULT_MAX_UNIT_PASSES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Passes over pending units before giving up on unresolved parents.
    /// A pass without progress ends the loop earlier.
    pub max_unit_passes: usize,
    /// Description attached to every unit the import creates.
    pub unit_description: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_unit_passes: DEFAULT_MAX_UNIT_PASSES,
            unit_description: None,
        }
    }
}
