use crate::character::CharacterId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or querying core data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Book or configuration data violated a structural invariant.
    ///
    /// Carries every violation found, not just the first.
    #[error("data integrity error: {}", violations.join("; "))]
    DataIntegrity {
        /// All violations found during validation.
        violations: Vec<String>,
    },

    /// The requested section number does not exist in the loaded book.
    #[error("section not found: {0}")]
    SectionNotFound(u32),

    /// The requested character ID is not in the roster.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),
}

impl CoreError {
    /// Build a `DataIntegrity` error from a list of violations.
    pub fn integrity(violations: Vec<String>) -> Self {
        Self::DataIntegrity { violations }
    }
}
