use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LandingError {
    /// A settings range has its bounds reversed.
    #[error("Invalid {setting} range: min {min} > max {max}")]
    InvalidRange {
        setting: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Unknown section: {0}")]
    UnknownSection(String),
}
