use thiserror::Error;

pub type HcResult<T> = Result<T, HcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HcError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Profile too short: need {needed} periods, profile has {available}")]
    ProfileTooShort { needed: usize, available: usize },

    #[error("Invalid edge key: {0}")]
    InvalidEdgeKey(String),

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

impl HcError {
    pub fn invalid(what: impl Into<String>) -> Self {
        HcError::InvalidArg { what: what.into() }
    }
}
