use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForestError>;

#[derive(Error, Debug)]
pub enum ForestError {
    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("sponsor cycle detected at member {0}")]
    SponsorCycle(String),
}
