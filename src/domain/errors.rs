use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
    #[error("Unknown distance filter: {0}")]
    UnknownDistance(String),
    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),
    #[error("Review needs a rating between 1 and 5 and a comment")]
    IncompleteReview,
    #[error("{0}")]
    InvalidForm(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
