use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid parent id: {0}")]
    InvalidParent(DbId),

    #[error("Invalid revision id: {0}")]
    InvalidRevision(DbId),

    #[error("No sidebar exists with id {0}")]
    SidebarNotFound(String),

    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParam { param: &'static str, reason: String },

    #[error("The page number requested is larger than the number of pages available")]
    InvalidPageNumber,

    #[error("The offset number requested is larger than or equal to the number of available items")]
    InvalidOffsetNumber,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidParam`].
    pub fn invalid_param(param: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidParam {
            param,
            reason: reason.into(),
        }
    }
}
