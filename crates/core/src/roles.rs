//! Well-known role names, the capabilities they grant, and the caller
//! identity every operation receives explicitly.

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_ADMINISTRATOR: &str = "administrator";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_SUBSCRIBER: &str = "subscriber";

/// Fine-grained permissions checked by the appearance endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read global styles history, manage sidebars and widgets.
    EditThemeOptions,
    /// Change the active theme.
    SwitchThemes,
}

/// Returns `true` if `role` grants `capability`.
///
/// Unknown roles grant nothing.
pub fn role_has_capability(role: &str, capability: Capability) -> bool {
    match capability {
        Capability::EditThemeOptions | Capability::SwitchThemes => role == ROLE_ADMINISTRATOR,
    }
}

/// The identity a request is made under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User { user_id: DbId, role: String },
}

impl Caller {
    pub fn user(user_id: DbId, role: impl Into<String>) -> Self {
        Caller::User {
            user_id,
            role: role.into(),
        }
    }

    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Caller::Anonymous => None,
            Caller::User { user_id, .. } => Some(*user_id),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        match self {
            Caller::Anonymous => false,
            Caller::User { role, .. } => role_has_capability(role, capability),
        }
    }

    /// Build the rejection for this caller: `Unauthorized` when nobody is
    /// logged in, `Forbidden` when the logged-in user lacks the permission.
    pub fn denial(&self, message: &str) -> CoreError {
        match self {
            Caller::Anonymous => CoreError::Unauthorized(message.to_string()),
            Caller::User { .. } => CoreError::Forbidden(message.to_string()),
        }
    }

    /// Require `capability`, failing with [`Caller::denial`] otherwise.
    pub fn require(&self, capability: Capability, message: &str) -> Result<(), CoreError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(self.denial(message))
        }
    }
}
