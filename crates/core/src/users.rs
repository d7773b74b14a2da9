//! Registration input rules.

use serde::Deserialize;
use validator::Validate;

/// Request body for `POST /users`.
///
/// Usernames are 3 to 64 characters once trimmed. Uniqueness is not enforced.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[serde(default)]
    #[validate(
        custom(function = "crate::validation::not_blank"),
        length(min = 3, max = 64)
    )]
    pub user_name: String,
}

impl RegisterUser {
    /// Strip surrounding whitespace from the username.
    pub fn normalized(self) -> Self {
        Self {
            user_name: self.user_name.trim().to_string(),
        }
    }
}
