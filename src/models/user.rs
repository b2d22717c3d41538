//! Account registration model.

use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User account as returned by `auth/register/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Sign-up form. The confirmation field never leaves the client.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 150, message = "This field may not be blank."))]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    #[serde(skip)]
    pub password_confirmation: String,
}

impl RegistrationForm {
    /// An empty email is treated as "not provided".
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        let email = email.into();
        Self {
            username: username.into(),
            email: (!email.trim().is_empty()).then_some(email),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirmation
    }

    /// Field errors in form order, or `None` if the form is valid.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        let errors = match self.validate() {
            Ok(()) => return None,
            Err(errors) => errors,
        };

        let by_field = errors.field_errors();
        let mut fields = FieldErrors::default();
        for name in ["username", "email", "password"] {
            if let Some(list) = by_field.get(name) {
                let messages = list
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                fields.push(name, messages);
            }
        }
        Some(fields)
    }
}
