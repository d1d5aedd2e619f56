//! Field-level validation for the profile form
//!
//! Each field is judged on its own value only. The result is an error
//! message where the empty string means "valid".

use std::fmt;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const USERNAME_ERROR: &str =
    "Username must have at least 3 characters with no spaces.";
pub const PASSWORD_ERROR: &str = "Password must have at least 6 characters.";
pub const USERNAME_REQUIRED: &str = "Username is required.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";

/// Validated inputs of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an empty value is judged.
///
/// `NoChange` treats a cleared field as "leave this alone" and never flags
/// it. `Required` flags it like any other invalid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyValuePolicy {
    #[default]
    NoChange,
    Required,
}

impl EmptyValuePolicy {
    pub fn from_allow_empty(allow_empty_as_no_change: bool) -> Self {
        if allow_empty_as_no_change {
            EmptyValuePolicy::NoChange
        } else {
            EmptyValuePolicy::Required
        }
    }
}

/// Validate `value` for `field`, returning an empty string when valid.
pub fn validate_field(
    field: Field,
    value: &str,
    policy: EmptyValuePolicy,
) -> String {
    if value.is_empty() {
        return match (policy, field) {
            (EmptyValuePolicy::NoChange, _) => String::new(),
            (EmptyValuePolicy::Required, Field::Username) => {
                USERNAME_REQUIRED.to_string()
            }
            (EmptyValuePolicy::Required, Field::Password) => {
                PASSWORD_REQUIRED.to_string()
            }
        };
    }

    let chars = value.chars().count();
    let invalid = match field {
        Field::Username => chars < MIN_USERNAME_CHARS || value.contains(' '),
        Field::Password => chars < MIN_PASSWORD_CHARS,
    };

    if !invalid {
        return String::new();
    }

    match field {
        Field::Username => USERNAME_ERROR.to_string(),
        Field::Password => PASSWORD_ERROR.to_string(),
    }
}
