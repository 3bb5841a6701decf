//! Username type for session login.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty after trimming.
    #[error("username cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains control characters.
    #[error("username cannot contain control characters")]
    ControlCharacter,
}

/// A login name.
///
/// Login is by name only; there is no password. The name is what orders
/// and view history are attributed to.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 1-64 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use cartiq_core::Username;
///
/// assert_eq!(Username::parse("  asha ").unwrap().as_str(), "asha");
/// assert!(Username::parse("   ").is_err());
/// assert!(Username::parse("bad\nname").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UsernameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        let name = Username::parse("ravi").unwrap();
        assert_eq!(name.as_str(), "ravi");
        assert_eq!(name.to_string(), "ravi");
    }

    #[test]
    fn test_username_is_trimmed() {
        assert_eq!(Username::parse("  meera\t").unwrap().as_str(), "meera");
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_too_long_username() {
        let long = "a".repeat(Username::MAX_LENGTH + 1);
        assert_eq!(
            Username::parse(&long),
            Err(UsernameError::TooLong {
                max: Username::MAX_LENGTH
            })
        );
        assert!(Username::parse(&"a".repeat(Username::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        // 64 multi-byte characters are within the limit
        assert!(Username::parse(&"é".repeat(Username::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            Username::parse("a\u{7}b"),
            Err(UsernameError::ControlCharacter)
        );
    }

    #[test]
    fn test_from_str() {
        let name: Username = "kiran".parse().unwrap();
        assert_eq!(name.into_inner(), "kiran");
    }

    #[test]
    fn test_serde_transparent() {
        let name = Username::parse("dev").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"dev\"");
    }
}
