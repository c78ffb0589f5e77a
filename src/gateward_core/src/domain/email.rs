use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// An email address that passed syntactic validation.
///
/// The stored form preserves the caller's casing. Uniqueness and lookups
/// compare on [`Email::normalized`]; the derived `PartialEq` is
/// case-sensitive and only suitable for exact-form comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error(":email invalid")]
    InvalidSyntax,
}

impl Email {
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        if EMAIL_SYNTAX.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(EmailError::InvalidSyntax)
        }
    }

    /// Whether `raw` looks like an email address at all. Used to
    /// disambiguate login identifiers.
    pub fn is_valid_syntax(raw: &str) -> bool {
        EMAIL_SYNTAX.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for case-insensitive matching.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Email::parse(&raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
