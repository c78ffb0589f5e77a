use secrecy::Secret;
use thiserror::Error;

use crate::hashing;

/// A plaintext password in transit. Wrapped in [`Secret`] so it is redacted
/// from debug output and zeroized on drop.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error(":password required")]
    Empty,
}

impl Password {
    /// A server-generated random password, used by the reset flow.
    pub fn random(len: usize) -> Self {
        Self(Secret::from(hashing::mint_secret(len)))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        use secrecy::ExposeSecret;
        if raw.expose_secret().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
