use crate::hashing;

const SESSION_ID_LEN: usize = 32;

/// Opaque identifier of a server-side session binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh session identifier from the thread RNG.
    pub fn mint() -> Self {
        Self(hashing::mint_secret(SESSION_ID_LEN))
    }

    /// Wrap an identifier presented by a caller (e.g. from a cookie). An
    /// unknown value simply misses in the session store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
