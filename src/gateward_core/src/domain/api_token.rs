use serde::{Deserialize, Serialize};

use crate::hashing::{self, constant_time_eq};

const API_TOKEN_LEN: usize = 40;

/// The long-lived opaque bearer secret minted once at account creation.
///
/// Presented-token checks go through [`ApiToken::matches`], which compares
/// the full value without early exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    /// Mint a fresh token from the thread RNG. 40 alphanumeric characters,
    /// just under 240 bits of entropy, so collisions are negligible.
    pub fn mint() -> Self {
        Self(hashing::mint_secret(API_TOKEN_LEN))
    }

    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), presented.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
