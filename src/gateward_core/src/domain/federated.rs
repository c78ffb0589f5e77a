use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::email::Email;

/// Name of an external identity provider ("facebook", "google", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Provider(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error(":provider required")]
    Empty,
}

impl Provider {
    pub fn parse(raw: &str) -> Result<Self, ProviderError> {
        if raw.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Provider {
    type Error = ProviderError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Provider::parse(&raw)
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        provider.0
    }
}

impl core::fmt::Display for Provider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An identity asserted and already verified by an external provider.
///
/// By the time this value exists, the provider's redirect/token-exchange
/// dance has completed out of process; this core trusts the tuple
/// completely. `(provider, external_id)` is unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    pub provider: Provider,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}
