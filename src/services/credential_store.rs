// src/services/credential_store.rs
use std::{collections::HashMap, fmt::Debug, path::Path};

use tracing::{info, warn};

/// Customer id to API key, read once at startup and never written again.
#[derive(Clone, Default)]
pub struct CredentialStore {
    keys: HashMap<String, String>,
}

impl Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("customers", &self.keys.len())
            .finish()
    }
}

impl CredentialStore {
    /// Read the credentials file. A missing or unreadable file gives an
    /// empty store so the server still starts.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let store = Self::parse(&content);
                info!(path = %path.display(), customers = store.len(), "loaded customer credentials");
                store
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "customers file not readable, no customers known");
                Self::default()
            }
        }
    }

    /// One `customerId,apiKey` per line. Lines that don't split into exactly
    /// two fields are skipped; a repeated id keeps the last key.
    pub fn parse(content: &str) -> Self {
        let keys = content
            .lines()
            .filter_map(|line| {
                let mut fields = line.trim().split(',');
                match (fields.next(), fields.next(), fields.next()) {
                    (Some(id), Some(key), None) => Some((id.to_string(), key.to_string())),
                    _ => None,
                }
            })
            .collect();
        Self { keys }
    }

    pub fn lookup(&self, customer_id: &str) -> Option<&str> {
        self.keys.get(customer_id).map(String::as_str)
    }

    /// Unknown customer and wrong key both come back `false`.
    pub fn verify(&self, customer_id: &str, api_key: &str) -> bool {
        self.lookup(customer_id) == Some(api_key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
