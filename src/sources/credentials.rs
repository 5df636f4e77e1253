use std::collections::HashMap;
use std::fmt;

use crate::config::types::ServiceConfig;
use crate::errors::TokenError;

/// OAuth2 client registered for one site.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Immutable site -> client id -> secret lookup, built once at startup.
#[derive(Clone, Default)]
pub struct CredentialTable {
    site_clients: HashMap<String, String>,
    client_secrets: HashMap<String, String>,
}

impl CredentialTable {
    pub fn new(
        site_clients: HashMap<String, String>,
        client_secrets: HashMap<String, String>,
    ) -> Self {
        Self { site_clients, client_secrets }
    }

    pub fn from_config(cfg: &ServiceConfig) -> Self {
        Self::new(cfg.sites.clone(), cfg.clients.clone())
    }

    /// Empty ids and secrets count as unregistered.
    pub fn resolve(&self, site: &str) -> Result<ClientCredentials, TokenError> {
        let client_id = self
            .site_clients
            .get(site)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TokenError::UnknownSite(site.to_owned()))?;

        let client_secret = self
            .client_secrets
            .get(client_id)
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| TokenError::MissingSecret(client_id.to_owned()))?;

        Ok(ClientCredentials {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        })
    }
}

impl fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTable")
            .field("site_clients", &self.site_clients)
            .field("clients", &self.client_secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CredentialTable {
        CredentialTable::new(
            HashMap::from([
                ("US".to_owned(), "us_client".to_owned()),
                ("DE".to_owned(), "de_client".to_owned()),
                ("EU".to_owned(), "".to_owned()),
            ]),
            HashMap::from([
                ("us_client".to_owned(), "us_secret".to_owned()),
                ("de_client".to_owned(), "".to_owned()),
            ]),
        )
    }

    #[test]
    fn resolves_mapped_site() {
        let creds = table().resolve("US").unwrap();
        assert_eq!(creds.client_id, "us_client");
        assert_eq!(creds.client_secret, "us_secret");
    }

    #[test]
    fn unmapped_site_and_missing_secret_are_rejected() {
        let table = table();
        assert!(matches!(table.resolve("JP"), Err(TokenError::UnknownSite(s)) if s == "JP"));
        assert!(matches!(table.resolve("EU"), Err(TokenError::UnknownSite(_))));
        assert!(matches!(table.resolve("DE"), Err(TokenError::MissingSecret(c)) if c == "de_client"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let table = table();
        let out = format!("{:?} {:?}", table, table.resolve("US").unwrap());
        assert!(!out.contains("us_secret"));
        assert!(out.contains("us_client"));
    }
}
