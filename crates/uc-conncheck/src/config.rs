//! Environment configuration for the connectivity check.

use std::time::Duration;

use thiserror::Error;

use uc_authz::ClientConfig;

pub const ENV_CLIENT_ID: &str = "USERCLOUDS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "USERCLOUDS_CLIENT_SECRET";
pub const ENV_REGION: &str = "USERCLOUDS_REGION";

const DEFAULT_REGION: &str = "eu-west-1";
const TENANT_HOST: &str = "usercloudstests-connectivity-tests.tenant.userclouds.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct ConncheckConfig {
    pub client_id: String,
    pub client_secret: String,
    pub region: String,
    /// Tenant hostname, sent as a Host override on AuthZ requests
    pub tenant_host: String,
    /// Tenant base URL used for token acquisition
    pub tenant_url: String,
    /// Regional AuthZ API base URL
    pub endpoint_url: String,
}

impl ConncheckConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup (the process
    /// environment in production, a map in tests). Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(ENV_CLIENT_ID)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_CLIENT_ID))?;
        let client_secret = lookup(ENV_CLIENT_SECRET)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_CLIENT_SECRET))?;
        let region = lookup(ENV_REGION)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            client_id,
            client_secret,
            tenant_host: TENANT_HOST.to_string(),
            tenant_url: format!("https://{}", TENANT_HOST),
            endpoint_url: format!("https://aws-{}-eks.userclouds.com", region),
            region,
        })
    }

    /// AuthZ client settings derived from this config.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint_url: self.endpoint_url.clone(),
            tenant_host: Some(self.tenant_host.clone()),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_client_id_is_rejected() {
        let err = ConncheckConfig::from_lookup(lookup_from(&[(ENV_CLIENT_SECRET, "s")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_CLIENT_ID)));
    }

    #[test]
    fn test_missing_client_secret_is_rejected() {
        let err =
            ConncheckConfig::from_lookup(lookup_from(&[(ENV_CLIENT_ID, "c")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_CLIENT_SECRET)));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let err = ConncheckConfig::from_lookup(lookup_from(&[
            (ENV_CLIENT_ID, ""),
            (ENV_CLIENT_SECRET, "s"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_CLIENT_ID)));
    }

    #[test]
    fn test_region_defaults_into_endpoint_url() {
        let config = ConncheckConfig::from_lookup(lookup_from(&[
            (ENV_CLIENT_ID, "c"),
            (ENV_CLIENT_SECRET, "s"),
        ]))
        .unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url, "https://aws-eu-west-1-eks.userclouds.com");
    }

    #[test]
    fn test_explicit_region_overrides_default() {
        let config = ConncheckConfig::from_lookup(lookup_from(&[
            (ENV_CLIENT_ID, "c"),
            (ENV_CLIENT_SECRET, "s"),
            (ENV_REGION, "us-east-1"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint_url, "https://aws-us-east-1-eks.userclouds.com");
    }

    #[test]
    fn test_tenant_url_and_host_agree() {
        let config = ConncheckConfig::from_lookup(lookup_from(&[
            (ENV_CLIENT_ID, "c"),
            (ENV_CLIENT_SECRET, "s"),
        ]))
        .unwrap();
        assert_eq!(config.tenant_url, format!("https://{}", config.tenant_host));

        let client_config = config.client_config();
        assert_eq!(client_config.tenant_host.as_deref(), Some(config.tenant_host.as_str()));
        assert_eq!(client_config.endpoint_url, config.endpoint_url);
    }
}
