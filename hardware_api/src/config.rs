use std::fmt;

use log::*;

//--------------------------------------       ApiKey        ---------------------------------------------------------
/// The backend API key. Masked in both `Debug` and `Display` output so it cannot leak into logs; the raw value is
/// only reachable through [`ApiKey::reveal`] and the header builder.
#[derive(Clone, Default)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value for a backend request.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

//--------------------------------------    StoreApiConfig   ---------------------------------------------------------
#[derive(Debug, Clone, Default)]
pub struct StoreApiConfig {
    pub base_url: String,
    pub api_key: ApiKey,
}

impl StoreApiConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), api_key: ApiKey::new(api_key) }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("UH_API_BASE_URL").unwrap_or_else(|_| {
            warn!("UH_API_BASE_URL not set, using the production store URL");
            "https://usmanhardware.site/wp-json/ims/v1".to_string()
        });
        let api_key = ApiKey::new(std::env::var("UH_API_KEY").unwrap_or_else(|_| {
            warn!("UH_API_KEY not set, using (probably useless) default");
            "uh_0000000000000000".to_string()
        }));
        Self { base_url: base_url.trim_end_matches('/').to_string(), api_key }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn api_key_never_prints_its_value() {
        let key = ApiKey::new("uh_supersecret");
        assert_eq!(format!("{key:?}"), "****");
        assert_eq!(key.to_string(), "****");
        assert_eq!(key.reveal(), "uh_supersecret");
        assert_eq!(key.bearer(), "Bearer uh_supersecret");
        let config = StoreApiConfig::new("https://example.test/", "uh_supersecret");
        assert_eq!(config.base_url, "https://example.test");
        assert!(!format!("{config:?}").contains("supersecret"));
    }
}
