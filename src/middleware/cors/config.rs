use std::path::Path;

use anyhow::Context;
use http::Method;
use serde::{Deserialize, Serialize};

/// Methods answered in `Access-Control-Allow-Methods` when none are configured.
pub const DEFAULT_ALLOW_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Declarative CORS policy.
///
/// Every field is optional in serialized form; missing fields take the values
/// of [`CorsConfig::default`].
///
/// ```yaml
/// allow_origins: ["https://app.example.com"]
/// allow_methods: [GET, POST]
/// expose_headers: [ETag]
/// allow_credentials: true
/// max_age: 3600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins, matched exactly and in order. Empty allows any origin.
    pub allow_origins: Vec<String>,
    /// Methods announced to preflight requests
    #[serde(with = "method_list")]
    pub allow_methods: Vec<Method>,
    /// Headers announced to preflight requests. Empty echoes the request's
    /// `Access-Control-Request-Headers`.
    pub allow_headers: Vec<String>,
    /// Response headers readable by the calling script
    pub expose_headers: Vec<String>,
    /// Emit `Access-Control-Allow-Credentials: true`
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds; zero or negative omits the header
    pub max_age: i64,
}

impl Default for CorsConfig {
    /// Any origin, the standard methods, nothing else.
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            allow_methods: DEFAULT_ALLOW_METHODS.to_vec(),
            allow_headers: Vec::new(),
            expose_headers: Vec::new(),
            allow_credentials: false,
            max_age: 0,
        }
    }
}

impl CorsConfig {
    /// Substitute defaults for an absent configuration or absent methods.
    ///
    /// Applying this more than once yields the same value.
    #[must_use]
    pub fn resolve(config: Option<CorsConfig>) -> CorsConfig {
        let mut config = config.unwrap_or_default();
        if config.allow_methods.is_empty() {
            config.allow_methods = DEFAULT_ALLOW_METHODS.to_vec();
        }
        config
    }

    /// Parse a configuration from YAML (or JSON, which YAML accepts).
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML, has fields of the
    /// wrong type, or names a method that is not a valid HTTP token.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(content).context("invalid CORS configuration")?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read CORS config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse CORS config {}", path.display()))
    }

    /// Serialize the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Serde adapter for `Vec<Method>` as a list of method tokens.
mod method_list {
    use http::Method;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(methods: &[Method], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(methods.iter().map(Method::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Method>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|token| {
                Method::from_bytes(token.as_bytes())
                    .map_err(|_| D::Error::custom(format!("invalid HTTP method '{token}'")))
            })
            .collect()
    }
}
