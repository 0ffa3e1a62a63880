use ::config::{ConfigBuilder, Environment, File, builder::DefaultState};
use eyre::{Result, WrapErr};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base URL of the koperasi backend API.
    pub backend_url: Url,
    pub backend_token: SecretString,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Load from `koperasi.toml` (optional) overridden by `KOPERASI_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            ::config::Config::builder()
                .add_source(File::with_name("koperasi").required(false))
                .add_source(Environment::with_prefix("KOPERASI")),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .wrap_err("failed to read configuration")?
            .try_deserialize()
            .wrap_err("invalid configuration")
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend_url", &self.backend_url.as_str())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;
    use secrecy::ExposeSecret;

    fn from_toml(toml: &str) -> Result<Config> {
        Config::from_builder(
            ::config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn reads_toml_with_default_timeout() {
        let config = from_toml(
            r#"
            backend_url = "https://koperasi.example/api/"
            backend_token = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend_url.as_str(), "https://koperasi.example/api/");
        assert_eq!(config.backend_token.expose_secret(), "s3cret");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = from_toml(r#"backend_url = "https://koperasi.example/api/""#);
        assert!(result.is_err());
    }

    #[test]
    fn debug_hides_token() {
        let config = from_toml(
            r#"
            backend_url = "https://koperasi.example/"
            backend_token = "s3cret"
            "#,
        )
        .unwrap();

        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
