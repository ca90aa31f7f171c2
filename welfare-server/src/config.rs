//! Server configuration
//!
//! | Env var | Default | Notes |
//! |---------|---------|-------|
//! | HTTP_HOST | 0.0.0.0 | |
//! | HTTP_PORT | 5000 | |
//! | ENVIRONMENT | development | development / staging / production |
//! | STRIPE_SECRET_KEY | dev placeholder | required outside development |
//! | STRIPE_WEBHOOK_SECRET | unset | webhook signatures unchecked when unset |
//! | STRIPE_API_BASE | https://api.stripe.com | |
//! | PAYMENT_TIMEOUT_SECS | 15 | bound on every payment provider call |
//! | DONATION_CURRENCY | usd | |
//! | DONATION_DESCRIPTION | Donation to Deaf Welfare Society | |
//! | MAX_BODY_BYTES | 65536 | |
//! | LOG_DIR | unset | daily rolling file output when the directory exists |
//! | LOG_JSON | false | |

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<String>,
    /// Stripe REST API base URL
    pub stripe_api_base: String,
    /// Timeout applied to every payment provider request
    pub payment_timeout: Duration,
    /// ISO currency code (lowercase) used for donations
    pub currency: String,
    /// Statement description attached to each payment intent
    pub donation_description: String,
    /// Maximum accepted request body size
    pub max_body_bytes: usize,
    pub log_dir: Option<String>,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 5000,
            environment: "development".into(),
            stripe_secret_key: "dev-STRIPE_SECRET_KEY-not-for-production".into(),
            stripe_webhook_secret: None,
            stripe_api_base: "https://api.stripe.com".into(),
            payment_timeout: Duration::from_secs(15),
            currency: "usd".into(),
            donation_description: "Donation to Deaf Welfare Society".into(),
            max_body_bytes: 64 * 1024,
            log_dir: None,
            log_json: false,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        Ok(Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: Self::parsed("HTTP_PORT", defaults.http_port),
            stripe_secret_key: Self::require_secret("STRIPE_SECRET_KEY", &environment)?,
            stripe_webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.stripe_api_base),
            payment_timeout: Duration::from_secs(Self::parsed(
                "PAYMENT_TIMEOUT_SECS",
                defaults.payment_timeout.as_secs(),
            )),
            currency: std::env::var("DONATION_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or(defaults.currency),
            donation_description: std::env::var("DONATION_DESCRIPTION")
                .unwrap_or(defaults.donation_description),
            max_body_bytes: Self::parsed("MAX_BODY_BYTES", defaults.max_body_bytes),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            log_json: Self::parsed("LOG_JSON", defaults.log_json),
            environment,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.currency, "usd");
        assert_eq!(config.payment_timeout, Duration::from_secs(15));
        assert!(config.stripe_webhook_secret.is_none());
    }

    #[test]
    fn test_require_secret_falls_back_in_development() {
        let val = Config::require_secret("WELFARE_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-WELFARE_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_errors_in_production() {
        let err = Config::require_secret("WELFARE_TEST_UNSET_SECRET", "production").unwrap_err();
        assert!(err.to_string().contains("must be set in production"));
    }
}
