use subex_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Endpoint of the HTTP email delivery API. Emails are only logged
    /// when this is not set.
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    /// Address the reminders are sent from
    pub sender: String,
    /// Maximum number of seconds to wait for a single email to be sent
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret the external scheduler must present to trigger the alerts job
    pub cron_secret: String,
    /// Secret used to verify user tokens
    pub jwt_secret: String,
    pub email: EmailConfig,
    /// When set the alerts job is also triggered in process with this interval
    pub alert_job_interval_secs: Option<u64>,
}

fn secret_from_env(var: &str) -> String {
    match std::env::var(var) {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                var
            );
            let secret = create_random_secret(32);
            info!("{} was generated and set to: {}", var, secret);
            secret
        }
    }
}

/// Parses `value` of the environment variable `var`. Missing values give the
/// default, unparsable or rejected values give the default with a warning.
fn parse_or<T, F>(var: &str, value: Option<String>, default: T, accept: F) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
    F: Fn(&T) -> bool,
{
    let value = match value {
        Some(value) => value,
        None => return default,
    };
    match value.parse::<T>() {
        Ok(parsed) if accept(&parsed) => parsed,
        _ => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, value, default
            );
            default
        }
    }
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display + Copy>(var: &str, default: T) -> T {
    parse_or(var, std::env::var(var).ok(), default, |_| true)
}

fn parse_email_timeout_secs(value: Option<String>) -> u64 {
    // A zero timeout would fail every send
    parse_or("EMAIL_TIMEOUT_SECS", value, 30, |secs| *secs > 0)
}

impl Config {
    pub fn new() -> Self {
        let cron_secret = secret_from_env("CRON_SECRET");
        let jwt_secret = secret_from_env("JWT_SECRET");
        let port = parse_env_or("PORT", 5000_usize);

        let alert_job_interval_secs = match parse_env_or("ALERT_JOB_INTERVAL_SECS", 0_u64) {
            0 => None,
            secs => Some(secs),
        };

        let email = EmailConfig {
            api_url: std::env::var("EMAIL_API_URL").ok(),
            api_token: std::env::var("EMAIL_API_TOKEN").ok(),
            sender: std::env::var("EMAIL_SENDER").unwrap_or_else(|_| "alerts@subex.app".into()),
            timeout_secs: parse_email_timeout_secs(std::env::var("EMAIL_TIMEOUT_SECS").ok()),
        };

        Self {
            port,
            cron_secret,
            jwt_secret,
            email,
            alert_job_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
