//! Typed environment variable management
//!
//! Tunables that have no CLI flag are read from the environment through the
//! [`EnvVar`] trait, which validates each value and supplies its default.

use std::env;
use std::fmt;
use std::time::Duration;

/// Environment variable parse error
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// Accessor for a single environment variable
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// Output and diagnostics
pub mod logging {
    use super::*;

    /// Log level of the diagnostic stream
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "SITEMAP_RSS_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.trim().to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // Any non-empty value disables color
            Ok(!value.is_empty())
        }
    }
}

/// Sitemap and page retrieval
pub mod fetch {
    use super::*;

    /// Per-request timeout for sitemap documents
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "SITEMAP_RSS_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(15));
        const DESCRIPTION: &'static str = "Sitemap request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_positive_usize(value.trim(), Self::NAME, 1, 300)?;
            Ok(Duration::from_secs(seconds as u64))
        }
    }

    /// Child sitemaps fetched at once when reading a sitemap index
    pub struct Concurrency;
    impl EnvVar<usize> for Concurrency {
        const NAME: &'static str = "SITEMAP_RSS_CONCURRENCY";
        const DEFAULT: Option<usize> = Some(10);
        const DESCRIPTION: &'static str = "Maximum concurrent sitemap requests";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value.trim(), Self::NAME, 1, 100)
        }
    }

    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "SITEMAP_RSS_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent header sent with every request";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(default_user_agent()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let user_agent = value.trim();
            if user_agent.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent cannot be empty".to_string(),
                });
            }
            Ok(user_agent.to_string())
        }
    }

    pub fn default_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// Every environment-driven setting, loaded at once
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub timeout: Duration,
    pub concurrency: usize,
    pub user_agent: String,
}

impl EnvConfig {
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: logging::LogLevel::get()?,
            no_color: logging::NoColor::get()?,
            timeout: fetch::Timeout::get()?,
            concurrency: fetch::Concurrency::get()?,
            user_agent: fetch::UserAgent::get()?,
        })
    }
}

/// Help text section listing the recognized variables
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("Environment variables:\n");
    docs.push_str(&format!(
        "  {:<26}{} [default: info]\n",
        logging::LogLevel::NAME,
        logging::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "  {:<26}{}\n",
        logging::NoColor::NAME,
        logging::NoColor::DESCRIPTION
    ));
    docs.push_str(&format!(
        "  {:<26}{} [default: 15]\n",
        fetch::Timeout::NAME,
        fetch::Timeout::DESCRIPTION
    ));
    docs.push_str(&format!(
        "  {:<26}{} [default: 10]\n",
        fetch::Concurrency::NAME,
        fetch::Concurrency::DESCRIPTION
    ));
    docs.push_str(&format!(
        "  {:<26}{} [default: {}]\n",
        fetch::UserAgent::NAME,
        fetch::UserAgent::DESCRIPTION,
        fetch::default_user_agent()
    ));
    docs
}
