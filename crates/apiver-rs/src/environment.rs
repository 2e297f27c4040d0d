//! Deployment environment

use std::fmt;

/// Environment variable selecting the deployment profile
pub const ENV_VAR: &str = "APIVER_ENV";

/// Deployment profile of the service
///
/// Detected from `APIVER_ENV`. It decides the default log level. Internal
/// error details are logged at `debug`, so production logs leave them out.
///
/// ```ignore
/// use apiver_rs::Environment;
///
/// let env = Environment::current();
/// if env.is_production() {
///     // quieter logging
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// `debug` logging
    Development,
    /// `info` logging
    Production,
    /// Any other profile name
    Custom(String),
}

impl Environment {
    /// Detect the environment from `APIVER_ENV`
    ///
    /// `production`/`prod` and `development`/`dev` are recognised; an unset
    /// variable means development and anything else is [`Environment::Custom`].
    pub fn current() -> Self {
        Self::from_name(std::env::var(ENV_VAR).ok().as_deref())
    }

    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Self::Production,
            Some("development") | Some("dev") | None => Self::Development,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    ///
    /// - Development: `debug`
    /// - Production and custom profiles: `info`
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production | Self::Custom(_) => "info",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_profiles() {
        assert_eq!(Environment::from_name(None), Environment::Development);
        assert_eq!(Environment::from_name(Some("dev")), Environment::Development);
        assert_eq!(Environment::from_name(Some("prod")), Environment::Production);
        assert_eq!(
            Environment::from_name(Some("staging")),
            Environment::Custom("staging".to_string())
        );
    }

    #[test]
    fn production_is_quiet() {
        let env = Environment::Production;
        assert!(env.is_production());
        assert_eq!(env.default_log_level(), "info");
        assert_eq!(env.to_string(), "production");
    }

    #[test]
    fn custom_profiles_log_at_info() {
        let env = Environment::Custom("staging".to_string());
        assert!(!env.is_development());
        assert_eq!(env.default_log_level(), "info");
        assert_eq!(env.as_str(), "staging");
    }
}
