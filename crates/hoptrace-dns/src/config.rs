use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How DNS queries are resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ResolveMethod {
    /// Resolve using the OS resolver.
    #[default]
    System,
    /// Resolve using the `/etc/resolv.conf` DNS configuration.
    Resolv,
    /// Resolve using the Google `8.8.8.8` DNS service.
    Google,
    /// Resolve using the Cloudflare `1.1.1.1` DNS service.
    Cloudflare,
}

impl Display for ResolveMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Resolv => write!(f, "resolv"),
            Self::Google => write!(f, "google"),
            Self::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

/// Configuration for the `DnsResolver`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    /// The method to use for DNS resolution.
    pub resolve_method: ResolveMethod,
    /// The timeout for DNS resolution.
    ///
    /// Only honoured by the `hickory` based methods.
    pub timeout: Duration,
}

impl Config {
    /// Create a `Config`.
    #[must_use]
    pub const fn new(resolve_method: ResolveMethod, timeout: Duration) -> Self {
        Self {
            resolve_method,
            timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolve_method: ResolveMethod::System,
            timeout: Duration::from_millis(5000),
        }
    }
}

/// A builder for DNS `Config`.
///
/// ```
/// use hoptrace_dns::{Builder, ResolveMethod};
///
/// let config = Builder::new().resolve_method(ResolveMethod::Google).build();
/// assert_eq!(ResolveMethod::Google, config.resolve_method);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new `Builder` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the method to use for DNS resolution.
    #[must_use]
    pub const fn resolve_method(mut self, resolve_method: ResolveMethod) -> Self {
        self.config.resolve_method = resolve_method;
        self
    }

    /// Set the timeout for DNS resolution.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the DNS `Config`.
    #[must_use]
    pub const fn build(self) -> Config {
        self.config
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build();
        assert_eq!(Config::default(), config);
        assert_eq!(Duration::from_secs(5), config.timeout);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Builder::new()
            .resolve_method(ResolveMethod::Google)
            .timeout(Duration::from_millis(250))
            .build();
        assert_eq!(ResolveMethod::Google, config.resolve_method);
        assert_eq!(Duration::from_millis(250), config.timeout);
    }

    #[test_case(ResolveMethod::System, "system")]
    #[test_case(ResolveMethod::Resolv, "resolv")]
    #[test_case(ResolveMethod::Google, "google")]
    #[test_case(ResolveMethod::Cloudflare, "cloudflare")]
    fn test_resolve_method_display(method: ResolveMethod, expected: &str) {
        assert_eq!(expected, method.to_string());
    }
}
