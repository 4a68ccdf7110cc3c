use anyhow::anyhow;
use clap::ValueEnum;
use file::ConfigFile;
use hoptrace_core::{defaults, MIN_PROBE_TIMEOUT};
use hoptrace_dns::ResolveMethod;
use serde::Deserialize;
use std::time::Duration;

mod cmd;
mod constants;
mod file;

pub use cmd::Args;
pub use constants::*;

/// How DNS queries will be resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DnsResolveMethodConfig {
    /// Resolve using the OS resolver.
    System,
    /// Resolve using the `/etc/resolv.conf` DNS configuration.
    Resolv,
    /// Resolve using the Google `8.8.8.8` DNS service.
    Google,
    /// Resolve using the Cloudflare `1.1.1.1` DNS service.
    Cloudflare,
}

impl From<DnsResolveMethodConfig> for ResolveMethod {
    fn from(value: DnsResolveMethodConfig) -> Self {
        match value {
            DnsResolveMethodConfig::System => Self::System,
            DnsResolveMethodConfig::Resolv => Self::Resolv,
            DnsResolveMethodConfig::Google => Self::Google,
            DnsResolveMethodConfig::Cloudflare => Self::Cloudflare,
        }
    }
}

/// How to format log data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Display log data in a compact format.
    Compact,
    /// Display log data in a pretty format.
    Pretty,
    /// Display log data in a json format.
    Json,
}

/// How to log event spans.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogSpanEvents {
    /// Do not display event spans.
    Off,
    /// Display enter and exit event spans.
    Active,
    /// Display all event spans.
    Full,
}

/// Fully parsed and validated configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HoptraceConfig {
    pub target: Option<String>,
    pub max_hops: u8,
    pub attempts_per_hop: u8,
    pub per_probe_timeout: Duration,
    pub inter_attempt_delay: Duration,
    pub payload_size: u16,
    pub initial_sequence: u16,
    pub dns_resolve_method: ResolveMethod,
    pub dns_timeout: Duration,
    pub no_dns: bool,
    pub verbose: bool,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub log_span_events: LogSpanEvents,
}

impl HoptraceConfig {
    /// Layer the command line over the config file over the defaults.
    pub fn from(args: Args) -> anyhow::Result<Self> {
        let cfg_file = if let Some(cfg_file) = &args.config_file {
            file::read_config_file(cfg_file)?
        } else if let Some(cfg) = file::read_default_config_file()? {
            cfg
        } else {
            ConfigFile::default()
        };
        Self::build_config(args, cfg_file)
    }

    fn build_config(args: Args, cfg_file: ConfigFile) -> anyhow::Result<Self> {
        let cfg_file_hoptrace = cfg_file.hoptrace.unwrap_or_default();
        let cfg_file_strategy = cfg_file.strategy.unwrap_or_default();
        let cfg_file_dns = cfg_file.dns.unwrap_or_default();
        let max_hops = cfg_layer(
            args.max_hops,
            cfg_file_strategy.max_hops,
            defaults::DEFAULT_MAX_HOPS,
        );
        let attempts_per_hop = cfg_layer(
            args.attempts_per_hop,
            cfg_file_strategy.attempts_per_hop,
            defaults::DEFAULT_ATTEMPTS_PER_HOP,
        );
        let per_probe_timeout = cfg_layer(
            args.per_probe_timeout,
            cfg_file_strategy.per_probe_timeout,
            defaults::DEFAULT_PER_PROBE_TIMEOUT,
        );
        let inter_attempt_delay = cfg_layer(
            args.inter_attempt_delay,
            cfg_file_strategy.inter_attempt_delay,
            defaults::DEFAULT_INTER_ATTEMPT_DELAY,
        );
        let payload_size = cfg_layer(
            args.payload_size,
            cfg_file_strategy.payload_size,
            defaults::DEFAULT_PAYLOAD_SIZE,
        );
        let initial_sequence = cfg_layer(
            args.initial_sequence,
            cfg_file_strategy.initial_sequence,
            defaults::DEFAULT_INITIAL_SEQUENCE,
        );
        let dns_resolve_method = cfg_layer(
            args.dns_resolve_method,
            cfg_file_dns.dns_resolve_method,
            DEFAULT_DNS_RESOLVE_METHOD,
        );
        let dns_timeout = cfg_layer(
            args.dns_timeout,
            cfg_file_dns.dns_timeout,
            DEFAULT_DNS_TIMEOUT,
        );
        let no_dns = cfg_layer_bool_flag(args.no_dns, cfg_file_dns.no_dns, DEFAULT_NO_DNS);
        let log_format = cfg_layer(
            args.log_format,
            cfg_file_hoptrace.log_format,
            DEFAULT_LOG_FORMAT,
        );
        let log_filter = cfg_layer(
            args.log_filter,
            cfg_file_hoptrace.log_filter,
            String::from(DEFAULT_LOG_FILTER),
        );
        let log_span_events = cfg_layer(
            args.log_span_events,
            cfg_file_hoptrace.log_span_events,
            DEFAULT_LOG_SPAN_EVENTS,
        );
        validate_max_hops(max_hops)?;
        validate_attempts(attempts_per_hop)?;
        validate_payload_size(payload_size)?;
        validate_timeout(per_probe_timeout)?;
        Ok(Self {
            target: args.target,
            max_hops,
            attempts_per_hop,
            per_probe_timeout,
            inter_attempt_delay,
            payload_size,
            initial_sequence,
            dns_resolve_method: ResolveMethod::from(dns_resolve_method),
            dns_timeout,
            no_dns,
            verbose: args.verbose,
            log_format,
            log_filter,
            log_span_events,
        })
    }
}

fn cfg_layer<T>(fst: Option<T>, snd: Option<T>, def: T) -> T {
    match (fst, snd) {
        (Some(val), _) | (None, Some(val)) => val,
        (None, None) => def,
    }
}

const fn cfg_layer_bool_flag(fst: bool, snd: Option<bool>, default: bool) -> bool {
    match (fst, snd) {
        (true, _) => true,
        (false, Some(val)) => val,
        (false, None) => default,
    }
}

fn validate_max_hops(max_hops: u8) -> anyhow::Result<()> {
    if max_hops == 0 || max_hops > hoptrace_core::MAX_TTL {
        Err(anyhow!(
            "max-hops ({max_hops}) must be between 1 and {}",
            hoptrace_core::MAX_TTL
        ))
    } else {
        Ok(())
    }
}

fn validate_attempts(attempts_per_hop: u8) -> anyhow::Result<()> {
    if attempts_per_hop == 0 {
        Err(anyhow!("attempts-per-hop must be at least 1"))
    } else {
        Ok(())
    }
}

fn validate_payload_size(payload_size: u16) -> anyhow::Result<()> {
    if payload_size > hoptrace_core::MAX_PAYLOAD_SIZE {
        Err(anyhow!(
            "payload-size ({payload_size}) must not exceed {}",
            hoptrace_core::MAX_PAYLOAD_SIZE
        ))
    } else {
        Ok(())
    }
}

fn validate_timeout(per_probe_timeout: Duration) -> anyhow::Result<()> {
    if per_probe_timeout < MIN_PROBE_TIMEOUT {
        Err(anyhow!(
            "per-probe-timeout {} must be at least {}",
            humantime::format_duration(per_probe_timeout),
            humantime::format_duration(MIN_PROBE_TIMEOUT)
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use super::file::{ConfigDns, ConfigHoptrace, ConfigStrategy};
    use test_case::test_case;

    fn build(args: &[&str], cfg_file: ConfigFile) -> anyhow::Result<HoptraceConfig> {
        HoptraceConfig::build_config(Args::try_parse_from(args)?, cfg_file)
    }

    #[test]
    fn test_defaults() -> anyhow::Result<()> {
        let cfg = build(&["hoptrace"], ConfigFile::default())?;
        assert_eq!(None, cfg.target);
        assert_eq!(30, cfg.max_hops);
        assert_eq!(3, cfg.attempts_per_hop);
        assert_eq!(Duration::from_millis(3000), cfg.per_probe_timeout);
        assert_eq!(Duration::from_millis(100), cfg.inter_attempt_delay);
        assert_eq!(64, cfg.payload_size);
        assert_eq!(1, cfg.initial_sequence);
        assert_eq!(ResolveMethod::System, cfg.dns_resolve_method);
        assert_eq!(Duration::from_secs(5), cfg.dns_timeout);
        assert!(!cfg.no_dns);
        assert!(!cfg.verbose);
        assert_eq!(LogFormat::Compact, cfg.log_format);
        assert_eq!("hoptrace=debug", cfg.log_filter);
        assert_eq!(LogSpanEvents::Off, cfg.log_span_events);
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> anyhow::Result<()> {
        let cfg_file = ConfigFile {
            hoptrace: Some(ConfigHoptrace {
                log_format: Some(LogFormat::Json),
                ..ConfigHoptrace::default()
            }),
            strategy: Some(ConfigStrategy {
                max_hops: Some(16),
                ..ConfigStrategy::default()
            }),
            dns: Some(ConfigDns {
                dns_resolve_method: Some(DnsResolveMethodConfig::Google),
                no_dns: Some(true),
                ..ConfigDns::default()
            }),
        };
        let cfg = build(&["hoptrace"], cfg_file)?;
        assert_eq!(16, cfg.max_hops);
        assert_eq!(LogFormat::Json, cfg.log_format);
        assert_eq!(ResolveMethod::Google, cfg.dns_resolve_method);
        assert!(cfg.no_dns);
        Ok(())
    }

    #[test]
    fn test_args_override_file() -> anyhow::Result<()> {
        let cfg_file = ConfigFile {
            strategy: Some(ConfigStrategy {
                max_hops: Some(16),
                attempts_per_hop: Some(5),
                ..ConfigStrategy::default()
            }),
            ..ConfigFile::default()
        };
        let cfg = build(&["hoptrace", "-m", "8", "host.example"], cfg_file)?;
        assert_eq!(8, cfg.max_hops);
        assert_eq!(5, cfg.attempts_per_hop);
        assert_eq!(Some("host.example"), cfg.target.as_deref());
        Ok(())
    }

    #[test]
    fn test_no_dns_flag_overrides_file() -> anyhow::Result<()> {
        let cfg_file = ConfigFile {
            dns: Some(ConfigDns {
                no_dns: Some(false),
                ..ConfigDns::default()
            }),
            ..ConfigFile::default()
        };
        assert!(build(&["hoptrace", "-n"], cfg_file)?.no_dns);
        Ok(())
    }

    #[test_case(&["hoptrace", "-m", "0"]; "zero max hops")]
    #[test_case(&["hoptrace", "-m", "255"]; "max hops too large")]
    #[test_case(&["hoptrace", "-q", "0"]; "zero attempts")]
    #[test_case(&["hoptrace", "--payload-size", "1473"]; "payload too large")]
    #[test_case(&["hoptrace", "-w", "0s"]; "zero timeout")]
    #[test_case(&["hoptrace", "-w", "1ns"]; "nanosecond timeout")]
    #[test_case(&["hoptrace", "-w", "999us"]; "sub millisecond timeout")]
    fn test_invalid(args: &[&str]) {
        assert!(build(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn test_millisecond_timeout_accepted() -> anyhow::Result<()> {
        let cfg = build(&["hoptrace", "-w", "1ms"], ConfigFile::default())?;
        assert_eq!(MIN_PROBE_TIMEOUT, cfg.per_probe_timeout);
        Ok(())
    }
}
