use crate::config::{DnsResolveMethodConfig, LogFormat, LogSpanEvents};
use clap::builder::Styles;
use clap::Parser;
use std::time::Duration;

/// Trace the route to a host hop by hop.
///
/// With no target an interactive prompt accepts `tracert <host>` commands.
#[derive(Parser, Debug)]
#[command(name = "hoptrace", author, version, about, long_about = None, styles=Styles::styled())]
pub struct Args {
    /// A hostname or IP to trace, omit for the interactive prompt
    pub target: Option<String>,

    /// Config file
    #[arg(short = 'c', long, value_hint = clap::ValueHint::FilePath)]
    pub config_file: Option<String>,

    /// The maximum number of hops to probe [default: 30]
    #[arg(short = 'm', long)]
    pub max_hops: Option<u8>,

    /// The number of probes sent per hop [default: 3]
    #[arg(short = 'q', long)]
    pub attempts_per_hop: Option<u8>,

    /// The time to wait for each probe reply [default: 3s]
    #[arg(short = 'w', long, value_parser = parse_duration)]
    pub per_probe_timeout: Option<Duration>,

    /// The pause after every probe [default: 100ms]
    #[arg(long, value_parser = parse_duration)]
    pub inter_attempt_delay: Option<Duration>,

    /// The size of the echo payload in bytes [default: 64]
    #[arg(long)]
    pub payload_size: Option<u16>,

    /// The sequence number of the first probe [default: 1]
    #[arg(long)]
    pub initial_sequence: Option<u16>,

    /// How to perform DNS queries [default: system]
    #[arg(value_enum, short = 'r', long)]
    pub dns_resolve_method: Option<DnsResolveMethodConfig>,

    /// The maximum time to wait to perform DNS queries [default: 5s]
    #[arg(long, value_parser = parse_duration)]
    pub dns_timeout: Option<Duration>,

    /// Do not reverse resolve hop addresses [default: false]
    #[arg(short = 'n', long)]
    pub no_dns: bool,

    /// The debug log format [default: compact]
    #[arg(value_enum, long)]
    pub log_format: Option<LogFormat>,

    /// The debug log filter [default: hoptrace=debug]
    #[arg(long)]
    pub log_filter: Option<String>,

    /// The debug log span events [default: off]
    #[arg(value_enum, long)]
    pub log_span_events: Option<LogSpanEvents>,

    /// Enable verbose debug logging
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    Ok(humantime::parse_duration(value)?)
}
