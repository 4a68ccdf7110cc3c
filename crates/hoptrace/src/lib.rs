#![forbid(unsafe_code)]

use clap::Parser;
use config::{Args, HoptraceConfig};
use std::process;

mod app;
mod config;

/// Parsing of interactive command lines.
pub mod command;

/// Rendering of trace output.
pub mod report;

/// Run the hoptrace application.
pub fn hoptrace() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = HoptraceConfig::from(args)?;
    let pid = u16::try_from(process::id() % u32::from(u16::MAX))?;
    app::run_hoptrace(&cfg, pid)
}
