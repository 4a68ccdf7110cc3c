use crate::command::{self, Command, USAGE};
use crate::config::{HoptraceConfig, LogFormat, LogSpanEvents};
use crate::report::Reporter;
use hoptrace_core::{
    resolve_target, AddressOnly, Builder, HopResolver, ReverseDns, Socket, TraceSummary, Tracer,
};
use hoptrace_dns::DnsResolver;
use std::io::{self, BufRead, Write};
use std::net::IpAddr;
use tracing_subscriber::fmt::format::FmtSpan;

const PROMPT: &str = "hoptrace> ";

/// Run the hoptrace application.
pub fn run_hoptrace(cfg: &HoptraceConfig, pid: u16) -> anyhow::Result<()> {
    configure_logging(cfg);
    let resolver = start_dns_resolver(cfg)?;
    let mut trace_ids = TraceIds::new(pid);
    if let Some(target) = &cfg.target {
        trace_host(cfg, &resolver, target, trace_ids.next_id())?;
        Ok(())
    } else {
        run_prompt(cfg, &resolver, &mut trace_ids)
    }
}

/// Read commands until `exit`, `quit` or end of input.
fn run_prompt(
    cfg: &HoptraceConfig,
    resolver: &DnsResolver,
    trace_ids: &mut TraceIds,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            println!();
            break;
        };
        match command::parse(&line) {
            Command::Empty => {}
            Command::Exit => break,
            Command::Usage => eprintln!("error: {USAGE}"),
            Command::Trace(host) => {
                if let Err(err) = trace_host(cfg, resolver, host, trace_ids.next_id()) {
                    tracing::debug!(?err, host, "trace failed");
                    eprintln!("error: {err:#}");
                }
            }
        }
    }
    Ok(())
}

/// Resolve `host`, trace to it and stream the report to stdout.
fn trace_host(
    cfg: &HoptraceConfig,
    resolver: &DnsResolver,
    host: &str,
    trace_id: u16,
) -> anyhow::Result<TraceSummary> {
    let addr = resolve_target(resolver, host)?;
    let reverse_dns = ReverseDns::new(resolver);
    let names: &dyn HopResolver = if cfg.no_dns {
        &AddressOnly
    } else {
        &reverse_dns
    };
    let tracer = Builder::new(addr)
        .max_hops(cfg.max_hops)
        .attempts_per_hop(cfg.attempts_per_hop)
        .per_probe_timeout(cfg.per_probe_timeout)
        .inter_attempt_delay(cfg.inter_attempt_delay)
        .payload_size(cfg.payload_size)
        .trace_identifier(trace_id)
        .initial_sequence(cfg.initial_sequence)
        .build()?;
    report_trace(&tracer, Tracer::open_socket, names, io::stdout().lock())
}

/// Open the socket, then stream the header, each hop and the footer to `out`.
///
/// Nothing is written if the socket cannot be opened.
fn report_trace<S, O, W>(
    tracer: &Tracer,
    open: O,
    names: &dyn HopResolver,
    out: W,
) -> anyhow::Result<TraceSummary>
where
    S: Socket,
    O: FnOnce() -> hoptrace_core::Result<S>,
    W: Write,
{
    let socket = open()?;
    let addr = IpAddr::V4(tracer.target_addr());
    let mut reporter = Reporter::new(out);
    reporter.header(&names.resolve(addr), addr, tracer.config().max_hops.0)?;
    let mut write_err = None;
    let summary = tracer.trace(socket, names, |hop| {
        if write_err.is_none() {
            write_err = reporter.hop(hop).err();
        }
    })?;
    if let Some(err) = write_err {
        return Err(err.into());
    }
    reporter.footer()?;
    tracing::debug!(?summary, %addr, "trace complete");
    Ok(summary)
}

/// Hands out a distinct `ICMP` identifier for each trace of this process.
#[derive(Debug)]
struct TraceIds {
    pid: u16,
    count: u16,
}

impl TraceIds {
    const fn new(pid: u16) -> Self {
        Self { pid, count: 0 }
    }

    fn next_id(&mut self) -> u16 {
        let id = self.pid.wrapping_add(self.count);
        self.count = self.count.wrapping_add(1);
        id
    }
}

/// Start the DNS resolver.
fn start_dns_resolver(cfg: &HoptraceConfig) -> anyhow::Result<DnsResolver> {
    let config = hoptrace_dns::Builder::new()
        .resolve_method(cfg.dns_resolve_method)
        .timeout(cfg.dns_timeout)
        .build();
    Ok(DnsResolver::start(config)?)
}

fn configure_logging(cfg: &HoptraceConfig) {
    if cfg.verbose {
        let fmt_span = match cfg.log_span_events {
            LogSpanEvents::Off => FmtSpan::NONE,
            LogSpanEvents::Active => FmtSpan::ACTIVE,
            LogSpanEvents::Full => FmtSpan::FULL,
        };
        match cfg.log_format {
            LogFormat::Compact => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .compact()
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .pretty()
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_writer(io::stderr)
                    .with_span_events(fmt_span)
                    .with_env_filter(&cfg.log_filter)
                    .json()
                    .init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoptrace_core::{Error, IoError};
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;

    const TARGET: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

    /// Every probe is answered by the target.
    struct FirstHopSocket;

    impl Socket for FirstHopSocket {
        fn new_icmp_socket_ipv4() -> Result<Self, IoError> {
            Ok(Self)
        }
        fn set_ttl(&mut self, _ttl: u32) -> Result<(), IoError> {
            Ok(())
        }
        fn set_read_timeout(&mut self, _timeout: Duration) -> Result<(), IoError> {
            Ok(())
        }
        fn send_to(&mut self, _buf: &[u8], _addr: SocketAddr) -> Result<(), IoError> {
            Ok(())
        }
        fn recv_from(&mut self, _buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>), IoError> {
            Ok((0, Some(SocketAddr::new(IpAddr::V4(TARGET), 0))))
        }
    }

    fn tracer() -> anyhow::Result<Tracer> {
        Ok(Builder::new(IpAddr::V4(TARGET))
            .inter_attempt_delay(Duration::ZERO)
            .build()?)
    }

    #[test]
    fn test_nothing_reported_without_socket() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let result = report_trace::<FirstHopSocket, _, _>(
            &tracer()?,
            || Err(Error::SocketUnavailable(String::from("denied"))),
            &AddressOnly,
            &mut out,
        );
        let err = result.err().map(|err| err.downcast::<Error>());
        assert!(matches!(err, Some(Ok(Error::SocketUnavailable(_)))));
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_report_follows_socket_open() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let summary = report_trace(
            &tracer()?,
            || Ok(FirstHopSocket),
            &AddressOnly,
            &mut out,
        )?;
        assert_eq!(1, summary.hops);
        let report = String::from_utf8(out)?;
        assert!(report.starts_with("Tracing route to 10.0.0.1 [10.0.0.1]\n"));
        assert!(report.contains("\n  1 "));
        assert!(report.ends_with("Trace complete.\n\n"));
        Ok(())
    }

    #[test]
    fn test_trace_ids_are_distinct() {
        let mut ids = TraceIds::new(4000);
        assert_eq!(4000, ids.next_id());
        assert_eq!(4001, ids.next_id());
        assert_eq!(4002, ids.next_id());
    }

    #[test]
    fn test_trace_ids_wrap() {
        let mut ids = TraceIds::new(u16::MAX);
        assert_eq!(u16::MAX, ids.next_id());
        assert_eq!(0, ids.next_id());
    }
}
