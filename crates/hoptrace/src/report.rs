use hoptrace_core::{HopRecord, ProbeSample};
use std::io::Write;
use std::net::IpAddr;

/// The trailing column of a hop that never replied.
pub const TIMED_OUT: &str = "Request timed out.";

/// Render one hop.
///
/// The TTL is right aligned in 3 columns and each sample in 5, with 3
/// spaces between columns.
#[must_use]
pub fn format_hop(hop: &HopRecord) -> String {
    let mut line = format!("{:>3}", hop.ttl.0);
    for sample in &hop.samples {
        line.push_str(&format!("   {:>5}", format_sample(sample)));
    }
    line.push_str("   ");
    line.push_str(&format_responder(hop.addr, hop.hostname.as_deref()));
    line
}

fn format_sample(sample: &ProbeSample) -> String {
    sample.elapsed.map_or_else(
        || String::from("*"),
        |elapsed| format!("{} ms", elapsed.as_millis()),
    )
}

fn format_responder(addr: Option<IpAddr>, hostname: Option<&str>) -> String {
    match (addr, hostname) {
        (None, _) => String::from(TIMED_OUT),
        (Some(addr), Some(name)) if name != addr.to_string() => format!("{name} [{addr}]"),
        (Some(addr), _) => addr.to_string(),
    }
}

/// Render the lines printed before the first hop.
#[must_use]
pub fn format_header(name: &str, addr: IpAddr, max_hops: u8) -> String {
    format!("Tracing route to {name} [{addr}]\nover a maximum of {max_hops} hops:\n")
}

/// Render the lines printed after the last hop.
#[must_use]
pub fn format_footer() -> String {
    String::from("\nTrace complete.\n")
}

/// Writes a trace report as it happens.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self, name: &str, addr: IpAddr, max_hops: u8) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_header(name, addr, max_hops))?;
        self.out.flush()
    }

    pub fn hop(&mut self, hop: &HopRecord) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_hop(hop))?;
        self.out.flush()
    }

    pub fn footer(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_footer())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoptrace_core::{AddressOnly, ProbeOutcome, TimeToLive};
    use std::net::Ipv4Addr;
    use std::time::Duration;

    fn reply(attempt: u8, millis: u64, addr: IpAddr) -> ProbeSample {
        ProbeSample::new(
            attempt,
            ProbeOutcome::Reply {
                elapsed: Duration::from_millis(millis),
                addr,
            },
        )
    }

    // ttl right aligned in 3, each sample right aligned in 5, columns joined by 3 spaces
    #[test]
    fn test_format_resolved_hop() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        let hop = HopRecord {
            ttl: TimeToLive(5),
            samples: vec![
                reply(0, 10, addr),
                ProbeSample::new(1, ProbeOutcome::TimedOut),
                reply(2, 12, addr),
            ],
            addr: Some(addr),
            hostname: Some(String::from("router5.example")),
        };
        assert_eq!(
            "  5   10 ms       *   12 ms   router5.example [10.0.0.5]",
            format_hop(&hop)
        );
    }

    #[test]
    fn test_format_unresolved_hop() {
        let addr = IpAddr::V4(Ipv4Addr::new(172, 16, 0, 1));
        let samples = vec![reply(0, 1, addr), reply(1, 0, addr), reply(2, 1234, addr)];
        let hop = HopRecord::new(TimeToLive(12), samples, &AddressOnly);
        assert_eq!(" 12    1 ms    0 ms   1234 ms   172.16.0.1", format_hop(&hop));
    }

    #[test]
    fn test_format_timed_out_hop() {
        let samples = (0..3)
            .map(|attempt| ProbeSample::new(attempt, ProbeOutcome::TimedOut))
            .collect();
        let hop = HopRecord::new(TimeToLive(30), samples, &AddressOnly);
        assert_eq!(
            " 30       *       *       *   Request timed out.",
            format_hop(&hop)
        );
    }

    #[test]
    fn test_report_layout() -> anyhow::Result<()> {
        let addr = IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34));
        let mut reporter = Reporter::new(Vec::new());
        reporter.header("example.com", addr, 30)?;
        reporter.hop(&HopRecord::new(
            TimeToLive(1),
            vec![reply(0, 3, addr)],
            &AddressOnly,
        ))?;
        reporter.footer()?;
        let output = String::from_utf8(reporter.into_inner())?;
        assert_eq!(
            "Tracing route to example.com [93.184.216.34]\n\
             over a maximum of 30 hops:\n\
             \n  1    3 ms   93.184.216.34\n\
             \n\
             Trace complete.\n\n",
            output
        );
        Ok(())
    }
}
