//! Render scraped stick tables in the Prometheus text exposition format.

use std::fmt::Write;

use crate::connection::ConnectionBuilder;
use crate::errors::Result;
use crate::models::{Record, ScrapeResult};
use crate::scraper::Scraper;

/// Which entry fields to export. Fixed for the lifetime of the process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderConfig {
    /// General purpose counter that marks a client as blocked once above zero.
    pub gpc: String,
    /// Request rate counter, e.g. `http_req_rate(10000)`.
    pub req_rate: String,
    /// Added as an `instance` label to every sample when set.
    pub instance: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gpc: "gpc0".to_string(),
            req_rate: "http_req_rate(10000)".to_string(),
            instance: None,
        }
    }
}

impl RenderConfig {
    /// `,instance="..."`, appended after the per entry labels.
    fn instance_suffix(&self) -> String {
        self.instance
            .as_ref()
            .map(|instance| format!(",instance=\"{}\"", instance))
            .unwrap_or_default()
    }

    /// `{instance="..."}`, the whole label set of the summary samples.
    fn instance_labels(&self) -> String {
        self.instance
            .as_ref()
            .map(|instance| format!("{{instance=\"{}\"}}", instance))
            .unwrap_or_default()
    }
}

/// Counts and sample lines gathered while walking every entry of every table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accumulator {
    pub connected: u64,
    pub blocked: u64,
    pub gpc_lines: String,
    pub req_rate_lines: String,
    pub blocked_lines: String,
}

impl Accumulator {
    /// Fold one table entry into the accumulator. Entries without a `key` are ignored.
    pub fn observe(mut self, config: &RenderConfig, table: &str, record: &Record) -> Self {
        let key = match record.get("key") {
            Some(key) => key,
            None => return self,
        };
        self.connected += 1;

        let labels = format!(
            "frontend=\"{}\",ip=\"{}\"{}",
            table,
            key,
            config.instance_suffix()
        );

        if let Some(gpc) = record.get(&config.gpc) {
            let _ = writeln!(self.gpc_lines, "connected_ip_gpc{{{}}} {}", labels, gpc);

            if gpc.parse::<i32>().map_or(false, |count| count > 0) {
                self.blocked += 1;
                let _ = writeln!(self.blocked_lines, "blocked_ip{{{}}} {}", labels, gpc);
            }
        }

        if let Some(rate) = record.get(&config.req_rate) {
            let _ = writeln!(
                self.req_rate_lines,
                "http_request_rate_per_ip{{{}}} {}",
                labels, rate
            );
        }

        self
    }

    /// Split the accumulated state into the output blocks, in exposition order.
    pub fn into_blocks(self, config: &RenderConfig) -> Vec<Block> {
        let instance = config.instance_labels();
        vec![
            Block::new(
                "connected_ips",
                "Amount of Connected IPs",
                "connected_ips",
                "untyped",
                format!("connected_ips{} {}\n", instance, self.connected),
            ),
            // HELP and TYPE name different metrics here, matching existing dashboards.
            Block::new(
                "blocked_ip",
                "Amount of currently blocked IPs",
                "blocked_ips",
                "untyped",
                format!("blocked_ips{} {}\n", instance, self.blocked),
            ),
            Block::new(
                "connected_ip_gpc",
                "currently connected_ip gpc_counter",
                "connected_ip_gpc",
                "gauge",
                self.gpc_lines,
            ),
            Block::new(
                "http_request_rate_per_ip",
                "currently connected_ip http_request_rate",
                "http_request_rate_per_ip",
                "gauge",
                self.req_rate_lines,
            ),
            Block::new(
                "blocked_ip",
                "Currently blocked IPs",
                "blocked_ip",
                "gauge",
                self.blocked_lines,
            ),
        ]
    }
}

/// One metric family: its HELP and TYPE comments followed by its samples.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    pub help_name: &'static str,
    pub help: &'static str,
    pub type_name: &'static str,
    pub kind: &'static str,
    pub samples: String,
}

impl Block {
    fn new(
        help_name: &'static str,
        help: &'static str,
        type_name: &'static str,
        kind: &'static str,
        samples: String,
    ) -> Self {
        Self {
            help_name,
            help,
            type_name,
            kind,
            samples,
        }
    }

    pub fn write_to(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.help_name, self.help);
        let _ = writeln!(out, "# TYPE {} {}", self.type_name, self.kind);
        out.push_str(&self.samples);
    }
}

/// Render an already scraped set of tables.
pub fn render(config: &RenderConfig, scrape: &ScrapeResult) -> String {
    let acc = scrape
        .iter()
        .flat_map(|table| {
            table
                .records
                .values()
                .map(move |record| (table.name.as_str(), record))
        })
        .fold(Accumulator::default(), |acc, (table, record)| {
            acc.observe(config, table, record)
        });

    let mut out = String::new();
    for block in acc.into_blocks(config) {
        block.write_to(&mut out);
    }
    out
}

/// Scrape every table over the control socket and render the result.
///
/// Nothing is rendered unless every table could be read.
///
/// # Examples
/// ```no_run
/// use haproxy_table_exporter::{prepare_output, RenderConfig, Scraper, UnixSocketBuilder};
///
/// let scraper = Scraper::new(UnixSocketBuilder::default());
/// let body = prepare_output(&scraper, &RenderConfig::default()).expect("Scrape failed");
/// print!("{}", body);
/// ```
pub fn prepare_output<B: ConnectionBuilder>(
    scraper: &Scraper<B>,
    config: &RenderConfig,
) -> Result<String> {
    let scrape = scraper.scrape_all()?;
    Ok(render(config, &scrape))
}
