use crate::types::{Config, OutputConfig, OutputFormat};
use crate::utils::{self, parse_duration};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rustdorker",
    version,
    long_version = LONG_VERSION,
    about = "Google dorking across one or more target domains",
    long_about = "RustDorker runs scoped Google Custom Search queries against one or more domains\nand optionally harvests the subdomains that appear in the result URLs.",
    after_help = "Examples:\n  rustdorker -d example.com --subs --format json\n  rustdorker -d example.com --subs --silent\n  rustdorker -d example.com --concurrent 20 --format csv -o results.csv --subs\n  rustdorker -d example.com sub1.example.com sub2.example.com --subs"
)]
pub struct Args {
    /// Free-text dork appended after the site: scope
    #[arg(short = 'q', long = "query", value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Target domain
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Additional target domains
    #[arg(value_name = "DOMAINS")]
    pub extra_domains: Vec<String>,

    /// File containing one domain per line
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub domains_file: Option<PathBuf>,

    /// File to save the results to (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,

    /// Only output found subdomains
    #[arg(long = "subs")]
    pub subdomains: bool,

    /// Number of domains searched at the same time
    #[arg(long = "concurrent", default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrent: u16,

    /// Timeout for the entire search operation (e.g. 90s, 5m, 1h)
    #[arg(long = "timeout", default_value = "5m", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Pause between two result pages of the same domain
    #[arg(long = "delay", default_value = "1s", value_parser = parse_duration)]
    pub delay: Duration,

    /// Verbosity level (0=ERROR, 1=INFO, 2=DEBUG, 3=TRACE)
    #[arg(short = 'v', long = "verbosity", default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub verbosity: u8,

    /// Silent mode, only output results
    #[arg(long = "silent")]
    pub silent: bool,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// HTTP, HTTPS or SOCKS5 proxy for API requests
    #[arg(long = "proxy", value_name = "URL")]
    pub proxy: Option<String>,
}

impl Args {
    /// Read domains from stdin when no other source was given and stdin is piped.
    pub fn use_stdin(&self) -> bool {
        self.domain.is_none()
            && self.extra_domains.is_empty()
            && self.domains_file.is_none()
            && !atty::is(atty::Stream::Stdin)
    }

    /// Every requested domain in order: `-d`, positionals, then `-l` lines.
    pub fn domains(&self) -> io::Result<Vec<String>> {
        let mut domains: Vec<String> = self
            .domain
            .iter()
            .chain(self.extra_domains.iter())
            .map(|d| d.trim().to_string())
            .collect();

        if let Some(path) = &self.domains_file {
            domains.extend(utils::read_lines(path)?);
        }

        if self.use_stdin() {
            for line in io::stdin().lock().lines() {
                let line = line?;
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    domains.push(trimmed.to_string());
                }
            }
        }

        domains.retain(|d| !d.is_empty());
        Ok(domains)
    }

    pub fn to_config(&self) -> Config {
        Config {
            query: self.query.clone(),
            extract_subdomains: self.subdomains,
            concurrency: usize::from(self.concurrent),
            timeout: self.timeout,
            page_delay: self.delay,
            proxy: self.proxy.clone(),
            output: OutputConfig {
                format: self.format,
                file: self.output_file.clone(),
            },
            ..Config::default()
        }
    }
}
