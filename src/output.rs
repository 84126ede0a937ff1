// src/output.rs
use crate::error::Result;
use crate::types::{AggregatedResults, DorkerError, OutputConfig, OutputFormat};
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn write_results(&self, results: &AggregatedResults) -> Result<()> {
        let rendered = render(self.config.format, results)?;

        match &self.config.file {
            Some(file_path) => self.write_to_file(file_path, &rendered),
            None => self.write_to_stdout(&rendered),
        }
    }

    fn write_to_file(&self, file_path: &str, rendered: &str) -> Result<()> {
        if let Some(parent) = Path::new(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DorkerError::OutputError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        fs::write(file_path, rendered)
            .map_err(|e| DorkerError::OutputError(format!("Failed to write {}: {}", file_path, e)))?;

        info!("Results written to: {}", file_path);
        Ok(())
    }

    fn write_to_stdout(&self, rendered: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .and_then(|_| handle.flush())
            .map_err(|e| DorkerError::OutputError(e.to_string()))
    }
}

/// Render the aggregated results in `format`.
pub fn render(format: OutputFormat, results: &AggregatedResults) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_text(results)),
        OutputFormat::Json => render_json(results),
        OutputFormat::Csv => Ok(render_csv(results)),
    }
}

fn render_text(results: &AggregatedResults) -> String {
    let grouped = results.len() > 1;
    let mut output = String::new();

    for (domain, subdomains) in results {
        if grouped {
            output.push_str(domain);
            output.push_str(":\n");
        }
        for subdomain in subdomains {
            output.push_str(subdomain);
            output.push('\n');
        }
        if grouped {
            output.push('\n');
        }
    }

    output
}

fn render_json(results: &AggregatedResults) -> Result<String> {
    let mut json = serde_json::to_string_pretty(results)
        .map_err(|e| DorkerError::OutputError(format!("Failed to serialize JSON: {}", e)))?;
    json.push('\n');
    Ok(json)
}

fn render_csv(results: &AggregatedResults) -> String {
    let mut output = String::from("Domain,Subdomain\n");
    for (domain, subdomains) in results {
        for subdomain in subdomains {
            output.push_str(&csv_field(domain));
            output.push(',');
            output.push_str(&csv_field(subdomain));
            output.push('\n');
        }
    }
    output
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
