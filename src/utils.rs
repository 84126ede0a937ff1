// src/utils.rs
use crate::types::DorkerError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Reads non-empty, non-comment lines from a file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

/// Hostname of an absolute URL, or `None` when it cannot be parsed or has no host.
pub fn extract_hostname(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()?
        .host_str()
        .map(|host| host.to_string())
}

/// Parse `300`, `1500ms`, `30s`, `5m` or `1h`. A bare number means seconds.
pub fn parse_duration(input: &str) -> Result<Duration, DorkerError> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let value: u64 = digits
        .parse()
        .map_err(|_| DorkerError::InvalidDuration(input.to_string()))?;

    let duration = match unit {
        "" | "s" => Duration::from_secs(value),
        "ms" => Duration::from_millis(value),
        "m" => Duration::from_secs(checked_scale(value, 60, input)?),
        "h" => Duration::from_secs(checked_scale(value, 3600, input)?),
        _ => return Err(DorkerError::InvalidDuration(input.to_string())),
    };

    Ok(duration)
}

fn checked_scale(value: u64, factor: u64, input: &str) -> Result<u64, DorkerError> {
    value
        .checked_mul(factor)
        .ok_or_else(|| DorkerError::InvalidDuration(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("10d").is_err());
        assert!(parse_duration("1.5s").is_err());
        assert!(matches!(
            parse_duration("99999999999999999h"),
            Err(DorkerError::InvalidDuration(_))
        ));
        assert!(parse_duration("99999999999999999999").is_err());
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(
            extract_hostname("https://www.example.com/path?q=1").as_deref(),
            Some("www.example.com")
        );
        assert_eq!(
            extract_hostname("http://api.example.com:8080/").as_deref(),
            Some("api.example.com")
        );
        assert_eq!(extract_hostname("not a url"), None);
        assert_eq!(extract_hostname("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_read_lines_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.com\n\n# staging\n  test.org  ").unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["example.com", "test.org"]);
    }
}
