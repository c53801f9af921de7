//! Minimal TOML parser for the monitor configuration
//!
//! Handles only the subset `breathwatch.toml` uses:
//!
//! - `[detector]`, `[alert]` and `[sensor]` section headers
//! - `key = integer` pairs, with optional `_` digit separators
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are absent keep their default values. The parsed
//! configuration is validated before it is returned.

use super::types::{BreathwatchConfig, ConfigError};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header (1-based line number)
    InvalidSection(usize),
    /// Key not known in the current section
    UnknownKey(usize),
    /// Value is not an integer or is out of range
    InvalidValue(usize),
    /// Line is neither a header nor `key = value`
    MalformedLine(usize),
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Detector,
    Alert,
    Sensor,
}

/// Parse TOML configuration into a validated [`BreathwatchConfig`]
pub fn parse_config(input: &str) -> Result<BreathwatchConfig, ParseError> {
    let mut config = BreathwatchConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::MalformedLine(line_no));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MalformedLine(line_no))?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a section name like "detector"
fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "detector" => Some(Section::Detector),
        "alert" => Some(Section::Alert),
        "sensor" => Some(Section::Sensor),
        _ => None,
    }
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` separators
fn parse_int<T: TryFrom<i64>>(value: &str, line_no: usize) -> Result<T, ParseError> {
    let invalid = ParseError::InvalidValue(line_no);

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(invalid);
    }

    let mut acc: i64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(invalid)?;
        acc = acc
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or(invalid)?;
    }

    let signed = if negative { -acc } else { acc };
    T::try_from(signed).map_err(|_| invalid)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    config: &mut BreathwatchConfig,
    section: Section,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Detector, "window_size") => {
            config.detector.window_size = parse_int(value, line_no)?;
        }
        (Section::Detector, "diff_threshold_us") => {
            config.detector.diff_threshold_us = parse_int(value, line_no)?;
        }
        (Section::Alert, "timeout_us") => {
            config.alert.timeout_us = parse_int(value, line_no)?;
        }
        (Section::Sensor, "trigger_pulse_us") => {
            config.sensor.trigger_pulse_us = parse_int(value, line_no)?;
        }
        (Section::Sensor, "poll_interval_ms") => {
            config.sensor.poll_interval_ms = parse_int(value, line_no)?;
        }
        _ => return Err(ParseError::UnknownKey(line_no)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Breathing monitor tuning

[detector]
window_size = 12        # iterations between baseline refreshes
diff_threshold_us = 25

[alert]
timeout_us = 15_000_000

[sensor]
trigger_pulse_us = 10
poll_interval_ms = 50
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.detector.window_size, 12);
        assert_eq!(config.detector.diff_threshold_us, 25);
        assert_eq!(config.alert.timeout_us, 15_000_000);
        assert_eq!(config.sensor.trigger_pulse_us, 10);
        assert_eq!(config.sensor.poll_interval_ms, 50);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[alert]\ntimeout_us = 5_000_000\n").unwrap();
        assert_eq!(config.alert.timeout_us, 5_000_000);
        assert_eq!(config.detector, BreathwatchConfig::default().detector);
        assert_eq!(config.sensor, BreathwatchConfig::default().sensor);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), BreathwatchConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[detector]\nwindow_size = 10\n[display]\n"),
            Err(ParseError::InvalidSection(3))
        );
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(
            parse_config("window_size = 10"),
            Err(ParseError::UnknownKey(1))
        );
    }

    #[test]
    fn test_key_in_wrong_section() {
        assert_eq!(
            parse_config("[alert]\nwindow_size = 10"),
            Err(ParseError::UnknownKey(2))
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[detector]\nwindow_size = ten"),
            Err(ParseError::InvalidValue(2))
        );
        // u16 overflow
        assert_eq!(
            parse_config("[detector]\nwindow_size = 70000"),
            Err(ParseError::InvalidValue(2))
        );
        // Negative into unsigned
        assert_eq!(
            parse_config("[alert]\ntimeout_us = -1"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[alert]\ntimeout_us = _100"),
            Err(ParseError::InvalidValue(2))
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_config("[detector\nwindow_size = 10"),
            Err(ParseError::MalformedLine(1))
        );
        assert_eq!(
            parse_config("[detector]\nwindow_size"),
            Err(ParseError::MalformedLine(2))
        );
        assert_eq!(
            parse_config("[detector]\nwindow_size ="),
            Err(ParseError::MalformedLine(2))
        );
    }

    #[test]
    fn test_rejects_syntax_outside_subset() {
        assert_eq!(
            parse_config("[detector]\nwindow_size = 0xA"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("detector.window_size = 12"),
            Err(ParseError::UnknownKey(1))
        );
        assert_eq!(
            parse_config("detector = { window_size = 12 }"),
            Err(ParseError::UnknownKey(1))
        );
    }

    #[test]
    fn test_validation_failure_is_reported() {
        assert_eq!(
            parse_config("[detector]\ndiff_threshold_us = -5"),
            Err(ParseError::Invalid(ConfigError::NegativeThreshold))
        );
        assert_eq!(
            parse_config("[detector]\nwindow_size = 0"),
            Err(ParseError::Invalid(ConfigError::ZeroWindow))
        );
        assert_eq!(
            parse_config("[detector]\nwindow_size = 65535"),
            Err(ParseError::Invalid(ConfigError::WindowTooLarge))
        );
    }

    #[test]
    fn test_parse_int_separators_and_sign() {
        assert_eq!(parse_int::<u64>("10_000_000", 1), Ok(10_000_000));
        assert_eq!(parse_int::<i32>("-30", 1), Ok(-30));
        assert_eq!(parse_int::<i32>("+30", 1), Ok(30));
        assert_eq!(parse_int::<i32>("", 1), Err(ParseError::InvalidValue(1)));
        assert_eq!(parse_int::<i32>("3.5", 1), Err(ParseError::InvalidValue(1)));
    }
}
