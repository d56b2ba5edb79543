//! Line-level definition parser
//!
//! Each line is tried against the RPM/torque grammar first, then against the
//! generic `key=value` grammar. Lines matching neither are skipped.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::{DefinitionError, DefinitionTable, EngineDefinition, Value};
use crate::sample::PerformanceSample;

/// Key of the sample rows. Never stored in the generic table.
pub const RPM_TORQUE_KEY: &str = "RPMTorque";

fn rpm_torque_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*RPMTorque\s*=\s*\(\s*(?P<rpm>[+-]?\d*\.?\d*)\s*,\s*(?P<back>[+-]?\d*\.?\d*)\s*,\s*(?P<torque>[+-]?\d*\.?\d*)\s*\)",
        )
        .expect("RPM/torque grammar is valid")
    })
}

fn key_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^\s*(?P<key>[A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:"(?P<text>[^"]*)"|\((?P<list>[^)]*)\)|(?P<number>[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))\s*(?://.*)?$"#,
        )
        .expect("key/value grammar is valid")
    })
}

/// A classified line
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// An `RPMTorque=(rpm, back torque, torque)` row
    Sample(PerformanceSample),
    /// A generic `key=value` line
    Entry { key: String, value: Value },
}

/// Parse a complete definition file
///
/// Fails on the first line whose grammar matched but whose numbers do not
/// parse; nothing from the file is returned in that case.
pub fn parse_definition(content: &str) -> Result<EngineDefinition, DefinitionError> {
    let mut table = DefinitionTable::new();
    let mut samples = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        match parse_line(line, idx + 1)? {
            Some(Record::Sample(sample)) => samples.push(sample),
            Some(Record::Entry { key, value }) => table.insert(key, value),
            None => {
                tracing::trace!(line = idx + 1, "skipping unrecognized line");
            }
        }
    }

    Ok(EngineDefinition { table, samples })
}

/// Classify a single line. `line_no` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Record>, DefinitionError> {
    if let Some(caps) = rpm_torque_re().captures(line) {
        let rpm = parse_group(&caps, "rpm", line_no)?;
        let back_torque = parse_group(&caps, "back", line_no)?;
        let torque = parse_group(&caps, "torque", line_no)?;
        return Ok(Some(Record::Sample(PerformanceSample::new(
            rpm,
            torque,
            back_torque,
        ))));
    }

    let Some(caps) = key_value_re().captures(line) else {
        return Ok(None);
    };

    let key = &caps["key"];
    if key.eq_ignore_ascii_case(RPM_TORQUE_KEY) {
        return Ok(None);
    }

    let value = if let Some(text) = caps.name("text") {
        Value::Text(text.as_str().to_string())
    } else if let Some(list) = caps.name("list") {
        Value::NumberList(parse_list(list.as_str(), line_no)?)
    } else if let Some(number) = caps.name("number") {
        Value::Number(parse_number(number.as_str(), line_no)?)
    } else {
        return Ok(None);
    };

    Ok(Some(Record::Entry {
        key: key.to_string(),
        value,
    }))
}

fn parse_group(caps: &Captures<'_>, name: &str, line_no: usize) -> Result<f64, DefinitionError> {
    let text = caps.name(name).map(|m| m.as_str()).unwrap_or("");
    parse_number(text, line_no)
}

fn parse_number(text: &str, line_no: usize) -> Result<f64, DefinitionError> {
    let text = text.trim();
    text.strip_prefix('+')
        .unwrap_or(text)
        .parse::<f64>()
        .map_err(|e| DefinitionError::ParseError {
            line: line_no,
            message: format!("invalid number '{}': {}", text, e),
        })
}

fn parse_list(text: &str, line_no: usize) -> Result<Vec<f64>, DefinitionError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| parse_number(part, line_no))
        .collect()
}
