
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverrideError {
    #[error("Override '{0}' is missing a '=' assignment")]
    MissingAssignment(String),
    #[error("Override '{0}' has an empty key")]
    EmptyKey(String),
}

/// minimal contract the sweep core needs from a parsed override
/// this keeps the classifier and expander independent of the parser type
pub trait OverrideEntry {
    fn key(&self) -> &str;
    fn is_sweep(&self) -> bool;
    fn values(&self) -> &[String];
}

/// a single `key=value` or `key=v1,v2,...` assignment, immutable once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    key: String,
    values: Vec<String>,
}

impl Override {
    pub fn parse(raw: &str) -> Result<Self, OverrideError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingAssignment(raw.to_owned()))?;

        if key.is_empty() {
            return Err(OverrideError::EmptyKey(raw.to_owned()));
        }

        Ok(Self {
            key: key.to_owned(),
            values: split_values(value),
        })
    }
}

impl OverrideEntry for Override {
    fn key(&self) -> &str {
        &self.key
    }

    /// an override with more than one candidate value sweeps over all of them
    fn is_sweep(&self) -> bool {
        self.values.len() > 1
    }

    fn values(&self) -> &[String] {
        &self.values
    }
}

/// parse a flat list of raw override strings, failing on the first malformed entry
pub fn parse_overrides(raw: &[String]) -> Result<Vec<Override>, OverrideError> {
    raw.iter().map(|entry| Override::parse(entry)).collect()
}

/// split a value list on commas, treating bracketed groups as a single value
/// so `interface_names=[ens32,ens129]` stays one candidate
fn split_values(raw: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for character in raw.chars() {
        match character {
            '[' | '{' | '(' => {
                depth += 1;
                current.push(character);
            }
            ']' | '}' | ')' => {
                depth = depth.saturating_sub(1);
                current.push(character);
            }
            ',' if depth == 0 => {
                values.push(std::mem::take(&mut current));
            }
            _ => current.push(character),
        }
    }
    values.push(current);

    values
}
