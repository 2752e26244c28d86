use std::collections::HashMap;
use anyhow::{anyhow, Result};

/// A numeric text field as seen at computation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericInput {
    Empty,
    Invalid,
    Value(f64),
}

impl NumericInput {
    /// Interprets raw field text. Only finite decimal numbers count as values.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return NumericInput::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => NumericInput::Value(v),
            _ => NumericInput::Invalid,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            NumericInput::Value(v) => Some(v),
            NumericInput::Empty | NumericInput::Invalid => None,
        }
    }
}

pub fn parse_numeric(text: &str) -> Option<f64> {
    NumericInput::parse(text).value()
}

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Splits words into a free-text name and `key:value` metadata.
///
/// A word only counts as metadata when its key expands to one of `known_keys`;
/// metadata keys come back expanded. Anything else, `Ch:1` included, stays in
/// the name.
pub fn parse_args(args: &[String], known_keys: &[&str]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if let Ok(full_key) = expand_key(&key.to_lowercase(), known_keys) {
                metadata.insert(full_key, value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_values() {
        assert_eq!(NumericInput::parse("85"), NumericInput::Value(85.0));
        assert_eq!(NumericInput::parse("  92.5 "), NumericInput::Value(92.5));
        assert_eq!(NumericInput::parse("-10"), NumericInput::Value(-10.0));
        assert_eq!(NumericInput::parse(".5"), NumericInput::Value(0.5));
    }

    #[test]
    fn test_parse_numeric_failures() {
        assert_eq!(NumericInput::parse(""), NumericInput::Empty);
        assert_eq!(NumericInput::parse("   "), NumericInput::Empty);
        assert_eq!(NumericInput::parse("abc"), NumericInput::Invalid);
        assert_eq!(NumericInput::parse("85%"), NumericInput::Invalid);
        assert_eq!(NumericInput::parse("inf"), NumericInput::Invalid);
        assert_eq!(NumericInput::parse("NaN"), NumericInput::Invalid);
        assert_eq!(parse_numeric("1e400"), None);
    }

    #[test]
    fn test_parse_row_args() {
        let args = vec![
            "Final".to_string(),
            "exam".to_string(),
            "g:88".to_string(),
            "weight:40".to_string(),
        ];
        let parsed = parse_args(&args, &["name", "grade", "weight"]);
        assert_eq!(parsed.name, "Final exam");
        assert_eq!(parsed.metadata.get("grade"), Some(&"88".to_string()));
        assert_eq!(parsed.metadata.get("weight"), Some(&"40".to_string()));
    }

    #[test]
    fn test_unknown_keys_stay_in_name() {
        let args = vec![
            "Ch:1".to_string(),
            "quiz".to_string(),
            ":x".to_string(),
            "G:90".to_string(),
        ];
        let parsed = parse_args(&args, &["name", "grade", "weight"]);
        assert_eq!(parsed.name, "Ch:1 quiz :x");
        assert_eq!(parsed.metadata.len(), 1);
        assert_eq!(parsed.metadata.get("grade"), Some(&"90".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["name", "grade", "weight"];

        assert_eq!(expand_key("g", &candidates).unwrap(), "grade");
        assert_eq!(expand_key("w", &candidates).unwrap(), "weight");
        assert_eq!(expand_key("name", &candidates).unwrap(), "name");

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
        assert!(expand_key("", &candidates).is_err());
    }
}
