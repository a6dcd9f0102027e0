use crate::error::{Result, TrainedDataError};
use std::fmt;
use std::str::FromStr;

/// Parameters of the `config` component.
///
/// The text form is one `name value` pair per line; the value is everything
/// after the first run of whitespace. Blank lines and lines starting with
/// `#` are ignored. Order is preserved and a later definition of a name
/// replaces the earlier one in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LangConfig {
    params: Vec<(String, String)>,
}

impl LangConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text form. Lines naming a parameter without a value are
    /// skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(char::is_whitespace) {
                Some((name, value)) => config.set(name, value.trim_start()),
                None => {
                    tracing::warn!(line = line_no + 1, param = line, "Config parameter has no value");
                }
            }
        }
        config
    }

    /// Parse the raw bytes of a `config` component
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| TrainedDataError::InvalidConfig(format!("Config is not UTF-8: {}", e)))?;
        Ok(Self::parse(text))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn get_parsed<T: FromStr>(&self, name: &str, kind: &str) -> Result<Option<T>> {
        self.get(name)
            .map(|value| {
                value.parse().map_err(|_| {
                    TrainedDataError::InvalidConfig(format!(
                        "Parameter {} = {:?} is not a valid {}",
                        name, value, kind
                    ))
                })
            })
            .transpose()
    }

    /// Boolean parameter: `1`/`T`/`true` or `0`/`F`/`false` (case-insensitive)
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        match value.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(Some(true)),
            "0" | "f" | "false" => Ok(Some(false)),
            _ => Err(TrainedDataError::InvalidConfig(format!(
                "Parameter {} = {:?} is not a valid bool",
                name, value
            ))),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        self.get_parsed(name, "integer")
    }

    pub fn get_double(&self, name: &str) -> Result<Option<f64>> {
        self.get_parsed(name, "number")
    }

    /// Set a parameter, keeping its position if it already exists
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.params.iter().position(|(key, _)| key == name)?;
        Some(self.params.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Render to the text form, one parameter per line
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LangConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.params {
            writeln!(f, "{} {}", name, value)?;
        }
        Ok(())
    }
}

impl FromStr for LangConfig {
    type Err = TrainedDataError;

    fn from_str(text: &str) -> Result<Self> {
        Ok(Self::parse(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# LSTM only
tessedit_ocr_engine_mode 1
load_system_dawg  F
textord_min_xheight 8.5
page_separator
preserve_interword_spaces 0
tessedit_char_blacklist a b c
";

    #[test]
    fn test_parse_and_typed_getters() {
        let config = LangConfig::parse(SAMPLE);
        assert_eq!(config.len(), 5);
        assert_eq!(config.get_int("tessedit_ocr_engine_mode").unwrap(), Some(1));
        assert_eq!(config.get_bool("load_system_dawg").unwrap(), Some(false));
        assert_eq!(config.get_double("textord_min_xheight").unwrap(), Some(8.5));
        assert_eq!(config.get("tessedit_char_blacklist"), Some("a b c"));
        assert_eq!(config.get("page_separator"), None);
        assert_eq!(config.get_int("missing").unwrap(), None);
    }

    #[test]
    fn test_bad_typed_value() {
        let config = LangConfig::parse("tessedit_ocr_engine_mode lstm\n");
        assert!(matches!(
            config.get_int("tessedit_ocr_engine_mode").unwrap_err(),
            TrainedDataError::InvalidConfig(_)
        ));
        assert!(config.get_bool("tessedit_ocr_engine_mode").is_err());
    }

    #[test]
    fn test_set_remove_and_render() {
        let mut config = LangConfig::parse("a 1\nb 2\n");
        config.set("a", "3");
        config.set("c", "4");
        assert_eq!(config.remove("b").as_deref(), Some("2"));
        assert_eq!(config.remove("b"), None);
        assert_eq!(config.to_text(), "a 3\nc 4\n");
        assert_eq!(LangConfig::parse(&config.to_text()), config);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        assert!(LangConfig::from_bytes(&[0x61, 0x20, 0xff]).is_err());
        assert_eq!(LangConfig::from_bytes(b"").unwrap(), LangConfig::new());
    }
}
