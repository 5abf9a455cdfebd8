use serde_json::Value;

/// Flat key/value view of an environment report, for display.
///
/// Nothing in the connection path calls this; reports reach the observer
/// as raw text and the presentation layer decides whether to parse them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentReadings {
    /// Readings in key order.
    pub fields: Vec<(String, Value)>,
}

impl EnvironmentReadings {
    /// Parse a report such as `{"temp":21.5,"hum":40}`.
    ///
    /// Returns None unless the text is a JSON object.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str(text.trim()).ok()? {
            Value::Object(map) => Some(Self {
                fields: map.into_iter().collect(),
            }),
            _ => None,
        }
    }

    /// `key = value` lines, strings unquoted.
    pub fn to_lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key} = {s}"),
                other => format!("{key} = {other}"),
            })
            .collect()
    }
}
