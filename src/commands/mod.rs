pub mod completions;
pub mod config;
pub mod demo;
pub mod track;

use eyre::Result;

use insayt_track::Properties;

/// Parse `key=value` arguments into a property map
///
/// Values that parse as JSON keep their type (`amount=99` is a number),
/// anything else is taken as a plain string.
pub fn parse_properties(pairs: &[String]) -> Result<Properties> {
    let mut properties = Properties::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| eyre::eyre!("Invalid property '{}', expected key=value", pair))?;
        if key.is_empty() {
            eyre::bail!("Invalid property '{}', key is empty", pair);
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        properties.insert(key.to_string(), value);
    }
    Ok(properties)
}
