use super::TapConfig;

/// Generates a JSON Schema for the tap configuration.
///
/// The schema includes every option with its type, description and default.
#[must_use]
pub fn generate_schema() -> schemars::Schema { schemars::schema_for!(TapConfig) }

/// Generates a pretty-printed JSON Schema string for the tap configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_produces_valid_json() {
        let schema_json = generate_schema_json();
        assert!(!schema_json.is_empty());

        let parsed: serde_json::Value = serde_json::from_str(&schema_json).unwrap();

        assert_eq!(parsed["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(parsed["title"], "TapConfig");
        assert!(parsed["properties"]["sensitivity"].is_object());
    }

    #[test]
    fn test_generate_schema_returns_schema_object() {
        let schema = generate_schema();
        assert!(schema.as_object().is_some());
    }
}
