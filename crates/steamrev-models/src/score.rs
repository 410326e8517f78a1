use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalize the `weighted_vote_score` wire field into an `f64`.
///
/// Steam has historically emitted this field as a JSON number, a numeric
/// string, or an empty string depending on API vintage. The field is advisory
/// telemetry, so every unparseable shape collapses to `0.0` instead of
/// failing the decode.
pub fn normalize_score(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    }
}

/// serde adapter: decode the raw JSON value first, then normalize.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_score(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_passes_through() {
        assert_eq!(normalize_score(&json!(3.5)), 3.5);
        assert_eq!(normalize_score(&json!(0)), 0.0);
        assert_eq!(normalize_score(&json!(-0.75)), -0.75);
    }

    #[test]
    fn numeric_string_is_parsed() {
        assert_eq!(normalize_score(&json!("3.5")), 3.5);
        assert_eq!(normalize_score(&json!("0.523809523809523796")), 0.523809523809523796);
    }

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(normalize_score(&json!("")), 0.0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(normalize_score(&json!("not-a-number")), 0.0);
        assert_eq!(normalize_score(&json!(null)), 0.0);
        assert_eq!(normalize_score(&json!([1, 2])), 0.0);
        assert_eq!(normalize_score(&json!({"score": 1})), 0.0);
    }
}
