//! Codec - メッセージ本文を ResultRecord に変換
//!
//! Field names are matched case-insensitively: keys are folded to lowercase
//! before serde sees them. Any failure (bad JSON, not an object, missing or
//! mistyped field) collapses into a single `DecodeError`.

use serde_json::{Map, Value};

use crate::domain::{DecodeError, ResultRecord};

/// Decode a raw message body into a `ResultRecord`.
///
/// When two keys collide after folding, the one appearing later in the
/// document wins. Unknown fields are ignored.
pub fn decode(body: &str) -> Result<ResultRecord, DecodeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DecodeError::new(format!("json: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(DecodeError::new("payload is not a JSON object"));
    };

    serde_json::from_value(Value::Object(fold_keys(fields)))
        .map_err(|e| DecodeError::new(e.to_string()))
}

fn fold_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::with_capacity(fields.len());
    for (key, value) in fields {
        // preserve_order なのでドキュメント順に insert される（後勝ち）
        folded.insert(key.to_lowercase(), value);
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn decodes_camel_case_current_value() {
        let record = decode(r#"{"valorAtual": 42}"#).unwrap();
        assert_eq!(record.current_value, 42);
        assert_eq!(record, ResultRecord::new(42));
    }

    #[test]
    fn decodes_full_payload_with_mixed_case_keys() {
        let body = r#"{
            "VALORATUAL": 7,
            "producer": "contador-api",
            "KeRnEl": "Linux 6.8",
            "Framework": ".NET 8",
            "mensagem": "ola"
        }"#;
        let record = decode(body).unwrap();

        assert_eq!(record.current_value, 7);
        assert_eq!(record.producer.as_deref(), Some("contador-api"));
        assert_eq!(record.kernel.as_deref(), Some("Linux 6.8"));
        assert_eq!(record.framework.as_deref(), Some(".NET 8"));
        assert_eq!(record.message.as_deref(), Some("ola"));
    }

    #[test]
    fn ignores_unknown_fields() {
        let record = decode(r#"{"ValorAtual": 1, "Extra": {"nested": true}}"#).unwrap();
        assert_eq!(record.current_value, 1);
    }

    #[test]
    fn null_metadata_is_none() {
        let record = decode(r#"{"ValorAtual": 3, "Producer": null}"#).unwrap();
        assert_eq!(record.producer, None);
    }

    #[test]
    fn later_key_wins_on_case_collision() {
        let record = decode(r#"{"ValorAtual": 1, "valoratual": 2}"#).unwrap();
        assert_eq!(record.current_value, 2);

        let record = decode(r#"{"valoratual": 2, "VALORATUAL": 1}"#).unwrap();
        assert_eq!(record.current_value, 1);
    }

    #[rstest]
    #[case::not_json("not-json")]
    #[case::empty("")]
    #[case::truncated(r#"{"ValorAtual": 4"#)]
    #[case::json_null("null")]
    #[case::array("[1, 2, 3]")]
    #[case::bare_number("42")]
    #[case::missing_value(r#"{"Producer": "x"}"#)]
    #[case::value_is_string(r#"{"ValorAtual": "42"}"#)]
    #[case::value_is_fractional(r#"{"ValorAtual": 4.5}"#)]
    #[case::value_is_null(r#"{"ValorAtual": null}"#)]
    #[case::value_overflows(r#"{"ValorAtual": 18446744073709551615}"#)]
    #[case::metadata_wrong_type(r#"{"ValorAtual": 1, "Kernel": 5}"#)]
    fn rejects_malformed_bodies(#[case] body: &str) {
        assert!(decode(body).is_err());
    }
}
