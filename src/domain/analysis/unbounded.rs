//! Serde helpers for ratios that may be infinite.
//!
//! JSON has no infinity literal, so `+inf` and `-inf` are written as the
//! strings `"inf"` and `"-inf"`. Finite values stay plain numbers.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => match text.as_str() {
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"a number, \"inf\" or \"-inf\"",
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ratio {
        #[serde(with = "super")]
        value: f64,
    }

    #[test]
    fn infinity_is_written_as_text() {
        let json = serde_json::to_string(&Ratio { value: f64::INFINITY }).unwrap();
        assert_eq!(json, r#"{"value":"inf"}"#);

        let json = serde_json::to_string(&Ratio { value: f64::NEG_INFINITY }).unwrap();
        assert_eq!(json, r#"{"value":"-inf"}"#);
    }

    #[test]
    fn finite_values_stay_numbers() {
        let json = serde_json::to_string(&Ratio { value: 1.25 }).unwrap();
        assert_eq!(json, r#"{"value":1.25}"#);
    }

    #[test]
    fn reads_back_both_forms() {
        let inf: Ratio = serde_json::from_str(r#"{"value":"inf"}"#).unwrap();
        assert_eq!(inf.value, f64::INFINITY);

        let finite: Ratio = serde_json::from_str(r#"{"value":2}"#).unwrap();
        assert_eq!(finite.value, 2.0);
    }

    #[test]
    fn rejects_other_text() {
        assert!(serde_json::from_str::<Ratio>(r#"{"value":"lots"}"#).is_err());
    }

    #[test]
    fn yaml_round_trip_keeps_infinity() {
        let yaml = serde_yaml::to_string(&Ratio { value: f64::INFINITY }).unwrap();
        let back: Ratio = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.value, f64::INFINITY);
    }
}
