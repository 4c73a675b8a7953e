//! Number codec for decimal-store round-trips.
//!
//! Department configuration lives in a key-value store whose numeric
//! attributes use an arbitrary-precision decimal representation; they
//! arrive over JSON as strings. Every integer field therefore accepts
//! both a JSON number and a numeric string on input, and fields that
//! must round-trip losslessly are written back as strings.

use serde::de::{Deserialize, Deserializer, Error};
use std::collections::BTreeMap;

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Raw {
    Num(u64),
    Str(String),
}

fn parse(raw: Raw) -> Result<u32, String> {
    match raw {
        Raw::Num(v) => u32::try_from(v).map_err(|_| format!("{v} is out of range for u32")),
        Raw::Str(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("'{s}' is not a non-negative integer")),
    }
}

/// Deserializes a `u32` from a JSON number or a numeric string.
pub fn u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    parse(Raw::deserialize(deserializer)?).map_err(Error::custom)
}

/// Deserializes a map of shift name → count, values number or string.
pub fn u32_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u32>, D::Error> {
    let raw = BTreeMap::<String, Raw>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| parse(v).map(|v| (k, v)).map_err(Error::custom))
        .collect()
}

/// Deserializes a list of day indices, elements number or string.
pub fn u32_vec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
    let raw = Vec::<Raw>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|v| parse(v).map_err(Error::custom))
        .collect()
}

/// `#[serde(with = ...)]` codec: writes the value as a string, reads
/// either form. Used for output fields that originate from the decimal
/// store and must not lose precision on transport.
pub mod u32_string {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        super::u32(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::u32")]
        n: u32,
        #[serde(deserialize_with = "super::u32_map")]
        m: BTreeMap<String, u32>,
    }

    #[test]
    fn test_number_form() {
        let h: Holder = serde_json::from_str(r#"{"n": 7, "m": {"Morning": 2}}"#).unwrap();
        assert_eq!(h.n, 7);
        assert_eq!(h.m["Morning"], 2);
    }

    #[test]
    fn test_string_form() {
        let h: Holder = serde_json::from_str(r#"{"n": "7", "m": {"Morning": "2"}}"#).unwrap();
        assert_eq!(h.n, 7);
        assert_eq!(h.m["Morning"], 2);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Holder>(r#"{"n": "seven", "m": {}}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"n": -1, "m": {}}"#).is_err());
    }
}
