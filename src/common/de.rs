// src/common/de.rs

use serde::{Deserialize, Deserializer};

/// Distingue "campo ausente" de "campo explicitamente null" num PATCH.
///
/// Uso: `#[serde(default, deserialize_with = "double_option")]` num
/// campo `Option<Option<T>>`. Ausente => None; null => Some(None);
/// valor => Some(Some(v)).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        image: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_three_different_states() {
        let absent: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.image, None);

        let cleared: Patch = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(cleared.image, Some(None));

        let set: Patch = serde_json::from_str(r#"{"image": "booth.png"}"#).unwrap();
        assert_eq!(set.image, Some(Some("booth.png".to_string())));
    }
}
