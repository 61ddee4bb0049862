// Domain values shared by the catalog DTOs and the view-model mapping

use std::cmp::Ordering;
use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// A language-keyed text map (`{"en": "...", "ja-ro": "..."}`) that keeps the
/// order entries had in the remote document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText(Vec<(String, String)>);

impl LocalizedText {
    #[cfg(test)]
    pub fn new<L, T>(entries: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        LocalizedText(
            entries
                .into_iter()
                .map(|(l, t)| (l.into(), t.into()))
                .collect(),
        )
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == language)
            .map(|(_, t)| t.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, t)| t.as_str())
    }

    /// First preferred language present in the map, else the first entry.
    pub fn pick(&self, preferred: &[String]) -> Option<&str> {
        preferred
            .iter()
            .find_map(|l| self.get(l))
            .or_else(|| self.first())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// MangaDex sends `[]` instead of `{}` for empty maps, and occasionally `null`.
impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LocalizedTextVisitor;

        impl<'de> Visitor<'de> for LocalizedTextVisitor {
            type Value = LocalizedText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language code to text")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((language, text)) = map.next_entry::<String, Option<String>>()? {
                    if let Some(text) = text {
                        entries.push((language, text));
                    }
                }
                Ok(LocalizedText(entries))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(LocalizedText::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(LocalizedText::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(LocalizedText::default())
            }
        }

        deserializer.deserialize_any(LocalizedTextVisitor)
    }
}

/// Where a chapter sits in reading order: (volume, chapter), compared numerically.
/// Missing or non-numeric parts sort before any number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingPosition {
    volume: Option<f64>,
    chapter: Option<f64>,
}

impl ReadingPosition {
    pub fn new(volume: Option<&str>, chapter: Option<&str>) -> Self {
        ReadingPosition {
            volume: volume.and_then(parse_number),
            chapter: chapter.and_then(parse_number),
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        compare_part(self.volume, other.volume).then(compare_part(self.chapter, other.chapter))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn compare_part(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_text_keeps_document_order() {
        let text: LocalizedText =
            serde_json::from_str(r#"{ "ja-ro": "Kimetsu no Yaiba", "en": "Demon Slayer" }"#)
                .unwrap();
        assert_eq!(text.first(), Some("Kimetsu no Yaiba"));
        assert_eq!(text.get("en"), Some("Demon Slayer"));
    }

    #[test]
    fn localized_text_accepts_empty_array_and_null() {
        let from_array: LocalizedText = serde_json::from_str("[]").unwrap();
        let from_null: LocalizedText = serde_json::from_str("null").unwrap();
        assert!(from_array.is_empty());
        assert!(from_null.is_empty());
    }

    #[test]
    fn pick_prefers_configured_languages_then_falls_back_to_first() {
        let text = LocalizedText::new([("ja", "進撃の巨人"), ("en", "Attack on Titan")]);
        let preferred = vec!["fr".to_string(), "en".to_string()];
        assert_eq!(text.pick(&preferred), Some("Attack on Titan"));
        assert_eq!(text.pick(&["de".to_string()]), Some("進撃の巨人"));
        assert_eq!(LocalizedText::default().pick(&preferred), None);
    }

    #[test]
    fn reading_position_is_numeric_with_missing_first() {
        let none = ReadingPosition::new(None, Some("1"));
        let v1c2 = ReadingPosition::new(Some("1"), Some("2"));
        let v1c10 = ReadingPosition::new(Some("1"), Some("10"));
        let v1c9_5 = ReadingPosition::new(Some("1"), Some("9.5"));
        let v2c1 = ReadingPosition::new(Some("2"), Some("1"));
        let extra = ReadingPosition::new(Some("1"), Some("Extra"));

        assert_eq!(none.compare(&v1c2), Ordering::Less);
        assert_eq!(v1c2.compare(&v1c9_5), Ordering::Less);
        assert_eq!(v1c9_5.compare(&v1c10), Ordering::Less);
        assert_eq!(v1c10.compare(&v2c1), Ordering::Less);
        assert_eq!(extra.compare(&v1c2), Ordering::Less);
        assert_eq!(v1c2.compare(&v1c2), Ordering::Equal);
    }
}
