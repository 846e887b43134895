//! Sub-document codec: structured values <-> serialized text columns.
//!
//! Child records keep their list-shaped fields (subjects, skills, team
//! members, media urls) as JSON text in a single column. Historical rows
//! written by earlier portal versions are inconsistent about the stored
//! shape, so decoding is deliberately tolerant: a read must never fail on
//! data the old system considered acceptable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialize a list for storage. Encoding a list we just validated cannot
/// fail, so an encoder error degrades to an empty stored list.
pub fn encode_list<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored list column. Tolerates every shape found in legacy rows:
/// a JSON array, a single bare object (wrapped into a one-element list), a
/// JSON string whose contents are themselves JSON (double-encoded), and
/// null/empty text. Malformed text and non-conforming elements yield an
/// empty/partial list rather than an error.
pub fn decode_list<T: DeserializeOwned>(stored: Option<&str>) -> Vec<T> {
    let raw = match stored {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Vec::new(),
    };
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };
    decode_value(value)
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Object(_) => serde_json::from_value(value).map_or_else(|_| Vec::new(), |v| vec![v]),
        // Double-encoded rows store the array as a JSON string
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(v) => decode_value(v),
            Err(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Stored qualitative band for internship performance ratings.
///
/// The API speaks numeric 1..=5 but storage keeps four buckets, and both 2
/// and 3 land in `Average`. Decoding `Average` answers 3, so a stored rating
/// of 2 reads back as 3. That collapse is load-bearing for existing rows and
/// is kept on purpose; do not widen the bands without a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Poor,
    Average,
    Good,
    Excellent,
}

impl RatingBand {
    pub fn from_rating(rating: u8) -> Option<RatingBand> {
        match rating {
            1 => Some(RatingBand::Poor),
            2 | 3 => Some(RatingBand::Average),
            4 => Some(RatingBand::Good),
            5 => Some(RatingBand::Excellent),
            _ => None,
        }
    }

    pub fn to_rating(self) -> u8 {
        match self {
            RatingBand::Poor => 1,
            RatingBand::Average => 3,
            RatingBand::Good => 4,
            RatingBand::Excellent => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RatingBand::Poor => "poor",
            RatingBand::Average => "average",
            RatingBand::Good => "good",
            RatingBand::Excellent => "excellent",
        }
    }

    pub fn parse(stored: &str) -> Option<RatingBand> {
        match stored {
            "poor" => Some(RatingBand::Poor),
            "average" => Some(RatingBand::Average),
            "good" => Some(RatingBand::Good),
            "excellent" => Some(RatingBand::Excellent),
            _ => None,
        }
    }
}

/// Numeric rating (1..=5) to the stored band string. Out-of-range input is a
/// caller bug; validation rejects it before this point.
pub fn rating_to_storage(rating: u8) -> Option<String> {
    RatingBand::from_rating(rating).map(|band| band.as_str().to_string())
}

/// Stored band string back to the numeric rating. Unknown text (corrupt
/// rows) reads as no rating.
pub fn storage_to_rating(stored: &str) -> Option<u8> {
    RatingBand::parse(stored).map(RatingBand::to_rating)
}

/// One subject row inside an academic record. Field names match the wire and
/// the stored JSON (camelCase, as written by the portal frontend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub theory_internal: Option<f64>,
    #[serde(default)]
    pub theory_external: Option<f64>,
    #[serde(default)]
    pub theory_total: Option<f64>,
    #[serde(default)]
    pub practical_internal: Option<f64>,
    #[serde(default)]
    pub practical_external: Option<f64>,
    #[serde(default)]
    pub practical_total: Option<f64>,
    /// Legacy combined figures from before the internal/external split.
    /// Present only on old stored rows; normalized away on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory_marks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practical_marks: Option<f64>,
}

impl Subject {
    /// Migrate a legacy combined-marks subject to the split shape.
    ///
    /// Older rows stored one `theoryMarks`/`practicalMarks` figure. We
    /// synthesize internal = 30% / external = 70% for theory and a 50/50
    /// split for practical so every caller sees one shape. The split is a
    /// heuristic, not recovered ground truth.
    pub fn normalize_legacy(mut self) -> Subject {
        if self.theory_total.is_none() {
            if let Some(marks) = self.theory_marks.take() {
                self.theory_internal = Some(round2(marks * 0.3));
                self.theory_external = Some(round2(marks * 0.7));
                self.theory_total = Some(marks);
            }
        }
        if self.practical_total.is_none() {
            if let Some(marks) = self.practical_marks.take() {
                self.practical_internal = Some(round2(marks * 0.5));
                self.practical_external = Some(round2(marks * 0.5));
                self.practical_total = Some(marks);
            }
        }
        self.theory_marks = None;
        self.practical_marks = None;
        self
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Decode a stored subject list, normalizing legacy rows as they come out.
pub fn decode_subjects(stored: Option<&str>) -> Vec<Subject> {
    decode_list::<Subject>(stored)
        .into_iter()
        .map(Subject::normalize_legacy)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_round_trips() {
        let skills = vec!["rust".to_string(), "sql".to_string(), "docker".to_string()];
        let stored = encode_list(&skills);
        let decoded: Vec<String> = decode_list(Some(&stored));
        assert_eq!(decoded, skills);
    }

    #[test]
    fn empty_and_null_decode_to_empty_list() {
        assert_eq!(decode_list::<String>(None), Vec::<String>::new());
        assert_eq!(decode_list::<String>(Some("")), Vec::<String>::new());
        assert_eq!(decode_list::<String>(Some("   ")), Vec::<String>::new());
        assert_eq!(decode_list::<String>(Some("null")), Vec::<String>::new());
    }

    #[test]
    fn malformed_text_decodes_to_empty_list() {
        assert_eq!(decode_list::<String>(Some("{not json")), Vec::<String>::new());
        assert_eq!(decode_list::<String>(Some("[\"unterminated")), Vec::<String>::new());
    }

    #[test]
    fn single_object_is_wrapped_into_one_element_list() {
        let decoded: Vec<Subject> = decode_list(Some(r#"{"code":"CS301","name":"Compilers"}"#));
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].code.as_deref(), Some("CS301"));
    }

    #[test]
    fn double_encoded_string_is_unwrapped() {
        let stored = "\"[\\\"python\\\",\\\"git\\\"]\"";
        let decoded: Vec<String> = decode_list(Some(stored));
        assert_eq!(decoded, vec!["python".to_string(), "git".to_string()]);
    }

    #[test]
    fn rating_round_trip_endpoints_are_exact() {
        assert_eq!(storage_to_rating(&rating_to_storage(5).unwrap()), Some(5));
        assert_eq!(storage_to_rating(&rating_to_storage(4).unwrap()), Some(4));
        assert_eq!(storage_to_rating(&rating_to_storage(1).unwrap()), Some(1));
    }

    #[test]
    fn rating_two_reads_back_as_three() {
        // Ratings 2 and 3 share the "average" band; this collapse is
        // compatibility behavior, not a defect to repair here.
        assert_eq!(rating_to_storage(2).as_deref(), Some("average"));
        assert_eq!(storage_to_rating(&rating_to_storage(2).unwrap()), Some(3));
        assert_eq!(storage_to_rating(&rating_to_storage(3).unwrap()), Some(3));
    }

    #[test]
    fn out_of_range_rating_encodes_to_none() {
        assert_eq!(rating_to_storage(0), None);
        assert_eq!(rating_to_storage(6), None);
        assert_eq!(storage_to_rating("stellar"), None);
    }

    #[test]
    fn legacy_combined_marks_are_split() {
        let stored = r#"[{"code":"MA201","name":"Maths III","theoryMarks":80.0,"practicalMarks":40.0}]"#;
        let subjects = decode_subjects(Some(stored));
        assert_eq!(subjects.len(), 1);
        let s = &subjects[0];
        assert_eq!(s.theory_internal, Some(24.0));
        assert_eq!(s.theory_external, Some(56.0));
        assert_eq!(s.theory_total, Some(80.0));
        assert_eq!(s.practical_internal, Some(20.0));
        assert_eq!(s.practical_external, Some(20.0));
        assert_eq!(s.practical_total, Some(40.0));
        assert_eq!(s.theory_marks, None);
    }

    #[test]
    fn split_shape_rows_pass_through_unchanged() {
        let stored = r#"[{"code":"CS302","name":"Networks","theoryInternal":28.0,"theoryExternal":52.0,"theoryTotal":80.0}]"#;
        let subjects = decode_subjects(Some(stored));
        assert_eq!(subjects[0].theory_internal, Some(28.0));
        assert_eq!(subjects[0].theory_total, Some(80.0));
    }
}
