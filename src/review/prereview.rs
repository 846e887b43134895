//! Advisory pre-review: recomputes a candidate decision from the
//! registration document without touching stored state. The dashboard shows
//! the suggestion next to the real approve/decline controls; only the admin
//! transition mutates anything.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::db::StudentStatus;

/// Required registration inputs, as dotted paths into the profile document.
const REQUIRED_PROFILE_FIELDS: &[&str] = &[
    "personal.dob",
    "personal.gender",
    "personal.mobile",
    "personal.address",
    "personal.city",
    "personal.state",
    "personal.pincode",
    "academic.board",
    "academic.tenth_percentage",
    "academic.twelfth_percentage",
    "academic.passing_year",
    "father.name",
    "father.mobile",
    "father.occupation",
    "mother.name",
    "mother.mobile",
    "documents.photo",
    "documents.signature",
    "documents.tenth_marksheet",
    "documents.twelfth_marksheet",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreReview {
    pub suggested_status: StudentStatus,
    /// Candidate declined-field list: every required input that is missing
    /// or clearly malformed.
    pub missing_fields: Vec<String>,
}

pub fn evaluate(profile: &Value) -> PreReview {
    let mut missing_fields = Vec::new();

    for path in REQUIRED_PROFILE_FIELDS {
        match lookup(profile, path) {
            None => missing_fields.push(path.to_string()),
            Some(value) => {
                if !is_well_formed(path, value) {
                    missing_fields.push(path.to_string());
                }
            }
        }
    }

    let suggested_status = if missing_fields.is_empty() {
        StudentStatus::Approved
    } else {
        StudentStatus::Declined
    };

    PreReview {
        suggested_status,
        missing_fields,
    }
}

/// Walk a dotted path; empty strings and nulls count as absent.
fn lookup<'a>(profile: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = profile;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    match current {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(other),
    }
}

fn mobile_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9][0-9]{9}$").expect("static regex"))
}

fn pincode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("static regex"))
}

/// Format checks on top of presence, for the handful of fields a typo most
/// often slips through: mobile numbers and PIN codes.
fn is_well_formed(path: &str, value: &Value) -> bool {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return true,
    };
    if path.ends_with(".mobile") {
        return mobile_re().is_match(&text);
    }
    if path.ends_with(".pincode") {
        return pincode_re().is_match(&text);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_profile() -> Value {
        json!({
            "personal": {
                "dob": "2006-03-14", "gender": "female", "mobile": "9822001100",
                "address": "14 MG Road", "city": "Pune", "state": "MH", "pincode": "411001"
            },
            "academic": {
                "board": "CBSE", "tenth_percentage": 91.2,
                "twelfth_percentage": 88.6, "passing_year": 2024
            },
            "father": { "name": "R. Kulkarni", "mobile": "9822001101", "occupation": "Engineer" },
            "mother": { "name": "S. Kulkarni", "mobile": "9822001102" },
            "documents": {
                "photo": "https://cdn.example/p.jpg",
                "signature": "https://cdn.example/s.jpg",
                "tenth_marksheet": "https://cdn.example/10.pdf",
                "twelfth_marksheet": "https://cdn.example/12.pdf"
            }
        })
    }

    #[test]
    fn complete_profile_suggests_approval() {
        let review = evaluate(&complete_profile());
        assert_eq!(review.suggested_status, StudentStatus::Approved);
        assert!(review.missing_fields.is_empty());
    }

    #[test]
    fn missing_and_empty_fields_are_flagged() {
        let mut profile = complete_profile();
        profile["father"]["mobile"] = json!("");
        profile["documents"].as_object_mut().unwrap().remove("signature");

        let review = evaluate(&profile);
        assert_eq!(review.suggested_status, StudentStatus::Declined);
        assert_eq!(
            review.missing_fields,
            vec!["father.mobile", "documents.signature"]
        );
    }

    #[test]
    fn malformed_mobile_and_pincode_are_flagged() {
        let mut profile = complete_profile();
        profile["personal"]["mobile"] = json!("12345");
        profile["personal"]["pincode"] = json!("4110");

        let review = evaluate(&profile);
        assert_eq!(
            review.missing_fields,
            vec!["personal.mobile", "personal.pincode"]
        );
    }

    #[test]
    fn empty_document_flags_every_required_field() {
        let review = evaluate(&json!({}));
        assert_eq!(review.suggested_status, StudentStatus::Declined);
        assert_eq!(review.missing_fields.len(), REQUIRED_PROFILE_FIELDS.len());
    }
}
