//! Admin review state machine and student resubmission.
//!
//! Status lives on the student row: pending -> approved | declined by admin
//! decision, declined -> pending when the student resubmits corrected
//! values. Approval is terminal; there is no path out of approved. The
//! declined-field list is the sole allowlist for what a resubmission may
//! touch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::codec;
use crate::db::{self, StudentStatus};
use crate::error::{AppError, AppResult};
use crate::sar::StudentSummary;
use crate::state::AppState;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Decline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStudentRequest {
    pub student_id: Option<Uuid>,
    pub action: Option<ReviewAction>,
    #[serde(default)]
    pub declined_fields: Vec<String>,
}

/// Drive one admin review transition. The status change commits first; the
/// notification mail is fire-and-forget and never rolls it back.
pub async fn verify_student(
    state: &AppState,
    request: VerifyStudentRequest,
) -> AppResult<StudentSummary> {
    let mut errors = ValidationErrors::default();
    if request.student_id.is_none() {
        errors.add("studentId", "is required");
    }
    match request.action {
        None => errors.add("action", "must be 'approve' or 'decline'"),
        Some(ReviewAction::Decline) if request.declined_fields.is_empty() => {
            errors.add("declinedFields", "at least one declined field is required")
        }
        Some(_) => {}
    }
    errors.into_result()?;
    let (student_id, action) = match (request.student_id, request.action) {
        (Some(id), Some(action)) => (id, action),
        // presence was just validated
        _ => return Err(AppError::NotFound),
    };

    let student = db::get_student(state.pool.as_ref(), student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if student.status != StudentStatus::Pending {
        return Err(AppError::Conflict(
            "only pending applications can be reviewed".to_string(),
        ));
    }

    let (status, declined_json) = match action {
        ReviewAction::Approve => (StudentStatus::Approved, "[]".to_string()),
        // Stored verbatim: the admin's list is the resubmission allowlist.
        ReviewAction::Decline => (
            StudentStatus::Declined,
            codec::encode_list(&request.declined_fields),
        ),
    };

    let updated = db::set_student_review(state.pool.as_ref(), student_id, status, &declined_json)
        .await?
        .ok_or(AppError::NotFound)?;

    let (subject, html) = match action {
        ReviewAction::Approve => approval_mail(&updated.full_name()),
        ReviewAction::Decline => decline_mail(&updated.full_name(), &request.declined_fields),
    };
    state
        .mailer
        .send_in_background(updated.email.clone(), subject, html);

    Ok(StudentSummary::from(&updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeclinedRequest {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Student resubmission of previously declined fields. Only paths in the
/// declined set are applied; the rest of the submission is ignored (existing
/// portal behavior, logged so the drop is visible server-side).
pub async fn resubmit_declined(
    state: &AppState,
    student_id: Uuid,
    request: UpdateDeclinedRequest,
) -> AppResult<StudentSummary> {
    let student = db::get_student(state.pool.as_ref(), student_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if student.status != StudentStatus::Declined {
        let mut errors = ValidationErrors::default();
        errors.add("status", "resubmission is only allowed while the application is declined");
        return Err(errors.into());
    }

    let declined: Vec<String> = codec::decode_list(Some(&student.declined_fields));
    let mut profile: Value =
        serde_json::from_str(&student.profile).unwrap_or_else(|_| Value::Object(Map::new()));

    let outcome = apply_resubmission(&mut profile, &declined, &request.fields);
    if outcome.applied.is_empty() {
        let mut errors = ValidationErrors::default();
        errors.add("fields", "none of the submitted fields were declined for this application");
        return Err(errors.into());
    }
    if !outcome.ignored.is_empty() {
        tracing::info!(
            "resubmission for {} ignored fields outside the declined set: {}",
            student_id,
            outcome.ignored.join(", ")
        );
    }

    let profile_json = profile.to_string();
    let declined_json = codec::encode_list(&outcome.remaining);
    let updated = db::apply_student_resubmission(
        state.pool.as_ref(),
        student_id,
        &profile_json,
        &declined_json,
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(StudentSummary::from(&updated))
}

#[derive(Debug, PartialEq)]
pub struct ResubmissionOutcome {
    /// Declined paths that were submitted and written, in declined-list order.
    pub applied: Vec<String>,
    /// Declined paths still awaiting correction.
    pub remaining: Vec<String>,
    /// Submitted paths outside the declined set, dropped.
    pub ignored: Vec<String>,
}

/// Intersect the submission with the declined allowlist and write only the
/// intersection into the profile document.
pub fn apply_resubmission(
    profile: &mut Value,
    declined: &[String],
    submitted: &Map<String, Value>,
) -> ResubmissionOutcome {
    let mut applied = Vec::new();
    let mut remaining = Vec::new();

    for path in declined {
        match submitted.get(path) {
            Some(value) => {
                set_path(profile, path, value.clone());
                applied.push(path.clone());
            }
            None => remaining.push(path.clone()),
        }
    }

    let ignored = submitted
        .keys()
        .filter(|k| !declined.contains(k))
        .cloned()
        .collect();

    ResubmissionOutcome {
        applied,
        remaining,
        ignored,
    }
}

/// Set a dotted path inside the profile document, creating intermediate
/// objects as needed. A non-object in the middle of the path is replaced;
/// declined paths always address object members.
fn set_path(root: &mut Value, path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    if let Value::Object(map) = root {
        match path.split_once('.') {
            None => {
                map.insert(path.to_string(), value);
            }
            Some((head, rest)) => {
                let child = map
                    .entry(head.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                set_path(child, rest, value);
            }
        }
    }
}

fn approval_mail(name: &str) -> (String, String) {
    (
        "Admission application approved".to_string(),
        format!(
            "<p>Dear {},</p>\
             <p>Congratulations! Your admission application has been approved. \
             You can now sign in to the portal to complete enrollment.</p>\
             <p>Regards,<br/>Admissions Office</p>",
            name
        ),
    )
}

fn decline_mail(name: &str, declined_fields: &[String]) -> (String, String) {
    let items: String = declined_fields
        .iter()
        .map(|f| format!("<li>{}</li>", humanize_field_path(f)))
        .collect();
    (
        "Admission application needs corrections".to_string(),
        format!(
            "<p>Dear {},</p>\
             <p>Your admission application could not be approved as submitted. \
             Please correct the following and resubmit:</p>\
             <ul>{}</ul>\
             <p>Regards,<br/>Admissions Office</p>",
            name, items
        ),
    )
}

/// "father.mobile" -> "Father Mobile" for email copy.
pub fn humanize_field_path(path: &str) -> String {
    path.split(['.', '_'])
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submitted(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn resubmission_applies_only_declined_fields() {
        let mut profile = json!({
            "father": { "name": "R. Sharma", "mobile": "123" },
            "course": "IT"
        });
        let declined = vec!["father.mobile".to_string(), "mother.name".to_string()];
        let fields = submitted(&[
            ("father.mobile", json!("9876543210")),
            ("course", json!("CSE")),
        ]);

        let outcome = apply_resubmission(&mut profile, &declined, &fields);

        assert_eq!(outcome.applied, vec!["father.mobile"]);
        assert_eq!(outcome.remaining, vec!["mother.name"]);
        assert_eq!(outcome.ignored, vec!["course"]);
        assert_eq!(profile["father"]["mobile"], json!("9876543210"));
        // the out-of-scope submission never reaches the document
        assert_eq!(profile["course"], json!("IT"));
    }

    #[test]
    fn resubmission_creates_missing_intermediate_sections() {
        let mut profile = json!({});
        let declined = vec!["documents.signature".to_string()];
        let fields = submitted(&[("documents.signature", json!("https://cdn.example/sig.png"))]);

        let outcome = apply_resubmission(&mut profile, &declined, &fields);

        assert_eq!(outcome.applied, vec!["documents.signature"]);
        assert!(outcome.remaining.is_empty());
        assert_eq!(
            profile["documents"]["signature"],
            json!("https://cdn.example/sig.png")
        );
    }

    #[test]
    fn resubmission_with_no_declared_overlap_applies_nothing() {
        let mut profile = json!({ "personal": { "city": "Pune" } });
        let declined = vec!["father.mobile".to_string()];
        let fields = submitted(&[("personal.city", json!("Mumbai"))]);

        let outcome = apply_resubmission(&mut profile, &declined, &fields);

        assert!(outcome.applied.is_empty());
        assert_eq!(outcome.remaining, vec!["father.mobile"]);
        assert_eq!(outcome.ignored, vec!["personal.city"]);
        assert_eq!(profile["personal"]["city"], json!("Pune"));
    }

    #[test]
    fn field_paths_humanize_for_mail_copy() {
        assert_eq!(humanize_field_path("father.mobile"), "Father Mobile");
        assert_eq!(
            humanize_field_path("academic.tenth_percentage"),
            "Academic Tenth Percentage"
        );
    }
}
