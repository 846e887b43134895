//! Pure validation for SAR payloads. No I/O; every validator collects the
//! full error set before answering so the client can surface all problems
//! in one round trip.

use serde::Serialize;

use crate::codec::Subject;
use crate::sar::{
    AcademicRecordPayload, AchievementPayload, InternshipPayload, UpdateOverviewRequest,
};

/// Tolerance for the internal + external vs total mark cross-checks.
const MARK_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered field -> message set. Expected-invalid input always lands here;
/// nothing in this module panics or returns through another channel.
#[derive(Debug, Default, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.fields().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn require(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    match value {
        Some(s) if !s.trim().is_empty() => {}
        _ => errors.add(field, "is required"),
    }
}

fn check_range(errors: &mut ValidationErrors, field: &str, value: Option<f64>, min: f64, max: f64) {
    if let Some(v) = value {
        if v < min || v > max {
            errors.add(field, format!("must be between {} and {}", min, max));
        }
    }
}

fn check_non_negative(errors: &mut ValidationErrors, field: &str, value: Option<f64>) {
    if let Some(v) = value {
        if v < 0.0 {
            errors.add(field, "must not be negative");
        }
    }
}

fn check_semester(errors: &mut ValidationErrors, field: &str, value: Option<i32>) {
    if let Some(v) = value {
        if !(1..=8).contains(&v) {
            errors.add(field, "must be between 1 and 8");
        }
    }
}

pub fn validate_overview(payload: &UpdateOverviewRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_semester(&mut errors, "currentSemester", payload.current_semester);
    errors.into_result()
}

pub fn validate_academic(payload: &AcademicRecordPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    match payload.semester {
        None => errors.add("semester", "is required"),
        Some(s) if !(1..=8).contains(&s) => errors.add("semester", "must be between 1 and 8"),
        Some(_) => {}
    }
    require(&mut errors, "academicYear", payload.academic_year.as_deref());
    check_range(&mut errors, "sgpa", payload.sgpa, 0.0, 10.0);
    check_range(&mut errors, "cgpa", payload.cgpa, 0.0, 10.0);
    check_range(
        &mut errors,
        "attendancePercentage",
        payload.attendance_percentage,
        0.0,
        100.0,
    );
    check_non_negative(&mut errors, "creditsEarned", payload.credits_earned.map(f64::from));
    check_non_negative(&mut errors, "creditsTotal", payload.credits_total.map(f64::from));
    if let Some(b) = payload.backlog_count {
        if b < 0 {
            errors.add("backlogCount", "must not be negative");
        }
    }

    if let Some(subjects) = &payload.subjects {
        validate_subjects(&mut errors, subjects);
    }

    errors.into_result()
}

/// Per-subject checks, addressed as `subjects[i].field`. All subjects are
/// checked; a bad first subject never hides errors in the rest.
fn validate_subjects(errors: &mut ValidationErrors, subjects: &[Subject]) {
    for (i, subject) in subjects.iter().enumerate() {
        let at = |field: &str| format!("subjects[{}].{}", i, field);

        require(errors, &at("code"), subject.code.as_deref());
        require(errors, &at("name"), subject.name.as_deref());
        check_non_negative(errors, &at("credits"), subject.credits);

        for (field, value) in [
            ("theoryInternal", subject.theory_internal),
            ("theoryExternal", subject.theory_external),
            ("theoryTotal", subject.theory_total),
            ("practicalInternal", subject.practical_internal),
            ("practicalExternal", subject.practical_external),
            ("practicalTotal", subject.practical_total),
        ] {
            check_non_negative(errors, &at(field), value);
        }

        check_mark_sum(
            errors,
            &at("theoryTotal"),
            subject.theory_internal,
            subject.theory_external,
            subject.theory_total,
        );
        check_mark_sum(
            errors,
            &at("practicalTotal"),
            subject.practical_internal,
            subject.practical_external,
            subject.practical_total,
        );
    }
}

fn check_mark_sum(
    errors: &mut ValidationErrors,
    field: &str,
    internal: Option<f64>,
    external: Option<f64>,
    total: Option<f64>,
) {
    if let (Some(i), Some(e), Some(t)) = (internal, external, total) {
        if (i + e - t).abs() > MARK_SUM_TOLERANCE {
            errors.add(field, "internal and external marks must add up to the total");
        }
    }
}

pub fn validate_internship(payload: &InternshipPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    require(&mut errors, "company", payload.company.as_deref());
    require(&mut errors, "position", payload.position.as_deref());
    if payload.start_date.is_none() {
        errors.add("startDate", "is required");
    }
    if let (Some(start), Some(end)) = (payload.start_date, payload.end_date) {
        if end < start {
            errors.add("endDate", "must not be before the start date");
        }
    }
    check_non_negative(&mut errors, "stipend", payload.stipend);
    if let Some(r) = payload.performance_rating {
        if !(1..=5).contains(&r) {
            errors.add("performanceRating", "must be between 1 and 5");
        }
    }

    errors.into_result()
}

pub fn validate_achievement(payload: &AchievementPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    require(&mut errors, "title", payload.title.as_deref());
    require(&mut errors, "category", payload.category.as_deref());
    if payload.achievement_date.is_none() {
        errors.add("achievementDate", "is required");
    }
    check_non_negative(
        &mut errors,
        "participantsCount",
        payload.participants_count.map(f64::from),
    );
    check_non_negative(&mut errors, "teamSize", payload.team_size.map(f64::from));
    check_non_negative(&mut errors, "prizeAmount", payload.prize_amount);
    check_semester(&mut errors, "semesterAchieved", payload.semester_achieved);

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn academic_payload() -> AcademicRecordPayload {
        AcademicRecordPayload {
            semester: Some(3),
            academic_year: Some("2024-25".to_string()),
            sgpa: Some(8.4),
            cgpa: Some(8.1),
            credits_earned: Some(22),
            credits_total: Some(24),
            attendance_percentage: Some(91.0),
            backlog_count: Some(0),
            semester_result: Some("pass".to_string()),
            subjects: None,
        }
    }

    #[test]
    fn valid_academic_payload_passes() {
        assert!(validate_academic(&academic_payload()).is_ok());
    }

    #[test]
    fn missing_semester_is_reported_by_name() {
        let mut payload = academic_payload();
        payload.semester = None;
        let errors = validate_academic(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["semester"]);
    }

    #[test]
    fn semester_out_of_range_is_reported() {
        for bad in [0, 9, -2] {
            let mut payload = academic_payload();
            payload.semester = Some(bad);
            let errors = validate_academic(&payload).unwrap_err();
            assert!(errors.fields().contains(&"semester"), "semester {} accepted", bad);
        }
    }

    #[test]
    fn sgpa_above_ten_is_rejected() {
        let mut payload = academic_payload();
        payload.sgpa = Some(10.5);
        let errors = validate_academic(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["sgpa"]);
    }

    #[test]
    fn all_errors_are_collected_not_just_the_first() {
        let mut payload = academic_payload();
        payload.semester = None;
        payload.academic_year = Some("   ".to_string());
        payload.cgpa = Some(11.0);
        let errors = validate_academic(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["semester", "academicYear", "cgpa"]);
    }

    #[test]
    fn subject_mark_sum_within_tolerance_passes() {
        let mut payload = academic_payload();
        payload.subjects = Some(vec![Subject {
            code: Some("CS301".to_string()),
            name: Some("Compilers".to_string()),
            credits: Some(4.0),
            theory_internal: Some(28.0),
            theory_external: Some(52.005),
            theory_total: Some(80.0),
            practical_internal: Some(20.0),
            practical_external: Some(20.0),
            practical_total: Some(40.0),
            theory_marks: None,
            practical_marks: None,
        }]);
        assert!(validate_academic(&payload).is_ok());
    }

    #[test]
    fn subject_errors_are_collected_across_all_subjects() {
        let bad = Subject {
            code: None,
            name: Some("Networks".to_string()),
            credits: Some(3.0),
            theory_internal: Some(30.0),
            theory_external: Some(30.0),
            theory_total: Some(80.0),
            practical_internal: None,
            practical_external: None,
            practical_total: None,
            theory_marks: None,
            practical_marks: None,
        };
        let also_bad = Subject {
            code: Some("HU101".to_string()),
            name: None,
            credits: Some(-1.0),
            theory_internal: None,
            theory_external: None,
            theory_total: None,
            practical_internal: None,
            practical_external: None,
            practical_total: None,
            theory_marks: None,
            practical_marks: None,
        };
        let mut payload = academic_payload();
        payload.subjects = Some(vec![bad, also_bad]);
        let errors = validate_academic(&payload).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                "subjects[0].code",
                "subjects[0].theoryTotal",
                "subjects[1].name",
                "subjects[1].credits",
            ]
        );
    }

    fn internship_payload() -> InternshipPayload {
        InternshipPayload {
            company: Some("Siemens".to_string()),
            position: Some("SDE Intern".to_string()),
            internship_type: Some("summer".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 15),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 30),
            stipend: Some(25000.0),
            currency: Some("INR".to_string()),
            work_mode: Some("hybrid".to_string()),
            description: None,
            skills_learned: vec!["rust".to_string()],
            technologies_used: vec![],
            supervisor_name: None,
            supervisor_email: None,
            supervisor_phone: None,
            performance_rating: Some(4),
            ongoing: false,
            certificate_received: true,
            offer_letter_url: None,
        }
    }

    #[test]
    fn internship_requires_company_position_and_start_date() {
        let mut payload = internship_payload();
        payload.company = None;
        payload.position = Some(String::new());
        payload.start_date = None;
        let errors = validate_internship(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["company", "position", "startDate"]);
    }

    #[test]
    fn internship_end_before_start_is_rejected() {
        let mut payload = internship_payload();
        payload.end_date = NaiveDate::from_ymd_opt(2024, 4, 1);
        let errors = validate_internship(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["endDate"]);
    }

    #[test]
    fn internship_rating_outside_one_to_five_is_rejected() {
        let mut payload = internship_payload();
        payload.performance_rating = Some(6);
        let errors = validate_internship(&payload).unwrap_err();
        assert_eq!(errors.fields(), vec!["performanceRating"]);
    }

    #[test]
    fn achievement_required_set_is_enforced() {
        let payload = AchievementPayload {
            title: None,
            category: Some("technical".to_string()),
            subcategory: None,
            level: Some("national".to_string()),
            organization: None,
            event_name: None,
            achievement_date: None,
            position_rank: None,
            participants_count: None,
            team_size: None,
            team_members: vec![],
            prize_amount: None,
            prize_currency: None,
            certificate_url: None,
            team_achievement: false,
            verified: false,
            media_urls: vec![],
            skills_demonstrated: vec![],
            technologies_used: vec![],
            tags: vec![],
            semester_achieved: Some(12),
        };
        let errors = validate_achievement(&payload).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["title", "achievementDate", "semesterAchieved"]
        );
    }
}
