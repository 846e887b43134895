//! SAR aggregate service: orchestrates header get-or-create, child record
//! CRUD, aggregation and lookups on top of the record store. Validation runs
//! before any write; the codec sits between wire DTOs and stored columns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::codec::{self, Subject};
use crate::db::sar as store;
use crate::db::{
    self, AcademicRecordRow, AchievementRecordRow, InternshipRecordRow, SarHeader, Student,
    StudentStatus,
};
use crate::error::{AppError, AppResult};
use crate::validation;

// --- wire DTOs ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOverviewRequest {
    pub enrollment_no: Option<String>,
    pub microsoft_email: Option<String>,
    pub current_semester: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarOverview {
    pub id: Uuid,
    pub enrollment_no: String,
    pub microsoft_email: String,
    pub current_semester: i32,
    pub profile_completion_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SarHeader> for SarOverview {
    fn from(h: SarHeader) -> Self {
        SarOverview {
            id: h.id,
            enrollment_no: h.enrollment_no,
            microsoft_email: h.microsoft_email,
            current_semester: h.current_semester,
            profile_completion_percentage: h.profile_completion,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

/// Create/update body for an academic record. Required fields are `Option`
/// so the validation layer can answer with field-level errors instead of a
/// bare deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecordPayload {
    pub semester: Option<i32>,
    pub academic_year: Option<String>,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub credits_earned: Option<i32>,
    pub credits_total: Option<i32>,
    pub attendance_percentage: Option<f64>,
    pub backlog_count: Option<i32>,
    pub semester_result: Option<String>,
    pub subjects: Option<Vec<Subject>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecordResponse {
    pub id: Uuid,
    pub semester: i32,
    pub academic_year: String,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub credits_earned: Option<i32>,
    pub credits_total: Option<i32>,
    pub attendance_percentage: Option<f64>,
    pub backlog_count: i32,
    pub semester_result: Option<String>,
    pub subjects: Vec<Subject>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AcademicRecordRow> for AcademicRecordResponse {
    fn from(row: AcademicRecordRow) -> Self {
        AcademicRecordResponse {
            id: row.id,
            semester: row.semester,
            academic_year: row.academic_year,
            sgpa: row.sgpa,
            cgpa: row.cgpa,
            credits_earned: row.credits_earned,
            credits_total: row.credits_total,
            attendance_percentage: row.attendance_percentage,
            backlog_count: row.backlog_count,
            semester_result: row.semester_result,
            subjects: codec::decode_subjects(Some(&row.subjects)),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPayload {
    pub company: Option<String>,
    pub position: Option<String>,
    pub internship_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stipend: Option<f64>,
    pub currency: Option<String>,
    pub work_mode: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub skills_learned: Vec<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
    pub supervisor_name: Option<String>,
    pub supervisor_email: Option<String>,
    pub supervisor_phone: Option<String>,
    /// Numeric 1..=5 on the wire; stored as the qualitative band.
    pub performance_rating: Option<u8>,
    #[serde(default)]
    pub ongoing: bool,
    #[serde(default)]
    pub certificate_received: bool,
    pub offer_letter_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipResponse {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub internship_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub stipend: Option<f64>,
    pub currency: String,
    pub work_mode: Option<String>,
    pub description: Option<String>,
    pub skills_learned: Vec<String>,
    pub technologies_used: Vec<String>,
    pub supervisor_name: Option<String>,
    pub supervisor_email: Option<String>,
    pub supervisor_phone: Option<String>,
    pub performance_rating: Option<u8>,
    pub ongoing: bool,
    pub certificate_received: bool,
    pub offer_letter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InternshipRecordRow> for InternshipResponse {
    fn from(row: InternshipRecordRow) -> Self {
        InternshipResponse {
            id: row.id,
            company: row.company,
            position: row.position,
            internship_type: row.internship_type,
            start_date: row.start_date,
            end_date: row.end_date,
            stipend: row.stipend,
            currency: row.currency,
            work_mode: row.work_mode,
            description: row.description,
            skills_learned: codec::decode_list(Some(&row.skills_learned)),
            technologies_used: codec::decode_list(Some(&row.technologies_used)),
            supervisor_name: row.supervisor_name,
            supervisor_email: row.supervisor_email,
            supervisor_phone: row.supervisor_phone,
            performance_rating: row
                .performance_rating
                .as_deref()
                .and_then(codec::storage_to_rating),
            ongoing: row.ongoing,
            certificate_received: row.certificate_received,
            offer_letter_url: row.offer_letter_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementPayload {
    pub title: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub level: Option<String>,
    pub organization: Option<String>,
    pub event_name: Option<String>,
    pub achievement_date: Option<NaiveDate>,
    pub position_rank: Option<String>,
    pub participants_count: Option<i32>,
    pub team_size: Option<i32>,
    #[serde(default)]
    pub team_members: Vec<String>,
    pub prize_amount: Option<f64>,
    pub prize_currency: Option<String>,
    pub certificate_url: Option<String>,
    #[serde(default)]
    pub team_achievement: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub skills_demonstrated: Vec<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub semester_achieved: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub level: Option<String>,
    pub organization: Option<String>,
    pub event_name: Option<String>,
    pub achievement_date: NaiveDate,
    pub position_rank: Option<String>,
    pub participants_count: Option<i32>,
    pub team_size: Option<i32>,
    pub team_members: Vec<String>,
    pub prize_amount: Option<f64>,
    pub prize_currency: Option<String>,
    pub certificate_url: Option<String>,
    pub team_achievement: bool,
    pub verified: bool,
    pub media_urls: Vec<String>,
    pub skills_demonstrated: Vec<String>,
    pub technologies_used: Vec<String>,
    pub tags: Vec<String>,
    pub semester_achieved: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AchievementRecordRow> for AchievementResponse {
    fn from(row: AchievementRecordRow) -> Self {
        AchievementResponse {
            id: row.id,
            title: row.title,
            category: row.category,
            subcategory: row.subcategory,
            level: row.level,
            organization: row.organization,
            event_name: row.event_name,
            achievement_date: row.achievement_date,
            position_rank: row.position_rank,
            participants_count: row.participants_count,
            team_size: row.team_size,
            team_members: codec::decode_list(Some(&row.team_members)),
            prize_amount: row.prize_amount,
            prize_currency: row.prize_currency,
            certificate_url: row.certificate_url,
            team_achievement: row.team_achievement,
            verified: row.verified,
            media_urls: codec::decode_list(Some(&row.media_urls)),
            skills_demonstrated: codec::decode_list(Some(&row.skills_demonstrated)),
            technologies_used: codec::decode_list(Some(&row.technologies_used)),
            tags: codec::decode_list(Some(&row.tags)),
            semester_achieved: row.semester_achieved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub status: StudentStatus,
    pub declined_fields: Vec<String>,
}

impl From<&Student> for StudentSummary {
    fn from(s: &Student) -> Self {
        StudentSummary {
            id: s.id,
            email: s.email.clone(),
            name: s.full_name(),
            status: s.status,
            declined_fields: codec::decode_list(Some(&s.declined_fields)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSar {
    pub student: StudentSummary,
    pub overview: SarOverview,
    pub academic_records: Vec<AcademicRecordResponse>,
    pub internships: Vec<InternshipResponse>,
    pub achievements: Vec<AchievementResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarStatistics {
    pub academic_count: i64,
    pub internship_count: i64,
    pub achievement_count: i64,
    pub mean_cgpa: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSarProfile {
    pub student_name: String,
    pub enrollment_no: String,
    pub current_semester: i32,
    pub profile_completion_percentage: i32,
    pub statistics: SarStatistics,
}

// --- service operations ---

pub async fn overview(pool: &PgPool, student_id: Uuid) -> AppResult<SarOverview> {
    let header = store::get_or_create_header(pool, student_id).await?;
    Ok(header.into())
}

pub async fn update_overview(
    pool: &PgPool,
    student_id: Uuid,
    payload: UpdateOverviewRequest,
) -> AppResult<SarOverview> {
    validation::validate_overview(&payload)?;

    let current = store::get_or_create_header(pool, student_id).await?;
    let enrollment_no = payload.enrollment_no.unwrap_or(current.enrollment_no);
    let microsoft_email = payload.microsoft_email.unwrap_or(current.microsoft_email);
    let current_semester = payload.current_semester.unwrap_or(current.current_semester);

    let updated = store::update_header(pool, student_id, &enrollment_no, &microsoft_email, current_semester)
        .await?
        .ok_or(AppError::NotFound)?;
    let completion = recompute_completion(pool, &updated).await?;

    Ok(SarOverview {
        profile_completion_percentage: completion,
        ..updated.into()
    })
}

pub async fn list_academic(pool: &PgPool, student_id: Uuid) -> AppResult<Vec<AcademicRecordResponse>> {
    let header = store::get_or_create_header(pool, student_id).await?;
    let rows = store::list_academic(pool, header.id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create_academic(
    pool: &PgPool,
    student_id: Uuid,
    payload: AcademicRecordPayload,
) -> AppResult<AcademicRecordResponse> {
    validation::validate_academic(&payload)?;
    let header = store::get_or_create_header(pool, student_id).await?;

    let data = academic_data(&payload);
    // Friendly pre-check; the UNIQUE (sar_id, semester) constraint closes the
    // remaining race window and surfaces as the same conflict below.
    if store::semester_exists(pool, header.id, data.semester).await? {
        return Err(duplicate_semester(data.semester));
    }

    let row = store::insert_academic(pool, header.id, &data)
        .await
        .map_err(|e| map_academic_insert_err(e, data.semester))?;
    recompute_completion(pool, &header).await?;
    Ok(row.into())
}

pub async fn update_academic(
    pool: &PgPool,
    student_id: Uuid,
    record_id: Uuid,
    payload: AcademicRecordPayload,
) -> AppResult<AcademicRecordResponse> {
    validation::validate_academic(&payload)?;
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let data = academic_data(&payload);
    let row = store::update_academic(pool, header.id, record_id, &data)
        .await
        .map_err(|e| map_academic_insert_err(e, data.semester))?
        .ok_or(AppError::NotFound)?;
    Ok(row.into())
}

pub async fn delete_academic(pool: &PgPool, student_id: Uuid, record_id: Uuid) -> AppResult<()> {
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !store::delete_academic(pool, header.id, record_id).await? {
        return Err(AppError::NotFound);
    }
    recompute_completion(pool, &header).await?;
    Ok(())
}

pub async fn list_internships(pool: &PgPool, student_id: Uuid) -> AppResult<Vec<InternshipResponse>> {
    let header = store::get_or_create_header(pool, student_id).await?;
    let rows = store::list_internships(pool, header.id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create_internship(
    pool: &PgPool,
    student_id: Uuid,
    payload: InternshipPayload,
) -> AppResult<InternshipResponse> {
    validation::validate_internship(&payload)?;
    let header = store::get_or_create_header(pool, student_id).await?;
    let row = store::insert_internship(pool, header.id, &internship_data(&payload)).await?;
    recompute_completion(pool, &header).await?;
    Ok(row.into())
}

pub async fn update_internship(
    pool: &PgPool,
    student_id: Uuid,
    record_id: Uuid,
    payload: InternshipPayload,
) -> AppResult<InternshipResponse> {
    validation::validate_internship(&payload)?;
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let row = store::update_internship(pool, header.id, record_id, &internship_data(&payload))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(row.into())
}

pub async fn delete_internship(pool: &PgPool, student_id: Uuid, record_id: Uuid) -> AppResult<()> {
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !store::delete_internship(pool, header.id, record_id).await? {
        return Err(AppError::NotFound);
    }
    recompute_completion(pool, &header).await?;
    Ok(())
}

pub async fn list_achievements(pool: &PgPool, student_id: Uuid) -> AppResult<Vec<AchievementResponse>> {
    let header = store::get_or_create_header(pool, student_id).await?;
    let rows = store::list_achievements(pool, header.id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create_achievement(
    pool: &PgPool,
    student_id: Uuid,
    payload: AchievementPayload,
) -> AppResult<AchievementResponse> {
    validation::validate_achievement(&payload)?;
    let header = store::get_or_create_header(pool, student_id).await?;
    let row = store::insert_achievement(pool, header.id, &achievement_data(&payload)).await?;
    recompute_completion(pool, &header).await?;
    Ok(row.into())
}

pub async fn update_achievement(
    pool: &PgPool,
    student_id: Uuid,
    record_id: Uuid,
    payload: AchievementPayload,
) -> AppResult<AchievementResponse> {
    validation::validate_achievement(&payload)?;
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let row = store::update_achievement(pool, header.id, record_id, &achievement_data(&payload))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(row.into())
}

pub async fn delete_achievement(pool: &PgPool, student_id: Uuid, record_id: Uuid) -> AppResult<()> {
    let header = store::header_for_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !store::delete_achievement(pool, header.id, record_id).await? {
        return Err(AppError::NotFound);
    }
    recompute_completion(pool, &header).await?;
    Ok(())
}

pub async fn complete_record(pool: &PgPool, student_id: Uuid) -> AppResult<CompleteSar> {
    let student = db::get_student(pool, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let header = store::get_or_create_header(pool, student_id).await?;
    complete_for_header(pool, &student, header).await
}

async fn complete_for_header(
    pool: &PgPool,
    student: &Student,
    header: SarHeader,
) -> AppResult<CompleteSar> {
    let academic = store::list_academic(pool, header.id).await?;
    let internships = store::list_internships(pool, header.id).await?;
    let achievements = store::list_achievements(pool, header.id).await?;

    Ok(CompleteSar {
        student: student.into(),
        overview: header.into(),
        academic_records: academic.into_iter().map(Into::into).collect(),
        internships: internships.into_iter().map(Into::into).collect(),
        achievements: achievements.into_iter().map(Into::into).collect(),
    })
}

pub async fn statistics(pool: &PgPool, student_id: Uuid) -> AppResult<SarStatistics> {
    let header = match store::header_for_student(pool, student_id).await? {
        Some(h) => h,
        None => {
            return Ok(SarStatistics {
                academic_count: 0,
                internship_count: 0,
                achievement_count: 0,
                mean_cgpa: None,
            })
        }
    };
    let row = store::statistics(pool, header.id).await?;
    Ok(SarStatistics {
        academic_count: row.academic_count,
        internship_count: row.internship_count,
        achievement_count: row.achievement_count,
        mean_cgpa: row.mean_cgpa,
    })
}

/// Public lookup: identity and progress only, no contact-bearing child rows.
pub async fn public_by_enrollment(pool: &PgPool, enrollment_no: &str) -> AppResult<PublicSarProfile> {
    let header = store::header_by_enrollment(pool, enrollment_no)
        .await?
        .ok_or(AppError::NotFound)?;
    let student = db::get_student(pool, header.student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let stats = store::statistics(pool, header.id).await?;

    Ok(PublicSarProfile {
        student_name: student.full_name(),
        enrollment_no: header.enrollment_no,
        current_semester: header.current_semester,
        profile_completion_percentage: header.profile_completion,
        statistics: SarStatistics {
            academic_count: stats.academic_count,
            internship_count: stats.internship_count,
            achievement_count: stats.achievement_count,
            mean_cgpa: stats.mean_cgpa,
        },
    })
}

pub async fn admin_by_enrollment(pool: &PgPool, enrollment_no: &str) -> AppResult<CompleteSar> {
    let header = store::header_by_enrollment(pool, enrollment_no)
        .await?
        .ok_or(AppError::NotFound)?;
    let student = db::get_student(pool, header.student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    complete_for_header(pool, &student, header).await
}

// --- helpers ---

fn duplicate_semester(semester: i32) -> AppError {
    AppError::Conflict(format!(
        "An academic record for semester {} already exists; update it instead",
        semester
    ))
}

/// Unique-violation on (sar_id, semester) means a concurrent insert won the
/// race past the pre-check; report it as the same conflict.
fn map_academic_insert_err(err: sqlx::Error, semester: i32) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.constraint() == Some("academic_semester_unique") {
            return duplicate_semester(semester);
        }
    }
    AppError::Storage(err)
}

// Required fields are guaranteed present by validation; defaults here are
// unreachable fallbacks, not behavior.

fn academic_data(payload: &AcademicRecordPayload) -> store::AcademicRecordData {
    store::AcademicRecordData {
        semester: payload.semester.unwrap_or_default(),
        academic_year: payload.academic_year.clone().unwrap_or_default(),
        sgpa: payload.sgpa,
        cgpa: payload.cgpa,
        credits_earned: payload.credits_earned,
        credits_total: payload.credits_total,
        attendance_percentage: payload.attendance_percentage,
        backlog_count: payload.backlog_count.unwrap_or(0),
        semester_result: payload.semester_result.clone(),
        subjects: codec::encode_list(payload.subjects.as_deref().unwrap_or(&[])),
    }
}

fn internship_data(payload: &InternshipPayload) -> store::InternshipRecordData {
    store::InternshipRecordData {
        company: payload.company.clone().unwrap_or_default(),
        position: payload.position.clone().unwrap_or_default(),
        internship_type: payload.internship_type.clone(),
        start_date: payload.start_date.unwrap_or_default(),
        end_date: payload.end_date,
        stipend: payload.stipend,
        currency: payload.currency.clone().unwrap_or_else(|| "INR".to_string()),
        work_mode: payload.work_mode.clone(),
        description: payload.description.clone(),
        skills_learned: codec::encode_list(&payload.skills_learned),
        technologies_used: codec::encode_list(&payload.technologies_used),
        supervisor_name: payload.supervisor_name.clone(),
        supervisor_email: payload.supervisor_email.clone(),
        supervisor_phone: payload.supervisor_phone.clone(),
        performance_rating: payload.performance_rating.and_then(codec::rating_to_storage),
        ongoing: payload.ongoing,
        certificate_received: payload.certificate_received,
        offer_letter_url: payload.offer_letter_url.clone(),
    }
}

fn achievement_data(payload: &AchievementPayload) -> store::AchievementRecordData {
    store::AchievementRecordData {
        title: payload.title.clone().unwrap_or_default(),
        category: payload.category.clone().unwrap_or_default(),
        subcategory: payload.subcategory.clone(),
        level: payload.level.clone(),
        organization: payload.organization.clone(),
        event_name: payload.event_name.clone(),
        achievement_date: payload.achievement_date.unwrap_or_default(),
        position_rank: payload.position_rank.clone(),
        participants_count: payload.participants_count,
        team_size: payload.team_size,
        team_members: codec::encode_list(&payload.team_members),
        prize_amount: payload.prize_amount,
        prize_currency: payload.prize_currency.clone(),
        certificate_url: payload.certificate_url.clone(),
        team_achievement: payload.team_achievement,
        verified: payload.verified,
        media_urls: codec::encode_list(&payload.media_urls),
        skills_demonstrated: codec::encode_list(&payload.skills_demonstrated),
        technologies_used: codec::encode_list(&payload.technologies_used),
        tags: codec::encode_list(&payload.tags),
        semester_achieved: payload.semester_achieved,
    }
}

/// Five 20-point slices: enrollment number, microsoft email, and one record
/// of each child kind.
fn completion_score(
    enrollment_set: bool,
    email_set: bool,
    has_academic: bool,
    has_internship: bool,
    has_achievement: bool,
) -> i32 {
    [enrollment_set, email_set, has_academic, has_internship, has_achievement]
        .iter()
        .filter(|&&slice| slice)
        .count() as i32
        * 20
}

async fn recompute_completion(pool: &PgPool, header: &SarHeader) -> Result<i32, sqlx::Error> {
    let (has_academic, has_internship, has_achievement) =
        store::child_presence(pool, header.id).await?;
    let completion = completion_score(
        !header.enrollment_no.trim().is_empty(),
        !header.microsoft_email.trim().is_empty(),
        has_academic,
        has_internship,
        has_achievement,
    );
    store::set_profile_completion(pool, header.id, completion).await?;
    Ok(completion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_score_counts_twenty_per_slice() {
        assert_eq!(completion_score(false, false, false, false, false), 0);
        assert_eq!(completion_score(true, false, true, false, false), 40);
        assert_eq!(completion_score(true, true, true, true, true), 100);
    }

    #[test]
    fn rating_survives_the_wire_to_storage_hop() {
        let mut payload = InternshipPayload {
            company: Some("Bosch".to_string()),
            position: Some("Intern".to_string()),
            internship_type: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 8),
            end_date: None,
            stipend: None,
            currency: None,
            work_mode: None,
            description: None,
            skills_learned: vec![],
            technologies_used: vec![],
            supervisor_name: None,
            supervisor_email: None,
            supervisor_phone: None,
            performance_rating: Some(5),
            ongoing: true,
            certificate_received: false,
            offer_letter_url: None,
        };
        assert_eq!(internship_data(&payload).performance_rating.as_deref(), Some("excellent"));
        payload.performance_rating = Some(2);
        assert_eq!(internship_data(&payload).performance_rating.as_deref(), Some("average"));
        payload.performance_rating = None;
        assert_eq!(internship_data(&payload).performance_rating, None);
    }
}
