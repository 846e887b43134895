//! Record store for the SAR aggregate: the per-student header and its
//! academic / internship / achievement children.
//!
//! Every child mutation filters by `id AND sar_id`. The caller resolves the
//! header from the authenticated identity, so a record id on its own never
//! grants access to another student's rows; zero matched rows reads as
//! not-found.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    AcademicRecordRow, AchievementRecordRow, InternshipRecordRow, SarHeader, SarStatisticsRow,
};

pub async fn header_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Option<SarHeader>, sqlx::Error> {
    sqlx::query_as::<_, SarHeader>("SELECT * FROM sar_headers WHERE student_id = $1")
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

/// Lazily create the header on first touch. The UNIQUE constraint on
/// `student_id` plus `ON CONFLICT DO NOTHING` makes concurrent first touches
/// converge on a single row.
pub async fn get_or_create_header(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<SarHeader, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO sar_headers (id, student_id)
        VALUES ($1, $2)
        ON CONFLICT (student_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, SarHeader>("SELECT * FROM sar_headers WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
}

pub async fn header_by_enrollment(
    pool: &PgPool,
    enrollment_no: &str,
) -> Result<Option<SarHeader>, sqlx::Error> {
    sqlx::query_as::<_, SarHeader>("SELECT * FROM sar_headers WHERE enrollment_no = $1")
        .bind(enrollment_no)
        .fetch_optional(pool)
        .await
}

pub async fn update_header(
    pool: &PgPool,
    student_id: Uuid,
    enrollment_no: &str,
    microsoft_email: &str,
    current_semester: i32,
) -> Result<Option<SarHeader>, sqlx::Error> {
    sqlx::query_as::<_, SarHeader>(
        r#"
        UPDATE sar_headers
        SET enrollment_no = $2, microsoft_email = $3, current_semester = $4, updated_at = now()
        WHERE student_id = $1
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(enrollment_no)
    .bind(microsoft_email)
    .bind(current_semester)
    .fetch_optional(pool)
    .await
}

pub async fn set_profile_completion(
    pool: &PgPool,
    sar_id: Uuid,
    completion: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sar_headers SET profile_completion = $2, updated_at = now() WHERE id = $1")
        .bind(sar_id)
        .bind(completion)
        .execute(pool)
        .await?;
    Ok(())
}

// --- academic records ---

#[derive(Debug, Clone)]
pub struct AcademicRecordData {
    pub semester: i32,
    pub academic_year: String,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub credits_earned: Option<i32>,
    pub credits_total: Option<i32>,
    pub attendance_percentage: Option<f64>,
    pub backlog_count: i32,
    pub semester_result: Option<String>,
    /// Already codec-encoded subject list.
    pub subjects: String,
}

pub async fn list_academic(
    pool: &PgPool,
    sar_id: Uuid,
) -> Result<Vec<AcademicRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, AcademicRecordRow>(
        "SELECT * FROM academic_records WHERE sar_id = $1 ORDER BY semester ASC",
    )
    .bind(sar_id)
    .fetch_all(pool)
    .await
}

pub async fn semester_exists(
    pool: &PgPool,
    sar_id: Uuid,
    semester: i32,
) -> Result<bool, sqlx::Error> {
    let existing: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM academic_records WHERE sar_id = $1 AND semester = $2",
    )
    .bind(sar_id)
    .bind(semester)
    .fetch_optional(pool)
    .await?;
    Ok(existing.is_some())
}

pub async fn insert_academic(
    pool: &PgPool,
    sar_id: Uuid,
    data: &AcademicRecordData,
) -> Result<AcademicRecordRow, sqlx::Error> {
    sqlx::query_as::<_, AcademicRecordRow>(
        r#"
        INSERT INTO academic_records
            (id, sar_id, semester, academic_year, sgpa, cgpa, credits_earned, credits_total,
             attendance_percentage, backlog_count, semester_result, subjects)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sar_id)
    .bind(data.semester)
    .bind(&data.academic_year)
    .bind(data.sgpa)
    .bind(data.cgpa)
    .bind(data.credits_earned)
    .bind(data.credits_total)
    .bind(data.attendance_percentage)
    .bind(data.backlog_count)
    .bind(&data.semester_result)
    .bind(&data.subjects)
    .fetch_one(pool)
    .await
}

pub async fn update_academic(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
    data: &AcademicRecordData,
) -> Result<Option<AcademicRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, AcademicRecordRow>(
        r#"
        UPDATE academic_records
        SET semester = $3, academic_year = $4, sgpa = $5, cgpa = $6, credits_earned = $7,
            credits_total = $8, attendance_percentage = $9, backlog_count = $10,
            semester_result = $11, subjects = $12, updated_at = now()
        WHERE id = $1 AND sar_id = $2
        RETURNING *
        "#,
    )
    .bind(record_id)
    .bind(sar_id)
    .bind(data.semester)
    .bind(&data.academic_year)
    .bind(data.sgpa)
    .bind(data.cgpa)
    .bind(data.credits_earned)
    .bind(data.credits_total)
    .bind(data.attendance_percentage)
    .bind(data.backlog_count)
    .bind(&data.semester_result)
    .bind(&data.subjects)
    .fetch_optional(pool)
    .await
}

pub async fn delete_academic(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM academic_records WHERE id = $1 AND sar_id = $2")
        .bind(record_id)
        .bind(sar_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// --- internship records ---

#[derive(Debug, Clone)]
pub struct InternshipRecordData {
    pub company: String,
    pub position: String,
    pub internship_type: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: Option<chrono::NaiveDate>,
    pub stipend: Option<f64>,
    pub currency: String,
    pub work_mode: Option<String>,
    pub description: Option<String>,
    pub skills_learned: String,
    pub technologies_used: String,
    pub supervisor_name: Option<String>,
    pub supervisor_email: Option<String>,
    pub supervisor_phone: Option<String>,
    /// Stored qualitative band, already transcoded from the numeric rating.
    pub performance_rating: Option<String>,
    pub ongoing: bool,
    pub certificate_received: bool,
    pub offer_letter_url: Option<String>,
}

pub async fn list_internships(
    pool: &PgPool,
    sar_id: Uuid,
) -> Result<Vec<InternshipRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, InternshipRecordRow>(
        "SELECT * FROM internship_records WHERE sar_id = $1 ORDER BY start_date DESC, created_at DESC",
    )
    .bind(sar_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_internship(
    pool: &PgPool,
    sar_id: Uuid,
    data: &InternshipRecordData,
) -> Result<InternshipRecordRow, sqlx::Error> {
    sqlx::query_as::<_, InternshipRecordRow>(
        r#"
        INSERT INTO internship_records
            (id, sar_id, company, position, internship_type, start_date, end_date, stipend,
             currency, work_mode, description, skills_learned, technologies_used,
             supervisor_name, supervisor_email, supervisor_phone, performance_rating,
             ongoing, certificate_received, offer_letter_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sar_id)
    .bind(&data.company)
    .bind(&data.position)
    .bind(&data.internship_type)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.stipend)
    .bind(&data.currency)
    .bind(&data.work_mode)
    .bind(&data.description)
    .bind(&data.skills_learned)
    .bind(&data.technologies_used)
    .bind(&data.supervisor_name)
    .bind(&data.supervisor_email)
    .bind(&data.supervisor_phone)
    .bind(&data.performance_rating)
    .bind(data.ongoing)
    .bind(data.certificate_received)
    .bind(&data.offer_letter_url)
    .fetch_one(pool)
    .await
}

pub async fn update_internship(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
    data: &InternshipRecordData,
) -> Result<Option<InternshipRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, InternshipRecordRow>(
        r#"
        UPDATE internship_records
        SET company = $3, position = $4, internship_type = $5, start_date = $6, end_date = $7,
            stipend = $8, currency = $9, work_mode = $10, description = $11,
            skills_learned = $12, technologies_used = $13, supervisor_name = $14,
            supervisor_email = $15, supervisor_phone = $16, performance_rating = $17,
            ongoing = $18, certificate_received = $19, offer_letter_url = $20, updated_at = now()
        WHERE id = $1 AND sar_id = $2
        RETURNING *
        "#,
    )
    .bind(record_id)
    .bind(sar_id)
    .bind(&data.company)
    .bind(&data.position)
    .bind(&data.internship_type)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.stipend)
    .bind(&data.currency)
    .bind(&data.work_mode)
    .bind(&data.description)
    .bind(&data.skills_learned)
    .bind(&data.technologies_used)
    .bind(&data.supervisor_name)
    .bind(&data.supervisor_email)
    .bind(&data.supervisor_phone)
    .bind(&data.performance_rating)
    .bind(data.ongoing)
    .bind(data.certificate_received)
    .bind(&data.offer_letter_url)
    .fetch_optional(pool)
    .await
}

pub async fn delete_internship(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM internship_records WHERE id = $1 AND sar_id = $2")
        .bind(record_id)
        .bind(sar_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// --- achievement records ---

#[derive(Debug, Clone)]
pub struct AchievementRecordData {
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub level: Option<String>,
    pub organization: Option<String>,
    pub event_name: Option<String>,
    pub achievement_date: chrono::NaiveDate,
    pub position_rank: Option<String>,
    pub participants_count: Option<i32>,
    pub team_size: Option<i32>,
    pub team_members: String,
    pub prize_amount: Option<f64>,
    pub prize_currency: Option<String>,
    pub certificate_url: Option<String>,
    pub team_achievement: bool,
    pub verified: bool,
    pub media_urls: String,
    pub skills_demonstrated: String,
    pub technologies_used: String,
    pub tags: String,
    pub semester_achieved: Option<i32>,
}

pub async fn list_achievements(
    pool: &PgPool,
    sar_id: Uuid,
) -> Result<Vec<AchievementRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, AchievementRecordRow>(
        "SELECT * FROM achievement_records WHERE sar_id = $1 ORDER BY achievement_date DESC, created_at DESC",
    )
    .bind(sar_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_achievement(
    pool: &PgPool,
    sar_id: Uuid,
    data: &AchievementRecordData,
) -> Result<AchievementRecordRow, sqlx::Error> {
    sqlx::query_as::<_, AchievementRecordRow>(
        r#"
        INSERT INTO achievement_records
            (id, sar_id, title, category, subcategory, level, organization, event_name,
             achievement_date, position_rank, participants_count, team_size, team_members,
             prize_amount, prize_currency, certificate_url, team_achievement, verified,
             media_urls, skills_demonstrated, technologies_used, tags, semester_achieved)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sar_id)
    .bind(&data.title)
    .bind(&data.category)
    .bind(&data.subcategory)
    .bind(&data.level)
    .bind(&data.organization)
    .bind(&data.event_name)
    .bind(data.achievement_date)
    .bind(&data.position_rank)
    .bind(data.participants_count)
    .bind(data.team_size)
    .bind(&data.team_members)
    .bind(data.prize_amount)
    .bind(&data.prize_currency)
    .bind(&data.certificate_url)
    .bind(data.team_achievement)
    .bind(data.verified)
    .bind(&data.media_urls)
    .bind(&data.skills_demonstrated)
    .bind(&data.technologies_used)
    .bind(&data.tags)
    .bind(data.semester_achieved)
    .fetch_one(pool)
    .await
}

pub async fn update_achievement(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
    data: &AchievementRecordData,
) -> Result<Option<AchievementRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, AchievementRecordRow>(
        r#"
        UPDATE achievement_records
        SET title = $3, category = $4, subcategory = $5, level = $6, organization = $7,
            event_name = $8, achievement_date = $9, position_rank = $10,
            participants_count = $11, team_size = $12, team_members = $13,
            prize_amount = $14, prize_currency = $15, certificate_url = $16,
            team_achievement = $17, verified = $18, media_urls = $19,
            skills_demonstrated = $20, technologies_used = $21, tags = $22,
            semester_achieved = $23, updated_at = now()
        WHERE id = $1 AND sar_id = $2
        RETURNING *
        "#,
    )
    .bind(record_id)
    .bind(sar_id)
    .bind(&data.title)
    .bind(&data.category)
    .bind(&data.subcategory)
    .bind(&data.level)
    .bind(&data.organization)
    .bind(&data.event_name)
    .bind(data.achievement_date)
    .bind(&data.position_rank)
    .bind(data.participants_count)
    .bind(data.team_size)
    .bind(&data.team_members)
    .bind(data.prize_amount)
    .bind(&data.prize_currency)
    .bind(&data.certificate_url)
    .bind(data.team_achievement)
    .bind(data.verified)
    .bind(&data.media_urls)
    .bind(&data.skills_demonstrated)
    .bind(&data.technologies_used)
    .bind(&data.tags)
    .bind(data.semester_achieved)
    .fetch_optional(pool)
    .await
}

pub async fn delete_achievement(
    pool: &PgPool,
    sar_id: Uuid,
    record_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM achievement_records WHERE id = $1 AND sar_id = $2")
        .bind(record_id)
        .bind(sar_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// --- statistics ---

pub async fn statistics(pool: &PgPool, sar_id: Uuid) -> Result<SarStatisticsRow, sqlx::Error> {
    sqlx::query_as::<_, SarStatisticsRow>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM academic_records WHERE sar_id = $1) AS academic_count,
            (SELECT COUNT(*) FROM internship_records WHERE sar_id = $1) AS internship_count,
            (SELECT COUNT(*) FROM achievement_records WHERE sar_id = $1) AS achievement_count,
            (SELECT AVG(cgpa) FROM academic_records WHERE sar_id = $1 AND cgpa IS NOT NULL) AS mean_cgpa
        "#,
    )
    .bind(sar_id)
    .fetch_one(pool)
    .await
}

/// Presence facts feeding the profile-completion recompute.
pub async fn child_presence(pool: &PgPool, sar_id: Uuid) -> Result<(bool, bool, bool), sqlx::Error> {
    let stats = statistics(pool, sar_id).await?;
    Ok((
        stats.academic_count > 0,
        stats.internship_count > 0,
        stats.achievement_count > 0,
    ))
}
