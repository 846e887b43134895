use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "student_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Pending,
    Approved,
    Declined,
}

/// One applicant row. `declined_fields` and `profile` are stored JSON text;
/// the codec and the review workflow own their decoding.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub status: StudentStatus,
    pub declined_fields: String,
    pub profile: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(m) if !m.is_empty() => {
                format!("{} {} {}", self.first_name, m, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// The one-per-student SAR root that child records attach to. Created lazily
/// on the first SAR write; `student_id` is UNIQUE so concurrent creates
/// cannot produce duplicates.
#[derive(Debug, Clone, FromRow)]
pub struct SarHeader {
    pub id: Uuid,
    pub student_id: Uuid,
    pub enrollment_no: String,
    pub microsoft_email: String,
    pub current_semester: i32,
    pub profile_completion: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AcademicRecordRow {
    pub id: Uuid,
    pub sar_id: Uuid,
    pub semester: i32,
    pub academic_year: String,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub credits_earned: Option<i32>,
    pub credits_total: Option<i32>,
    pub attendance_percentage: Option<f64>,
    pub backlog_count: i32,
    pub semester_result: Option<String>,
    pub subjects: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct InternshipRecordRow {
    pub id: Uuid,
    pub sar_id: Uuid,
    pub company: String,
    pub position: String,
    pub internship_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub stipend: Option<f64>,
    pub currency: String,
    pub work_mode: Option<String>,
    pub description: Option<String>,
    pub skills_learned: String,
    pub technologies_used: String,
    pub supervisor_name: Option<String>,
    pub supervisor_email: Option<String>,
    pub supervisor_phone: Option<String>,
    pub performance_rating: Option<String>,
    pub ongoing: bool,
    pub certificate_received: bool,
    pub offer_letter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AchievementRecordRow {
    pub id: Uuid,
    pub sar_id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-kind counts plus the arithmetic mean CGPA for the statistics endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct SarStatisticsRow {
    pub academic_count: i64,
    pub internship_count: i64,
    pub achievement_count: i64,
    pub mean_cgpa: Option<f64>,
}
