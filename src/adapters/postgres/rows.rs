//! Row mapping and error translation shared by the PostgreSQL adapters.

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, DomainError, ErrorCode, FacultyId, OfferingId,
    RegistrationId, RegistrationStatus, SemesterId, Timestamp,
};
use crate::domain::offering::{Assignment, CoursePlacement, OfferedCourse, Section};
use crate::domain::registration::{RegistrationTerms, SemesterRegistration};
use crate::domain::schedule::{ClockTime, TimeSlot, Weekday};

pub(super) const SINGLE_ACTIVE_INDEX: &str = "semester_registrations_single_active";
pub(super) const SEMESTER_KEY: &str = "semester_registrations_semester_key";
pub(super) const SECTION_KEY: &str = "offered_courses_section_key";

const UNIQUE_VIOLATION: &str = "23505";

/// Translates a driver error, mapping the invariant-guarding unique
/// constraints onto their domain codes.
pub(super) fn map_db_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let code = match db.constraint() {
                Some(SINGLE_ACTIVE_INDEX) | Some(SEMESTER_KEY) => {
                    Some(ErrorCode::ActiveRegistrationExists)
                }
                Some(SECTION_KEY) => Some(ErrorCode::DuplicateSection),
                _ => None,
            };
            if let Some(code) = code {
                return DomainError::new(code, format!("{}: {}", context, db.message()))
                    .with_detail("constraint", db.constraint().unwrap_or_default());
            }
        }
    }
    DomainError::database(format!("{}: {}", context, e))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

fn corrupt(what: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Invalid {} in database: {}", what, e),
    )
}

pub(super) fn row_to_registration(row: &PgRow) -> Result<SemesterRegistration, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let semester_id: uuid::Uuid = column(row, "semester_id")?;
    let status: String = column(row, "status")?;
    let status: RegistrationStatus = status.parse().map_err(|e| corrupt("status", e))?;
    let min_credit: i32 = column(row, "min_credit")?;
    let max_credit: i32 = column(row, "max_credit")?;

    let terms = RegistrationTerms::with_credits(
        timestamp(row, "start_date")?,
        timestamp(row, "end_date")?,
        u16::try_from(min_credit).map_err(|e| corrupt("min_credit", e))?,
        u16::try_from(max_credit).map_err(|e| corrupt("max_credit", e))?,
    )
    .map_err(|e| corrupt("registration terms", e))?;

    Ok(SemesterRegistration::reconstitute(
        RegistrationId::from_uuid(id),
        SemesterId::from_uuid(semester_id),
        status,
        terms,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

pub(super) fn row_to_offering(row: &PgRow) -> Result<OfferedCourse, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let registration_id: uuid::Uuid = column(row, "registration_id")?;
    let semester_id: uuid::Uuid = column(row, "semester_id")?;
    let academic_faculty_id: uuid::Uuid = column(row, "academic_faculty_id")?;
    let department_id: uuid::Uuid = column(row, "department_id")?;
    let course_id: uuid::Uuid = column(row, "course_id")?;
    let faculty_id: uuid::Uuid = column(row, "faculty_id")?;
    let section: String = column(row, "section")?;
    let max_capacity: i32 = column(row, "max_capacity")?;
    let days: Vec<String> = column(row, "days")?;
    let start_minute: i32 = column(row, "start_minute")?;
    let end_minute: i32 = column(row, "end_minute")?;

    let days = days
        .iter()
        .map(|d| d.parse::<Weekday>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| corrupt("days", e))?;
    let slot = TimeSlot::new(
        days,
        clock_time(start_minute)?,
        clock_time(end_minute)?,
    )
    .map_err(|e| corrupt("time slot", e))?;
    let assignment = Assignment::new(
        FacultyId::from_uuid(faculty_id),
        u32::try_from(max_capacity).map_err(|e| corrupt("max_capacity", e))?,
        slot,
    )
    .map_err(|e| corrupt("assignment", e))?;

    Ok(OfferedCourse::reconstitute(
        OfferingId::from_uuid(id),
        RegistrationId::from_uuid(registration_id),
        SemesterId::from_uuid(semester_id),
        CoursePlacement {
            academic_faculty: AcademicFacultyId::from_uuid(academic_faculty_id),
            department: DepartmentId::from_uuid(department_id),
            course: CourseId::from_uuid(course_id),
        },
        Section::new(section).map_err(|e| corrupt("section", e))?,
        assignment,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

fn clock_time(minutes: i32) -> Result<ClockTime, DomainError> {
    let minutes = u16::try_from(minutes).map_err(|e| corrupt("time", e))?;
    ClockTime::from_minutes(minutes).map_err(|e| corrupt("time", e))
}

pub(super) fn days_to_strings(slot: &TimeSlot) -> Vec<String> {
    slot.days().iter().map(|d| d.as_str().to_string()).collect()
}

pub(super) fn minutes(time: ClockTime) -> i32 {
    i32::from(time.minutes_since_midnight())
}
