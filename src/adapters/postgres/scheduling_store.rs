//! PostgreSQL implementation of SchedulingStore.
//!
//! Every transaction runs at SERIALIZABLE isolation. The unique indexes in
//! the schema back up the handlers' in-transaction checks: if two writers
//! slip past a check concurrently, one of them fails on commit or on a
//! constraint and the violation is mapped onto the matching domain code.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::rows::{days_to_strings, map_db_error, minutes, row_to_offering, row_to_registration};
use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, FacultyId, OfferingId, RegistrationId, SemesterId,
};
use crate::domain::offering::{OfferedCourse, Section};
use crate::domain::registration::SemesterRegistration;
use crate::ports::{SchedulingStore, SchedulingTransaction};

const REGISTRATION_COLUMNS: &str = "id, semester_id, status, start_date, end_date, \
     min_credit, max_credit, created_at, updated_at";

const OFFERING_COLUMNS: &str = "id, registration_id, semester_id, academic_faculty_id, \
     department_id, course_id, section, faculty_id, max_capacity, days, start_minute, \
     end_minute, created_at, updated_at";

/// PostgreSQL implementation of SchedulingStore.
#[derive(Clone)]
pub struct PostgresSchedulingStore {
    pool: PgPool,
}

impl PostgresSchedulingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulingStore for PostgresSchedulingStore {
    async fn begin(&self) -> Result<Box<dyn SchedulingTransaction>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Failed to set isolation level", e))?;

        Ok(Box::new(PostgresTransaction { tx }))
    }

    async fn find_registration(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM semester_registrations WHERE id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to fetch registration", e))?;

        row.as_ref().map(row_to_registration).transpose()
    }

    async fn find_offering(&self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM offered_courses WHERE id = $1",
            OFFERING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to fetch offered course", e))?;

        row.as_ref().map(row_to_offering).transpose()
    }
}

/// A SERIALIZABLE database transaction. sqlx rolls it back on drop.
pub struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SchedulingTransaction for PostgresTransaction {
    async fn find_registration(
        &mut self,
        id: &RegistrationId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM semester_registrations WHERE id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch registration", e))?;

        row.as_ref().map(row_to_registration).transpose()
    }

    async fn find_active_registration(
        &mut self,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM semester_registrations \
             WHERE status IN ('UPCOMING', 'ONGOING') LIMIT 1",
            REGISTRATION_COLUMNS
        ))
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch active registration", e))?;

        row.as_ref().map(row_to_registration).transpose()
    }

    async fn find_registration_by_semester(
        &mut self,
        semester: &SemesterId,
    ) -> Result<Option<SemesterRegistration>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM semester_registrations WHERE semester_id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(semester.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch registration by semester", e))?;

        row.as_ref().map(row_to_registration).transpose()
    }

    async fn insert_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError> {
        let terms = registration.terms();
        sqlx::query(
            r#"
            INSERT INTO semester_registrations (
                id, semester_id, status, start_date, end_date,
                min_credit, max_credit, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(registration.id().as_uuid())
        .bind(registration.semester().as_uuid())
        .bind(registration.status().as_str())
        .bind(terms.start_date().as_datetime())
        .bind(terms.end_date().as_datetime())
        .bind(i32::from(terms.min_credit()))
        .bind(i32::from(terms.max_credit()))
        .bind(registration.created_at().as_datetime())
        .bind(registration.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to insert registration", e))?;

        Ok(())
    }

    async fn update_registration(
        &mut self,
        registration: &SemesterRegistration,
    ) -> Result<(), DomainError> {
        let terms = registration.terms();
        let result = sqlx::query(
            r#"
            UPDATE semester_registrations SET
                status = $2,
                start_date = $3,
                end_date = $4,
                min_credit = $5,
                max_credit = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(registration.id().as_uuid())
        .bind(registration.status().as_str())
        .bind(terms.start_date().as_datetime())
        .bind(terms.end_date().as_datetime())
        .bind(i32::from(terms.min_credit()))
        .bind(i32::from(terms.max_credit()))
        .bind(registration.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to update registration", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Semester registration not found: {}", registration.id()),
            ));
        }

        Ok(())
    }

    async fn delete_registration(&mut self, id: &RegistrationId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM semester_registrations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete registration", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_offering(&mut self, id: &OfferingId) -> Result<Option<OfferedCourse>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM offered_courses WHERE id = $1",
            OFFERING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch offered course", e))?;

        row.as_ref().map(row_to_offering).transpose()
    }

    async fn find_offering_by_section(
        &mut self,
        registration: &RegistrationId,
        course: &CourseId,
        section: &Section,
    ) -> Result<Option<OfferedCourse>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM offered_courses \
             WHERE registration_id = $1 AND course_id = $2 AND section = $3",
            OFFERING_COLUMNS
        ))
        .bind(registration.as_uuid())
        .bind(course.as_uuid())
        .bind(section.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch offered course by section", e))?;

        row.as_ref().map(row_to_offering).transpose()
    }

    async fn find_faculty_offerings(
        &mut self,
        registration: &RegistrationId,
        faculty: &FacultyId,
    ) -> Result<Vec<OfferedCourse>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM offered_courses WHERE registration_id = $1 AND faculty_id = $2",
            OFFERING_COLUMNS
        ))
        .bind(registration.as_uuid())
        .bind(faculty.as_uuid())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to fetch faculty offerings", e))?;

        rows.iter().map(row_to_offering).collect()
    }

    async fn insert_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError> {
        let placement = offering.placement();
        let assignment = offering.assignment();
        sqlx::query(
            r#"
            INSERT INTO offered_courses (
                id, registration_id, semester_id, academic_faculty_id, department_id,
                course_id, section, faculty_id, max_capacity, days,
                start_minute, end_minute, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(offering.id().as_uuid())
        .bind(offering.registration().as_uuid())
        .bind(offering.semester().as_uuid())
        .bind(placement.academic_faculty.as_uuid())
        .bind(placement.department.as_uuid())
        .bind(placement.course.as_uuid())
        .bind(offering.section().as_str())
        .bind(assignment.faculty().as_uuid())
        .bind(max_capacity(assignment.max_capacity())?)
        .bind(days_to_strings(assignment.slot()))
        .bind(minutes(assignment.slot().start()))
        .bind(minutes(assignment.slot().end()))
        .bind(offering.created_at().as_datetime())
        .bind(offering.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to insert offered course", e))?;

        Ok(())
    }

    async fn update_offering(&mut self, offering: &OfferedCourse) -> Result<(), DomainError> {
        let assignment = offering.assignment();
        let result = sqlx::query(
            r#"
            UPDATE offered_courses SET
                faculty_id = $2,
                max_capacity = $3,
                days = $4,
                start_minute = $5,
                end_minute = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(offering.id().as_uuid())
        .bind(assignment.faculty().as_uuid())
        .bind(max_capacity(assignment.max_capacity())?)
        .bind(days_to_strings(assignment.slot()))
        .bind(minutes(assignment.slot().start()))
        .bind(minutes(assignment.slot().end()))
        .bind(offering.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to update offered course", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Offered course not found: {}", offering.id()),
            ));
        }

        Ok(())
    }

    async fn delete_offering(&mut self, id: &OfferingId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM offered_courses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete offered course", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_offerings_by_registration(
        &mut self,
        registration: &RegistrationId,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM offered_courses WHERE registration_id = $1")
            .bind(registration.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete offered courses", e))?;

        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| map_db_error("Failed to commit transaction", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| map_db_error("Failed to roll back transaction", e))
    }
}

fn max_capacity(value: u32) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("max_capacity {} exceeds storage range", value),
        )
    })
}
