//! PostgreSQL catalog readers.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use super::rows::map_db_error;
use crate::domain::catalog::{AcademicFaculty, Course, Department, Faculty, Semester};
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, DomainError, FacultyId, SemesterId,
};
use crate::ports::{Catalog, ReferenceReader};

/// Reads catalog reference records from PostgreSQL.
#[derive(Clone)]
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a [`Catalog`] whose readers all share `pool`.
    pub fn catalog(pool: PgPool) -> Catalog {
        let reader = Arc::new(Self::new(pool));
        Catalog {
            semesters: reader.clone(),
            academic_faculties: reader.clone(),
            departments: reader.clone(),
            courses: reader.clone(),
            faculties: reader,
        }
    }

    async fn fetch(
        &self,
        sql: &str,
        id: &uuid::Uuid,
        what: &str,
    ) -> Result<Option<sqlx::postgres::PgRow>, DomainError> {
        sqlx::query(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(&format!("Failed to fetch {}", what), e))
    }
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

#[async_trait]
impl ReferenceReader<Semester, SemesterId> for PostgresCatalogReader {
    async fn get(&self, id: &SemesterId) -> Result<Option<Semester>, DomainError> {
        let row = self
            .fetch("SELECT id, name, year FROM semesters WHERE id = $1", id.as_uuid(), "semester")
            .await?;
        row.map(|row| -> Result<Semester, DomainError> {
            Ok(Semester {
                id: SemesterId::from_uuid(column(&row, "id")?),
                name: column(&row, "name")?,
                year: column(&row, "year")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ReferenceReader<AcademicFaculty, AcademicFacultyId> for PostgresCatalogReader {
    async fn get(&self, id: &AcademicFacultyId) -> Result<Option<AcademicFaculty>, DomainError> {
        let row = self
            .fetch(
                "SELECT id, name FROM academic_faculties WHERE id = $1",
                id.as_uuid(),
                "academic faculty",
            )
            .await?;
        row.map(|row| -> Result<AcademicFaculty, DomainError> {
            Ok(AcademicFaculty {
                id: AcademicFacultyId::from_uuid(column(&row, "id")?),
                name: column(&row, "name")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ReferenceReader<Department, DepartmentId> for PostgresCatalogReader {
    async fn get(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError> {
        let row = self
            .fetch(
                "SELECT id, name, academic_faculty_id FROM departments WHERE id = $1",
                id.as_uuid(),
                "department",
            )
            .await?;
        row.map(|row| -> Result<Department, DomainError> {
            Ok(Department {
                id: DepartmentId::from_uuid(column(&row, "id")?),
                name: column(&row, "name")?,
                academic_faculty: AcademicFacultyId::from_uuid(column(&row, "academic_faculty_id")?),
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ReferenceReader<Course, CourseId> for PostgresCatalogReader {
    async fn get(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row = self
            .fetch("SELECT id, title, code FROM courses WHERE id = $1", id.as_uuid(), "course")
            .await?;
        row.map(|row| -> Result<Course, DomainError> {
            Ok(Course {
                id: CourseId::from_uuid(column(&row, "id")?),
                title: column(&row, "title")?,
                code: column(&row, "code")?,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl ReferenceReader<Faculty, FacultyId> for PostgresCatalogReader {
    async fn get(&self, id: &FacultyId) -> Result<Option<Faculty>, DomainError> {
        let row = self
            .fetch("SELECT id, name FROM faculties WHERE id = $1", id.as_uuid(), "faculty")
            .await?;
        row.map(|row| -> Result<Faculty, DomainError> {
            Ok(Faculty {
                id: FacultyId::from_uuid(column(&row, "id")?),
                name: column(&row, "name")?,
            })
        })
        .transpose()
    }
}
