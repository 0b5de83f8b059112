//! Shared fixtures for handler unit tests.

use std::sync::Arc;

use crate::adapters::memory::{InMemoryCatalog, InMemorySchedulingStore};
use crate::domain::catalog::{AcademicFaculty, Course, Department, Faculty, Semester};
use crate::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, FacultyId, RegistrationId, SemesterId, Timestamp,
};
use crate::domain::offering::{Assignment, CoursePlacement, OfferedCourse, Section};
use crate::domain::registration::{RegistrationTerms, SemesterRegistration};
use crate::domain::schedule::{TimeSlot, Weekday};
use crate::ports::{Catalog, SchedulingStore};

/// A catalog with two semesters, two academic faculties (one department
/// each), two courses and two faculty members, plus an empty store.
pub struct Fixture {
    pub store: Arc<InMemorySchedulingStore>,
    pub catalog: Catalog,
    pub fall: Semester,
    pub spring: Semester,
    pub engineering: AcademicFaculty,
    pub science: AcademicFaculty,
    pub computing: Department,
    pub physics: Department,
    pub compilers: Course,
    pub databases: Course,
    pub ada: Faculty,
    pub grace: Faculty,
}

impl Fixture {
    pub fn new() -> Self {
        let fall = Semester {
            id: SemesterId::new(),
            name: "Fall".to_string(),
            year: 2026,
        };
        let spring = Semester {
            id: SemesterId::new(),
            name: "Spring".to_string(),
            year: 2027,
        };
        let engineering = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: "Engineering".to_string(),
        };
        let science = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: "Science".to_string(),
        };
        let computing = Department {
            id: DepartmentId::new(),
            name: "Computing".to_string(),
            academic_faculty: engineering.id,
        };
        let physics = Department {
            id: DepartmentId::new(),
            name: "Physics".to_string(),
            academic_faculty: science.id,
        };
        let compilers = Course {
            id: CourseId::new(),
            title: "Compilers".to_string(),
            code: "CS-440".to_string(),
        };
        let databases = Course {
            id: CourseId::new(),
            title: "Databases".to_string(),
            code: "CS-320".to_string(),
        };
        let ada = Faculty {
            id: FacultyId::new(),
            name: "Ada Lovelace".to_string(),
        };
        let grace = Faculty {
            id: FacultyId::new(),
            name: "Grace Hopper".to_string(),
        };

        let catalog = InMemoryCatalog::new()
            .with_semester(fall.clone())
            .with_semester(spring.clone())
            .with_academic_faculty(engineering.clone())
            .with_academic_faculty(science.clone())
            .with_department(computing.clone())
            .with_department(physics.clone())
            .with_course(compilers.clone())
            .with_course(databases.clone())
            .with_faculty(ada.clone())
            .with_faculty(grace.clone())
            .build();

        Self {
            store: Arc::new(InMemorySchedulingStore::new()),
            catalog,
            fall,
            spring,
            engineering,
            science,
            computing,
            physics,
            compilers,
            databases,
            ada,
            grace,
        }
    }

    pub fn store(&self) -> Arc<dyn SchedulingStore> {
        self.store.clone()
    }

    pub fn terms() -> RegistrationTerms {
        let start = Timestamp::now();
        RegistrationTerms::new(start, start.plus_days(120)).unwrap()
    }

    /// Commits an UPCOMING registration for the fall semester.
    pub async fn seed_registration(&self) -> SemesterRegistration {
        let registration =
            SemesterRegistration::new(RegistrationId::new(), self.fall.id, Self::terms());
        let mut tx = self.store.begin().await.unwrap();
        tx.insert_registration(&registration).await.unwrap();
        tx.commit().await.unwrap();
        registration
    }

    /// Commits a compilers offering taught by Ada in `registration`.
    pub async fn seed_offering(
        &self,
        registration: &SemesterRegistration,
        section: &str,
        days: &[Weekday],
        start: &str,
        end: &str,
    ) -> OfferedCourse {
        let slot = TimeSlot::parse(days.iter().copied(), start, end).unwrap();
        let offering = OfferedCourse::new(
            crate::domain::foundation::OfferingId::new(),
            *registration.id(),
            *registration.semester(),
            CoursePlacement {
                academic_faculty: self.engineering.id,
                department: self.computing.id,
                course: self.compilers.id,
            },
            Section::new(section).unwrap(),
            Assignment::new(self.ada.id, 40, slot).unwrap(),
        );
        let mut tx = self.store.begin().await.unwrap();
        tx.insert_offering(&offering).await.unwrap();
        tx.commit().await.unwrap();
        offering
    }

    /// Overwrites a committed registration.
    pub async fn save_registration(&self, registration: &SemesterRegistration) {
        let mut tx = self.store.begin().await.unwrap();
        tx.update_registration(registration).await.unwrap();
        tx.commit().await.unwrap();
    }
}
