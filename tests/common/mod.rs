//! Shared setup for the integration tests: an in-memory store and a small
//! catalog, wired into every handler.

#![allow(dead_code)]

use std::sync::Arc;

use semester_offerings::adapters::{InMemoryCatalog, InMemorySchedulingStore};
use semester_offerings::application::{
    CreateOfferingCommand, CreateOfferingHandler, CreateRegistrationCommand,
    CreateRegistrationHandler, DeleteOfferingHandler, DeleteRegistrationHandler,
    GetOfferingHandler, GetRegistrationHandler, UpdateOfferingHandler,
    UpdateRegistrationHandler,
};
use semester_offerings::domain::catalog::{AcademicFaculty, Course, Department, Faculty, Semester};
use semester_offerings::domain::foundation::{
    AcademicFacultyId, CourseId, DepartmentId, FacultyId, RegistrationId, SemesterId, Timestamp,
};
use semester_offerings::domain::schedule::Weekday;

pub struct University {
    pub store: Arc<InMemorySchedulingStore>,
    pub semesters: Vec<SemesterId>,
    pub engineering: AcademicFacultyId,
    pub computing: DepartmentId,
    pub courses: Vec<CourseId>,
    pub faculty: Vec<FacultyId>,

    pub create_registration: CreateRegistrationHandler,
    pub update_registration: UpdateRegistrationHandler,
    pub delete_registration: DeleteRegistrationHandler,
    pub get_registration: GetRegistrationHandler,
    pub create_offering: CreateOfferingHandler,
    pub update_offering: UpdateOfferingHandler,
    pub delete_offering: DeleteOfferingHandler,
    pub get_offering: GetOfferingHandler,
}

impl University {
    pub fn new() -> Self {
        let semesters: Vec<Semester> = ["Fall", "Spring", "Summer"]
            .iter()
            .map(|name| Semester {
                id: SemesterId::new(),
                name: name.to_string(),
                year: 2026,
            })
            .collect();
        let engineering = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: "Engineering".to_string(),
        };
        let computing = Department {
            id: DepartmentId::new(),
            name: "Computing".to_string(),
            academic_faculty: engineering.id,
        };
        let courses: Vec<Course> = ["Compilers", "Databases", "Networks"]
            .iter()
            .enumerate()
            .map(|(i, title)| Course {
                id: CourseId::new(),
                title: title.to_string(),
                code: format!("CS-{}", 300 + i),
            })
            .collect();
        let faculty: Vec<Faculty> = ["Ada Lovelace", "Alan Turing"]
            .iter()
            .map(|name| Faculty {
                id: FacultyId::new(),
                name: name.to_string(),
            })
            .collect();

        let mut builder = InMemoryCatalog::new()
            .with_academic_faculty(engineering.clone())
            .with_department(computing.clone());
        for semester in &semesters {
            builder = builder.with_semester(semester.clone());
        }
        for course in &courses {
            builder = builder.with_course(course.clone());
        }
        for member in &faculty {
            builder = builder.with_faculty(member.clone());
        }
        let catalog = builder.build();

        let store = Arc::new(InMemorySchedulingStore::new());

        Self {
            create_registration: CreateRegistrationHandler::new(store.clone(), catalog.clone()),
            update_registration: UpdateRegistrationHandler::new(store.clone()),
            delete_registration: DeleteRegistrationHandler::new(store.clone()),
            get_registration: GetRegistrationHandler::new(store.clone()),
            create_offering: CreateOfferingHandler::new(store.clone(), catalog.clone()),
            update_offering: UpdateOfferingHandler::new(store.clone(), catalog),
            delete_offering: DeleteOfferingHandler::new(store.clone()),
            get_offering: GetOfferingHandler::new(store.clone()),
            store,
            semesters: semesters.iter().map(|s| s.id).collect(),
            engineering: engineering.id,
            computing: computing.id,
            courses: courses.iter().map(|c| c.id).collect(),
            faculty: faculty.iter().map(|f| f.id).collect(),
        }
    }

    pub fn registration_command(&self, semester: SemesterId) -> CreateRegistrationCommand {
        let start = Timestamp::now();
        CreateRegistrationCommand {
            semester,
            start_date: start,
            end_date: start.plus_days(100),
            min_credit: None,
            max_credit: None,
        }
    }

    pub async fn open_registration(&self, semester: SemesterId) -> RegistrationId {
        *self
            .create_registration
            .handle(self.registration_command(semester))
            .await
            .unwrap()
            .registration
            .id()
    }

    pub fn offering_command(
        &self,
        registration: RegistrationId,
        course: CourseId,
        section: &str,
        faculty: FacultyId,
        days: &[Weekday],
        start: &str,
        end: &str,
    ) -> CreateOfferingCommand {
        CreateOfferingCommand {
            registration,
            academic_faculty: self.engineering,
            department: self.computing,
            course,
            section: section.to_string(),
            faculty,
            max_capacity: 40,
            days: days.to_vec(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }
}
