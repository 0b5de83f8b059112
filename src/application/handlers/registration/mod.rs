//! Semester registration command and query handlers.

mod create_registration;
mod delete_registration;
mod get_registration;
mod update_registration;

pub use create_registration::{
    CreateRegistrationCommand, CreateRegistrationHandler, CreateRegistrationResult,
};
pub use delete_registration::{
    DeleteRegistrationCommand, DeleteRegistrationHandler, DeleteRegistrationResult,
};
pub use get_registration::{GetRegistrationHandler, GetRegistrationQuery};
pub use update_registration::{
    UpdateRegistrationCommand, UpdateRegistrationHandler, UpdateRegistrationResult,
};
