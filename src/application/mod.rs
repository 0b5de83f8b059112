//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Registration handlers
    CreateRegistrationCommand, CreateRegistrationHandler, CreateRegistrationResult,
    DeleteRegistrationCommand, DeleteRegistrationHandler, DeleteRegistrationResult,
    GetRegistrationHandler, GetRegistrationQuery,
    UpdateRegistrationCommand, UpdateRegistrationHandler, UpdateRegistrationResult,
    // Offering handlers
    CreateOfferingCommand, CreateOfferingHandler, CreateOfferingResult,
    DeleteOfferingCommand, DeleteOfferingHandler,
    GetOfferingHandler, GetOfferingQuery,
    UpdateOfferingCommand, UpdateOfferingHandler, UpdateOfferingResult,
};
