//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! mutating handler opens one store transaction, runs its checks inside it,
//! and commits only after the last check passed.

pub mod offering;
pub mod registration;

#[cfg(test)]
pub(crate) mod fixtures;

pub use offering::{
    CreateOfferingCommand, CreateOfferingHandler, CreateOfferingResult, DeleteOfferingCommand,
    DeleteOfferingHandler, GetOfferingHandler, GetOfferingQuery, UpdateOfferingCommand,
    UpdateOfferingHandler, UpdateOfferingResult,
};
pub use registration::{
    CreateRegistrationCommand, CreateRegistrationHandler, CreateRegistrationResult,
    DeleteRegistrationCommand, DeleteRegistrationHandler, DeleteRegistrationResult,
    GetRegistrationHandler, GetRegistrationQuery, UpdateRegistrationCommand,
    UpdateRegistrationHandler, UpdateRegistrationResult,
};
