//! Offered course command and query handlers.

mod checks;
mod create_offering;
mod delete_offering;
mod get_offering;
mod update_offering;

pub use create_offering::{CreateOfferingCommand, CreateOfferingHandler, CreateOfferingResult};
pub use delete_offering::{DeleteOfferingCommand, DeleteOfferingHandler};
pub use get_offering::{GetOfferingHandler, GetOfferingQuery};
pub use update_offering::{UpdateOfferingCommand, UpdateOfferingHandler, UpdateOfferingResult};
