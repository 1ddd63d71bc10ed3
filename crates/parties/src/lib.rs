//! Customer records for billing.
//!
//! Pure domain logic: customer details, identity and the ordered customer
//! directory (no IO, no storage).

pub mod customer;
pub mod directory;

pub use customer::{names_match, Customer, CustomerDetails};
pub use directory::CustomerDirectory;
