// ============================================================================
// Customer Domain
// ============================================================================
//
// - Value objects (Email, PhoneNumber)
// - Records (NewCustomer payload, persisted Customer)
//
// Customers are created once and listed; there are no business rules beyond
// persistence.
//
// ============================================================================

pub mod value_objects;
pub mod model;

pub use value_objects::*;
pub use model::*;
