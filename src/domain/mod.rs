// ============================================================================
// Domain Layer
// ============================================================================
//
// Plain data types shared by the store and the HTTP layer. Nothing here
// touches I/O.
//
// ============================================================================

pub mod customer;
