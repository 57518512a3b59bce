//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Cart engine and catalog orchestration
//! - Errors: Domain-specific errors
//! - Messaging: Event parsing, dispatching and response building

pub mod errors;
pub mod messaging;
pub mod services;
