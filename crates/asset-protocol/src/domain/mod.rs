//! # Domain Layer
//!
//! Pure protocol logic: records, constants, the height-keyed rule table and
//! the problem vocabulary shared by the parse and compose paths.
//!
//! ## Hexagonal Architecture
//!
//! This module contains NO I/O dependencies. Ledger access goes through the
//! ports in the `ports` module.

pub mod entities;
pub mod errors;
pub mod problems;
pub mod rules;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use problems::*;
pub use rules::*;
pub use value_objects::*;
