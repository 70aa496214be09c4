//! Generators for the non-key fields of a mock record.
//!
//! Every field is drawn independently and uniformly; none of them carries a
//! uniqueness constraint.

pub mod choice;
pub mod program_name;

pub use choice::{generate_carrier, generate_status};
pub use program_name::generate_program_name;
