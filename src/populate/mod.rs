//! Populate and schema command handlers.

mod logging;
mod run;

pub use logging::mask_connection_password;
pub use run::{run_populate, run_schema};
