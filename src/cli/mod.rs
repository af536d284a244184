//! CLI command implementations
//!
//! - `generate`: render suites from inline flags or a spec file
//! - `info`: framework listing and JSON schemas
//! - `util`: shared helpers (method splitting, output targets)

pub mod generate;
pub mod info;
pub mod util;

pub use generate::cmd_generate;
pub use info::{cmd_list_frameworks, cmd_schema};
