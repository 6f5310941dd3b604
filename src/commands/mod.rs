//! Command implementations for the crimp-quality CLI
//!
//! Each command lives in its own module and takes already-resolved options, so the
//! same code paths are exercised by the binary and by the integration tests.

pub mod dates;
pub mod export;
pub mod parse;
pub mod search;

pub use dates::run_dates;
pub use export::{default_output_path, run_export};
pub use parse::run_parse;
pub use search::run_search;
