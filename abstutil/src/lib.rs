//! Odds and ends shared by the other crates: logging, timing of long-running stages, and reading
//! and writing JSON.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod time;
mod utils;

pub use crate::io::{from_json, read_json, to_json, write_json};
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::prettyprint_usize;
