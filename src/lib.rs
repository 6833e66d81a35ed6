pub mod batch;
pub mod core;
pub mod error;
pub mod io;
pub mod models;

pub use batch::{score_batch, OVERALL};
pub use core::compute_der;
pub use error::{DerError, Result};
pub use io::{parse_rttm_file, parse_rttm_str, parse_uem_file, parse_uem_str};
pub use models::{Metrics, Region, RegionFilter, Timeline, Turn, TurnList};
