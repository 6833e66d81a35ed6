pub mod metrics;
pub mod region;
pub mod turn;

pub use metrics::{Metrics, RegionFilter};
pub use region::{Region, Timeline};
pub use turn::{Turn, TurnList};
