pub mod chainlink;
pub mod client;

pub use chainlink::{ChainlinkTracker, parse_status};
pub use client::{TrackerError, TrackerStatus, WorkTracker};
