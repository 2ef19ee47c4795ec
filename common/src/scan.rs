//! # Scan Results Model
//!
//! Records produced by one audit run and the values derived from them.

pub mod ports;
pub mod profile;
pub mod record;
pub mod summary;

pub use ports::PortSet;
pub use profile::ScanProfile;
pub use record::{FlatRecord, RiskTier, ScanRecord, ScanRun};
pub use summary::Summary;
