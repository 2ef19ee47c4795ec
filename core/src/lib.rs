//! # lanaudit scanning engine
//!
//! Discovery, probing, classification and aggregation for a single-subnet audit.
//!
//! * [`discovery`]: ARP sweep of the target range, collecting live hosts.
//! * [`prober`]: bounded-concurrency TCP connect checks against one host.
//! * [`classifier`]: maps open ports to advice and a risk tier.
//! * [`scanner`]: sequences the above into a [`ScanRun`](lanaudit_common::scan::ScanRun).
//! * [`summary`]: dashboard metrics over finished records.

pub mod classifier;
pub mod discovery;
pub mod network;
pub mod prober;
pub mod scanner;
pub mod summary;

pub use discovery::{ArpDiscoverer, HostDiscoverer};
pub use prober::{PortProber, TcpProber};
pub use scanner::{ScanEvent, ScanHandle, ScanOrchestrator};
