use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use lanaudit_common::error::ProbeFailure;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Result of a single connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The handshake completed.
    Open,
    /// The host actively refused the connection.
    NotOpen,
    /// Anything else. Counts as not open.
    Error(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }
}

/// Attempts a full TCP handshake with `addr`, giving up after `probe_timeout`.
pub async fn connect_probe(addr: SocketAddr, probe_timeout: Duration) -> ProbeOutcome {
    timed_probe(addr, probe_timeout, |addr| TcpStream::connect(addr)).await
}

/// Runs one `connect` attempt bounded by `probe_timeout` and tags its result.
pub async fn timed_probe<F, Fut, S>(
    addr: SocketAddr,
    probe_timeout: Duration,
    connect: F,
) -> ProbeOutcome
where
    F: FnOnce(SocketAddr) -> Fut,
    Fut: Future<Output = io::Result<S>>,
{
    match timeout(probe_timeout, connect(addr)).await {
        Ok(Ok(_stream)) => ProbeOutcome::Open,
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => ProbeOutcome::NotOpen,
        Ok(Err(e)) => ProbeOutcome::Error(ProbeFailure::from(e)),
        Err(_elapsed) => ProbeOutcome::Error(ProbeFailure::TimedOut(probe_timeout)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
