//! Cross-crate tests: the scanning pipeline wired together with simulated and real
//! collaborators.

mod discovery;
mod pipeline;
mod probing;
mod support;
