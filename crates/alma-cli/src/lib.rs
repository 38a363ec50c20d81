//! CLI library components for the ALMA parent/child lookup.

pub mod export;
pub mod logging;
pub mod session;
pub mod summary;
