#![warn(clippy::missing_docs_in_private_items)]

/// State machine constants.
pub mod constants;
/// State machine errors
pub mod errors;
/// Write-ahead log of state changes and events.
#[cfg(feature = "storage")]
pub mod storage;
/// Chain state builders and fixed identities for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod factories;
/// State machine types.
pub mod types;
/// Read-only queries over the chain state.
pub mod views;
