#![warn(clippy::missing_docs_in_private_items)]

/// Decoder configuration.
pub mod config;
/// Translation of blockchain events into state changes.
pub mod decode;
pub mod errors;
/// Raw and typed contract events.
pub mod events;
/// Lookups of previously exchanged balance proofs.
pub mod history;
#[cfg(test)]
mod tests;
