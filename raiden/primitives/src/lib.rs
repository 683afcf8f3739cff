#![warn(clippy::missing_docs_in_private_items)]

/// Base constants.
pub mod constants;
/// Base deserializers.
pub mod deserializers;
/// Base hashing functions.
pub mod hashing;
/// Base serializers.
pub mod serializers;
#[cfg(test)]
mod tests;
/// Base types.
pub mod types;
