#![warn(clippy::missing_docs_in_private_items)]

/// Create state changes table SQL.
pub(super) const DB_CREATE_STATE_CHANGES: &str = "
CREATE TABLE IF NOT EXISTS state_changes (
    identifier ULID PRIMARY KEY NOT NULL,
    data JSON,
    timestamp TIMESTAMP DEFAULT(STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW')) NOT NULL
);
";

/// Create events table SQL.
pub(super) const DB_CREATE_STATE_EVENTS: &str = "
CREATE TABLE IF NOT EXISTS state_events (
    identifier ULID PRIMARY KEY NOT NULL,
    source_statechange_id ULID NOT NULL,
    data JSON,
    timestamp TIMESTAMP DEFAULT(STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW')) NOT NULL,
    FOREIGN KEY(source_statechange_id) REFERENCES state_changes(identifier)
);
";

/// Create the balance proof index SQL.
///
/// One row per balance proof found in a stored state change (`received`) or event (`sent`).
/// `sequence` grows with every insert and orders matches from the most recent.
pub(super) const DB_CREATE_BALANCE_PROOFS: &str = "
CREATE TABLE IF NOT EXISTS balance_proofs (
    sequence INTEGER PRIMARY KEY AUTOINCREMENT,
    direction TEXT NOT NULL CHECK(direction IN ('received', 'sent')),
    record_identifier ULID NOT NULL,
    chain_identifier TEXT NOT NULL,
    token_network_address TEXT NOT NULL,
    channel_identifier TEXT NOT NULL,
    locksroot TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS balance_proofs_by_locksroot ON balance_proofs (
    direction, chain_identifier, token_network_address, channel_identifier, locksroot
);
";

/// Index direction of balance proofs received from a partner.
pub(super) const DIRECTION_RECEIVED: &str = "received";

/// Index direction of balance proofs sent to a partner.
pub(super) const DIRECTION_SENT: &str = "sent";
