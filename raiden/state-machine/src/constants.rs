/// Number of blocks a node waits after a secret is revealed before the lock is considered unsafe.
pub const DEFAULT_REVEAL_TIMEOUT: u64 = 50;

/// Number of blocks between closing a channel and being able to settle it.
pub const DEFAULT_SETTLE_TIMEOUT: u64 = 500;

/// Flat mediation fee charged when no per-token fee is configured.
pub const DEFAULT_MEDIATION_FLAT_FEE: u64 = 0;

/// Proportional mediation fee, in parts per million.
pub const DEFAULT_MEDIATION_PROPORTIONAL_FEE: u64 = 4000;

/// Proportional imbalance fee, in parts per million.
pub const DEFAULT_MEDIATION_PROPORTIONAL_IMBALANCE_FEE: u64 = 3000;

/// Length in bytes of a lock secret.
pub const SECRET_LENGTH: u8 = 32;
