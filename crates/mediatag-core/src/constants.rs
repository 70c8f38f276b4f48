//! Shared constants.

/// Default lifetime of an upload authorization (15 minutes).
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 15 * 60;
