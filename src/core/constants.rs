//! Constants used throughout portage.
//!
//! Centralizes env var names, defaults, and file suffixes.

/// Environment fallback for the service address.
pub const ADDR_ENV: &str = "VAULT_ADDR";

/// Environment fallback for the access token.
pub const TOKEN_ENV: &str = "VAULT_TOKEN";

/// Default transit engine mount path.
pub const DEFAULT_ENGINE_PATH: &str = "transit";

/// Default maximum number of items per bulk call.
pub const DEFAULT_BATCH_LIMIT: usize = 100;

/// Suffix appended to encrypted output files.
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// Suffix appended to decrypted output files when the input has no
/// `.encrypted` suffix to strip.
pub const DECRYPTED_SUFFIX: &str = ".decrypted";
