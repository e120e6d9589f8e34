//! Request session state and history ledger.
//!
//! [`SessionState`] owns the single active request (target, timestamps,
//! received chunks) and the append-only list of [`HistoryEntry`] records
//! produced each time a request is reset.

// ============================================================================
// Submodules
// ============================================================================

/// History ledger entries.
pub mod history;

/// Active request state and transitions.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use history::{HistoryEntry, Outcome};
pub use state::{ServerSnapshot, SessionState};
