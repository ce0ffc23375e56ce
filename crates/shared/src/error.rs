use thiserror::Error;

/// User-facing failure kinds surfaced by the roster controller. Messages are
/// static and non-parameterized; recovery is always a manual retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Failed to load the roster. The connection may be unstable.")]
    LoadFailed,
    #[error("Failed to save the hero. Try again.")]
    SaveFailed,
    #[error("Hero name and power must not be empty.")]
    EmptyField,
}

/// Simulated network instability emitted by the in-memory backend. Callers
/// treat backend failures as opaque and only branch on success vs. failure.
#[derive(Debug, Error)]
#[error("record backend unavailable: simulated network instability")]
pub struct StoreUnavailable;
