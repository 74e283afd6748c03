//! Bring-Up Error Taxonomy
//!
//! Every failure surfaces synchronously as one of these kinds; the site that
//! produces it also logs a human-readable entry with the underlying
//! diagnostic code. No kind triggers an automatic retry.

use crate::platform::RawCode;
use crate::types::CoreId;

/// Errors reported by the bring-up coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringupError {
    /// Wake-vector registration with the interrupt subsystem failed.
    /// Fatal: no coordinator exists after this.
    Initialization(RawCode),
    /// Neither discovery backend produced a usable core enumeration.
    /// Fatal to multi-core bring-up; the caller's own core stays usable.
    NotFound,
    /// A specific core failed to start. Local to that core.
    Boot(CoreId),
    /// A wake signal to a specific core could not be transmitted.
    /// Local to that attempt.
    Transmission(CoreId),
}
