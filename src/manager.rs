//! Discovery Backend Capability
//!
//! Both firmware description mechanisms implement this trait; the
//! coordinator selects exactly one per boot and never switches afterward.

use crate::firmware::FirmwareError;
use crate::ipi::BootTrigger;
use crate::platform::RawCode;
use crate::types::CoreDescriptor;

/// Why a backend refused to boot a core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootFault {
    /// The descriptor is not part of this backend's enumeration.
    UnknownCore,
    /// The interrupt controller rejected part of the start sequence.
    Trigger(RawCode),
}

/// A mechanism that enumerates cores from firmware data and can trigger a
/// discovered core to start.
pub trait CoreManager {
    /// Prepare the backend from firmware state.
    fn initialize(&mut self) -> Result<(), FirmwareError>;

    /// Enumerate processors. On success the descriptor collection is
    /// populated; re-running against unchanged firmware yields the same
    /// collection.
    fn discover(&mut self) -> Result<(), FirmwareError>;

    /// Discovered descriptors, in enumeration order. Empty until
    /// [`discover`](Self::discover) succeeds.
    fn cores(&self) -> &[CoreDescriptor];

    /// Trigger one discovered core to begin executing. Returns once the
    /// trigger is issued and accepted; it does not wait for the target to
    /// come up. `core` must be part of this backend's enumeration.
    fn boot(&mut self, core: &CoreDescriptor, trigger: &dyn BootTrigger) -> Result<(), BootFault>;
}
