//! Core Type Definitions
//!
//! Identifiers and descriptors for the physical cores discovered on the
//! system, plus the compile-time limits shared by both discovery backends.

/// Maximum number of cores tracked by a discovery backend.
pub const MAX_CORES: usize = 16;

/// Physical address of the real-mode startup page a woken core begins
/// executing at. The page itself (and the code on it) is installed by the
/// surrounding kernel, not by this crate.
pub const TRAMPOLINE_BASE: u64 = 0x8000;

/// STARTUP IPI vector derived from the trampoline page number.
pub const TRAMPOLINE_VECTOR: u8 = (TRAMPOLINE_BASE >> 12) as u8;

/// Logical core identifier, assigned in enumeration order starting at 0.
/// Id 0 is the core running the coordinator itself.
pub type CoreId = u32;

/// One physical core discovered by the active backend.
///
/// Owned by the backend that enumerated it; the coordinator and its callers
/// only ever read (or copy) descriptors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreDescriptor {
    /// Logical core identifier, unique within the machine.
    pub id: CoreId,
    /// Local interrupt controller id used to address this core.
    pub apic_id: u32,
    /// STARTUP vector (page number of the entry trampoline) for this core.
    pub entry: u8,
}

impl CoreDescriptor {
    pub(crate) const fn empty() -> Self {
        Self {
            id: 0,
            apic_id: 0,
            entry: 0,
        }
    }
}
