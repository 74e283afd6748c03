//! Parsed Firmware Records
//!
//! Processor entries as handed over by the table-walking layer, one record
//! type per description mechanism. Locating, checksumming, and decoding the
//! tables happens behind the provider traits; the discovery backends only
//! consume validated records.

use bitflags::bitflags;

bitflags! {
    /// Flag word of a MADT local-APIC entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MadtCpuFlags: u32 {
        /// Processor is enabled and may be used.
        const ENABLED = 1 << 0;
        /// Processor is disabled now but can be brought online later.
        const ONLINE_CAPABLE = 1 << 1;
    }
}

bitflags! {
    /// Flag byte of an MP configuration table processor entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MpCpuFlags: u8 {
        /// EN: processor is usable.
        const ENABLED = 1 << 0;
        /// BSP: this entry describes the bootstrap processor.
        const BSP = 1 << 1;
    }
}

/// One processor entry from the ACPI MADT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MadtCpu {
    /// ACPI processor id from the entry.
    pub processor_id: u8,
    /// Local APIC id this processor answers to.
    pub apic_id: u32,
    pub flags: MadtCpuFlags,
}

/// One processor entry from the MP configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MpCpu {
    /// Local APIC id this processor answers to.
    pub apic_id: u32,
    pub flags: MpCpuFlags,
}

/// Failures of firmware description access or enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareError {
    /// The description tables could not be located (no RSDP/MADT, or no
    /// MP floating pointer structure).
    TableNotFound,
    /// A located table failed validation in the walking layer.
    InvalidTable,
    /// Enumeration finished without a single usable processor. Treated as
    /// backend failure, never as an empty-but-valid result.
    NoProcessors,
}

/// Access to the walked ACPI tables.
pub trait AcpiTables {
    /// Locate and validate the MADT.
    fn load(&mut self) -> Result<(), FirmwareError>;

    /// Local-APIC processor records of the loaded MADT, in table order.
    /// Empty before a successful [`load`](Self::load).
    fn processors(&self) -> &[MadtCpu];
}

/// Access to the walked MP configuration table.
pub trait MpTables {
    /// Locate the floating pointer structure and validate the
    /// configuration table it points at.
    fn locate(&mut self) -> Result<(), FirmwareError>;

    /// Processor records of the configuration table, in table order.
    /// Empty before a successful [`locate`](Self::locate).
    fn processors(&self) -> &[MpCpu];
}
