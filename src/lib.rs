//! Multiprocessor Bring-Up Coordinator
//!
//! This crate gets the secondary cores of a machine from halted to running:
//! it enumerates the physical cores described by firmware, picks between the
//! two description mechanisms when they disagree or are absent, and drives
//! each discovered core through the IPI boot handshake.
//!
//! The hardware itself stays behind capability traits. Table walking and
//! checksum validation live behind [`AcpiTables`]/[`MpTables`], interrupt
//! controller register access behind [`IntController`], and the kernel's
//! interrupt watch/sleep services behind [`IrqControl`]. The crate supplies
//! the policy: backend selection, descriptor ownership, and the wake/boot
//! protocol.
//!
//! # Module Organization
//!
//! - `types`: core identifiers, descriptors, and limits
//! - `error`: the bring-up error taxonomy
//! - `platform`: consumed kernel/hardware capability traits
//! - `firmware`: parsed firmware records and their provider traits
//! - `manager`: the discovery backend capability trait
//! - `ipi`: wake vector, IPI transmission, and the INIT/SIPI start protocol
//! - `acpi`: discovery backend over ACPI MADT records
//! - `mptable`: discovery backend over MP configuration table records
//! - `bringup`: the coordinator tying it all together

#![no_std]

mod acpi;
mod bringup;
mod error;
mod firmware;
mod ipi;
mod manager;
mod mptable;
mod platform;
mod types;

pub use acpi::AcpiCores;
pub use bringup::Bringup;
pub use error::BringupError;
pub use firmware::{AcpiTables, FirmwareError, MadtCpu, MadtCpuFlags, MpCpu, MpCpuFlags, MpTables};
pub use ipi::{BootTrigger, IpiSender, IPI_WAKE, VECTOR_IRQ_BASE};
pub use manager::{BootFault, CoreManager};
pub use mptable::MpTableCores;
pub use platform::{IntController, IrqControl, RawCode};
pub use types::{CoreDescriptor, CoreId, MAX_CORES, TRAMPOLINE_BASE, TRAMPOLINE_VECTOR};
