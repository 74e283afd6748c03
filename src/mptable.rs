//! MP Table Core Discovery
//!
//! Discovery backend over the legacy MP configuration table. Simpler than
//! the ACPI description but implemented by virtually all hardware, so it is
//! the fallback that guarantees progress on machines without a usable MADT.

use crate::firmware::{FirmwareError, MpCpuFlags, MpTables};
use crate::ipi::BootTrigger;
use crate::manager::{BootFault, CoreManager};
use crate::types::{CoreDescriptor, CoreId, MAX_CORES, TRAMPOLINE_VECTOR};

/// Core discovery backed by the MP configuration table.
pub struct MpTableCores<T: MpTables> {
    tables: T,
    cores: [CoreDescriptor; MAX_CORES],
    count: usize,
}

impl<T: MpTables> MpTableCores<T> {
    pub fn new(tables: T) -> Self {
        Self {
            tables,
            cores: [CoreDescriptor::empty(); MAX_CORES],
            count: 0,
        }
    }
}

impl<T: MpTables> CoreManager for MpTableCores<T> {
    /// Resets enumeration state. The legacy scheme has no setup that can
    /// fail; locating the table happens during [`discover`](Self::discover).
    fn initialize(&mut self) -> Result<(), FirmwareError> {
        self.count = 0;
        Ok(())
    }

    fn discover(&mut self) -> Result<(), FirmwareError> {
        self.count = 0;
        self.tables.locate()?;

        let records = self.tables.processors();
        for cpu in records {
            if !cpu.flags.contains(MpCpuFlags::ENABLED) {
                continue;
            }
            if self.count == MAX_CORES {
                log::warn!(
                    "SMP: limiting core count to {} (MP table reports {})",
                    MAX_CORES,
                    records.len()
                );
                break;
            }
            self.cores[self.count] = CoreDescriptor {
                id: self.count as CoreId,
                apic_id: cpu.apic_id,
                entry: TRAMPOLINE_VECTOR,
            };
            self.count += 1;
        }

        if self.count == 0 {
            return Err(FirmwareError::NoProcessors);
        }
        Ok(())
    }

    fn cores(&self) -> &[CoreDescriptor] {
        &self.cores[..self.count]
    }

    fn boot(&mut self, core: &CoreDescriptor, trigger: &dyn BootTrigger) -> Result<(), BootFault> {
        if !self.cores().contains(core) {
            return Err(BootFault::UnknownCore);
        }
        trigger.start_core(core).map_err(BootFault::Trigger)
    }
}
