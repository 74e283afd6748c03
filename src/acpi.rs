//! ACPI Core Discovery
//!
//! Discovery backend over the MADT local-APIC records. This is the richer,
//! modern description and is preferred whenever it is present and yields a
//! usable enumeration.

use crate::firmware::{AcpiTables, FirmwareError, MadtCpuFlags};
use crate::ipi::BootTrigger;
use crate::manager::{BootFault, CoreManager};
use crate::types::{CoreDescriptor, CoreId, MAX_CORES, TRAMPOLINE_VECTOR};

/// Core discovery backed by the walked ACPI tables.
pub struct AcpiCores<T: AcpiTables> {
    tables: T,
    cores: [CoreDescriptor; MAX_CORES],
    count: usize,
}

impl<T: AcpiTables> AcpiCores<T> {
    pub fn new(tables: T) -> Self {
        Self {
            tables,
            cores: [CoreDescriptor::empty(); MAX_CORES],
            count: 0,
        }
    }
}

impl<T: AcpiTables> CoreManager for AcpiCores<T> {
    fn initialize(&mut self) -> Result<(), FirmwareError> {
        self.tables.load()
    }

    fn discover(&mut self) -> Result<(), FirmwareError> {
        self.count = 0;

        let records = self.tables.processors();
        for cpu in records {
            if !cpu.flags.contains(MadtCpuFlags::ENABLED) {
                continue;
            }
            if self.count == MAX_CORES {
                log::warn!(
                    "SMP: limiting core count to {} (MADT reports {})",
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
