//! Bring-Up Coordinator
//!
//! Owns the backend selection, the wake-vector registration, and the
//! per-core boot sequence. The surrounding server decides when to call
//! which operation; this module only guarantees their contracts.

use log::{error, info};

use crate::acpi::AcpiCores;
use crate::error::BringupError;
use crate::firmware::{AcpiTables, MpTables};
use crate::ipi::{IpiSender, IPI_WAKE, VECTOR_IRQ_BASE};
use crate::manager::{BootFault, CoreManager};
use crate::mptable::MpTableCores;
use crate::platform::{IntController, IrqControl};
use crate::types::{CoreDescriptor, CoreId, MAX_CORES};

/// Which backend won discovery. Selection is monotonic: set once per boot
/// cycle, never switched afterward.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Active {
    Acpi,
    MpTable,
}

/// The bring-up coordinator.
///
/// Constructed by [`initialize`](Bringup::initialize); a value of this type
/// is proof that wake-vector registration succeeded, so discovery and boot
/// calls cannot run against an unarmed interrupt path.
pub struct Bringup<I, C, A, M>
where
    I: IrqControl,
    C: IntController,
    A: AcpiTables,
    M: MpTables,
{
    irq: I,
    ipi: IpiSender<C>,
    acpi: AcpiCores<A>,
    mptable: MpTableCores<M>,
    active: Option<Active>,
}

impl<I, C, A, M> Bringup<I, C, A, M>
where
    I: IrqControl,
    C: IntController,
    A: AcpiTables,
    M: MpTables,
{
    /// One-time setup: register to receive the wake vector, then hand out
    /// the coordinator. Registration failure is fatal and leaves no partial
    /// state behind.
    pub fn initialize(mut irq: I, ctl: C, acpi: A, mptable: M) -> Result<Self, BringupError> {
        // The interrupt subsystem numbers its lines from zero, below the
        // controller's exception-vector offset.
        if let Err(code) = irq.watch(IPI_WAKE - VECTOR_IRQ_BASE) {
            error!(
                "SMP: failed to register wake vector {:#x}: irq status {}",
                IPI_WAKE, code
            );
            return Err(BringupError::Initialization(code));
        }

        Ok(Self {
            irq,
            ipi: IpiSender::new(ctl),
            acpi: AcpiCores::new(acpi),
            mptable: MpTableCores::new(mptable),
            active: None,
        })
    }

    /// Select a discovery backend and expose its descriptor collection.
    ///
    /// ACPI is tried first; the MP table is the unconditional fallback. The
    /// first backend that fully succeeds wins outright; partial results are
    /// never merged. Once selected, repeat calls return the same selection
    /// and the same descriptors without touching firmware again.
    pub fn discover_cores(&mut self) -> Result<&[CoreDescriptor], BringupError> {
        if self.active.is_some() {
            return Ok(self.cores());
        }

        if self.acpi.initialize().is_ok() && self.acpi.discover().is_ok() {
            self.active = Some(Active::Acpi);
            info!(
                "SMP: using ACPI core enumeration ({} cores)",
                self.acpi.cores().len()
            );
            return Ok(self.cores());
        }

        // Legacy fallback; its initialize has no failure path.
        self.mptable.initialize().ok();
        if self.mptable.discover().is_ok() {
            self.active = Some(Active::MpTable);
            info!(
                "SMP: using MP table core enumeration ({} cores)",
                self.mptable.cores().len()
            );
            return Ok(self.cores());
        }

        error!("SMP: no core enumeration backend found (ACPI or MP table)");
        Err(BringupError::NotFound)
    }

    /// Descriptors of the active backend; empty until discovery selects one.
    pub fn cores(&self) -> &[CoreDescriptor] {
        match self.active {
            Some(Active::Acpi) => self.acpi.cores(),
            Some(Active::MpTable) => self.mptable.cores(),
            None => &[],
        }
    }

    fn descriptor(&self, id: CoreId) -> Option<CoreDescriptor> {
        self.cores().iter().copied().find(|core| core.id == id)
    }

    /// Transition one discovered core from halted to running. The trigger
    /// is issued through the active backend; this call does not wait for
    /// the target to confirm. A failure is local to `id` and leaves the
    /// coordinator usable for other cores.
    pub fn boot_core(&mut self, id: CoreId) -> Result<(), BringupError> {
        let desc = match self.descriptor(id) {
            Some(desc) => desc,
            None => {
                error!("SMP: core{} is not in the discovered core set", id);
                return Err(BringupError::Boot(id));
            }
        };

        let outcome = match self.active {
            Some(Active::Acpi) => self.acpi.boot(&desc, &self.ipi),
            Some(Active::MpTable) => self.mptable.boot(&desc, &self.ipi),
            // No descriptor exists without an active backend.
            None => Err(BootFault::UnknownCore),
        };

        match outcome {
            Ok(()) => {
                info!("SMP: core{} started", id);
                Ok(())
            }
            Err(BootFault::UnknownCore) => {
                error!(
                    "SMP: failed to boot core{}: not enumerated by the active backend",
                    id
                );
                Err(BringupError::Boot(id))
            }
            Err(BootFault::Trigger(code)) => {
                error!(
                    "SMP: failed to boot core{}: controller status {}",
                    id, code
                );
                Err(BringupError::Boot(id))
            }
        }
    }

    /// Boot every discovered core except id 0 (the caller's own),
    /// continuing past per-core failures. Returns how many cores were
    /// triggered successfully.
    pub fn boot_all(&mut self) -> usize {
        let mut ids = [0 as CoreId; MAX_CORES];
        let mut total = 0;
        for core in self.cores() {
            ids[total] = core.id;
            total += 1;
        }

        let mut started = 0;
        for &id in &ids[..total] {
            if id == 0 {
                continue;
            }
            if self.boot_core(id).is_ok() {
                started += 1;
            }
        }

        info!("SMP: {} / {} cores online", started + 1, total);
        started
    }

    /// Send the wake vector to a discovered core, typically to make a
    /// sleeping core pick up new coordination work.
    pub fn send_wake(&self, id: CoreId) -> Result<(), BringupError> {
        let desc = match self.descriptor(id) {
            Some(desc) => desc,
            None => {
                error!("SMP: failed to send wake IPI to core{}: unknown core", id);
                return Err(BringupError::Transmission(id));
            }
        };

        if let Err(code) = self.ipi.send_wake(desc.apic_id) {
            error!(
                "SMP: failed to send wake IPI to core{}: controller status {}",
                id, code
            );
            return Err(BringupError::Transmission(id));
        }
        Ok(())
    }

    /// Unmask the wake vector and suspend the current context until it is
    /// delivered. Blocks indefinitely; the only way out is another core's
    /// wake signal.
    pub fn wait_wake(&mut self) {
        self.irq.unmask(IPI_WAKE);
        self.irq.sleep();
    }
}
