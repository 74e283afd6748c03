//! Interprocessor Interrupt Transmission
//!
//! The wake vector reserved for core-to-core coordination, the transmitter
//! wrapping the local interrupt controller, and the INIT/SIPI protocol that
//! physically starts a halted core.

use spin::Mutex;

use crate::platform::{IntController, RawCode};
use crate::types::CoreDescriptor;

/// Vector reserved for wake signaling between cores.
pub const IPI_WAKE: u8 = 0xF0;

/// First controller vector usable for external interrupts; the 32 slots
/// below it belong to exceptions. The interrupt subsystem numbers its IRQ
/// lines from zero, so watch registrations subtract this base.
pub const VECTOR_IRQ_BASE: u8 = 32;

/// Spin iterations approximating the 10 ms hold after INIT.
const INIT_HOLD_LOOPS: u64 = 100_000;

/// Spin iterations approximating the 200 us gap after each STARTUP IPI.
const SIPI_GAP_LOOPS: u64 = 20_000;

/// Physical start capability handed to a discovery backend when it boots a
/// core.
pub trait BootTrigger {
    /// Run the start sequence against `core`. Returns once the controller
    /// has accepted every transmission.
    fn start_core(&self, core: &CoreDescriptor) -> Result<(), RawCode>;
}

/// Transmitter for interprocessor interrupts.
///
/// Owns the interrupt controller on behalf of the coordinator. The lock
/// keeps transmission usable from shared references, so the coordinator can
/// send wake signals while a backend holds the trigger capability.
pub struct IpiSender<C: IntController> {
    ctl: Mutex<C>,
}

impl<C: IntController> IpiSender<C> {
    pub fn new(ctl: C) -> Self {
        Self {
            ctl: Mutex::new(ctl),
        }
    }

    /// Send the wake vector to the core addressed by `apic_id`.
    pub fn send_wake(&self, apic_id: u32) -> Result<(), RawCode> {
        self.ctl.lock().send(apic_id, IPI_WAKE)
    }
}

impl<C: IntController> BootTrigger for IpiSender<C> {
    fn start_core(&self, core: &CoreDescriptor) -> Result<(), RawCode> {
        let mut ctl = self.ctl.lock();

        // INIT, hold, then STARTUP twice, per the Intel MP startup
        // procedure.
        ctl.send_init(core.apic_id)?;
        busy_wait(INIT_HOLD_LOOPS);

        for _ in 0..2 {
            ctl.send_startup(core.apic_id, core.entry)?;
            busy_wait(SIPI_GAP_LOOPS);
        }

        Ok(())
    }
}

fn busy_wait(mut iterations: u64) {
    while iterations > 0 {
        core::hint::spin_loop();
        iterations -= 1;
    }
}
