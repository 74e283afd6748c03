//! Consumed Platform Capabilities
//!
//! The kernel services and hardware this crate depends on, expressed as
//! traits. The real implementations program interrupt-subsystem and local
//! APIC registers; tests substitute recording doubles.

/// Raw status code handed back by a platform capability. Logged verbatim
/// when an operation fails; the coordinator attaches no meaning beyond
/// "non-zero reason".
pub type RawCode = u32;

/// Interrupt services for the current execution context.
pub trait IrqControl {
    /// Ask the interrupt subsystem to deliver `vector` interrupts to the
    /// current context. Line numbers are zero-based, below the controller's
    /// exception-vector offset.
    fn watch(&mut self, vector: u8) -> Result<(), RawCode>;

    /// Unmask `vector` for the current context.
    fn unmask(&mut self, vector: u8);

    /// Suspend the current context until an interrupt arrives.
    fn sleep(&mut self);
}

/// Local interrupt controller transmission capability.
///
/// Mirrors the three ICR operations the boot handshake needs. Each returns
/// once the controller has accepted the request; delivery on the target is
/// asynchronous.
pub trait IntController {
    /// Send a fixed-vector IPI to the core addressed by `apic_id`.
    fn send(&mut self, apic_id: u32, vector: u8) -> Result<(), RawCode>;

    /// Assert INIT on the target core.
    fn send_init(&mut self, apic_id: u32) -> Result<(), RawCode>;

    /// Send a STARTUP IPI pointing at `entry` (the page number of the
    /// real-mode entry point).
    fn send_startup(&mut self, apic_id: u32, entry: u8) -> Result<(), RawCode>;
}
