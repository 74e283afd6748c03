//! Hardware mocks shared by the hosted tests.
//!
//! Recording doubles for the consumed capabilities: an interrupt controller
//! that logs every transmission and can be scripted to reject operations,
//! an IRQ service that logs watch/unmask/sleep calls, and firmware table
//! providers over fixed record sets.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use smp_bringup::{
    AcpiTables, Bringup, FirmwareError, IntController, IrqControl, MadtCpu, MadtCpuFlags, MpCpu,
    MpCpuFlags, MpTables, RawCode,
};

// ============================================================================
// Interrupt controller double
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpiRecord {
    Init(u32),
    Startup(u32, u8),
    Fixed(u32, u8),
}

/// Shared transmission log; tests keep a clone while the coordinator owns
/// the controller.
#[derive(Clone, Default)]
pub struct IpiLog(Arc<Mutex<Vec<IpiRecord>>>);

impl IpiLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<IpiRecord> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, record: IpiRecord) {
        self.0.lock().unwrap().push(record);
    }
}

pub const INIT_REJECT_STATUS: RawCode = 7;
pub const SEND_REJECT_STATUS: RawCode = 5;

pub struct ScriptedController {
    log: IpiLog,
    /// Reject INIT for this apic id with [`INIT_REJECT_STATUS`].
    pub fail_init_for: Option<u32>,
    /// Reject every fixed-vector send with [`SEND_REJECT_STATUS`].
    pub fail_send: bool,
}

impl ScriptedController {
    pub fn new(log: IpiLog) -> Self {
        Self {
            log,
            fail_init_for: None,
            fail_send: false,
        }
    }
}

impl IntController for ScriptedController {
    fn send(&mut self, apic_id: u32, vector: u8) -> Result<(), RawCode> {
        self.log.push(IpiRecord::Fixed(apic_id, vector));
        if self.fail_send {
            return Err(SEND_REJECT_STATUS);
        }
        Ok(())
    }

    fn send_init(&mut self, apic_id: u32) -> Result<(), RawCode> {
        self.log.push(IpiRecord::Init(apic_id));
        if self.fail_init_for == Some(apic_id) {
            return Err(INIT_REJECT_STATUS);
        }
        Ok(())
    }

    fn send_startup(&mut self, apic_id: u32, entry: u8) -> Result<(), RawCode> {
        self.log.push(IpiRecord::Startup(apic_id, entry));
        Ok(())
    }
}

// ============================================================================
// IRQ service double
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqEvent {
    Watch(u8),
    Unmask(u8),
    Sleep,
}

#[derive(Clone, Default)]
pub struct IrqLog(Arc<Mutex<Vec<IrqEvent>>>);

impl IrqLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<IrqEvent> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, event: IrqEvent) {
        self.0.lock().unwrap().push(event);
    }
}

pub struct MockIrq {
    log: IrqLog,
    /// Returned by every `watch` call.
    pub watch_status: Result<(), RawCode>,
}

impl MockIrq {
    pub fn new(log: IrqLog) -> Self {
        Self {
            log,
            watch_status: Ok(()),
        }
    }
}

impl IrqControl for MockIrq {
    fn watch(&mut self, vector: u8) -> Result<(), RawCode> {
        self.log.push(IrqEvent::Watch(vector));
        self.watch_status
    }

    fn unmask(&mut self, vector: u8) {
        self.log.push(IrqEvent::Unmask(vector));
    }

    fn sleep(&mut self) {
        self.log.push(IrqEvent::Sleep);
    }
}

// ============================================================================
// Firmware table doubles
// ============================================================================

pub fn madt_cpu(apic_id: u32) -> MadtCpu {
    MadtCpu {
        processor_id: apic_id as u8,
        apic_id,
        flags: MadtCpuFlags::ENABLED,
    }
}

pub fn disabled_madt_cpu(apic_id: u32) -> MadtCpu {
    MadtCpu {
        processor_id: apic_id as u8,
        apic_id,
        flags: MadtCpuFlags::ONLINE_CAPABLE,
    }
}

pub struct FakeMadt {
    pub status: Result<(), FirmwareError>,
    pub cpus: Vec<MadtCpu>,
}

impl FakeMadt {
    /// A loaded MADT exposing one enabled record per apic id.
    pub fn with_cpus(apic_ids: &[u32]) -> Self {
        Self {
            status: Ok(()),
            cpus: apic_ids.iter().copied().map(madt_cpu).collect(),
        }
    }

    pub fn with_records(cpus: Vec<MadtCpu>) -> Self {
        Self {
            status: Ok(()),
            cpus,
        }
    }

    /// No MADT on this machine.
    pub fn absent() -> Self {
        Self {
            status: Err(FirmwareError::TableNotFound),
            cpus: Vec::new(),
        }
    }
}

impl AcpiTables for FakeMadt {
    fn load(&mut self) -> Result<(), FirmwareError> {
        self.status
    }

    fn processors(&self) -> &[MadtCpu] {
        &self.cpus
    }
}

pub fn mp_cpu(apic_id: u32, bsp: bool) -> MpCpu {
    let mut flags = MpCpuFlags::ENABLED;
    if bsp {
        flags |= MpCpuFlags::BSP;
    }
    MpCpu { apic_id, flags }
}

pub struct FakeMpTable {
    pub status: Result<(), FirmwareError>,
    pub cpus: Vec<MpCpu>,
}

impl FakeMpTable {
    /// A located MP table exposing one enabled record per apic id, the
    /// first flagged as the bootstrap processor.
    pub fn with_cpus(apic_ids: &[u32]) -> Self {
        Self {
            status: Ok(()),
            cpus: apic_ids
                .iter()
                .enumerate()
                .map(|(i, &apic)| mp_cpu(apic, i == 0))
                .collect(),
        }
    }

    /// No floating pointer structure on this machine.
    pub fn absent() -> Self {
        Self {
            status: Err(FirmwareError::TableNotFound),
            cpus: Vec::new(),
        }
    }
}

impl MpTables for FakeMpTable {
    fn locate(&mut self) -> Result<(), FirmwareError> {
        self.status
    }

    fn processors(&self) -> &[MpCpu] {
        &self.cpus
    }
}

// ============================================================================
// Coordinator construction helpers
// ============================================================================

pub type TestBringup = Bringup<MockIrq, ScriptedController, FakeMadt, FakeMpTable>;

/// Coordinator over default (all-accepting) irq and controller doubles.
pub fn coordinator(acpi: FakeMadt, mptable: FakeMpTable) -> (TestBringup, IrqLog, IpiLog) {
    let irq_log = IrqLog::new();
    let ipi_log = IpiLog::new();
    let bringup = Bringup::initialize(
        MockIrq::new(irq_log.clone()),
        ScriptedController::new(ipi_log.clone()),
        acpi,
        mptable,
    )
    .expect("wake-vector registration should succeed");
    (bringup, irq_log, ipi_log)
}

/// Coordinator over a caller-scripted controller.
pub fn coordinator_with(
    ctl: ScriptedController,
    acpi: FakeMadt,
    mptable: FakeMpTable,
) -> TestBringup {
    Bringup::initialize(MockIrq::new(IrqLog::new()), ctl, acpi, mptable)
        .expect("wake-vector registration should succeed")
}
