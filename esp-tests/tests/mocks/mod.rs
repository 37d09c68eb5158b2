//! Mocks für Host-Tests
//!
//! Pin, Delay, I2C-Treiber und Zwei-Draht-Primitive zeichnen alles auf,
//! damit Tests Pegel, Pulsbreiten und Reset-Sequenzen prüfen können.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, Operation};
use esp_core::{BusController, TransferFault, TwoWireTransport};

// ============================================================================
// Mock Pin
// ============================================================================

#[derive(Default)]
pub struct RecordingPin {
    pub high: bool,
    /// Jeder gesetzte Pegel in Reihenfolge (true = HIGH)
    pub levels: Vec<bool>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rising_edges(&self) -> usize {
        let mut previous = false;
        let mut edges = 0;
        for &level in &self.levels {
            if level && !previous {
                edges += 1;
            }
            previous = level;
        }
        edges
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        self.levels.push(true);
        Ok(())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Zeichnet jede angeforderte Wartezeit in ns auf
#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ns: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_ns.push(us * 1_000);
    }
}

// ============================================================================
// Mock Zwei-Draht-Bus
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Read {
        address: u8,
        len: usize,
        continue_transaction: bool,
    },
    Write {
        address: u8,
        data: Vec<u8>,
        continue_transaction: bool,
    },
    ClearErrorFlag,
    Disable,
    PowerOff,
    PowerOn,
    Enable,
    Reinitialize,
    DelayNs(u32),
}

/// Die vollständige Recovery-Sequenz in der erwarteten Reihenfolge
pub fn reset_sequence(hold_us: u32) -> Vec<BusEvent> {
    vec![
        BusEvent::ClearErrorFlag,
        BusEvent::Disable,
        BusEvent::PowerOff,
        BusEvent::DelayNs(hold_us * 1_000),
        BusEvent::PowerOn,
        BusEvent::Enable,
        BusEvent::Reinitialize,
    ]
}

pub type EventLog = Rc<RefCell<Vec<BusEvent>>>;

/// Primitive, die die ersten `failures` Transaktionen scheitern lässt
pub struct ScriptedBus {
    pub failures: usize,
    pub fault: TransferFault,
    /// Daten für erfolgreiche Lesezugriffe
    pub read_data: Vec<u8>,
    pub log: EventLog,
}

impl ScriptedBus {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            fault: TransferFault::Bus,
            read_data: Vec::new(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_read_data(mut self, data: &[u8]) -> Self {
        self.read_data = data.to_vec();
        self
    }

    /// Delay, das in dasselbe Event-Log schreibt
    pub fn delay(&self) -> LoggingDelay {
        LoggingDelay {
            log: Rc::clone(&self.log),
        }
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.log.borrow().clone()
    }

    pub fn transaction_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| matches!(event, BusEvent::Read { .. } | BusEvent::Write { .. }))
            .count()
    }

    pub fn reset_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| **event == BusEvent::PowerOff)
            .count()
    }

    fn outcome(&mut self) -> Result<(), TransferFault> {
        if self.failures > 0 {
            self.failures -= 1;
            Err(self.fault)
        } else {
            Ok(())
        }
    }

    fn push(&self, event: BusEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl TwoWireTransport for ScriptedBus {
    fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        self.push(BusEvent::Read {
            address,
            len: buffer.len(),
            continue_transaction,
        });

        match self.outcome() {
            Ok(()) => {
                for (slot, byte) in buffer.iter_mut().zip(self.read_data.iter()) {
                    *slot = *byte;
                }
                Ok(())
            }
            Err(fault) => {
                // Gestörter Bus liefert Müll
                buffer.fill(0xEE);
                Err(fault)
            }
        }
    }

    fn write(
        &mut self,
        address: u8,
        data: &[u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        self.push(BusEvent::Write {
            address,
            data: data.to_vec(),
            continue_transaction,
        });
        self.outcome()
    }
}

impl BusController for ScriptedBus {
    fn clear_error_flag(&mut self) {
        self.push(BusEvent::ClearErrorFlag);
    }

    fn disable(&mut self) {
        self.push(BusEvent::Disable);
    }

    fn power_off(&mut self) {
        self.push(BusEvent::PowerOff);
    }

    fn power_on(&mut self) {
        self.push(BusEvent::PowerOn);
    }

    fn enable(&mut self) {
        self.push(BusEvent::Enable);
    }

    fn reinitialize(&mut self) {
        self.push(BusEvent::Reinitialize);
    }
}

pub struct LoggingDelay {
    log: EventLog,
}

impl DelayNs for LoggingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(BusEvent::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(BusEvent::DelayNs(us * 1_000));
    }
}

// ============================================================================
// Mock I2C (embedded-hal)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Write(Vec<u8>),
    Read(usize),
}

/// Eine Transaktion (START ... STOP) mit 7-Bit-Adresse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cTransaction {
    pub address: u8,
    pub ops: Vec<I2cOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError(pub ErrorKind);

impl i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// I2C-Treiber, der die ersten `failures` Transaktionen scheitern lässt
///
/// Gescheiterte Transaktionen werden trotzdem aufgezeichnet.
pub struct ScriptedI2c {
    pub failures: usize,
    pub error: ErrorKind,
    pub read_data: Vec<u8>,
    pub transactions: Vec<I2cTransaction>,
}

impl ScriptedI2c {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            error: ErrorKind::Bus,
            read_data: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: ErrorKind) -> Self {
        self.error = error;
        self
    }

    pub fn with_read_data(mut self, data: &[u8]) -> Self {
        self.read_data = data.to_vec();
        self
    }
}

impl i2c::ErrorType for ScriptedI2c {
    type Error = MockI2cError;
}

impl I2c for ScriptedI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), MockI2cError> {
        let ops = operations
            .iter()
            .map(|operation| match operation {
                Operation::Write(data) => I2cOp::Write(data.to_vec()),
                Operation::Read(buffer) => I2cOp::Read(buffer.len()),
            })
            .collect();
        self.transactions.push(I2cTransaction { address, ops });

        if self.failures > 0 {
            self.failures -= 1;
            return Err(MockI2cError(self.error));
        }

        for operation in operations.iter_mut() {
            if let Operation::Read(buffer) = operation {
                for (slot, byte) in buffer.iter_mut().zip(self.read_data.iter()) {
                    *slot = *byte;
                }
            }
        }
        Ok(())
    }
}
