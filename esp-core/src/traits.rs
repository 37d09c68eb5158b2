//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung. Pin und Delay kommen direkt aus
//! `embedded-hal`, Bus und Tick-Dispatcher sind hier definiert.

use crate::types::ComponentId;

/// Fehler einer einzelnen Zwei-Draht-Transaktion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFault {
    /// Slave hat nicht quittiert
    Nack,
    /// Arbitrierung verloren oder Bus-Fehler
    Bus,
    /// Controller hängt (Timeout)
    Timeout,
}

/// Legacy-Statuscode für Erfolg
pub const STATUS_OK: i32 = 0;

/// Legacy-Statuscode für einen nicht behebbaren Bus-Fehler
pub const STATUS_I2C_ERROR: i32 = -1010;

/// Fehler-Typ für Bus-Operationen
///
/// Es gibt genau ein Fehlerergebnis: alle Versuche sind verbraucht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    RecoveryExhausted,
}

impl BusError {
    /// Numerischer Statuscode (für Schichten, die mit Codes arbeiten)
    pub const fn code(self) -> i32 {
        match self {
            BusError::RecoveryExhausted => STATUS_I2C_ERROR,
        }
    }
}

/// Fehler-Typ für die Tick-Registrierung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// Keine freien Plätze mehr
    Full,
    AlreadyRegistered,
}

/// Trait für die Zwei-Draht-Transaktionsprimitive
///
/// Adressen sind 8 Bit breit, Bit 0 ist das R/W-Bit.
/// Die Primitive meldet nur Erfolg oder Fehler und erholt sich nicht selbst.
///
/// # Implementierungen
/// - **Production:** I2cTransport (jeder `embedded-hal` I2C-Treiber),
///   auf dem Board EspTwoWire
/// - **Testing:** ScriptedBus (in-memory Mock)
pub trait TwoWireTransport {
    /// Liest `buffer.len()` Bytes
    ///
    /// Mit `continue_transaction` wird am Ende kein STOP gesendet.
    fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault>;

    /// Schreibt `data`
    fn write(
        &mut self,
        address: u8,
        data: &[u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault>;
}

/// Direkter Zugriff auf die Steuerregister des Bus-Controllers
///
/// Wird ausschließlich von der Recovery-Sequenz benutzt.
pub trait BusController {
    /// Löscht ein anstehendes Fehler-Flag
    fn clear_error_flag(&mut self);
    fn disable(&mut self);
    /// Nimmt dem Peripheral die Versorgung (Takt/Power)
    fn power_off(&mut self);
    fn power_on(&mut self);
    fn enable(&mut self);
    /// Setzt den Master-Zustand zurück und gibt einen hängenden Bus frei
    fn reinitialize(&mut self);
}

/// Komponente, die periodisch vom System-Tick aufgerufen wird
pub trait Tickable {
    fn on_tick(&mut self);
}

/// Periodischer Tick-Dispatcher
///
/// Gehört der Composition-Root der Anwendung, nicht den Komponenten.
pub trait TickScheduler {
    fn register(&mut self, id: ComponentId) -> Result<(), TickError>;

    /// Gibt `true` zurück wenn die Komponente registriert war
    fn unregister(&mut self, id: ComponentId) -> bool;
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for TransferFault {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TransferFault::Nack => defmt::write!(fmt, "Nack"),
            TransferFault::Bus => defmt::write!(fmt, "Bus"),
            TransferFault::Timeout => defmt::write!(fmt, "Timeout"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BusError::RecoveryExhausted => defmt::write!(fmt, "RecoveryExhausted"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TickError::Full => defmt::write!(fmt, "Full"),
            TickError::AlreadyRegistered => defmt::write!(fmt, "AlreadyRegistered"),
        }
    }
}
