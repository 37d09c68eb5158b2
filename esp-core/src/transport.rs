//! Zwei-Draht-Primitive auf Basis von `embedded_hal::i2c::I2c`
//!
//! Viele HALs (auch esp-hal) beenden jede Transaktion mit STOP und kennen
//! kein "offenes" Ende. Ein `write` mit `continue_transaction` wird deshalb
//! zurückgehalten und mit dem folgenden `read` derselben Adresse als
//! Write-Read (Repeated Start) gesendet. Jede andere Folgeoperation sendet
//! die zurückgehaltenen Daten zuerst als eigenes `write`. Schlägt das fehl,
//! meldet die Folgeoperation den Fehler und die Daten bleiben für die
//! Wiederholung erhalten. Es gehen also keine Bytes verloren, die bereits
//! mit `Ok` quittiert wurden.

use embedded_hal::i2c::{ErrorKind, I2c};
use heapless::Vec;

use crate::log::log_warn;
use crate::traits::{TransferFault, TwoWireTransport};

/// I2C-Treiber als [`TwoWireTransport`]
///
/// Adressen kommen 8 Bit breit (mit R/W-Bit) und werden auf die 7-Bit-Adresse
/// von `embedded-hal` umgerechnet. `N` begrenzt die Länge zurückgehaltener
/// Schreibdaten.
pub struct I2cTransport<I, const N: usize> {
    i2c: I,
    held: Vec<u8, N>,
    held_address: Option<u8>,
}

impl<I, const N: usize> I2cTransport<I, N>
where
    I: I2c,
{
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            held: Vec::new(),
            held_address: None,
        }
    }

    /// Zugriff auf den HAL-Treiber (z.B. zum Neu-Konfigurieren nach einem Reset)
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Liegen noch zurückgehaltene Schreibdaten vor?
    pub fn has_held_write(&self) -> bool {
        self.held_address.is_some()
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn flush_held(&mut self) -> Result<(), TransferFault> {
        if let Some(address) = self.held_address {
            self.i2c.write(address, &self.held).map_err(map_fault)?;
            self.clear_held();
        }
        Ok(())
    }

    fn clear_held(&mut self) {
        self.held.clear();
        self.held_address = None;
    }
}

impl<I, const N: usize> TwoWireTransport for I2cTransport<I, N>
where
    I: I2c,
{
    fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        _continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        let address = address >> 1;

        if self.held_address == Some(address) {
            self.i2c
                .write_read(address, &self.held, buffer)
                .map_err(map_fault)?;
            self.clear_held();
            return Ok(());
        }

        self.flush_held()?;
        self.i2c.read(address, buffer).map_err(map_fault)
    }

    fn write(
        &mut self,
        address: u8,
        data: &[u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        let address = address >> 1;
        self.flush_held()?;

        if continue_transaction {
            if self.held.extend_from_slice(data).is_err() {
                log_warn!(
                    "Schreibdaten zu lang für Repeated Start ({} Bytes)",
                    data.len()
                );
                return Err(TransferFault::Bus);
            }
            self.held_address = Some(address);
            return Ok(());
        }

        self.i2c.write(address, data).map_err(map_fault)
    }
}

/// `ErrorKind::Other` sind controller-interne Fehler, bei esp-hal vor allem
/// der Timeout eines hängenden Controllers.
fn map_fault<E: embedded_hal::i2c::Error>(error: E) -> TransferFault {
    match error.kind() {
        ErrorKind::NoAcknowledge(_) => TransferFault::Nack,
        ErrorKind::Other => TransferFault::Timeout,
        _ => TransferFault::Bus,
    }
}
