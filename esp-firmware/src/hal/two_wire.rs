// Zwei-Draht-Primitive und Controller-Zugriff für den ESP32-C6 I2C
//
// Transaktionen (inkl. zurückgehaltener Schreibdaten für Repeated Start)
// übernimmt esp_core::I2cTransport. Hier kommen nur die Register für die
// Recovery-Sequenz (BusController) dazu.

use defmt::error;
use esp_core::{BusController, I2cTransport, TransferFault, TwoWireTransport};
use esp_hal::Blocking;
use esp_hal::i2c::master::{Config, I2c};
use esp_hal::peripherals::{I2C0, PCR};

use crate::config::I2C_PENDING_WRITE_SIZE;

/// I2C0 als Transaktionsprimitive mit Power-Cycle-Zugriff
pub struct EspTwoWire<'d> {
    transport: I2cTransport<I2c<'d, Blocking>, I2C_PENDING_WRITE_SIZE>,
    config: Config,
}

impl<'d> EspTwoWire<'d> {
    /// # Parameter
    /// - `i2c`: I2C0 Treiber (SDA/SCL bereits zugewiesen)
    /// - `config`: dieselbe Konfiguration, mit der `i2c` erstellt wurde
    ///   (wird nach einem Power-Cycle erneut angewendet)
    pub fn new(i2c: I2c<'d, Blocking>, config: Config) -> Self {
        Self {
            transport: I2cTransport::new(i2c),
            config,
        }
    }
}

impl TwoWireTransport for EspTwoWire<'_> {
    fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        self.transport.read(address, buffer, continue_transaction)
    }

    fn write(
        &mut self,
        address: u8,
        data: &[u8],
        continue_transaction: bool,
    ) -> Result<(), TransferFault> {
        self.transport.write(address, data, continue_transaction)
    }
}

impl BusController for EspTwoWire<'_> {
    fn clear_error_flag(&mut self) {
        // Alle Interrupt-Flags (NACK, Timeout, Arbitration) löschen
        I2C0::regs()
            .int_clr()
            .write(|w| unsafe { w.bits(u32::MAX) });
    }

    fn disable(&mut self) {
        PCR::regs()
            .i2c0_conf()
            .modify(|_, w| w.i2c0_clk_en().clear_bit());
    }

    fn power_off(&mut self) {
        // Peripheral im Reset halten
        PCR::regs()
            .i2c0_conf()
            .modify(|_, w| w.i2c0_rst_en().set_bit());
    }

    fn power_on(&mut self) {
        PCR::regs()
            .i2c0_conf()
            .modify(|_, w| w.i2c0_rst_en().clear_bit());
    }

    fn enable(&mut self) {
        PCR::regs()
            .i2c0_conf()
            .modify(|_, w| w.i2c0_clk_en().set_bit());
    }

    fn reinitialize(&mut self) {
        // Nach dem Reset sind Timing- und Filter-Register leer
        if let Err(_e) = self.transport.inner_mut().apply_config(&self.config) {
            error!("I2C Konfiguration nach Reset fehlgeschlagen");
        }
    }
}
