//! Fehlertoleranter Zwei-Draht-Bus
//!
//! Umhüllt eine Transaktionsprimitive, deren Controller durch einen
//! bekannten Silizium-Fehler hängen bleiben kann. Schlägt eine Transaktion
//! fehl, wird der Controller per Power-Cycle zurückgesetzt und dieselbe
//! Transaktion erneut ausgeführt, bis zur Obergrenze aus [`BusConfig`].

use embedded_hal::delay::DelayNs;

use crate::log::{debug, log_warn};
use crate::logic::{read_address, write_address};
use crate::recovery::{RecoveryMachine, RecoveryState};
use crate::traits::{BusController, BusError, TransferFault, TwoWireTransport};
use crate::types::BusConfig;

pub struct FaultTolerantBus<B, D> {
    bus: B,
    delay: D,
    config: BusConfig,
    recovery: RecoveryMachine,
}

impl<B, D> FaultTolerantBus<B, D>
where
    B: TwoWireTransport + BusController,
    D: DelayNs,
{
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_config(bus, delay, BusConfig::default())
    }

    pub fn with_config(bus: B, delay: D, config: BusConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            recovery: RecoveryMachine::new(config.max_retries),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Fehlversuche des letzten Aufrufs (0 nach Erfolg, `max_retries` nach Erschöpfung)
    pub fn retry_count(&self) -> u8 {
        self.recovery.retries()
    }

    pub fn recovery_state(&self) -> RecoveryState {
        self.recovery.state()
    }

    /// Liest `buffer.len()` Bytes, das Lese-Bit der Adresse wird gesetzt
    ///
    /// Bei einem Fehler enthält `buffer` nur Nullen, nie Teildaten.
    pub fn read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        continue_transaction: bool,
    ) -> Result<(), BusError> {
        let address = read_address(address);
        let result = self.run(|bus| bus.read(address, buffer, continue_transaction));
        if result.is_err() {
            buffer.fill(0);
        }
        result
    }

    pub fn read_array<const N: usize>(
        &mut self,
        address: u8,
        continue_transaction: bool,
    ) -> Result<[u8; N], BusError> {
        let mut buffer = [0u8; N];
        self.read(address, &mut buffer, continue_transaction)?;
        Ok(buffer)
    }

    /// Schreibt `data`, das Lese-Bit der Adresse wird gelöscht
    pub fn write(
        &mut self,
        address: u8,
        data: &[u8],
        continue_transaction: bool,
    ) -> Result<(), BusError> {
        let address = write_address(address);
        self.run(|bus| bus.write(address, data, continue_transaction))
    }

    /// Gibt Primitive und Delay wieder frei
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn run<F>(&mut self, mut attempt: F) -> Result<(), BusError>
    where
        F: FnMut(&mut B) -> Result<(), TransferFault>,
    {
        self.recovery.begin();
        let mut resets: u8 = 0;
        let mut state = self.recovery.state();

        loop {
            state = match state {
                RecoveryState::Idle | RecoveryState::Retrying => {
                    let outcome = attempt(&mut self.bus);
                    if let Err(fault) = outcome {
                        debug!("Bus-Transaktion fehlgeschlagen: {}", fault);
                    }
                    self.recovery.record_attempt(outcome.is_ok())
                }
                RecoveryState::Resetting => {
                    log_warn!(
                        "Bus hängt, Controller-Reset {}/{}",
                        self.recovery.retries(),
                        self.recovery.max_retries() - 1
                    );
                    self.reset_controller();
                    resets += 1;
                    self.recovery.reset_complete()
                }
                RecoveryState::Succeeded => {
                    if resets > 0 {
                        debug!("Bus nach {} Reset(s) wieder verfügbar", resets);
                    }
                    return Ok(());
                }
                RecoveryState::Exhausted => {
                    log_warn!(
                        "Bus-Recovery erschöpft nach {} Versuchen",
                        self.recovery.retries()
                    );
                    return Err(BusError::RecoveryExhausted);
                }
            };
        }
    }

    /// Power-Cycle des Controllers
    fn reset_controller(&mut self) {
        self.bus.clear_error_flag();
        self.bus.disable();
        self.bus.power_off();
        self.delay.delay_us(self.config.effective_hold_us());
        self.bus.power_on();
        self.bus.enable();
        self.bus.reinitialize();
    }
}
