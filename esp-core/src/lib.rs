//! ESP Core - Platform-agnostic Drivers, Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Pure Functions und zwei generische Treiber:
//! die RGBW-LED mit Eindraht-Protokoll und den fehlertoleranten
//! Zwei-Draht-Bus mit Controller-Recovery.

#![no_std]

mod log;

pub mod bus;
pub mod led;
pub mod logic;
pub mod recovery;
pub mod tick;
pub mod timing;
pub mod traits;
pub mod transport;
pub mod types;

// Re-exports für einfachen Zugriff
pub use bus::FaultTolerantBus;
pub use led::RgbwLed;
pub use logic::{clamp_intensity, frame_bits, is_lit, read_address, write_address};
pub use recovery::{RecoveryMachine, RecoveryState};
pub use tick::TickRegistry;
pub use timing::{PULSE_TOLERANCE_NS, PulseLoops, PulseTiming, RGBW_TIMING};
pub use traits::{
    BusController, BusError, STATUS_I2C_ERROR, STATUS_OK, TickError, TickScheduler, Tickable,
    TransferFault, TwoWireTransport,
};
pub use transport::I2cTransport;
pub use types::{BusConfig, Channel, ComponentId, MAX_INTENSITY, Rgbw};
