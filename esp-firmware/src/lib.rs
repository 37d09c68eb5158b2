// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{BusConfig, FaultTolerantBus, Rgbw, RgbwLed, TickRegistry, TickScheduler};

use esp_hal::delay::Delay;
use esp_hal::gpio::Output;

use crate::config::MAX_TICK_COMPONENTS;
use crate::hal::{CycleDelay, EspTwoWire};

// ============================================================================
// Type-Aliase für die Board-Peripherie
// ============================================================================
//
// Embassy Tasks können keine generischen Parameter haben.
// Statt:  RgbwLed<Output<'static>, CycleDelay>
// Nutze:  BoardLed

/// RGBW-LED an einem GPIO mit zyklengezähltem Delay
pub type BoardLed = RgbwLed<Output<'static>, CycleDelay>;

/// I2C0 mit Power-Cycle-Recovery (µs-Delay von esp-hal reicht hier)
pub type BoardBus = FaultTolerantBus<EspTwoWire<'static>, Delay>;

/// Tick-Registry der Composition-Root
pub type BoardTicks = TickRegistry<MAX_TICK_COMPONENTS>;
