// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die Traits aus esp-core für ESP32-C6
// Hardware: zyklengenaues Delay für die LED und den I2C-Controller.

pub mod cycle_delay;
pub mod two_wire;

pub use cycle_delay::CycleDelay;
pub use two_wire::EspTwoWire;
