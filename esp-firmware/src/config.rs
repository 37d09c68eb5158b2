// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die GPIOs (LED an GPIO8, SDA an GPIO6, SCL an GPIO7) werden in
// bin/main.rs direkt über `peripherals.GPIOx` gewählt.

use esp_core::ComponentId;

// ============================================================================
// RGBW-LED Konfiguration
// ============================================================================

/// CPU-Takt in MHz, auf den die Pulszeiten ausgelegt sind
/// Bei 160 MHz entspricht ein Takt 6.25 ns (Toleranz ±150 ns = ±24 Takte)
pub const CPU_CLOCK_MHZ: u32 = 160;

/// Takte pro Flanke außerhalb der Warteschleife
/// (Pin-Zugriff, Fence, Bit-Auswahl, Aufruf von `spin`)
pub const LED_EDGE_OVERHEAD_CYCLES: u32 = 8;

/// Kennung der LED beim Tick-Dispatcher
pub const LED_COMPONENT_ID: ComponentId = ComponentId(1);

/// Helligkeits-Level der Demo-Farben (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 10;

// ============================================================================
// System-Tick Konfiguration
// ============================================================================

/// Periode des System-Ticks in Millisekunden
pub const SYSTEM_TICK_MS: u64 = 6;

/// Maximale Anzahl registrierter Tick-Komponenten
pub const MAX_TICK_COMPONENTS: usize = 4;

// ============================================================================
// Zwei-Draht-Bus (I2C) Konfiguration
// ============================================================================

/// Bus-Frequenz in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 100;

/// Maximale Versuche pro Transaktion bevor ein Bus-Fehler gemeldet wird
pub const I2C_MAX_RETRIES: u8 = 9;

/// Power-Cycle-Pause in µs (5 µs ist das Minimum)
pub const I2C_POWER_CYCLE_HOLD_US: u32 = 5;

/// Maximale Länge zurückgehaltener Schreibdaten bei `continue_transaction`
pub const I2C_PENDING_WRITE_SIZE: usize = 32;

// ============================================================================
// Demo-Sensor (Beschleunigungssensor am Bus)
// ============================================================================

/// 8-Bit-Adresse des Sensors (R/W-Bit wird vom Treiber gesetzt)
pub const SENSOR_ADDRESS: u8 = 0x3A;

/// WHO_AM_I Register
pub const SENSOR_WHO_AM_I_REGISTER: u8 = 0x0D;

/// Abfrage-Intervall in Sekunden
pub const SENSOR_POLL_INTERVAL_SECS: u64 = 1;
