//! Core Types für LED- und Bus-Treiber
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

/// Maximale Helligkeit eines Kanals
pub const MAX_INTENSITY: u8 = 255;

/// Standardwerte der Kanäle nach dem Einschalten (LED aus)
pub const DEFAULT_GREEN: u8 = 0;
pub const DEFAULT_RED: u8 = 0;
pub const DEFAULT_BLUE: u8 = 0;
pub const DEFAULT_WHITE: u8 = 0;

/// Anzahl der Kanäle pro Frame
pub const CHANNEL_COUNT: usize = 4;

/// Kanäle in Übertragungsreihenfolge (G, R, B, W)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Green,
    Red,
    Blue,
    White,
}

impl Channel {
    /// Reihenfolge, in der die Kanäle auf die Leitung gehen
    pub const WIRE_ORDER: [Channel; CHANNEL_COUNT] =
        [Channel::Green, Channel::Red, Channel::Blue, Channel::White];

    /// Position im Frame
    pub const fn index(self) -> usize {
        match self {
            Channel::Green => 0,
            Channel::Red => 1,
            Channel::Blue => 2,
            Channel::White => 3,
        }
    }
}

/// RGBW-Farbe einer vierkanaligen LED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const OFF: Rgbw = Rgbw::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Kanalwerte in Übertragungsreihenfolge (G, R, B, W)
    pub const fn to_wire(self) -> [u8; CHANNEL_COUNT] {
        [self.g, self.r, self.b, self.w]
    }

    /// Gegenstück zu [`Rgbw::to_wire`]
    pub const fn from_wire(grbw: [u8; CHANNEL_COUNT]) -> Self {
        Self {
            g: grbw[0],
            r: grbw[1],
            b: grbw[2],
            w: grbw[3],
        }
    }
}

/// Eine RGB-Farbe ohne Weiß-Anteil
impl From<RGB8> for Rgbw {
    fn from(color: RGB8) -> Self {
        Self::new(color.r, color.g, color.b, 0)
    }
}

/// Kennung einer Komponente beim Tick-Dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComponentId(pub u8);

/// Konfiguration des fehlertoleranten Busses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusConfig {
    /// Maximale Anzahl Versuche pro `read`/`write`-Aufruf
    pub max_retries: u8,
    /// Dauer ohne Versorgung beim Power-Cycle in µs
    /// (wird nie unter [`MIN_POWER_CYCLE_HOLD_US`] gesenkt)
    pub power_cycle_hold_us: u32,
}

/// Standard-Obergrenze der Versuche
pub const DEFAULT_MAX_RETRIES: u8 = 9;

/// Kürzeste Power-Cycle-Pause, die den Controller zuverlässig entlädt
pub const MIN_POWER_CYCLE_HOLD_US: u32 = 5;

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            power_cycle_hold_us: MIN_POWER_CYCLE_HOLD_US,
        }
    }
}

impl BusConfig {
    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_power_cycle_hold_us(mut self, hold_us: u32) -> Self {
        self.power_cycle_hold_us = hold_us;
        self
    }

    /// Tatsächlich verwendete Pause (mindestens 5 µs)
    pub fn effective_hold_us(&self) -> u32 {
        self.power_cycle_hold_us.max(MIN_POWER_CYCLE_HOLD_US)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Rgbw {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RGBW({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.w
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Channel::Green => defmt::write!(fmt, "Green"),
            Channel::Red => defmt::write!(fmt, "Red"),
            Channel::Blue => defmt::write!(fmt, "Blue"),
            Channel::White => defmt::write!(fmt, "White"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ComponentId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ComponentId({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "BusConfig {{ max_retries: {}, power_cycle_hold_us: {} }}",
            self.max_retries,
            self.power_cycle_hold_us
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_order_is_grbw() {
        let color = Rgbw::new(1, 2, 3, 4);
        assert_eq!(color.to_wire(), [2, 1, 3, 4]);
        assert_eq!(Rgbw::from_wire(color.to_wire()), color);
    }

    #[test]
    fn test_channel_index_matches_wire_order() {
        for (position, channel) in Channel::WIRE_ORDER.iter().enumerate() {
            assert_eq!(channel.index(), position);
        }
    }

    #[test]
    fn test_from_rgb8_has_no_white() {
        let color = Rgbw::from(RGB8 { r: 10, g: 20, b: 30 });
        assert_eq!(color, Rgbw::new(10, 20, 30, 0));
    }

    #[test]
    fn test_bus_config_hold_never_below_minimum() {
        let config = BusConfig::default().with_power_cycle_hold_us(1);
        assert_eq!(config.effective_hold_us(), MIN_POWER_CYCLE_HOLD_US);

        let config = BusConfig::default().with_power_cycle_hold_us(20);
        assert_eq!(config.effective_hold_us(), 20);
    }
}
