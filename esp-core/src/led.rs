//! RGBW-LED mit Eindraht-Protokoll
//!
//! Der Treiber hält die vier Kanalwerte (G, R, B, W) und überträgt sie als
//! pulsbreitenkodierten Bitstrom über einen einzelnen GPIO. Der Empfänger
//! dekodiert den Bitwert nur aus der Pulsbreite, daher läuft der Frame
//! in einer Critical Section mit Busy-Wait-Delays.

use core::convert::Infallible;
use core::sync::atomic::{Ordering, compiler_fence};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::log::trace;
use crate::logic::{clamp_intensity, frame_bits, is_lit};
use crate::timing::{PulseTiming, RGBW_TIMING};
use crate::traits::Tickable;
use crate::types::{
    CHANNEL_COUNT, Channel, DEFAULT_BLUE, DEFAULT_GREEN, DEFAULT_RED, DEFAULT_WHITE, Rgbw,
};

/// Treiber für eine einzelne RGBW-LED
///
/// # Trait-basierte Abstraktion
/// - `P`: Ausgangspin (esp-hal `Output` oder Mock)
/// - `D`: Busy-Wait-Delay (esp-hal `Delay` oder Mock)
///
/// Wertänderungen sind erst nach der nächsten Übertragung sichtbar;
/// [`RgbwLed::is_on`] beschreibt immer den zuletzt gesendeten Frame.
pub struct RgbwLed<P, D> {
    pin: P,
    delay: D,
    timing: PulseTiming,
    grbw: [u8; CHANNEL_COUNT],
    lit: bool,
}

impl<P, D> RgbwLed<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Erstellt den Treiber mit den Standard-Pulszeiten
    ///
    /// Der Pin wird auf LOW gezogen, es wird noch nichts gesendet.
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_timing(pin, delay, RGBW_TIMING)
    }

    /// Wie [`RgbwLed::new`], mit eigenen Pulszeiten
    ///
    /// Die Zeiten müssen innerhalb der Toleranz des Empfängers liegen.
    pub fn with_timing(mut pin: P, delay: D, timing: PulseTiming) -> Self {
        debug_assert!(
            timing.is_within_tolerance(),
            "Pulszeiten außerhalb der Toleranz"
        );
        let Ok(()) = pin.set_low();

        Self {
            pin,
            delay,
            timing,
            grbw: Rgbw::new(DEFAULT_RED, DEFAULT_GREEN, DEFAULT_BLUE, DEFAULT_WHITE).to_wire(),
            lit: false,
        }
    }

    /// Setzt alle vier Kanäle und sendet sofort
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8, white: u8) {
        self.grbw = [
            clamp_intensity(u16::from(green)),
            clamp_intensity(u16::from(red)),
            clamp_intensity(u16::from(blue)),
            clamp_intensity(u16::from(white)),
        ];
        self.transmit();
    }

    pub fn set_rgbw(&mut self, color: Rgbw) {
        self.set_color(color.r, color.g, color.b, color.w);
    }

    /// Sendet die gespeicherten Werte erneut (z.B. nach `turn_off`)
    pub fn turn_on(&mut self) {
        self.transmit();
    }

    /// Schaltet die LED sichtbar aus, die eingestellte Farbe bleibt erhalten
    pub fn turn_off(&mut self) {
        let saved = self.grbw;
        self.grbw = [0; CHANNEL_COUNT];
        self.transmit();
        self.grbw = saved;
    }

    pub fn red(&self) -> u8 {
        self.channel(Channel::Red)
    }

    pub fn green(&self) -> u8 {
        self.channel(Channel::Green)
    }

    pub fn blue(&self) -> u8 {
        self.channel(Channel::Blue)
    }

    pub fn white(&self) -> u8 {
        self.channel(Channel::White)
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        self.grbw[channel.index()]
    }

    /// Eingestellte (nicht unbedingt gesendete) Farbe
    pub fn color(&self) -> Rgbw {
        Rgbw::from_wire(self.grbw)
    }

    /// Hat der letzte gesendete Frame die LED eingeschaltet?
    pub fn is_on(&self) -> bool {
        self.lit
    }

    /// Gibt Pin und Delay wieder frei
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn transmit(&mut self) {
        let frame = self.grbw;
        let color = Rgbw::from_wire(frame);
        trace!("RGBW({}, {}, {}, {})", color.r, color.g, color.b, color.w);

        // Latch: LOW hält den Empfänger im Reset
        self.drive(false);
        self.delay.delay_us(self.timing.latch_us);

        critical_section::with(|_| self.send_bits(frame));

        self.lit = is_lit(&frame);
    }

    // Mit `ram-frame` aus dem RAM, damit Cache-Misses keine Pulse strecken
    #[inline(never)]
    #[cfg_attr(feature = "ram-frame", unsafe(link_section = ".rwtext"))]
    fn send_bits(&mut self, frame: [u8; CHANNEL_COUNT]) {
        for bit in frame_bits(frame) {
            let (high_ns, low_ns) = self.timing.pulse(bit);

            self.drive(true);
            compiler_fence(Ordering::SeqCst);
            self.delay.delay_ns(high_ns);

            self.drive(false);
            compiler_fence(Ordering::SeqCst);
            self.delay.delay_ns(low_ns);
        }
    }

    fn drive(&mut self, high: bool) {
        let Ok(()) = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

/// Noch ohne Funktion (reserviert für Animationen)
impl<P, D> Tickable for RgbwLed<P, D> {
    fn on_tick(&mut self) {}
}
