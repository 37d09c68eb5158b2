//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::types::{CHANNEL_COUNT, MAX_INTENSITY};

/// Anzahl Bits in einem Frame (4 Kanäle * 8 Bit)
pub const FRAME_BITS: usize = CHANNEL_COUNT * 8;

/// Begrenzt einen Helligkeitswert auf `0..=MAX_INTENSITY`
///
/// # Beispiele
///
/// ```
/// # use esp_core::clamp_intensity;
/// assert_eq!(clamp_intensity(300), 255);
/// assert_eq!(clamp_intensity(42), 42);
/// ```
pub fn clamp_intensity(value: u16) -> u8 {
    // min() garantiert den Wertebereich, daher kann der Cast nicht abschneiden
    value.min(u16::from(MAX_INTENSITY)) as u8
}

/// Leuchtet die LED mit diesen Kanalwerten?
pub fn is_lit(channels: &[u8; CHANNEL_COUNT]) -> bool {
    channels.iter().map(|&value| u16::from(value)).sum::<u16>() > 0
}

/// Bits eines Frames in Sendereihenfolge: Kanal für Kanal, MSB zuerst
pub fn frame_bits(channels: [u8; CHANNEL_COUNT]) -> impl Iterator<Item = bool> {
    channels
        .into_iter()
        .flat_map(|byte| (0..8).rev().map(move |bit| byte & (1 << bit) != 0))
}

/// 8-Bit-Adresse mit gesetztem Lese-Bit
pub const fn read_address(address: u8) -> u8 {
    address | 0x01
}

/// 8-Bit-Adresse mit gelöschtem Lese-Bit
pub const fn write_address(address: u8) -> u8 {
    address & !0x01
}
