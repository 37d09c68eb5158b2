// Zyklengezählte Warteschleife für das LED-Protokoll
//
// esp-hal's Delay arbeitet mit der Auflösung des Systemtimers und ist für
// Pulse von 350 ns zu grob. Diese Schleife zählt CPU-Takte.
//
// Die Durchläufe für die vier Pulsbreiten stehen als `const` fest, während
// eines Frames wird nicht gerechnet. Der Frame selbst läuft aus dem RAM
// (esp-core Feature `ram-frame`), `spin` ebenfalls.

use embedded_hal::delay::DelayNs;
use esp_core::timing::{PulseLoops, RGBW_TIMING, spin_loops};

use crate::config::{CPU_CLOCK_MHZ, LED_EDGE_OVERHEAD_CYCLES};

/// Takte pro Schleifendurchlauf (`addi` + genommener `bnez` aus dem RAM)
const CYCLES_PER_LOOP: u32 = 3;

const LED_LOOPS: PulseLoops = PulseLoops::new(
    &RGBW_TIMING,
    CPU_CLOCK_MHZ,
    CYCLES_PER_LOOP,
    LED_EDGE_OVERHEAD_CYCLES,
);

/// Busy-Wait auf Basis des CPU-Takts aus `config::CPU_CLOCK_MHZ`
#[derive(Clone, Copy, Default)]
pub struct CycleDelay;

impl CycleDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for CycleDelay {
    #[inline(always)]
    fn delay_ns(&mut self, ns: u32) {
        let loops = match LED_LOOPS.lookup(&RGBW_TIMING, ns) {
            Some(loops) => loops,
            // Latch und sonstige Wartezeiten: nicht zeitkritisch
            None => spin_loops(ns, CPU_CLOCK_MHZ, CYCLES_PER_LOOP, 0),
        };
        spin(loops);
    }
}

// Im RAM, damit Flash-Cache-Misses die Pulse nicht verlängern
#[esp_hal::ram]
fn spin(loops: u32) {
    if loops == 0 {
        return;
    }
    // SAFETY: zählt nur ein Register herunter, kein Speicherzugriff
    unsafe {
        core::arch::asm!(
            "1:",
            "addi {n}, {n}, -1",
            "bnez {n}, 1b",
            n = inout(reg) loops => _,
            options(nomem, nostack),
        );
    }
}
