//! Pulszeiten des Eindraht-Protokolls der RGBW-LED
//!
//! logische '0': HIGH 0.35 µs ±150 ns, LOW 0.9 µs ±150 ns
//! logische '1': HIGH 0.9 µs ±150 ns,  LOW 0.35 µs ±150 ns
//! Ein LOW-Pegel von 50 µs beendet den Frame (Latch/Reset).

/// Erlaubte Abweichung jeder Pulsbreite
pub const PULSE_TOLERANCE_NS: u32 = 150;

/// Pulsbreiten eines Frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub one_high_ns: u32,
    pub one_low_ns: u32,
    pub zero_high_ns: u32,
    pub zero_low_ns: u32,
    /// LOW-Pegel vor jedem Frame
    pub latch_us: u32,
}

/// Nominelle Zeiten der RGBW-LED
pub const RGBW_TIMING: PulseTiming = PulseTiming {
    one_high_ns: 900,
    one_low_ns: 350,
    zero_high_ns: 350,
    zero_low_ns: 900,
    latch_us: 50,
};

impl Default for PulseTiming {
    fn default() -> Self {
        RGBW_TIMING
    }
}

impl PulseTiming {
    /// (HIGH, LOW) in ns für ein Bit
    pub const fn pulse(&self, bit: bool) -> (u32, u32) {
        if bit {
            (self.one_high_ns, self.one_low_ns)
        } else {
            (self.zero_high_ns, self.zero_low_ns)
        }
    }

    /// Liegen alle Pulse innerhalb der Toleranz um die Nennwerte?
    pub const fn is_within_tolerance(&self) -> bool {
        within(self.one_high_ns, RGBW_TIMING.one_high_ns)
            && within(self.one_low_ns, RGBW_TIMING.one_low_ns)
            && within(self.zero_high_ns, RGBW_TIMING.zero_high_ns)
            && within(self.zero_low_ns, RGBW_TIMING.zero_low_ns)
    }
}

const fn within(actual: u32, nominal: u32) -> bool {
    actual.abs_diff(nominal) <= PULSE_TOLERANCE_NS
}

/// Rechnet eine Pulsbreite in CPU-Takte um (aufgerundet)
pub const fn ns_to_cycles(ns: u32, cpu_mhz: u32) -> u32 {
    let cycles = (ns as u64 * cpu_mhz as u64).div_ceil(1_000);
    if cycles > u32::MAX as u64 {
        u32::MAX
    } else {
        cycles as u32
    }
}

/// Schleifendurchläufe einer Busy-Wait-Schleife für eine Pulsbreite
///
/// `overhead_cycles` (Pin-Zugriff, Fence, Bit-Auswahl) läuft ohnehin pro
/// Flanke und wird von der Wartezeit abgezogen.
pub const fn spin_loops(
    ns: u32,
    cpu_mhz: u32,
    cycles_per_loop: u32,
    overhead_cycles: u32,
) -> u32 {
    ns_to_cycles(ns, cpu_mhz)
        .saturating_sub(overhead_cycles)
        .div_ceil(cycles_per_loop)
}

/// Vorberechnete Schleifendurchläufe für die vier Pulsbreiten
///
/// Wird zur Compile-Zeit als `const` gebaut, damit während eines Frames
/// keine (auf RV32 in Software ausgeführte) 64-Bit-Division anfällt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseLoops {
    pub one_high: u32,
    pub one_low: u32,
    pub zero_high: u32,
    pub zero_low: u32,
}

impl PulseLoops {
    pub const fn new(
        timing: &PulseTiming,
        cpu_mhz: u32,
        cycles_per_loop: u32,
        overhead_cycles: u32,
    ) -> Self {
        Self {
            one_high: spin_loops(timing.one_high_ns, cpu_mhz, cycles_per_loop, overhead_cycles),
            one_low: spin_loops(timing.one_low_ns, cpu_mhz, cycles_per_loop, overhead_cycles),
            zero_high: spin_loops(timing.zero_high_ns, cpu_mhz, cycles_per_loop, overhead_cycles),
            zero_low: spin_loops(timing.zero_low_ns, cpu_mhz, cycles_per_loop, overhead_cycles),
        }
    }

    /// Durchläufe für eine Pulsbreite aus `timing`, `None` für andere Werte
    #[inline(always)]
    pub const fn lookup(&self, timing: &PulseTiming, ns: u32) -> Option<u32> {
        if ns == timing.one_high_ns {
            Some(self.one_high)
        } else if ns == timing.one_low_ns {
            Some(self.one_low)
        } else if ns == timing.zero_high_ns {
            Some(self.zero_high)
        } else if ns == timing.zero_low_ns {
            Some(self.zero_low)
        } else {
            None
        }
    }
}

// Compile-Time-Check: die Nennwerte selbst müssen passen
const _: () = assert!(RGBW_TIMING.is_within_tolerance());
