//! Recovery-Zustandsautomat für den Zwei-Draht-Bus
//!
//! ```text
//! Idle ──ok──────────────────────────────► Succeeded
//!  │ fail
//!  ▼
//! Resetting ──reset fertig──► Retrying ──ok──► Succeeded
//!  ▲                            │ fail
//!  └──── retries < max ─────────┤
//!                               └─ retries == max ─► Exhausted
//! ```
//!
//! Jeder fehlgeschlagene Versuch zählt. Bei `max_retries` Fehlversuchen
//! ist der Aufruf erschöpft, es gibt also höchstens `max_retries` Versuche
//! und `max_retries - 1` Reset-Zyklen pro Aufruf.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    Idle,
    Resetting,
    Retrying,
    Succeeded,
    Exhausted,
}

impl RecoveryState {
    pub fn is_finished(self) -> bool {
        matches!(self, RecoveryState::Succeeded | RecoveryState::Exhausted)
    }
}

/// Zählt Fehlversuche eines einzelnen `read`/`write`-Aufrufs
#[derive(Debug, Clone)]
pub struct RecoveryMachine {
    state: RecoveryState,
    retries: u8,
    max_retries: u8,
}

impl RecoveryMachine {
    /// `max_retries == 0` wird wie 1 behandelt (ein Versuch, keine Recovery)
    pub fn new(max_retries: u8) -> Self {
        Self {
            state: RecoveryState::Idle,
            retries: 0,
            max_retries: max_retries.max(1),
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn retries(&self) -> u8 {
        self.retries
    }

    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }

    /// Startet einen neuen Aufruf mit vollem Budget
    pub fn begin(&mut self) {
        self.state = RecoveryState::Idle;
        self.retries = 0;
    }

    /// Meldet das Ergebnis des ersten oder eines wiederholten Versuchs
    pub fn record_attempt(&mut self, success: bool) -> RecoveryState {
        if !matches!(self.state, RecoveryState::Idle | RecoveryState::Retrying) {
            return self.state;
        }

        self.state = if success {
            self.retries = 0;
            RecoveryState::Succeeded
        } else {
            self.retries = self.retries.saturating_add(1);
            if self.retries < self.max_retries {
                RecoveryState::Resetting
            } else {
                RecoveryState::Exhausted
            }
        };
        self.state
    }

    /// Die Reset-Sequenz ist durchgelaufen, der Versuch wird wiederholt
    pub fn reset_complete(&mut self) -> RecoveryState {
        if self.state == RecoveryState::Resetting {
            self.state = RecoveryState::Retrying;
        }
        self.state
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RecoveryState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RecoveryState::Idle => defmt::write!(fmt, "Idle"),
            RecoveryState::Resetting => defmt::write!(fmt, "Resetting"),
            RecoveryState::Retrying => defmt::write!(fmt, "Retrying"),
            RecoveryState::Succeeded => defmt::write!(fmt, "Succeeded"),
            RecoveryState::Exhausted => defmt::write!(fmt, "Exhausted"),
        }
    }
}
