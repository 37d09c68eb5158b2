//! Periodischer System-Tick
//!
//! Die Registry merkt sich, welche Komponenten Ticks erhalten. Der
//! eigentliche Takt (z.B. ein Embassy-Ticker) ruft `dispatch` auf.
//!
//! Die Registry besitzt die Komponenten nicht, sie hält nur deren IDs.
//! Der Aufrufer besitzt die Komponenten und reicht sie bei jedem Tick
//! zusammen mit ihrer ID herein. `dispatch` entscheidet dann nur, ob die
//! Komponente den Tick bekommt.

use heapless::Vec;

use crate::log::debug;
use crate::traits::{TickError, TickScheduler, Tickable};
use crate::types::ComponentId;

/// Registry mit Platz für `N` Komponenten-IDs
///
/// Wirkt als Filter: nur registrierte IDs werden an `on_tick` durchgereicht.
#[derive(Debug, Default)]
pub struct TickRegistry<const N: usize> {
    components: Vec<ComponentId, N>,
}

impl<const N: usize> TickRegistry<N> {
    pub const fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.components.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Ruft `on_tick` auf `component` auf, falls `id` registriert ist
    ///
    /// Gibt zurück, ob der Tick zugestellt wurde.
    pub fn dispatch(&self, id: ComponentId, component: &mut dyn Tickable) -> bool {
        if self.is_registered(id) {
            component.on_tick();
            true
        } else {
            false
        }
    }
}

impl<const N: usize> TickScheduler for TickRegistry<N> {
    fn register(&mut self, id: ComponentId) -> Result<(), TickError> {
        if self.is_registered(id) {
            return Err(TickError::AlreadyRegistered);
        }
        self.components.push(id).map_err(|_| TickError::Full)?;
        debug!("Tick-Komponente {} registriert", id.0);
        Ok(())
    }

    fn unregister(&mut self, id: ComponentId) -> bool {
        let before = self.components.len();
        self.components.retain(|registered| *registered != id);
        before != self.components.len()
    }
}
