// api/hooks.rs
//
// Observation hooks for the shell (info panel, visual swaps).
// Handlers are called synchronously, after the engine has finished mutating
// its own state for the triggering action.

use std::fmt;

use crate::components::creature::Creature;

/// Which end of a drag a [`Hooks::on_creature_dragged`] handler is seeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// The creature was picked up; its visual is now `Held`.
    Started,
    /// The creature was dropped; its visual is back to `Swimming`.
    Ended,
}

type CreatureHandler = Box<dyn FnMut(&Creature)>;
type DragHandler = Box<dyn FnMut(&Creature, DragPhase)>;

/// Registered observer callbacks.
#[derive(Default)]
pub struct Hooks {
    clicked: Vec<CreatureHandler>,
    dragged: Vec<DragHandler>,
    show_info: Vec<CreatureHandler>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a creature is clicked (pressed and released without dragging).
    pub fn on_creature_clicked(&mut self, handler: impl FnMut(&Creature) + 'static) {
        self.clicked.push(Box::new(handler));
    }

    /// Called when a creature is picked up and again when it is dropped.
    pub fn on_creature_dragged(&mut self, handler: impl FnMut(&Creature, DragPhase) + 'static) {
        self.dragged.push(Box::new(handler));
    }

    /// Called whenever the info panel should show a creature: on click and on focus.
    pub fn on_show_info(&mut self, handler: impl FnMut(&Creature) + 'static) {
        self.show_info.push(Box::new(handler));
    }

    pub(crate) fn notify_clicked(&mut self, creature: &Creature) {
        for handler in &mut self.clicked {
            handler(creature);
        }
    }

    pub(crate) fn notify_dragged(&mut self, creature: &Creature, phase: DragPhase) {
        for handler in &mut self.dragged {
            handler(creature, phase);
        }
    }

    pub(crate) fn notify_show_info(&mut self, creature: &Creature) {
        for handler in &mut self.show_info {
            handler(creature);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("clicked", &self.clicked.len())
            .field("dragged", &self.dragged.len())
            .field("show_info", &self.show_info.len())
            .finish()
    }
}
