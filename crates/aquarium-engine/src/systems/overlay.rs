// systems/overlay.rs
//
// Transfer arrows between the selected creature and the senders/recipients
// that are rendered in the same block. Arrows hold creature ids only; their
// endpoints are read from the store each frame so they follow motion.

use glam::Vec2;

use crate::api::types::CreatureId;
use crate::core::store::CreatureStore;

/// Direction of value relative to the selected creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    /// Selected creature paid the target.
    Sent,
    /// Source paid the selected creature.
    Received,
}

impl ArrowKind {
    /// Wire code.
    pub fn code(self) -> f32 {
        match self {
            ArrowKind::Sent => 1.0,
            ArrowKind::Received => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferArrow {
    pub from: CreatureId,
    pub to: CreatureId,
    pub kind: ArrowKind,
}

impl TransferArrow {
    /// Current endpoints (creature centers), or None if either end is gone.
    pub fn endpoints(&self, store: &CreatureStore) -> Option<(Vec2, Vec2)> {
        let from = store.get(self.from)?;
        let to = store.get(self.to)?;
        Some((from.center(), to.center()))
    }
}

/// Arrows currently on screen, tracked so they can be cleaned up.
#[derive(Debug, Clone, Default)]
pub struct Overlays {
    arrows: Vec<TransferArrow>,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all arrows with those of `selected`.
    /// Peers that are not rendered in the current block get no arrow.
    pub fn rebuild(&mut self, store: &CreatureStore, selected: CreatureId) -> usize {
        self.arrows.clear();
        let Some(creature) = store.get(selected) else {
            return 0;
        };
        for peer in creature.sent_to() {
            if let Some(target) = store.find_by_address(&peer.address) {
                if target.id != selected {
                    self.arrows.push(TransferArrow {
                        from: selected,
                        to: target.id,
                        kind: ArrowKind::Sent,
                    });
                }
            }
        }
        for peer in creature.received_from() {
            if let Some(source) = store.find_by_address(&peer.address) {
                if source.id != selected {
                    self.arrows.push(TransferArrow {
                        from: source.id,
                        to: selected,
                        kind: ArrowKind::Received,
                    });
                }
            }
        }
        log::debug!("{} transfer arrows for creature {}", self.arrows.len(), selected.0);
        self.arrows.len()
    }

    /// Drop arrows touching a creature.
    pub fn forget(&mut self, id: CreatureId) {
        self.arrows.retain(|a| a.from != id && a.to != id);
    }

    pub fn clear(&mut self) {
        self.arrows.clear();
    }

    pub fn arrows(&self) -> &[TransferArrow] {
        &self.arrows
    }

    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }
}
