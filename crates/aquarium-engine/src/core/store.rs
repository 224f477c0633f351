use crate::api::types::CreatureId;
use crate::components::creature::Creature;
use crate::components::species::Species;

/// Ordered creature storage using a flat Vec.
/// Creation order is preserved: it is the draw order (later creatures on top)
/// and the order `find_by_address` searches in.
pub struct CreatureStore {
    creatures: Vec<Creature>,
}

impl CreatureStore {
    pub fn new() -> Self {
        Self {
            creatures: Vec::with_capacity(64),
        }
    }

    /// Add a creature at the end (top of the draw order).
    pub fn insert(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut()
    }

    /// First attached creature (in creation order) with the given address.
    pub fn find_by_address(&self, address: &str) -> Option<&Creature> {
        self.creatures
            .iter()
            .find(|c| c.attached && c.address() == address)
    }

    /// Number of creatures of a species, i.e. the ordinal the next one gets.
    pub fn count_species(&self, species: Species) -> usize {
        self.creatures.iter().filter(|c| c.species() == species).count()
    }

    /// Topmost attached creature whose drawn sprite contains the point.
    pub fn hit_test(&self, point: glam::Vec2) -> Option<CreatureId> {
        self.creatures
            .iter()
            .rev()
            .find(|c| c.attached && c.hit(point))
            .map(|c| c.id)
    }

    pub fn ids(&self) -> Vec<CreatureId> {
        self.creatures.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Remove and return every creature, in creation order.
    pub fn drain(&mut self) -> Vec<Creature> {
        std::mem::take(&mut self.creatures)
    }
}

impl Default for CreatureStore {
    fn default() -> Self {
        Self::new()
    }
}
