// core/state.rs
//
// The aquarium: every piece of engine state behind one `&mut`. Sequences
// block loads and clears, selection and focus, pointer drags, pause and the
// task scheduler that drives creature motion.
//
// Usage:
//   let mut aquarium = AquariumState::new(AquariumConfig::default());
//   aquarium.load_block_json(json)?;
//   aquarium.frame(16.7);
//   aquarium.render(&mut buffer);

use glam::Vec2;
use log::{debug, info, warn};

use crate::api::config::AquariumConfig;
use crate::api::hooks::{DragPhase, Hooks};
use crate::api::types::{event_kind, CreatureId, ShellEvent};
use crate::components::creature::{Creature, CreatureInfo, Visual};
use crate::components::descriptor::{BlockData, CreatureDescriptor, LoadError};
use crate::core::scheduler::{Scheduler, TaskKind};
use crate::core::store::CreatureStore;
use crate::core::time::FixedTimestep;
use crate::core::viewport::{Viewport, WindowExtent};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::systems::drag::DragController;
use crate::systems::motion::Strategy;
use crate::systems::overlay::Overlays;
use crate::systems::placement::{plan_spawn, Placed, PlacementRules};
use crate::systems::render::build_render_buffer;
use crate::systems::rng::Rng;
use crate::systems::selection::{Highlight, Selection};

/// Outcome of loading a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub created: usize,
    /// Descriptors rejected as malformed or of an unknown species.
    pub skipped: usize,
}

pub struct AquariumState {
    config: AquariumConfig,
    viewport: Viewport,
    store: CreatureStore,
    scheduler: Scheduler,
    timestep: FixedTimestep,
    selection: Selection,
    highlight: Highlight,
    drag: DragController,
    overlays: Overlays,
    placement: PlacementRules,
    rng: Rng,
    hooks: Hooks,
    paused: bool,
    events: Vec<ShellEvent>,
    next_id: u32,
    block_height: Option<u64>,
}

impl AquariumState {
    pub fn new(config: AquariumConfig) -> Self {
        Self {
            viewport: Viewport::new(config.window, config.reservations),
            store: CreatureStore::new(),
            scheduler: Scheduler::new(),
            timestep: FixedTimestep::new(config.tick_ms, config.max_catch_up_ticks),
            selection: Selection::Unselected,
            highlight: Highlight::default(),
            drag: DragController::new(),
            overlays: Overlays::new(),
            placement: PlacementRules::default(),
            rng: Rng::new(config.seed),
            hooks: Hooks::new(),
            paused: false,
            events: Vec::new(),
            next_id: 1,
            block_height: None,
            config,
        }
    }

    fn next_id(&mut self) -> CreatureId {
        let id = CreatureId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a shell event. Only the newest `max_events` are kept between
    /// drains.
    fn emit(&mut self, event: ShellEvent) {
        self.events.push(event);
        let excess = self.events.len().saturating_sub(self.config.max_events);
        if excess > 0 {
            self.events.drain(..excess);
        }
    }

    // ---- Lifecycle ----

    /// Replace the aquarium's contents with a block's creatures.
    ///
    /// Everything from the previous block is cleared first. Descriptors that
    /// fail validation are skipped and logged. New creatures start moving
    /// unless the aquarium is paused.
    pub fn load_block(&mut self, descriptors: &[CreatureDescriptor]) -> LoadSummary {
        self.populate(descriptors, 0)
    }

    /// Parse a block payload and load it. An unreadable payload leaves the
    /// current aquarium untouched.
    pub fn load_block_json(&mut self, json: &str) -> Result<LoadSummary, LoadError> {
        let block = BlockData::from_json(json)?;
        let summary = self.populate(&block.creatures, block.malformed);
        self.block_height = block.height;
        Ok(summary)
    }

    fn populate(&mut self, descriptors: &[CreatureDescriptor], malformed: usize) -> LoadSummary {
        self.clear_all();

        let mut summary = LoadSummary {
            created: 0,
            skipped: malformed,
        };
        let mut placed: Vec<Placed> = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let species = match descriptor.validate() {
                Ok(species) => species,
                Err(err) => {
                    warn!("skipping creature {:?}: {err}", descriptor.address);
                    summary.skipped += 1;
                    continue;
                }
            };
            let size = Vec2::splat(species.size_for(descriptor.ada));
            let bounds = self.viewport.bounds_for(size, species.render_offset_y());
            let ordinal = self.store.count_species(species);
            let spawn = plan_spawn(
                &self.placement,
                species,
                size,
                &bounds,
                ordinal,
                &placed,
                &mut self.rng,
            );
            placed.push(Placed { pos: spawn, size });

            let id = self.next_id();
            self.store
                .insert(Creature::new(id, species, descriptor.clone(), bounds, spawn));
            if !self.paused {
                self.start_motion(id);
            }
            summary.created += 1;
        }

        info!(
            "block loaded: {} creatures, {} skipped",
            summary.created, summary.skipped
        );
        self.emit(ShellEvent::new(
            event_kind::BLOCK_LOADED,
            summary.created as f32,
            summary.skipped as f32,
            0.0,
        ));
        summary
    }

    /// Stop every task, then discard all creatures, the selection, any drag
    /// in progress and the transfer arrows.
    pub fn clear_all(&mut self) {
        let stopped = self.scheduler.stop_all_motion();
        self.scheduler.stop(TaskKind::Highlight);
        let removed = self.store.drain().len();
        self.selection = Selection::Unselected;
        self.highlight.hide();
        self.drag.cancel();
        self.overlays.clear();
        self.block_height = None;
        if removed > 0 {
            info!("cleared {removed} creatures ({stopped} motion tasks stopped)");
        }
        self.emit(ShellEvent::new(event_kind::CLEARED, 0.0, 0.0, 0.0));
    }

    /// Detach a creature from the visual layer. Its motion task halts on
    /// its next run; the creature stays in the store until the next clear.
    pub fn detach(&mut self, id: CreatureId) -> bool {
        let Some(creature) = self.store.get_mut(id) else {
            return false;
        };
        creature.attached = false;
        if self.selection.is_selected(id) {
            self.clear_selection();
        }
        if self.drag.held() == Some(id) {
            self.drag.cancel();
        }
        self.overlays.forget(id);
        debug!("creature {} detached", id.0);
        true
    }

    // ---- Motion ----

    /// (Re)start a creature's species strategy from its current position.
    /// A running task is replaced. Refused for held or detached creatures.
    pub fn start_motion(&mut self, id: CreatureId) -> bool {
        if self.drag.held() == Some(id) {
            return false;
        }
        let Some(creature) = self.store.get_mut(id).filter(|c| c.attached) else {
            return false;
        };
        let strategy = Strategy::for_species(creature.species());
        strategy.start(&mut creature.motion, &mut self.rng);
        self.scheduler
            .start(TaskKind::Motion(id), strategy.period_ms());
        true
    }

    /// Stop a creature's motion task. Idempotent; returns true if one was running.
    pub fn stop_motion(&mut self, id: CreatureId) -> bool {
        self.scheduler.stop(TaskKind::Motion(id))
    }

    pub fn is_moving(&self, id: CreatureId) -> bool {
        self.scheduler.is_running(TaskKind::Motion(id))
    }

    /// Stop all motion (true) or restart every creature's strategy (false).
    /// The selection highlight keeps tracking either way.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            let stopped = self.scheduler.stop_all_motion();
            info!("paused: {stopped} creatures stopped");
        } else {
            let ids = self.store.ids();
            let started = ids.into_iter().filter(|&id| self.start_motion(id)).count();
            info!("resumed: {started} creatures moving");
        }
    }

    // ---- Time ----

    /// Run one scheduler quantum.
    pub fn step(&mut self) {
        for task in self.scheduler.advance(self.timestep.quantum_ms()) {
            // An earlier task in the batch may have stopped this one.
            if self.scheduler.is_running(task) {
                self.run_task(task);
            }
        }
    }

    /// Run `ms` of logical time as whole quanta, bypassing the frame accumulator.
    pub fn advance(&mut self, ms: u32) {
        for _ in 0..ms / self.timestep.quantum_ms() {
            self.step();
        }
    }

    /// Feed one frame's wall-clock delta. Returns the number of quanta run.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        let steps = self.timestep.accumulate(dt_ms);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    fn run_task(&mut self, task: TaskKind) {
        match task {
            TaskKind::Motion(id) => self.run_motion(id),
            TaskKind::Highlight => self.track_highlight(),
        }
    }

    fn run_motion(&mut self, id: CreatureId) {
        let creature = match self.store.get_mut(id) {
            Some(creature) if creature.attached => creature,
            _ => {
                self.scheduler.stop(TaskKind::Motion(id));
                debug!("motion task for creature {} halted", id.0);
                return;
            }
        };
        let strategy = Strategy::for_species(creature.species());
        let bounds = creature.bounds;
        strategy.step(&mut creature.motion, &bounds, &mut self.rng);
    }

    fn track_highlight(&mut self) {
        let tracked = self.selection.id().and_then(|id| self.store.get(id));
        match tracked {
            Some(creature) => self.highlight.track(creature, self.config.highlight_padding),
            None => {
                self.highlight.hide();
                self.scheduler.stop(TaskKind::Highlight);
            }
        }
    }

    // ---- Selection ----

    /// Select a creature: show the tracking highlight and its transfer arrows.
    pub fn select(&mut self, id: CreatureId) -> bool {
        let Some(creature) = self.store.get(id).filter(|c| c.attached) else {
            warn!("cannot select creature {}: not in the aquarium", id.0);
            return false;
        };
        self.highlight.track(creature, self.config.highlight_padding);
        self.selection = Selection::Selected(id);
        self.scheduler
            .start(TaskKind::Highlight, self.config.highlight_period_ms);
        self.overlays.rebuild(&self.store, id);
        self.emit(ShellEvent::for_creature(event_kind::SELECTION_CHANGED, id));
        true
    }

    pub fn clear_selection(&mut self) {
        let previous = self.selection.id();
        self.selection = Selection::Unselected;
        self.highlight.hide();
        self.scheduler.stop(TaskKind::Highlight);
        self.overlays.clear();
        if previous.is_some() {
            self.emit(ShellEvent::new(event_kind::SELECTION_CHANGED, -1.0, 0.0, 0.0));
        }
    }

    /// Select the first creature with this address and show its info.
    /// A miss is logged and changes nothing: the address may belong to an
    /// actor outside the rendered block.
    pub fn focus_by_address(&mut self, address: &str) -> Option<CreatureId> {
        let Some(id) = self.store.find_by_address(address).map(|c| c.id) else {
            warn!("focus: no creature with address {address}");
            self.emit(ShellEvent::new(event_kind::FOCUS_MISSED, 0.0, 0.0, 0.0));
            return None;
        };
        if !self.select(id) {
            return None;
        }
        if let Some(creature) = self.store.get(id) {
            self.hooks.notify_show_info(creature);
        }
        info!("focused creature {} ({address})", id.0);
        Some(id)
    }

    // ---- Pointer ----

    /// Pick up the topmost creature under the pointer, if any.
    pub fn pointer_down(&mut self, point: Vec2) -> Option<CreatureId> {
        if self.drag.is_dragging() {
            return None;
        }
        let id = self.store.hit_test(point)?;
        let creature = self.store.get_mut(id)?;
        if !self.drag.begin(id, creature.pos(), point) {
            return None;
        }
        self.scheduler.stop(TaskKind::Motion(id));
        creature.visual = Visual::Held;
        let pos = creature.pos();
        self.hooks.notify_dragged(creature, DragPhase::Started);
        debug!("creature {} picked up at ({:.1}, {:.1})", id.0, pos.x, pos.y);
        self.emit(ShellEvent::new(event_kind::DRAG_STARTED, id.0 as f32, pos.x, pos.y));
        Some(id)
    }

    /// Move the held creature with the pointer, clamped to the window.
    pub fn pointer_move(&mut self, point: Vec2) {
        let Some((id, origin)) = self.drag.drag_to(point) else {
            return;
        };
        if let Some(creature) = self.store.get_mut(id) {
            creature.motion.pos = self.viewport.clamp_to_window(origin, creature.size());
        }
    }

    /// Drop the held creature and resume its motion from where it landed.
    /// A release without real travel is a click: the creature is selected
    /// and the click and info hooks fire.
    pub fn pointer_up(&mut self, point: Vec2) -> Option<CreatureId> {
        self.pointer_move(point);
        let release = self.drag.end()?;
        let id = release.id;

        let creature = self.store.get_mut(id)?;
        creature.visual = Visual::Swimming;
        let pos = creature.pos();
        self.hooks.notify_dragged(creature, DragPhase::Ended);
        self.emit(ShellEvent::new(event_kind::DRAG_ENDED, id.0 as f32, pos.x, pos.y));

        if !self.paused {
            self.start_motion(id);
        }

        if release.click && self.select(id) {
            if let Some(creature) = self.store.get(id) {
                self.hooks.notify_clicked(creature);
                self.hooks.notify_show_info(creature);
            }
            self.emit(ShellEvent::for_creature(event_kind::CREATURE_CLICKED, id));
        }
        Some(id)
    }

    /// Apply every queued input event in order.
    pub fn handle_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            match event {
                InputEvent::PointerDown { x, y } => {
                    self.pointer_down(Vec2::new(x, y));
                }
                InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
                InputEvent::PointerUp { x, y } => {
                    self.pointer_up(Vec2::new(x, y));
                }
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }
    }

    // ---- Viewport ----

    /// Recompute every creature's bounds for a new window size.
    /// Creatures left outside are pulled back in, except one being held.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(WindowExtent::new(width, height));
        let held = self.drag.held();
        for creature in self.store.iter_mut() {
            let bounds = self
                .viewport
                .bounds_for(creature.size(), creature.species().render_offset_y());
            creature.bounds = bounds;
            if held != Some(creature.id) {
                creature.motion.pos = bounds.clamp(creature.motion.pos);
            }
        }
        if let Some(creature) = self.selection.id().and_then(|id| self.store.get(id)) {
            self.highlight.track(creature, self.config.highlight_padding);
        }
        debug!("resized to {width}x{height}");
    }

    // ---- Output ----

    /// Fill a render buffer with the current frame.
    pub fn render(&self, buffer: &mut RenderBuffer) {
        build_render_buffer(
            &self.store,
            &self.viewport,
            &self.highlight,
            &self.overlays,
            self.config.max_creatures,
            self.config.max_arrows,
            buffer,
        );
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[ShellEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Hooks ----

    pub fn on_creature_clicked(&mut self, handler: impl FnMut(&Creature) + 'static) {
        self.hooks.on_creature_clicked(handler);
    }

    pub fn on_creature_dragged(&mut self, handler: impl FnMut(&Creature, DragPhase) + 'static) {
        self.hooks.on_creature_dragged(handler);
    }

    pub fn on_show_info(&mut self, handler: impl FnMut(&Creature) + 'static) {
        self.hooks.on_show_info(handler);
    }

    // ---- Accessors ----

    pub fn config(&self) -> &AquariumConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn store(&self) -> &CreatureStore {
        &self.store
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.store.get(id)
    }

    pub fn creature_info(&self, id: CreatureId) -> Option<CreatureInfo> {
        self.store.get(id).map(Creature::info)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Height of the loaded block, when the payload carried one.
    pub fn block_height(&self) -> Option<u64> {
        self.block_height
    }
}

impl Default for AquariumState {
    fn default() -> Self {
        Self::new(AquariumConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::descriptor::TransferPeer;
    use crate::components::species::Species;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn aquarium() -> AquariumState {
        AquariumState::new(AquariumConfig::default())
    }

    fn shrimp(address: &str) -> CreatureDescriptor {
        CreatureDescriptor::new(address, Species::Shrimp, 10.0)
    }

    fn only_id(aq: &AquariumState) -> CreatureId {
        aq.store().ids()[0]
    }

    fn place(aq: &mut AquariumState, id: CreatureId, pos: Vec2) {
        aq.store.get_mut(id).unwrap().motion.pos = pos;
    }

    fn assert_in_bounds(aq: &AquariumState) {
        for c in aq.store().iter() {
            assert!(c.bounds.contains(c.pos()), "{} out of {:?}: {:?}", c.species(), c.bounds, c.pos());
        }
    }

    #[test]
    fn single_shrimp_moves_within_bounds() {
        let mut aq = aquarium();
        let summary = aq.load_block(&[shrimp("a1")]);
        assert_eq!(summary, LoadSummary { created: 1, skipped: 0 });
        assert_eq!(aq.store().len(), 1);
        let id = only_id(&aq);
        assert!(aq.is_moving(id));
        aq.advance(60);
        assert_in_bounds(&aq);
    }

    #[test]
    fn second_fish_staggers_eighty_below_the_first() {
        let mut aq = aquarium();
        aq.load_block(&[
            CreatureDescriptor::new("f1", Species::Fish, 3_000.0),
            CreatureDescriptor::new("f2", Species::Fish, 3_000.0),
        ]);
        let ids = aq.store().ids();
        let first = aq.creature(ids[0]).unwrap().spawn_pos();
        let second = aq.creature(ids[1]).unwrap().spawn_pos();
        assert_eq!(first, Vec2::new(20.0, 170.0));
        assert_eq!(second.y, first.y + 80.0);
    }

    #[test]
    fn invalid_descriptors_are_skipped() {
        let mut aq = aquarium();
        let mut kraken = shrimp("k1");
        kraken.species = "kraken".to_string();
        let summary = aq.load_block(&[shrimp(""), kraken, shrimp("ok")]);
        assert_eq!(summary, LoadSummary { created: 1, skipped: 2 });
        assert_eq!(aq.store().iter().next().unwrap().address(), "ok");
    }

    #[test]
    fn focus_miss_on_empty_store_is_a_no_op() {
        let mut aq = aquarium();
        assert_eq!(aq.focus_by_address("nonexistent"), None);
        assert_eq!(aq.selection(), Selection::Unselected);
        assert!(aq.events().iter().any(|e| e.kind == event_kind::FOCUS_MISSED));
    }

    #[test]
    fn focus_hit_selects_and_shows_info() {
        let mut aq = aquarium();
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = shown.clone();
        aq.on_show_info(move |c| sink.borrow_mut().push(c.address().to_string()));
        aq.load_block(&[shrimp("a"), shrimp("b")]);

        let id = aq.focus_by_address("b").unwrap();
        assert_eq!(aq.selection(), Selection::Selected(id));
        assert_eq!(aq.creature(id).unwrap().address(), "b");
        assert_eq!(*shown.borrow(), vec!["b".to_string()]);
        assert!(aq.highlight().visible);
        assert!(aq.scheduler().is_running(TaskKind::Highlight));
    }

    #[test]
    fn focus_skips_detached_duplicates() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("dup"), shrimp("dup")]);
        let ids = aq.store().ids();
        aq.detach(ids[0]);

        assert_eq!(aq.focus_by_address("dup"), Some(ids[1]));
        assert_eq!(aq.selection(), Selection::Selected(ids[1]));
    }

    #[test]
    fn drag_then_release_resumes_from_drop_point() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a1")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(100.0, 100.0));

        assert_eq!(aq.pointer_down(Vec2::new(100.0, 100.0)), Some(id));
        assert!(!aq.is_moving(id));
        assert_eq!(aq.creature(id).unwrap().visual, Visual::Held);

        aq.pointer_move(Vec2::new(300.0, 300.0));
        assert_eq!(aq.creature(id).unwrap().pos(), Vec2::new(300.0, 300.0));

        assert_eq!(aq.pointer_up(Vec2::new(300.0, 300.0)), Some(id));
        assert!(aq.is_moving(id));
        assert_eq!(aq.creature(id).unwrap().visual, Visual::Swimming);
        assert_eq!(aq.creature(id).unwrap().pos(), Vec2::new(300.0, 300.0));

        aq.advance(60);
        let pos = aq.creature(id).unwrap().pos();
        assert!(pos.distance(Vec2::new(300.0, 300.0)) < 1.0);
        // Dropping is not a click.
        assert_eq!(aq.selection(), Selection::Unselected);
    }

    #[test]
    fn held_creature_does_not_move_and_release_starts_one_task() {
        let mut aq = aquarium();
        aq.load_block(&[CreatureDescriptor::new("f", Species::Fish, 3_000.0)]);
        let id = only_id(&aq);
        let grab = aq.creature(id).unwrap().center();
        aq.pointer_down(grab);
        let held_at = aq.creature(id).unwrap().pos();

        aq.advance(500);
        assert_eq!(aq.creature(id).unwrap().pos(), held_at);
        assert_eq!(aq.scheduler().motion_count(), 0);
        assert!(!aq.start_motion(id));

        aq.pointer_up(grab);
        assert_eq!(aq.scheduler().motion_count(), 1);
    }

    #[test]
    fn drag_is_clamped_to_the_window_not_the_bounds() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a1")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(100.0, 200.0));
        aq.pointer_down(Vec2::new(100.0, 200.0));
        aq.pointer_move(Vec2::new(5_000.0, -50.0));
        assert_eq!(aq.creature(id).unwrap().pos(), Vec2::new(1_260.0, 100.0));
    }

    #[test]
    fn click_selects_and_fires_hooks() {
        let mut aq = aquarium();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (clicked, dragged, shown) = (log.clone(), log.clone(), log.clone());
        aq.on_creature_clicked(move |c| clicked.borrow_mut().push(format!("click {}", c.address())));
        aq.on_creature_dragged(move |_, phase| dragged.borrow_mut().push(format!("{phase:?}")));
        aq.on_show_info(move |c| shown.borrow_mut().push(format!("info {}", c.address())));

        aq.load_block(&[shrimp("a1")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(200.0, 200.0));
        aq.pointer_down(Vec2::new(205.0, 205.0));
        aq.pointer_up(Vec2::new(206.0, 206.0));

        assert_eq!(aq.selection(), Selection::Selected(id));
        assert!(aq.is_moving(id));
        assert_eq!(
            *log.borrow(),
            vec!["Started", "Ended", "click a1", "info a1"]
        );
        assert!(aq.events().iter().any(|e| e.kind == event_kind::CREATURE_CLICKED));
    }

    #[test]
    fn pointer_on_empty_water_does_nothing() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a1")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(200.0, 200.0));
        assert_eq!(aq.pointer_down(Vec2::new(800.0, 600.0)), None);
        assert_eq!(aq.pointer_up(Vec2::new(800.0, 600.0)), None);
        assert!(aq.is_moving(id));
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a"), shrimp("b")]);
        let id = only_id(&aq);
        aq.select(id);
        aq.clear_all();
        assert_eq!(aq.selection(), Selection::Unselected);
        assert!(aq.store().is_empty());
        assert!(aq.scheduler().is_empty());
        assert!(!aq.highlight().visible);
        assert!(aq.overlays().is_empty());
    }

    #[test]
    fn stop_is_idempotent_and_start_replaces() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a")]);
        let id = only_id(&aq);
        assert!(aq.start_motion(id));
        assert_eq!(aq.scheduler().motion_count(), 1);
        assert!(aq.stop_motion(id));
        assert!(!aq.stop_motion(id));
        assert!(!aq.is_moving(id));
    }

    #[test]
    fn detached_creature_task_halts_on_next_run() {
        let mut aq = aquarium();
        aq.load_block(&[CreatureDescriptor::new("f", Species::Fish, 3_000.0)]);
        let id = only_id(&aq);
        aq.select(id);
        let before = aq.creature(id).unwrap().pos();

        assert!(aq.detach(id));
        assert_eq!(aq.selection(), Selection::Unselected);
        assert!(aq.is_moving(id));
        aq.advance(30);
        assert!(!aq.is_moving(id));
        assert_eq!(aq.creature(id).unwrap().pos(), before);
    }

    #[test]
    fn pause_stops_and_resume_restarts() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a"), CreatureDescriptor::new("f", Species::Fish, 3_000.0)]);
        aq.set_paused(true);
        assert_eq!(aq.scheduler().motion_count(), 0);
        let before: Vec<Vec2> = aq.store().iter().map(|c| c.pos()).collect();
        aq.advance(1_000);
        let after: Vec<Vec2> = aq.store().iter().map(|c| c.pos()).collect();
        assert_eq!(before, after);

        aq.load_block(&[shrimp("c")]);
        assert_eq!(aq.scheduler().motion_count(), 0);

        aq.set_paused(false);
        assert_eq!(aq.scheduler().motion_count(), 1);
    }

    #[test]
    fn release_while_paused_does_not_restart() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(200.0, 200.0));
        aq.set_paused(true);
        aq.pointer_down(Vec2::new(200.0, 200.0));
        aq.pointer_move(Vec2::new(400.0, 400.0));
        aq.pointer_up(Vec2::new(400.0, 400.0));
        assert!(!aq.is_moving(id));
        assert_eq!(aq.creature(id).unwrap().pos(), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn every_species_stays_in_bounds_over_time() {
        let mut aq = aquarium();
        let block: Vec<CreatureDescriptor> = Species::ALL
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let (low, _) = s.band();
                CreatureDescriptor::new(format!("c{i}"), s, low.max(1.0) * 1.5)
            })
            .collect();
        assert_eq!(aq.load_block(&block).created, 8);
        assert_in_bounds(&aq);
        for _ in 0..50 {
            aq.advance(100);
            assert_in_bounds(&aq);
        }
    }

    #[test]
    fn resize_recomputes_bounds_and_pulls_creatures_in() {
        let mut aq = aquarium();
        aq.load_block(&[CreatureDescriptor::new("t", Species::Tuna, 10_000.0)]);
        let id = only_id(&aq);
        assert_eq!(aq.creature(id).unwrap().pos().x, 1280.0 - 370.0 - 80.0);

        aq.resize(900.0, 700.0);
        let tuna = aq.creature(id).unwrap();
        assert_eq!(tuna.bounds.max.x, 900.0 - 370.0 - 80.0);
        assert_eq!(tuna.pos().x, tuna.bounds.max.x);
        assert_in_bounds(&aq);
    }

    #[test]
    fn input_queue_drives_pointer_and_resize() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a")]);
        let id = only_id(&aq);
        place(&mut aq, id, Vec2::new(200.0, 200.0));
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 200.0, y: 200.0 });
        input.push(InputEvent::PointerMove { x: 250.0, y: 260.0 });
        input.push(InputEvent::PointerUp { x: 250.0, y: 260.0 });
        input.push(InputEvent::Resize { width: 1000.0, height: 700.0 });
        aq.handle_input(&mut input);
        assert!(input.is_empty());
        assert_eq!(aq.creature(id).unwrap().pos(), Vec2::new(250.0, 260.0));
        assert_eq!(aq.viewport().window(), WindowExtent::new(1000.0, 700.0));
    }

    #[test]
    fn frame_runs_whole_quanta() {
        let mut aq = aquarium();
        assert_eq!(aq.frame(25.0), 2);
        assert_eq!(aq.frame(5.0), 1);
        assert_eq!(aq.scheduler().now_ms(), 30);
    }

    #[test]
    fn highlight_follows_the_selected_creature() {
        let mut aq = aquarium();
        aq.load_block(&[CreatureDescriptor::new("f", Species::Fish, 3_000.0)]);
        let id = only_id(&aq);
        aq.select(id);
        aq.advance(50);
        let fish = aq.creature(id).unwrap();
        assert_eq!(aq.highlight().center, fish.center());
        assert_eq!(aq.highlight().diameter, 80.0);
    }

    #[test]
    fn selecting_draws_arrows_to_rendered_peers() {
        let mut aq = aquarium();
        let mut payer = shrimp("payer");
        payer.sent_to_info = vec![TransferPeer {
            address: "payee".to_string(),
            species: "shrimp".to_string(),
            ada: 10.0,
        }];
        aq.load_block(&[payer, shrimp("payee")]);
        let ids = aq.store().ids();
        aq.select(ids[0]);
        assert_eq!(aq.overlays().len(), 1);
        aq.select(ids[1]);
        assert!(aq.overlays().is_empty());
        aq.select(ids[0]);
        aq.clear_selection();
        assert!(aq.overlays().is_empty());
    }

    #[test]
    fn json_load_sets_height_and_errors_keep_state() {
        let mut aq = aquarium();
        let json = r#"{"height": 42, "creatures": [{"address": "a", "type": "crab", "ada": 500}, 7]}"#;
        let summary = aq.load_block_json(json).unwrap();
        assert_eq!(summary, LoadSummary { created: 1, skipped: 1 });
        assert_eq!(aq.block_height(), Some(42));

        assert!(aq.load_block_json("not json").is_err());
        assert!(matches!(
            aq.load_block_json(r#"{"error": "node down"}"#),
            Err(LoadError::Upstream(_))
        ));
        assert_eq!(aq.store().len(), 1);
        assert_eq!(aq.block_height(), Some(42));
    }

    #[test]
    fn undrained_events_keep_only_the_newest() {
        let mut aq = AquariumState::new(AquariumConfig {
            max_events: 4,
            ..AquariumConfig::default()
        });
        for _ in 0..10 {
            aq.load_block(&[shrimp("a")]);
        }
        assert_eq!(aq.events().len(), 4);
        assert_eq!(aq.events()[3].kind, event_kind::BLOCK_LOADED);
        assert_eq!(aq.events()[2].kind, event_kind::CLEARED);

        aq.drain_events();
        aq.clear_all();
        assert_eq!(aq.events().len(), 1);
    }

    #[test]
    fn ids_are_never_reused_across_blocks() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a")]);
        let first = only_id(&aq);
        aq.load_block(&[shrimp("a")]);
        assert!(only_id(&aq) > first);
    }

    #[test]
    fn render_reflects_state() {
        let mut aq = aquarium();
        aq.load_block(&[shrimp("a"), shrimp("b")]);
        let id = only_id(&aq);
        aq.select(id);
        let mut buf = RenderBuffer::new();
        aq.render(&mut buf);
        assert_eq!(buf.instance_count(), 2);
        assert!(buf.highlight.is_some());
        assert_eq!(buf.boundary, aq.viewport().boundary_rect());
        assert_eq!(aq.creature_info(id).unwrap().address, "a");
    }
}
