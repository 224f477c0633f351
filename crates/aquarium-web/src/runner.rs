use std::cell::RefCell;
use std::rc::Rc;

use aquarium_engine::{
    write_frame, AquariumConfig, AquariumState, CreatureId, DragPhase, FrameHeader, InputEvent,
    InputQueue, ProtocolLayout, RenderBuffer, ShellEvent,
};

/// A hook invocation recorded by the engine, delivered to JS once the
/// runner is no longer borrowed.
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    Clicked(u32),
    /// `held` is true on pick-up and false on drop.
    Dragged { id: u32, held: bool },
    /// Info panel JSON for the creature.
    ShowInfo(String),
}

/// Owns the engine state and the per-frame output buffers.
///
/// The bridge keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, since wasm-bindgen cannot export the
/// engine's types directly.
pub struct AquariumRunner {
    state: AquariumState,
    input: InputQueue,
    render_buffer: RenderBuffer,
    layout: ProtocolLayout,
    /// Flat shared-memory image of the last frame.
    frame_buffer: Vec<f32>,
    /// Events emitted during the last frame.
    frame_events: Vec<ShellEvent>,
    frame: u32,
    hook_calls: Rc<RefCell<Vec<HookCall>>>,
}

impl AquariumRunner {
    pub fn new(config: AquariumConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = vec![0.0; layout.buffer_total_floats];
        let hook_calls = Rc::new(RefCell::new(Vec::new()));
        let mut state = AquariumState::new(config);

        let sink = Rc::clone(&hook_calls);
        state.on_creature_clicked(move |c| sink.borrow_mut().push(HookCall::Clicked(c.id.0)));
        let sink = Rc::clone(&hook_calls);
        state.on_creature_dragged(move |c, phase| {
            sink.borrow_mut().push(HookCall::Dragged {
                id: c.id.0,
                held: phase == DragPhase::Started,
            });
        });
        let sink = Rc::clone(&hook_calls);
        state.on_show_info(move |c| match serde_json::to_string(&c.info()) {
            Ok(json) => sink.borrow_mut().push(HookCall::ShowInfo(json)),
            Err(err) => log::error!("aquarium: creature {} info not serializable: {err}", c.id.0),
        });

        Self {
            state,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            layout,
            frame_buffer,
            frame_events: Vec::new(),
            frame: 0,
            hook_calls,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply input, advance the scheduler, rebuild buffers.
    pub fn tick(&mut self, dt_ms: f64) {
        self.state.handle_input(&mut self.input);
        self.state.frame(dt_ms);
        self.state.render(&mut self.render_buffer);

        self.frame_events = self.state.drain_events();

        self.frame = self.frame.wrapping_add(1);
        let window = self.state.viewport().window();
        let header = FrameHeader {
            frame: self.frame,
            window_width: window.width,
            window_height: window.height,
            selected: self.state.selection().id().map(|id| id.0),
            dragged: self.state.drag().held().map(|id| id.0),
            paused: self.state.is_paused(),
            block_height: self.state.block_height(),
        };
        write_frame(
            &self.layout,
            &header,
            &self.render_buffer,
            &self.frame_events,
            &mut self.frame_buffer,
        );
    }

    /// Load a block payload. An unreadable payload is logged and the current
    /// aquarium is left as it is.
    pub fn load_block(&mut self, json: &str) -> bool {
        match self.state.load_block_json(json) {
            Ok(summary) => {
                log::info!(
                    "aquarium: {} creatures ({} skipped)",
                    summary.created,
                    summary.skipped
                );
                true
            }
            Err(err) => {
                log::error!("aquarium: block not loaded: {err}");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.state.clear_all();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state.set_paused(paused);
    }

    /// Focus the first creature with `address`. Returns its id, or -1.
    pub fn focus(&mut self, address: &str) -> i32 {
        self.state
            .focus_by_address(address)
            .map_or(-1, |id| id.0 as i32)
    }

    pub fn select(&mut self, id: u32) -> bool {
        self.state.select(CreatureId(id))
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    pub fn creature_info_json(&self, id: u32) -> Option<String> {
        let info = self.state.creature_info(CreatureId(id))?;
        match serde_json::to_string(&info) {
            Ok(json) => Some(json),
            Err(err) => {
                log::error!("aquarium: creature {id} info not serializable: {err}");
                None
            }
        }
    }

    /// Hook invocations recorded since the last call, in order.
    pub fn take_hook_calls(&mut self) -> Vec<HookCall> {
        std::mem::take(&mut *self.hook_calls.borrow_mut())
    }

    pub fn state(&self) -> &AquariumState {
        &self.state
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn arrows_ptr(&self) -> *const f32 {
        self.render_buffer.arrows_ptr()
    }

    pub fn arrow_count(&self) -> u32 {
        self.render_buffer.arrow_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.frame_events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.frame_events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_creatures(&self) -> u32 {
        self.layout.max_creatures as u32
    }

    pub fn max_arrows(&self) -> u32 {
        self.layout.max_arrows as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquarium_engine::bridge::protocol::{HEADER_CREATURE_COUNT, HEADER_FRAME_COUNTER};
    use aquarium_engine::event_kind;

    const BLOCK: &str = r#"{"height": 7, "creatures": [
        {"address": "a", "type": "shrimp", "ada": 10},
        {"address": "b", "type": "fish", "ada": 3000}
    ]}"#;

    #[test]
    fn tick_fills_the_frame_buffer() {
        let mut runner = AquariumRunner::new(AquariumConfig::default());
        assert!(runner.load_block(BLOCK));
        runner.tick(16.0);
        assert_eq!(runner.instance_count(), 2);
        assert_eq!(runner.frame_buffer.len(), runner.buffer_total_floats() as usize);
        assert_eq!(runner.frame_buffer[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(runner.frame_buffer[HEADER_CREATURE_COUNT], 2.0);
        assert!(runner
            .frame_events
            .iter()
            .any(|e| e.kind == event_kind::BLOCK_LOADED));

        runner.tick(16.0);
        assert_eq!(runner.events_len(), 0);
    }

    #[test]
    fn bad_payload_keeps_the_aquarium() {
        let mut runner = AquariumRunner::new(AquariumConfig::default());
        runner.load_block(BLOCK);
        assert!(!runner.load_block("{oops"));
        assert_eq!(runner.state().store().len(), 2);
    }

    #[test]
    fn focus_and_info() {
        let mut runner = AquariumRunner::new(AquariumConfig::default());
        runner.load_block(BLOCK);
        let id = runner.focus("b");
        assert!(id > 0);
        assert_eq!(runner.focus("zzz"), -1);
        let json = runner.creature_info_json(id as u32).unwrap();
        assert!(json.contains("\"type\":\"fish\""));
        assert!(runner.creature_info_json(9_999).is_none());
    }

    #[test]
    fn click_records_hook_calls_in_order() {
        let mut runner = AquariumRunner::new(AquariumConfig::default());
        runner.load_block(BLOCK);
        // the fish is drawn on top of anything it overlaps
        let fish = runner.state().store().iter().nth(1).unwrap();
        let (id, center) = (fish.id.0, fish.center());
        runner.push_input(InputEvent::PointerDown { x: center.x, y: center.y });
        runner.push_input(InputEvent::PointerUp { x: center.x, y: center.y });
        runner.tick(0.0);

        let calls = runner.take_hook_calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], HookCall::Dragged { id, held: true });
        assert_eq!(calls[1], HookCall::Dragged { id, held: false });
        assert_eq!(calls[2], HookCall::Clicked(id));
        assert!(matches!(&calls[3], HookCall::ShowInfo(json) if json.contains("\"address\":\"b\"")));
        assert!(runner.take_hook_calls().is_empty());
    }

    #[test]
    fn queued_pointer_events_apply_on_tick() {
        let mut runner = AquariumRunner::new(AquariumConfig::default());
        runner.load_block(BLOCK);
        let fish = runner.state().store().iter().nth(1).unwrap().center();
        runner.push_input(InputEvent::PointerDown { x: fish.x, y: fish.y });
        assert!(runner.state().drag().held().is_none());
        runner.tick(0.0);
        assert!(runner.state().drag().held().is_some());
    }
}
