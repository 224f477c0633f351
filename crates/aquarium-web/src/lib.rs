//! `#[wasm_bindgen]` exports for the chain aquarium.
//!
//! The JS shell calls `aquarium_init` once, then `aquarium_tick(dt_ms)` every
//! animation frame and reads the frame image from `get_buffer_ptr()` (layout
//! in `aquarium_engine::bridge::protocol`). Pointer and resize events are
//! queued and applied at the start of the next tick.
//!
//! JS hooks never run while the runner is borrowed: the engine records hook
//! calls, and the export that triggered them delivers them on its way out.
//! A hook may therefore call back into any export.

pub mod runner;

pub use runner::{AquariumRunner, HookCall};

use std::cell::RefCell;

use aquarium_engine::{AquariumConfig, InputEvent, WindowExtent};
use wasm_bindgen::prelude::*;

/// Registered JS callbacks, kept apart from the runner.
#[derive(Default)]
struct JsHooks {
    clicked: Vec<js_sys::Function>,
    dragged: Vec<js_sys::Function>,
    show_info: Vec<js_sys::Function>,
}

impl JsHooks {
    fn for_call(&self, call: &HookCall) -> &[js_sys::Function] {
        match call {
            HookCall::Clicked(_) => &self.clicked,
            HookCall::Dragged { .. } => &self.dragged,
            HookCall::ShowInfo(_) => &self.show_info,
        }
    }
}

thread_local! {
    static RUNNER: RefCell<Option<AquariumRunner>> = const { RefCell::new(None) };
    static JS_HOOKS: RefCell<JsHooks> = RefCell::new(JsHooks::default());
}

fn install(runner: AquariumRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn with_runner<R>(f: impl FnOnce(&mut AquariumRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Aquarium not initialized. Call aquarium_init() first.");
        f(runner)
    })
}

fn parse_config(config_json: &str) -> AquariumConfig {
    if config_json.trim().is_empty() {
        return AquariumConfig::default();
    }
    match AquariumConfig::from_json(config_json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("aquarium: invalid config, using defaults: {err}");
            AquariumConfig::default()
        }
    }
}

/// Hand every recorded hook call to `deliver`, with no borrow held.
fn deliver_hooks_with(mut deliver: impl FnMut(HookCall)) {
    let calls = with_runner(|r| r.take_hook_calls());
    for call in calls {
        deliver(call);
    }
}

fn deliver_hooks() {
    deliver_hooks_with(|call| {
        let callbacks = JS_HOOKS.with(|hooks| hooks.borrow().for_call(&call).to_vec());
        if callbacks.is_empty() {
            return;
        }
        let args = match call {
            HookCall::Clicked(id) => vec![JsValue::from(id)],
            HookCall::Dragged { id, held } => vec![JsValue::from(id), JsValue::from(held)],
            HookCall::ShowInfo(json) => vec![JsValue::from_str(&json)],
        };
        for callback in &callbacks {
            call_js(callback, &args);
        }
    });
}

fn call_js(callback: &js_sys::Function, args: &[JsValue]) {
    let result = match args {
        [a] => callback.call1(&JsValue::NULL, a),
        [a, b] => callback.call2(&JsValue::NULL, a, b),
        _ => callback.call0(&JsValue::NULL),
    };
    if let Err(err) = result {
        log::error!("aquarium: hook threw: {err:?}");
    }
}

#[wasm_bindgen]
pub fn aquarium_init(width: f32, height: f32, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = parse_config(config_json);
    config.window = WindowExtent::new(width, height);
    install(AquariumRunner::new(config));
    log::info!("aquarium: initialized at {width}x{height}");
}

#[wasm_bindgen]
pub fn aquarium_tick(dt_ms: f64) {
    with_runner(|r| r.tick(dt_ms));
    deliver_hooks();
}

/// Returns false if the payload could not be read.
#[wasm_bindgen]
pub fn aquarium_load_block(json: &str) -> bool {
    with_runner(|r| r.load_block(json))
}

#[wasm_bindgen]
pub fn aquarium_clear() {
    with_runner(|r| r.clear());
}

#[wasm_bindgen]
pub fn aquarium_set_paused(paused: bool) {
    with_runner(|r| r.set_paused(paused));
}

#[wasm_bindgen]
pub fn aquarium_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn aquarium_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn aquarium_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn aquarium_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

// ---- Selection ----

/// Returns the focused creature id, or -1 if no creature has the address.
#[wasm_bindgen]
pub fn aquarium_focus(address: &str) -> i32 {
    let id = with_runner(|r| r.focus(address));
    deliver_hooks();
    id
}

#[wasm_bindgen]
pub fn aquarium_select(id: u32) -> bool {
    with_runner(|r| r.select(id))
}

#[wasm_bindgen]
pub fn aquarium_clear_selection() {
    with_runner(|r| r.clear_selection());
}

/// Info panel data for a creature as JSON, or undefined.
#[wasm_bindgen]
pub fn aquarium_creature_info(id: u32) -> Option<String> {
    with_runner(|r| r.creature_info_json(id))
}

// ---- Hooks ----
//
// Callbacks survive `aquarium_init` and run after the export that triggered
// them has released the runner.

/// `callback(id)` on every click.
#[wasm_bindgen]
pub fn aquarium_on_creature_clicked(callback: js_sys::Function) {
    JS_HOOKS.with(|hooks| hooks.borrow_mut().clicked.push(callback));
}

/// `callback(id, held)`: `held` is true on pick-up and false on drop.
#[wasm_bindgen]
pub fn aquarium_on_creature_dragged(callback: js_sys::Function) {
    JS_HOOKS.with(|hooks| hooks.borrow_mut().dragged.push(callback));
}

/// `callback(infoJson)` whenever the info panel should show a creature.
#[wasm_bindgen]
pub fn aquarium_on_show_info(callback: js_sys::Function) {
    JS_HOOKS.with(|hooks| hooks.borrow_mut().show_info.push(callback));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_arrows_ptr() -> *const f32 {
    with_runner(|r| r.arrows_ptr())
}

#[wasm_bindgen]
pub fn get_arrow_count() -> u32 {
    with_runner(|r| r.arrow_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_creatures() -> u32 {
    with_runner(|r| r.max_creatures())
}

#[wasm_bindgen]
pub fn get_max_arrows() -> u32 {
    with_runner(|r| r.max_arrows())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}
