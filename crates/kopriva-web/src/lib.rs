//! Browser bridge for the Kopriva presentation core.
//!
//! The JS shell calls `app_init` once, forwards pointer presses, UI clicks,
//! camera pose and collider registrations as they happen, calls `app_tick`
//! every animation frame and then replays `app_drain_commands()` against its
//! scene graph. Panel opacity/scale is read straight from linear memory via
//! `app_panel_visuals_ptr`.

pub mod runner;

pub use runner::AppRunner;

use std::cell::RefCell;
use glam::Vec3;
use wasm_bindgen::prelude::*;
use kopriva_engine::{AppConfig, InputEvent, UiHandle};

thread_local! {
    static RUNNER: RefCell<Option<AppRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Calls made before `app_init` are logged and
/// dropped.
fn with_runner<R>(f: impl FnOnce(&mut AppRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::error!("kopriva-web: not initialized, call app_init() first");
                None
            }
        }
    })
}

/// Initialize with an optional JSON configuration. Invalid configuration is
/// logged and replaced by the defaults.
#[wasm_bindgen]
pub fn app_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) if !json.trim().is_empty() => AppConfig::from_json(json).unwrap_or_else(|err| {
            log::error!("kopriva-web: invalid config, using defaults: {}", err);
            AppConfig::default()
        }),
        _ => AppConfig::default(),
    };

    let mut runner = AppRunner::new(config);
    runner.start();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("kopriva-web: initialized");
}

#[wasm_bindgen]
pub fn app_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn app_set_time_scale(scale: f32) {
    with_runner(|r| r.set_time_scale(scale));
}

// ---- Input ----

#[wasm_bindgen]
pub fn app_pointer_down(pointer: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { pointer, x, y }));
}

#[wasm_bindgen]
pub fn app_ui_click(handle: u32) {
    with_runner(|r| r.push_input(InputEvent::Click { handle: UiHandle(handle) }));
}

// ---- Media ----

#[wasm_bindgen]
pub fn app_clip_finished(clip: u32) {
    with_runner(|r| r.clip_finished(clip));
}

// ---- Scene registration ----

#[wasm_bindgen]
pub fn app_add_node(id: u32, parent: Option<u32>, x: f32, y: f32, z: f32) {
    with_runner(|r| r.add_node(id, parent, x, y, z));
}

#[wasm_bindgen]
pub fn app_remove_node(id: u32) {
    with_runner(|r| r.remove_node(id));
}

#[wasm_bindgen]
pub fn app_set_collider(id: u32, min_x: f32, min_y: f32, min_z: f32, max_x: f32, max_y: f32, max_z: f32) {
    with_runner(|r| {
        r.set_collider(id, Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z))
    });
}

#[wasm_bindgen]
pub fn app_set_node_active(id: u32, active: bool) {
    with_runner(|r| r.set_node_active(id, active));
}

/// Camera pose from the AR session. `forward` and `up` are world-space
/// directions, `fov_y` is in radians, the viewport in CSS pixels.
#[wasm_bindgen]
pub fn app_set_camera(pose: &[f32], fov_y: f32, width: f32, height: f32) {
    if pose.len() < 9 {
        log::warn!("kopriva-web: camera pose needs 9 floats, got {}", pose.len());
        return;
    }
    let position = Vec3::new(pose[0], pose[1], pose[2]);
    let forward = Vec3::new(pose[3], pose[4], pose[5]);
    let up = Vec3::new(pose[6], pose[7], pose[8]);
    with_runner(|r| r.set_camera(position, forward, up, fov_y, width, height));
}

#[wasm_bindgen]
pub fn app_clear_camera() {
    with_runner(|r| r.clear_camera());
}

#[wasm_bindgen]
pub fn app_set_ui_rect(handle: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.set_ui_rect(handle, x, y, width, height));
}

#[wasm_bindgen]
pub fn app_set_ui_active(handle: u32, active: bool) {
    with_runner(|r| r.set_ui_active(handle, active));
}

// ---- Output ----

/// Host commands recorded since the last call, as a JSON array.
#[wasm_bindgen]
pub fn app_drain_commands() -> String {
    with_runner(|r| r.drain_commands().to_owned()).unwrap_or_else(|| String::from("[]"))
}

#[wasm_bindgen]
pub fn app_panel_visuals_ptr() -> *const f32 {
    with_runner(|r| r.panel_visuals_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn app_panel_visuals_len() -> u32 {
    with_runner(|r| r.panel_visuals_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn app_panel_visual_floats() -> u32 {
    with_runner(|r| r.panel_visual_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn app_scene_name() -> String {
    with_runner(|r| r.scene_name().to_owned()).unwrap_or_default()
}
