use glam::{Vec2, Vec3};
use kopriva_engine::{
    Aabb, App, AppConfig, Camera, ClipId, Clock, CommandBuffer, InputEvent, InputQueue, NodeId,
    PanelVisual, ScreenRect, UiHandle,
};

/// Owns the app and everything between it and the browser shell.
///
/// The crate root keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, since wasm-bindgen cannot export the
/// engine's generic types directly.
pub struct AppRunner {
    app: App,
    input: InputQueue,
    clock: Clock,
    host: CommandBuffer,
    /// Host commands of the last frame, as JSON.
    commands_json: String,
    started: bool,
}

impl AppRunner {
    pub fn new(config: AppConfig) -> Self {
        Self {
            app: App::new(config),
            input: InputQueue::new(),
            clock: Clock::new(),
            host: CommandBuffer::new(),
            commands_json: String::from("[]"),
            started: false,
        }
    }

    /// Push the start scene's initial UI state. Call once after construction.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.app.start(&mut self.host);
        self.started = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame with the raw delta reported by requestAnimationFrame.
    pub fn tick(&mut self, raw_dt: f32) {
        if !self.started {
            return;
        }
        let frame = self.clock.advance(raw_dt);
        let input = self.input.sample();
        self.app.tick(frame, input, &mut self.host);
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Drain the recorded host commands into a JSON array.
    pub fn drain_commands(&mut self) -> &str {
        match self.host.drain_json() {
            Ok(json) => self.commands_json = json,
            Err(err) => {
                log::error!("kopriva-web: could not serialize host commands: {}", err);
                self.host.drain();
                self.commands_json = String::from("[]");
            }
        }
        &self.commands_json
    }

    pub fn clip_finished(&mut self, clip: u32) {
        self.host.clip_finished(ClipId(clip));
    }

    // ---- World registration ----

    pub fn add_node(&mut self, id: u32, parent: Option<u32>, x: f32, y: f32, z: f32) {
        self.app
            .world_mut()
            .add_node(NodeId(id), parent.map(NodeId), Vec3::new(x, y, z));
    }

    pub fn remove_node(&mut self, id: u32) {
        self.app.world_mut().remove(NodeId(id));
    }

    pub fn set_collider(&mut self, id: u32, min: Vec3, max: Vec3) {
        self.app.world_mut().set_collider(NodeId(id), Some(Aabb::new(min, max)));
    }

    pub fn set_node_active(&mut self, id: u32, active: bool) {
        self.app.world_mut().set_active(NodeId(id), active);
    }

    pub fn set_camera(&mut self, position: Vec3, forward: Vec3, up: Vec3, fov_y: f32, width: f32, height: f32) {
        let camera = Camera::new(position, forward, Vec2::new(width, height))
            .with_up(up)
            .with_fov_y(fov_y);
        self.app.set_camera(Some(camera));
    }

    pub fn clear_camera(&mut self) {
        self.app.set_camera(None);
    }

    pub fn set_ui_rect(&mut self, handle: u32, x: f32, y: f32, width: f32, height: f32) {
        self.app
            .blockers_mut()
            .set_rect(UiHandle(handle), ScreenRect::new(x, y, width, height));
    }

    pub fn set_ui_active(&mut self, handle: u32, active: bool) {
        self.app.blockers_mut().set_active(UiHandle(handle), active);
    }

    // ---- Pointer accessors for linear-memory reads ----

    pub fn panel_visuals_ptr(&self) -> *const f32 {
        let visuals: &[PanelVisual] = self.app.panel_visuals();
        bytemuck::cast_slice::<PanelVisual, f32>(visuals).as_ptr()
    }

    pub fn panel_visuals_len(&self) -> u32 {
        self.app.panel_visuals().len() as u32
    }

    pub fn panel_visual_floats(&self) -> u32 {
        PanelVisual::FLOATS as u32
    }

    pub fn scene_name(&self) -> &str {
        self.app.scene_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_then_tick_records_commands() {
        let mut runner = AppRunner::new(AppConfig::default());
        runner.tick(0.016);
        assert_eq!(runner.drain_commands(), "[]");

        runner.start();
        let json = runner.drain_commands().to_owned();
        assert!(json.contains(r#""op":"set_active""#));
        assert_eq!(runner.drain_commands(), "[]");
    }

    #[test]
    fn menu_click_loads_ar_scene() {
        let mut runner = AppRunner::new(AppConfig::default());
        runner.start();
        runner.push_input(InputEvent::Click { handle: UiHandle(10) });
        runner.tick(0.016);
        assert_eq!(runner.scene_name(), "SampleScene");
        assert!(runner.drain_commands().contains(r#""name":"SampleScene""#));
        // AR scene exposes its overlay visuals.
        runner.tick(0.016);
        assert!(runner.panel_visuals_len() >= 2);
        assert_eq!(runner.panel_visual_floats(), 4);
    }

    #[test]
    fn zero_time_scale_does_not_freeze_quiz_feedback() {
        let mut runner = AppRunner::new(AppConfig::default());
        runner.start();
        runner.set_time_scale(0.0);
        runner.push_input(InputEvent::Click { handle: UiHandle(11) });
        runner.tick(0.016);
        runner.push_input(InputEvent::Click { handle: UiHandle(110) });
        runner.tick(0.016);
        runner.drain_commands();
        for _ in 0..120 {
            runner.tick(0.016);
        }
        // The next question's text was pushed to the host.
        assert!(runner.drain_commands().contains(r#""op":"set_text","handle":100"#));
    }
}
