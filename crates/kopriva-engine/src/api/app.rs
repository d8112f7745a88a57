// api/app.rs
//
// Application context: owns the active scene and everything the scenes
// share (question bank, world, camera, UI blockers). One `tick` per host
// frame; no statics.

use std::rc::Rc;
use crate::api::config::AppConfig;
use crate::api::host::{Host, MediaHost, UiHost};
use crate::api::types::PanelVisual;
use crate::core::camera::Camera;
use crate::core::time::FrameTime;
use crate::core::world::World;
use crate::input::occlusion::UiBlockers;
use crate::input::queue::FrameInput;
use crate::quiz::{QuestionBank, QuizScreen, QuizSession};
use crate::scenes::{ArScene, MenuScene, SceneRequest};

/// The scene currently driven by the frame loop.
pub enum ActiveScene {
    Menu(MenuScene),
    Ar(ArScene),
}

pub struct App {
    config: AppConfig,
    bank: Rc<QuestionBank>,
    scene: ActiveScene,
    scene_name: String,
    world: World,
    camera: Option<Camera>,
    blockers: UiBlockers,
    visuals: Vec<PanelVisual>,
}

impl App {
    /// Build the app in its configured start scene. Call [`App::start`]
    /// once the host is ready to receive commands.
    pub fn new(config: AppConfig) -> Self {
        let bank = Rc::new(config.question_bank());
        let scene_name = config.start_scene.clone();
        let scene = Self::build_scene(&config, &bank, &scene_name);
        Self {
            config,
            bank,
            scene,
            scene_name,
            world: World::new(),
            camera: None,
            blockers: UiBlockers::new(),
            visuals: Vec::new(),
        }
    }

    fn build_scene(config: &AppConfig, bank: &Rc<QuestionBank>, name: &str) -> ActiveScene {
        if name == config.ar_scene {
            ActiveScene::Ar(ArScene::new(config.ar_layout, &config.menu_scene, &config.pois, config.panel))
        } else {
            let session = QuizSession::new(Rc::clone(bank), config.quiz);
            let quiz = QuizScreen::new(config.quiz_layout, session);
            ActiveScene::Menu(MenuScene::new(config.menu_layout, &config.ar_scene, quiz))
        }
    }

    /// Push the initial state of the start scene to the host.
    pub fn start<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        log::info!("kopriva: starting in scene {:?}", self.scene_name);
        self.enter_scene(host);
    }

    fn enter_scene<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        match &mut self.scene {
            ActiveScene::Menu(menu) => menu.enter(host),
            ActiveScene::Ar(ar) => ar.enter(host),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scene(&self) -> &ActiveScene {
        &self.scene
    }

    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// The host registers nodes and colliders of the active scene here.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    pub fn blockers_mut(&mut self) -> &mut UiBlockers {
        &mut self.blockers
    }

    /// Panel visuals written by the last tick.
    pub fn panel_visuals(&self) -> &[PanelVisual] {
        &self.visuals
    }

    /// One frame: UI clicks, then world presses, then timers and tweens.
    /// The feedback delay and panel tweens both run on unscaled time.
    pub fn tick<H: Host + ?Sized>(&mut self, frame: FrameTime, input: FrameInput, host: &mut H) {
        for clicked in input.clicks {
            let request = match &mut self.scene {
                ActiveScene::Menu(menu) => menu.handle_click(clicked, host),
                ActiveScene::Ar(ar) => ar.handle_click(clicked, host),
            };
            if let Some(request) = request {
                self.apply(request, host);
            }
        }

        if let ActiveScene::Ar(ar) = &mut self.scene {
            for press in &input.presses {
                ar.handle_press(press.pos, self.camera.as_ref(), &self.blockers, &self.world, host);
            }
        }

        self.visuals.clear();
        match &mut self.scene {
            ActiveScene::Menu(menu) => menu.tick(frame.unscaled_dt, host),
            ActiveScene::Ar(ar) => {
                ar.tick(frame.unscaled_dt, host);
                ar.panel_visuals(&mut self.visuals);
            }
        }
    }

    fn apply<H: Host + ?Sized>(&mut self, request: SceneRequest, host: &mut H) {
        match request {
            SceneRequest::LoadScene(name) => self.switch_scene(&name, host),
        }
    }

    /// Ask the host to load `name`; on success replace the active scene.
    pub fn switch_scene<H: Host + ?Sized>(&mut self, name: &str, host: &mut H) {
        if name != self.config.menu_scene && name != self.config.ar_scene {
            log::warn!("kopriva: unknown scene {:?}", name);
            return;
        }
        if !host.load_scene(name) {
            log::warn!("kopriva: host refused to load scene {:?}", name);
            return;
        }

        self.teardown_scene(host);
        self.world.clear();
        self.camera = None;
        self.blockers.clear();
        self.visuals.clear();

        self.scene = Self::build_scene(&self.config, &self.bank, name);
        self.scene_name = name.to_owned();
        log::info!("kopriva: entered scene {:?}", name);
        self.enter_scene(host);
    }

    fn teardown_scene<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        match &mut self.scene {
            ActiveScene::Menu(menu) => menu.teardown(),
            ActiveScene::Ar(ar) => ar.teardown(host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use crate::api::host::CommandBuffer;
    use crate::api::types::{ClipId, HostCommand, NodeId, PoiId, UiHandle};
    use crate::components::panel::PanelState;
    use crate::core::world::Aabb;
    use crate::input::occlusion::ScreenRect;
    use crate::input::queue::{InputEvent, InputQueue};
    use crate::quiz::QuizPhase;
    use crate::scenes::{ArLayout, MenuLayout, MenuScreen, Overlay};

    const DT: f32 = 1.0 / 60.0;

    fn frame() -> FrameTime {
        FrameTime::uniform(DT)
    }

    fn click(handle: UiHandle) -> FrameInput {
        let mut q = InputQueue::new();
        q.push(InputEvent::Click { handle });
        q.sample()
    }

    fn press(x: f32, y: f32) -> FrameInput {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { pointer: 0, x, y });
        q.sample()
    }

    fn run(app: &mut App, host: &mut CommandBuffer, frames: usize) {
        for _ in 0..frames {
            app.tick(frame(), FrameInput::default(), host);
        }
    }

    fn menu(app: &App) -> &MenuScene {
        match app.scene() {
            ActiveScene::Menu(m) => m,
            ActiveScene::Ar(_) => panic!("expected menu scene"),
        }
    }

    fn ar(app: &App) -> &ArScene {
        match app.scene() {
            ActiveScene::Ar(a) => a,
            ActiveScene::Menu(_) => panic!("expected AR scene"),
        }
    }

    /// App already in the AR scene with the video POI's collider in front
    /// of the camera.
    fn ar_app(host: &mut CommandBuffer) -> App {
        let mut app = App::new(AppConfig::default());
        app.start(host);
        app.tick(frame(), click(MenuLayout::default().ar_button), host);
        assert_eq!(app.scene_name(), "SampleScene");

        let world = app.world_mut();
        world.add_node(NodeId(2), None, Vec3::new(0.0, 0.0, -5.0));
        world.set_collider(NodeId(2), Some(Aabb::from_center_size(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE)));
        app.set_camera(Some(Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec2::new(800.0, 600.0))));
        app
    }

    #[test]
    fn starts_on_the_menu() {
        let mut host = CommandBuffer::new();
        let mut app = App::new(AppConfig::default());
        app.start(&mut host);
        assert_eq!(app.scene_name(), "MainMenu");
        assert_eq!(menu(&app).screen(), MenuScreen::Menu);
        assert_eq!(host.last_active(MenuLayout::default().menu_panel), Some(true));
    }

    #[test]
    fn quiz_delay_runs_on_unscaled_time() {
        let mut host = CommandBuffer::new();
        let mut app = App::new(AppConfig::default());
        app.start(&mut host);
        app.tick(frame(), click(MenuLayout::default().quiz_button), &mut host);
        let slot_button = app.config().quiz_layout.answer_buttons[0];
        app.tick(frame(), click(slot_button), &mut host);
        assert_eq!(menu(&app).quiz().session().phase(), QuizPhase::ShowingFeedback);

        // Paused game time: the delay still elapses on wall-clock time.
        let paused = FrameTime { dt: 0.0, unscaled_dt: DT };
        for _ in 0..180 {
            app.tick(paused, FrameInput::default(), &mut host);
        }
        assert_eq!(menu(&app).quiz().session().phase(), QuizPhase::InProgress);
        assert_eq!(menu(&app).quiz().session().position(), 1);
    }

    #[test]
    fn paused_frames_still_open_poi_panels_and_advance_the_quiz() {
        let paused = FrameTime { dt: 0.0, unscaled_dt: DT };
        let mut host = CommandBuffer::new();
        let mut app = ar_app(&mut host);

        app.tick(paused, press(400.0, 300.0), &mut host);
        let panel = ar(&app).poi(PoiId(2)).unwrap().panel().unwrap();
        assert_eq!(panel.state(), PanelState::Opening);
        for _ in 0..20 {
            app.tick(paused, FrameInput::default(), &mut host);
        }
        let panel = ar(&app).poi(PoiId(2)).unwrap().panel().unwrap();
        assert_eq!(panel.state(), PanelState::Shown);
        assert!(panel.blocks_input());
        assert!(app.panel_visuals().iter().any(|v| v.opacity == 1.0));

        // Same paused frames drive the quiz feedback delay in the menu.
        app.tick(paused, click(ArLayout::default().back_button), &mut host);
        app.tick(paused, click(MenuLayout::default().quiz_button), &mut host);
        let slot_button = app.config().quiz_layout.answer_buttons[0];
        app.tick(paused, click(slot_button), &mut host);
        assert!(menu(&app).quiz().session().is_waiting());
        for _ in 0..100 {
            app.tick(paused, FrameInput::default(), &mut host);
        }
        assert_eq!(menu(&app).quiz().session().position(), 1);
    }

    #[test]
    fn ar_button_switches_scene_and_clears_world() {
        let mut host = CommandBuffer::new();
        let mut app = ar_app(&mut host);
        assert_eq!(app.world().len(), 1);
        assert!(host.iter().any(|c| *c == HostCommand::LoadScene { name: "SampleScene".into() }));

        app.tick(frame(), click(ArLayout::default().back_button), &mut host);
        assert_eq!(app.scene_name(), "MainMenu");
        assert!(app.world().is_empty());
        assert!(app.camera().is_none());
    }

    #[test]
    fn press_opens_video_and_back_stops_it() {
        let mut host = CommandBuffer::new();
        let mut app = ar_app(&mut host);
        app.tick(frame(), press(400.0, 300.0), &mut host);
        assert!(host.is_playing(ClipId(1)));
        run(&mut app, &mut host, 20);
        let panel = ar(&app).poi(PoiId(2)).unwrap().panel().unwrap();
        assert_eq!(panel.state(), PanelState::Shown);
        assert!(!app.panel_visuals().is_empty());

        app.tick(frame(), click(ArLayout::default().back_button), &mut host);
        assert_eq!(host.playing_count(), 0);
        assert_eq!(app.scene_name(), "MainMenu");
        assert!(app.panel_visuals().is_empty());
    }

    #[test]
    fn press_over_shown_overlay_does_not_reach_poi() {
        let mut host = CommandBuffer::new();
        let mut app = ar_app(&mut host);
        let l = ArLayout::default();
        app.blockers_mut().set_rect(l.help_overlay, ScreenRect::new(0.0, 0.0, 800.0, 600.0));
        app.tick(frame(), click(l.help_toggle), &mut host);
        run(&mut app, &mut host, 20);
        assert_eq!(ar(&app).overlay(Overlay::Help).state(), PanelState::Shown);

        app.tick(frame(), press(400.0, 300.0), &mut host);
        assert!(!host.is_playing(ClipId(1)));
    }

    #[test]
    fn clicks_are_handled_before_presses() {
        let mut host = CommandBuffer::new();
        let mut app = ar_app(&mut host);
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { pointer: 0, x: 400.0, y: 300.0 });
        q.push(InputEvent::Click { handle: ArLayout::default().back_button });
        app.tick(frame(), q.sample(), &mut host);
        // Back ran first, so the press landed in the menu scene and did nothing.
        assert_eq!(app.scene_name(), "MainMenu");
        assert!(!host.is_playing(ClipId(1)));
    }

    #[test]
    fn unknown_scene_is_refused() {
        let mut host = CommandBuffer::new();
        let mut app = App::new(AppConfig::default());
        app.start(&mut host);
        app.switch_scene("Nowhere", &mut host);
        assert_eq!(app.scene_name(), "MainMenu");
    }
}
