pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod extensions;
pub mod poi;
pub mod quiz;
pub mod scenes;

// Re-export key types at crate root for convenience
pub use api::app::{App, ActiveScene};
pub use api::config::{AppConfig, ConfigError};
pub use api::host::{CommandBuffer, Host, MediaHost, Navigator, UiHost};
pub use api::types::{ClipId, HostCommand, NodeId, PanelVisual, PoiId, Tint, UiHandle};
pub use core::camera::Camera;
pub use core::shuffle::{shuffle, shuffled_indices};
pub use core::time::{Clock, Delay, FrameTime};
pub use core::world::{Aabb, Ray, RayHit, World};
pub use input::occlusion::{ScreenRect, UiBlockers, UiOcclusion};
pub use input::queue::{FrameInput, InputEvent, InputQueue, Press};
pub use components::panel::{Panel, PanelConfig, PanelEvent, PanelState};
pub use components::playback::{AudioOutcome, AudioPlayback, AudioPolicy, PlaybackState, VideoPlayback};
pub use systems::hit_router::{HitRouter, PoiHit, PoiTarget};
pub use systems::placement::Placement;
pub use poi::{Poi, PoiConfig, PoiKind};
pub use quiz::{
    BankError, QuestionBank, QuizPhase, QuizQuestion, QuizScreen, QuizSession, QuizSettings,
    ResultTier, ScoreThresholds,
};
pub use scenes::{ArScene, MenuScene, SceneRequest};

// Extensions: animation helpers
pub use extensions::{Easing, Tween, ease, lerp};
