// poi/mod.rs
//
// Points of interest in the AR scene. Each POI is anchored on a world node;
// the hit router maps presses to POI ids and the scene calls `activate`.

pub mod audio;
pub mod recipe;
pub mod video;

pub use audio::AudioPoi;
pub use recipe::RecipePoi;
pub use video::VideoPoi;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::host::{MediaHost, UiHost};
use crate::api::types::{ClipId, NodeId, PoiId, UiHandle};
use crate::components::panel::{Panel, PanelConfig, PanelEvent};
use crate::components::playback::{AudioPolicy, VideoPlayback};
use crate::core::world::World;
use crate::systems::hit_router::PoiTarget;
use crate::systems::placement::Placement;

/// What tapping the POI does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    Audio,
    Video,
    PhotoRecipe,
}

impl PoiKind {
    /// Default ray reach in world units.
    pub fn default_max_distance(self) -> f32 {
        match self {
            PoiKind::Audio | PoiKind::PhotoRecipe => 200.0,
            PoiKind::Video => 100.0,
        }
    }

    pub fn default_placement(self) -> Option<Placement> {
        match self {
            PoiKind::Audio => None,
            PoiKind::Video => Some(Placement::VIDEO),
            PoiKind::PhotoRecipe => Some(Placement::RECIPE),
        }
    }
}

/// One POI as described by the host's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiConfig {
    pub id: PoiId,
    pub anchor: NodeId,
    pub kind: PoiKind,
    #[serde(default)]
    pub max_distance: Option<f32>,
    /// Panel shown by video and recipe POIs.
    #[serde(default)]
    pub panel: Option<UiHandle>,
    #[serde(default)]
    pub close_button: Option<UiHandle>,
    /// Backdrop that dismisses the panel when tapped.
    #[serde(default)]
    pub background: Option<UiHandle>,
    #[serde(default)]
    pub clip: Option<ClipId>,
    /// Audio behaviour; `volume` also applies to video clips.
    #[serde(default)]
    pub audio: AudioPolicy,
    /// Place the panel above the anchor on every activation.
    #[serde(default = "default_auto_place")]
    pub auto_place: bool,
    /// Overrides the kind's default offsets.
    #[serde(default)]
    pub placement: Option<Placement>,
}

fn default_auto_place() -> bool {
    true
}

impl PoiConfig {
    pub fn new(id: PoiId, anchor: NodeId, kind: PoiKind) -> Self {
        Self {
            id,
            anchor,
            kind,
            max_distance: None,
            panel: None,
            close_button: None,
            background: None,
            clip: None,
            audio: AudioPolicy::default(),
            auto_place: true,
            placement: None,
        }
    }

    pub fn with_panel(mut self, panel: UiHandle, close_button: Option<UiHandle>) -> Self {
        self.panel = Some(panel);
        self.close_button = close_button;
        self
    }

    pub fn with_background(mut self, background: UiHandle) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_clip(mut self, clip: ClipId) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_audio_policy(mut self, policy: AudioPolicy) -> Self {
        self.audio = policy;
        self
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance.unwrap_or_else(|| self.kind.default_max_distance())
    }

    pub fn target(&self) -> PoiTarget {
        PoiTarget {
            poi: self.id,
            anchor: self.anchor,
            max_distance: self.max_distance(),
        }
    }

    fn placement(&self) -> Option<Placement> {
        if !self.auto_place {
            return None;
        }
        self.placement.or_else(|| self.kind.default_placement())
    }

    fn build_panel(&self, handle: UiHandle, config: PanelConfig) -> Panel {
        let panel = Panel::new(handle, config);
        match self.background {
            Some(bg) => panel.with_background(bg),
            None => panel,
        }
    }
}

/// A live POI.
#[derive(Debug, Clone)]
pub enum Poi {
    Audio(AudioPoi),
    Video(VideoPoi),
    Recipe(RecipePoi),
}

impl Poi {
    /// Build a POI from configuration. Panel POIs without a panel handle
    /// cannot work and are rejected with an error log.
    pub fn from_config(config: &PoiConfig, panel_config: PanelConfig) -> Option<Self> {
        match config.kind {
            PoiKind::Audio => Some(Poi::Audio(AudioPoi::new(
                config.id,
                config.anchor,
                config.clip,
                config.audio,
            ))),
            PoiKind::Video | PoiKind::PhotoRecipe => {
                let Some(handle) = config.panel else {
                    log::error!("POI {:?} ({:?}) has no panel, skipped", config.id, config.kind);
                    return None;
                };
                let panel = config.build_panel(handle, panel_config);
                let poi = if config.kind == PoiKind::Video {
                    let playback = VideoPlayback::new(config.clip, config.audio.volume);
                    Poi::Video(VideoPoi::new(
                        config.id,
                        config.anchor,
                        panel,
                        config.close_button,
                        config.placement(),
                        playback,
                    ))
                } else {
                    Poi::Recipe(RecipePoi::new(
                        config.id,
                        config.anchor,
                        panel,
                        config.close_button,
                        config.placement(),
                    ))
                };
                Some(poi)
            }
        }
    }

    pub fn id(&self) -> PoiId {
        match self {
            Poi::Audio(p) => p.id(),
            Poi::Video(p) => p.id(),
            Poi::Recipe(p) => p.id(),
        }
    }

    pub fn anchor(&self) -> NodeId {
        match self {
            Poi::Audio(p) => p.anchor(),
            Poi::Video(p) => p.anchor(),
            Poi::Recipe(p) => p.anchor(),
        }
    }

    pub fn has_fired_once(&self) -> bool {
        match self {
            Poi::Audio(p) => p.has_fired_once(),
            Poi::Video(p) => p.has_fired_once(),
            Poi::Recipe(p) => p.has_fired_once(),
        }
    }

    pub fn panel(&self) -> Option<&Panel> {
        match self {
            Poi::Audio(_) => None,
            Poi::Video(p) => Some(p.panel()),
            Poi::Recipe(p) => Some(p.panel()),
        }
    }

    pub fn activate<H: UiHost + MediaHost + ?Sized>(
        &mut self,
        world: &World,
        camera_pos: Option<Vec3>,
        host: &mut H,
    ) {
        match self {
            Poi::Audio(p) => {
                p.activate(host);
            }
            Poi::Video(p) => {
                p.activate(world, camera_pos, host);
            }
            Poi::Recipe(p) => p.activate(world, camera_pos, host),
        }
    }

    /// Close the POI's panel (stopping video first). Audio has nothing to close.
    pub fn close<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        match self {
            Poi::Audio(_) => {}
            Poi::Video(p) => p.close(host),
            Poi::Recipe(p) => p.close(host),
        }
    }

    /// Offer a UI click to the POI. Returns true if it was consumed.
    pub fn handle_click<H: UiHost + MediaHost + ?Sized>(&mut self, clicked: UiHandle, host: &mut H) -> bool {
        match self {
            Poi::Audio(_) => false,
            Poi::Video(p) => p.handle_click(clicked, host),
            Poi::Recipe(p) => p.handle_click(clicked, host),
        }
    }

    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) -> Option<PanelEvent> {
        match self {
            Poi::Audio(_) => None,
            Poi::Video(p) => p.tick(unscaled_dt, host),
            Poi::Recipe(p) => p.tick(unscaled_dt, host),
        }
    }

    pub fn teardown<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        match self {
            Poi::Audio(p) => p.stop(host),
            Poi::Video(p) => p.teardown(host),
            Poi::Recipe(p) => p.teardown(host),
        }
    }
}
