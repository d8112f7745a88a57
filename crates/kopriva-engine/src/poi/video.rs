use glam::Vec3;
use crate::api::host::{MediaHost, UiHost};
use crate::api::types::{NodeId, PoiId, UiHandle};
use crate::components::panel::{Panel, PanelEvent};
use crate::components::playback::{PlaybackState, VideoPlayback};
use crate::core::world::World;
use crate::systems::placement::Placement;

/// A POI that shows a video panel and restarts the clip on every tap.
#[derive(Debug, Clone)]
pub struct VideoPoi {
    id: PoiId,
    anchor: NodeId,
    panel: Panel,
    close_button: Option<UiHandle>,
    placement: Option<Placement>,
    playback: VideoPlayback,
}

impl VideoPoi {
    pub fn new(
        id: PoiId,
        anchor: NodeId,
        panel: Panel,
        close_button: Option<UiHandle>,
        placement: Option<Placement>,
        playback: VideoPlayback,
    ) -> Self {
        Self {
            id,
            anchor,
            panel,
            close_button,
            placement,
            playback,
        }
    }

    pub fn id(&self) -> PoiId {
        self.id
    }

    pub fn anchor(&self) -> NodeId {
        self.anchor
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn has_fired_once(&self) -> bool {
        self.playback.has_played_once()
    }

    pub fn state<H: MediaHost + ?Sized>(&self, host: &H) -> PlaybackState {
        self.playback.state(host)
    }

    /// Restart the clip and bring the panel up. Returns false (and does
    /// nothing) when no clip is assigned.
    pub fn activate<H: UiHost + MediaHost + ?Sized>(
        &mut self,
        world: &World,
        camera_pos: Option<Vec3>,
        host: &mut H,
    ) -> bool {
        if !self.playback.has_clip() {
            log::error!("video POI {:?}: no clip assigned", self.id);
            return false;
        }
        if let Some(placement) = self.placement {
            placement.apply(self.panel.handle(), world, self.anchor, camera_pos, host);
        }
        self.playback.restart(host);
        self.panel.open(host);
        true
    }

    /// Stop the clip right away, then animate the panel out.
    pub fn close<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        self.playback.stop(host);
        self.panel.close(host);
    }

    /// Close button or backdrop. Returns true if the click was ours.
    pub fn handle_click<H: UiHost + MediaHost + ?Sized>(&mut self, clicked: UiHandle, host: &mut H) -> bool {
        let is_close = self.close_button == Some(clicked) || self.panel.is_background(clicked);
        if !is_close {
            return false;
        }
        if self.panel.is_open() {
            self.close(host);
        }
        true
    }

    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) -> Option<PanelEvent> {
        self.panel.tick(unscaled_dt, host)
    }

    /// Scene teardown: silence and hide without animation.
    pub fn teardown<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        self.playback.stop(host);
        self.panel.hide_now(host);
    }
}
