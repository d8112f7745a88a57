use glam::Vec3;
use crate::api::host::UiHost;
use crate::api::types::{NodeId, PoiId, UiHandle};
use crate::components::panel::{Panel, PanelEvent};
use crate::core::world::World;
use crate::systems::placement::Placement;

/// A POI that reveals a photo + recipe card. The card's content lives on the
/// host; the core only opens, places and closes it.
#[derive(Debug, Clone)]
pub struct RecipePoi {
    id: PoiId,
    anchor: NodeId,
    panel: Panel,
    close_button: Option<UiHandle>,
    placement: Option<Placement>,
    has_fired_once: bool,
}

impl RecipePoi {
    pub fn new(
        id: PoiId,
        anchor: NodeId,
        panel: Panel,
        close_button: Option<UiHandle>,
        placement: Option<Placement>,
    ) -> Self {
        Self {
            id,
            anchor,
            panel,
            close_button,
            placement,
            has_fired_once: false,
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
        self.has_fired_once
    }

    pub fn activate<H: UiHost + ?Sized>(&mut self, world: &World, camera_pos: Option<Vec3>, host: &mut H) {
        if !self.panel.is_open() {
            if let Some(placement) = self.placement {
                placement.apply(self.panel.handle(), world, self.anchor, camera_pos, host);
            }
        }
        self.panel.open(host);
        self.has_fired_once = true;
    }

    pub fn close<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.panel.close(host);
    }

    pub fn handle_click<H: UiHost + ?Sized>(&mut self, clicked: UiHandle, host: &mut H) -> bool {
        if self.close_button == Some(clicked) {
            self.panel.close(host);
            return true;
        }
        self.panel.handle_background_click(clicked, host)
    }

    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) -> Option<PanelEvent> {
        self.panel.tick(unscaled_dt, host)
    }

    pub fn teardown<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.panel.hide_now(host);
    }
}
