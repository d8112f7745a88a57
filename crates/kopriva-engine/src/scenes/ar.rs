// scenes/ar.rs
//
// AR scene: configured POIs behind a hit router, two mutually exclusive
// overlays (info, help) on the panel controller, and a back button.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::host::{MediaHost, UiHost};
use crate::api::types::{PanelVisual, PoiId, UiHandle};
use crate::components::panel::{Panel, PanelConfig};
use crate::core::camera::Camera;
use crate::core::world::World;
use crate::input::occlusion::{UiBlockers, UiOcclusion};
use crate::poi::{Poi, PoiConfig};
use crate::systems::hit_router::HitRouter;
use super::SceneRequest;

/// Host handles of the AR scene's fixed UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArLayout {
    pub back_button: UiHandle,
    pub info_toggle: UiHandle,
    pub help_toggle: UiHandle,
    pub info_overlay: UiHandle,
    pub info_backdrop: UiHandle,
    pub help_overlay: UiHandle,
    pub help_backdrop: UiHandle,
}

impl Default for ArLayout {
    fn default() -> Self {
        Self {
            back_button: UiHandle(200),
            info_toggle: UiHandle(201),
            help_toggle: UiHandle(202),
            info_overlay: UiHandle(210),
            info_backdrop: UiHandle(211),
            help_overlay: UiHandle(220),
            help_backdrop: UiHandle(221),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Info,
    Help,
}

pub struct ArScene {
    layout: ArLayout,
    menu_scene: String,
    info: Panel,
    help: Panel,
    pois: Vec<Poi>,
    router: HitRouter,
}

impl ArScene {
    pub fn new(layout: ArLayout, menu_scene: &str, pois: &[PoiConfig], panel_config: PanelConfig) -> Self {
        let mut router = HitRouter::new();
        let mut live: Vec<Poi> = Vec::with_capacity(pois.len());
        for config in pois {
            if live.iter().any(|p| p.id() == config.id) {
                log::warn!("AR scene: duplicate POI id {:?}, keeping the first", config.id);
                continue;
            }
            if let Some(poi) = Poi::from_config(config, panel_config) {
                router.register(config.target());
                live.push(poi);
            }
        }

        Self {
            layout,
            menu_scene: menu_scene.to_owned(),
            info: Panel::new(layout.info_overlay, panel_config).with_background(layout.info_backdrop),
            help: Panel::new(layout.help_overlay, panel_config).with_background(layout.help_backdrop),
            pois: live,
            router,
        }
    }

    pub fn overlay(&self, which: Overlay) -> &Panel {
        match which {
            Overlay::Info => &self.info,
            Overlay::Help => &self.help,
        }
    }

    pub fn poi(&self, id: PoiId) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id() == id)
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Scene became active: every overlay and POI panel starts hidden.
    pub fn enter<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        host.set_active(self.layout.info_overlay, false);
        host.set_active(self.layout.help_overlay, false);
        for panel in self.pois.iter().filter_map(Poi::panel) {
            host.set_active(panel.handle(), false);
        }
    }

    /// Open `which`, force-closing the other; close it if already open.
    pub fn toggle_overlay<H: UiHost + ?Sized>(&mut self, which: Overlay, host: &mut H) {
        let (target, other) = match which {
            Overlay::Info => (&mut self.info, &mut self.help),
            Overlay::Help => (&mut self.help, &mut self.info),
        };
        if target.is_open() {
            target.close(host);
        } else {
            other.close(host);
            target.open(host);
        }
    }

    pub fn handle_click<H: UiHost + MediaHost + ?Sized>(
        &mut self,
        clicked: UiHandle,
        host: &mut H,
    ) -> Option<SceneRequest> {
        let l = self.layout;
        if clicked == l.back_button {
            return Some(self.back(host));
        }
        if clicked == l.info_toggle {
            self.toggle_overlay(Overlay::Info, host);
        } else if clicked == l.help_toggle {
            self.toggle_overlay(Overlay::Help, host);
        } else if !self.info.handle_background_click(clicked, host)
            && !self.help.handle_background_click(clicked, host)
        {
            for poi in &mut self.pois {
                if poi.handle_click(clicked, host) {
                    break;
                }
            }
        }
        None
    }

    /// Close video POIs (stopping their clips), silence everything and ask
    /// for the menu scene.
    fn back<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) -> SceneRequest {
        for poi in &mut self.pois {
            if let Poi::Video(video) = poi {
                video.close(host);
            }
        }
        host.stop_all();
        SceneRequest::LoadScene(self.menu_scene.clone())
    }

    /// Route one press into the world. Returns the activated POI.
    pub fn handle_press<H: UiHost + MediaHost + ?Sized>(
        &mut self,
        point: Vec2,
        camera: Option<&Camera>,
        blockers: &UiBlockers,
        world: &World,
        host: &mut H,
    ) -> Option<PoiId> {
        let occlusion = SceneOcclusion { blockers, scene: &*self };
        let routed = self.router.route(point, camera, &occlusion, world)?;

        let camera_pos = camera.map(|c| c.position);
        let poi = self.pois.iter_mut().find(|p| p.id() == routed.poi)?;
        log::debug!("AR scene: press hit {:?} via {:?}", routed.poi, routed.hit.node);
        poi.activate(world, camera_pos, host);
        Some(routed.poi)
    }

    /// Whether the element `handle` currently swallows presses. Panels
    /// only block once fully shown; unknown handles are left to the host.
    pub fn input_gate(&self, handle: UiHandle) -> Option<bool> {
        std::iter::once(&self.info)
            .chain(std::iter::once(&self.help))
            .chain(self.pois.iter().filter_map(Poi::panel))
            .find(|p| p.handle() == handle)
            .map(Panel::blocks_input)
    }

    /// Advance panel tweens on unscaled time.
    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) {
        self.info.tick(unscaled_dt, host);
        self.help.tick(unscaled_dt, host);
        for poi in &mut self.pois {
            poi.tick(unscaled_dt, host);
        }
    }

    /// Append the visual state of every panel in the scene.
    pub fn panel_visuals(&self, out: &mut Vec<PanelVisual>) {
        out.push(self.info.visual());
        out.push(self.help.visual());
        out.extend(self.pois.iter().filter_map(Poi::panel).map(Panel::visual));
    }

    /// Scene is being replaced: stop clips, hide panels without animating.
    pub fn teardown<H: UiHost + MediaHost + ?Sized>(&mut self, host: &mut H) {
        for poi in &mut self.pois {
            poi.teardown(host);
        }
        self.info.hide_now(host);
        self.help.hide_now(host);
    }
}

/// Occlusion that lets the scene veto rectangles of panels that are not
/// fully shown.
pub struct SceneOcclusion<'a> {
    pub blockers: &'a UiBlockers,
    pub scene: &'a ArScene,
}

impl UiOcclusion for SceneOcclusion<'_> {
    fn is_over_blocking_ui(&self, point: Vec2) -> bool {
        self.blockers.blocks_with(point, |h| self.scene.input_gate(h))
    }
}
