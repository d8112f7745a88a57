//! Hit router: turns one press into at most one POI activation.
//!
//! UI always wins over the world. A press over blocking UI is dropped before
//! any ray is cast; otherwise the nearest collider under the press is looked
//! up and walked toward the root until it meets a registered POI anchor.

use glam::Vec2;
use crate::api::types::{NodeId, PoiId};
use crate::core::camera::Camera;
use crate::core::world::{RayHit, World};
use crate::input::occlusion::UiOcclusion;

/// A POI the router can activate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiTarget {
    pub poi: PoiId,
    /// Hits on this node or any node beneath it belong to the POI.
    pub anchor: NodeId,
    /// Hits farther than this along the ray are ignored.
    pub max_distance: f32,
}

/// A routed press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiHit {
    pub poi: PoiId,
    pub hit: RayHit,
}

#[derive(Debug, Default)]
pub struct HitRouter {
    targets: Vec<PoiTarget>,
}

impl HitRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a POI. Registering the same id again replaces it.
    pub fn register(&mut self, target: PoiTarget) {
        self.targets.retain(|t| t.poi != target.poi);
        self.targets.push(target);
    }

    pub fn unregister(&mut self, poi: PoiId) {
        self.targets.retain(|t| t.poi != poi);
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn target_for_anchor(&self, node: NodeId) -> Option<&PoiTarget> {
        self.targets.iter().find(|t| t.anchor == node)
    }

    /// Route one press. Returns the activated POI, if any.
    pub fn route<O: UiOcclusion + ?Sized>(
        &self,
        point: Vec2,
        camera: Option<&Camera>,
        ui: &O,
        world: &World,
    ) -> Option<PoiHit> {
        if self.targets.is_empty() {
            return None;
        }
        if ui.is_over_blocking_ui(point) {
            return None;
        }
        let Some(camera) = camera else {
            log::debug!("hit router: no camera, skipping press at {:?}", point);
            return None;
        };
        let ray = camera.screen_point_to_ray(point)?;

        let reach = self.targets.iter().map(|t| t.max_distance).fold(0.0_f32, f32::max);
        let hit = world.raycast(&ray, reach)?;

        // Nearest registered anchor above the hit node owns the press.
        let target = world
            .ancestry(hit.node)
            .find_map(|node| self.target_for_anchor(node))?;
        if hit.distance > target.max_distance {
            return None;
        }
        Some(PoiHit { poi: target.poi, hit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::UiHandle;
    use crate::core::world::Aabb;
    use crate::input::occlusion::{ScreenRect, UiBlockers};

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec2::new(800.0, 600.0))
    }

    /// A root anchor at `z` with a child mesh carrying the collider.
    fn world_with_poi(anchor: u32, mesh: u32, z: f32) -> World {
        let mut world = World::new();
        world.add_node(NodeId(anchor), None, Vec3::new(0.0, 0.0, z));
        world.add_node(NodeId(mesh), Some(NodeId(anchor)), Vec3::new(0.0, 0.0, z));
        world.set_collider(
            NodeId(mesh),
            Some(Aabb::from_center_size(Vec3::new(0.0, 0.0, z), Vec3::ONE)),
        );
        world
    }

    fn router(anchor: u32, max_distance: f32) -> HitRouter {
        let mut r = HitRouter::new();
        r.register(PoiTarget {
            poi: PoiId(1),
            anchor: NodeId(anchor),
            max_distance,
        });
        r
    }

    #[test]
    fn child_collider_hit_routes_to_anchor() {
        let world = world_with_poi(1, 2, -5.0);
        let hit = router(1, 200.0)
            .route(CENTER, Some(&camera()), &UiBlockers::new(), &world)
            .unwrap();
        assert_eq!(hit.poi, PoiId(1));
        assert_eq!(hit.hit.node, NodeId(2));
        // Ray starts on the near plane, 0.01 in front of the camera.
        assert!((hit.hit.distance - 4.49).abs() < 1e-3);
    }

    #[test]
    fn press_over_ui_never_reaches_the_world() {
        let world = world_with_poi(1, 2, -5.0);
        let mut ui = UiBlockers::new();
        ui.set_rect(UiHandle(7), ScreenRect::new(300.0, 200.0, 200.0, 200.0));
        let r = router(1, 200.0);
        assert!(r.route(CENTER, Some(&camera()), &ui, &world).is_none());

        ui.set_active(UiHandle(7), false);
        assert!(r.route(CENTER, Some(&camera()), &ui, &world).is_some());
    }

    #[test]
    fn missing_camera_skips() {
        let world = world_with_poi(1, 2, -5.0);
        assert!(router(1, 200.0).route(CENTER, None, &UiBlockers::new(), &world).is_none());
    }

    #[test]
    fn beyond_max_distance_is_ignored() {
        let world = world_with_poi(1, 2, -150.0);
        let ui = UiBlockers::new();
        assert!(router(1, 100.0).route(CENTER, Some(&camera()), &ui, &world).is_none());
        assert!(router(1, 200.0).route(CENTER, Some(&camera()), &ui, &world).is_some());
    }

    #[test]
    fn unrelated_collider_does_not_activate() {
        let world = world_with_poi(1, 2, -5.0);
        assert!(router(9, 200.0)
            .route(CENTER, Some(&camera()), &UiBlockers::new(), &world)
            .is_none());
    }

    #[test]
    fn miss_off_to_the_side() {
        let world = world_with_poi(1, 2, -5.0);
        let corner = Vec2::new(5.0, 5.0);
        assert!(router(1, 200.0)
            .route(corner, Some(&camera()), &UiBlockers::new(), &world)
            .is_none());
    }

    #[test]
    fn nearest_anchor_wins_when_nested() {
        let world = world_with_poi(1, 2, -5.0);
        // POI 2 anchored on the mesh itself, below POI 1's anchor.
        let mut r = router(1, 200.0);
        r.register(PoiTarget {
            poi: PoiId(2),
            anchor: NodeId(2),
            max_distance: 200.0,
        });
        let hit = r.route(CENTER, Some(&camera()), &UiBlockers::new(), &world).unwrap();
        assert_eq!(hit.poi, PoiId(2));
    }
}
