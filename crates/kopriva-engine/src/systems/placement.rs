//! Auto-placement of POI panels above the POI they describe.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::host::UiHost;
use crate::api::types::{NodeId, UiHandle};
use crate::core::world::{Aabb, World};

/// Edge length of the stand-in box used when a node has no collider at all.
pub const FALLBACK_BOUNDS_SIZE: f32 = 0.1;

/// Offsets applied on top of the anchor's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Gap between the top of the bounds and the panel.
    pub extra_height: f32,
    /// Distance the panel is pulled toward the camera.
    pub forward_offset: f32,
}

impl Placement {
    /// Recipe card placement.
    pub const RECIPE: Self = Self {
        extra_height: 0.03,
        forward_offset: 0.10,
    };

    /// Video panel placement.
    pub const VIDEO: Self = Self {
        extra_height: 0.06,
        forward_offset: 0.12,
    };

    /// Panel position for `anchor`, or `None` if the node is unknown.
    pub fn position(&self, world: &World, anchor: NodeId, camera_pos: Option<Vec3>) -> Option<Vec3> {
        let origin = world.origin(anchor)?;
        let bounds = world.bounds_of(anchor).unwrap_or_else(|| {
            Aabb::from_center_size(origin, Vec3::splat(FALLBACK_BOUNDS_SIZE))
        });

        let center = bounds.center();
        let mut pos = Vec3::new(center.x, bounds.max.y + self.extra_height, center.z);

        if let Some(camera_pos) = camera_pos {
            let toward = (camera_pos - pos).normalize_or_zero();
            pos += toward * self.forward_offset;
        }
        Some(pos)
    }

    /// Compute the position and send it to the host.
    pub fn apply<H: UiHost + ?Sized>(
        &self,
        panel: UiHandle,
        world: &World,
        anchor: NodeId,
        camera_pos: Option<Vec3>,
        host: &mut H,
    ) -> Option<Vec3> {
        let Some(pos) = self.position(world, anchor, camera_pos) else {
            log::warn!("placement: anchor {:?} not in world, leaving panel {:?}", anchor, panel);
            return None;
        };
        host.place_panel(panel, pos);
        Some(pos)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::RECIPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::CommandBuffer;
    use crate::api::types::HostCommand;

    fn world() -> World {
        let mut w = World::new();
        w.add_node(NodeId(1), None, Vec3::new(1.0, 0.0, -2.0));
        w.add_node(NodeId(2), Some(NodeId(1)), Vec3::new(1.0, 0.0, -2.0));
        w.set_collider(
            NodeId(2),
            Some(Aabb::new(Vec3::new(0.5, 0.0, -2.5), Vec3::new(1.5, 0.4, -1.5))),
        );
        w
    }

    #[test]
    fn sits_on_top_of_child_collider() {
        let pos = Placement::RECIPE.position(&world(), NodeId(1), None).unwrap();
        assert!((pos - Vec3::new(1.0, 0.43, -2.0)).length() < 1e-5);
    }

    #[test]
    fn nudged_toward_camera() {
        let camera = Vec3::new(1.0, 0.46, 5.0);
        let pos = Placement::VIDEO.position(&world(), NodeId(1), Some(camera)).unwrap();
        // Camera is level with the panel and straight down +Z.
        assert!((pos - Vec3::new(1.0, 0.46, -1.88)).length() < 1e-5);
    }

    #[test]
    fn colliderless_node_uses_fallback_box() {
        let mut w = World::new();
        w.add_node(NodeId(5), None, Vec3::new(0.0, 1.0, 0.0));
        let pos = Placement { extra_height: 0.0, forward_offset: 0.0 }
            .position(&w, NodeId(5), None)
            .unwrap();
        assert!((pos.y - 1.05).abs() < 1e-6);
    }

    #[test]
    fn apply_reports_to_host() {
        let mut host = CommandBuffer::new();
        let pos = Placement::RECIPE
            .apply(UiHandle(30), &world(), NodeId(1), None, &mut host)
            .unwrap();
        assert_eq!(
            host.drain(),
            vec![HostCommand::PlacePanel { handle: UiHandle(30), position: pos.to_array() }]
        );
        assert!(Placement::RECIPE.apply(UiHandle(30), &world(), NodeId(99), None, &mut host).is_none());
        assert!(host.is_empty());
    }
}
