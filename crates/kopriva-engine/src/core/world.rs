// core/world.rs
//
// Minimal world model for hit testing: a node hierarchy with optional
// axis-aligned colliders. The host mirrors its scene graph into it; the core
// only needs "what did this ray hit first" and "is that node under this anchor".

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::NodeId;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Distance along `ray` to the entry point, if the ray hits the box.
    /// A ray starting inside the box hits at distance 0.
    pub fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-8 {
                // Parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}

/// A half-line in world space. `dir` is kept normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Clone)]
struct WorldNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    origin: Vec3,
    collider: Option<Aabb>,
    active: bool,
}

impl WorldNode {
    fn new(origin: Vec3) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            origin,
            collider: None,
            active: true,
        }
    }
}

/// Node hierarchy plus colliders, keyed by [`NodeId`].
#[derive(Debug, Default)]
pub struct World {
    nodes: HashMap<NodeId, WorldNode>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or move) a node. An unknown parent is created on the fly.
    pub fn add_node(&mut self, id: NodeId, parent: Option<NodeId>, origin: Vec3) {
        self.nodes
            .entry(id)
            .and_modify(|n| n.origin = origin)
            .or_insert_with(|| WorldNode::new(origin));
        self.set_parent(id, parent);
    }

    /// Re-parent a node. Requests that would create a cycle are ignored.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        if let Some(p) = parent {
            if p == child || self.is_self_or_descendant(p, child) {
                log::warn!("world: ignoring parent {:?} for {:?} (cycle)", p, child);
                return;
            }
            self.nodes.entry(p).or_insert_with(|| WorldNode::new(Vec3::ZERO));
        }
        self.nodes.entry(child).or_insert_with(|| WorldNode::new(Vec3::ZERO));

        if let Some(old) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old) {
                old_node.children.retain(|&c| c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
        if let Some(p) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&p) {
                if !parent_node.children.contains(&child) {
                    parent_node.children.push(child);
                }
            }
        }
    }

    pub fn set_collider(&mut self, id: NodeId, collider: Option<Aabb>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.collider = collider;
        }
    }

    /// Inactive nodes (and everything below them) are invisible to ray casts.
    pub fn set_active(&mut self, id: NodeId, active: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.active = active;
        }
    }

    /// Remove a node. Its children become roots.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else { return };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn origin(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(&id).map(|n| n.origin)
    }

    /// Iterate `id` and then each of its ancestors, nearest first.
    pub fn ancestry(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        // Bounded by the node count, so a corrupted hierarchy cannot spin forever.
        let limit = self.nodes.len() + 1;
        std::iter::successors(Some(id), move |&n| self.parent(n)).take(limit)
    }

    /// True when `node` is `ancestor` or lies anywhere beneath it.
    pub fn is_self_or_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestry(node).any(|n| n == ancestor)
    }

    fn is_effectively_active(&self, id: NodeId) -> bool {
        self.ancestry(id)
            .all(|n| self.nodes.get(&n).map_or(true, |node| node.active))
    }

    /// Nearest collider hit along `ray` within `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for (&id, node) in &self.nodes {
            let Some(collider) = node.collider else { continue };
            let Some(distance) = collider.ray_distance(ray) else { continue };
            if distance > max_distance || !self.is_effectively_active(id) {
                continue;
            }
            // Tie on distance: lower id wins so results don't depend on map order.
            let closer = match best {
                None => true,
                Some(b) => distance < b.distance || (distance == b.distance && id.0 < b.node.0),
            };
            if closer {
                best = Some(RayHit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
        best
    }

    /// Bounds used for panel placement: the node's own collider, else the
    /// first collider found below it (breadth first, in insertion order).
    pub fn bounds_of(&self, id: NodeId) -> Option<Aabb> {
        let mut queue = std::collections::VecDeque::from([id]);
        let mut visited = 0;
        while let Some(n) = queue.pop_front() {
            visited += 1;
            if visited > self.nodes.len() {
                break;
            }
            let Some(node) = self.nodes.get(&n) else { continue };
            if let Some(collider) = node.collider {
                return Some(collider);
            }
            queue.extend(node.children.iter().copied());
        }
        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
