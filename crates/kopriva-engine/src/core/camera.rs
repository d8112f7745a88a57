use glam::{Mat4, Vec2, Vec3};
use crate::core::world::Ray;

/// Perspective camera mirrored from the host's AR camera each frame.
///
/// Screen coordinates are in pixels with the origin at the top-left corner
/// and Y growing downward, matching browser pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, forward: Vec3, viewport: Vec2) -> Self {
        Self {
            position,
            forward,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            viewport,
            near: 0.01,
            far: 1000.0,
        }
    }

    pub fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Resize the viewport (e.g. on orientation change).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    fn is_valid(&self) -> bool {
        self.viewport.x > 0.0
            && self.viewport.y > 0.0
            && self.fov_y > 0.0
            && self.near > 0.0
            && self.far > self.near
            && self.forward.length_squared() > 0.0
            && self.forward.cross(self.up).length_squared() > 0.0
    }

    /// Combined projection * view matrix.
    pub fn view_projection(&self) -> Mat4 {
        let aspect = self.viewport.x / self.viewport.y;
        let projection = Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far);
        let view = Mat4::look_to_rh(self.position, self.forward.normalize(), self.up);
        projection * view
    }

    /// Ray from the near plane through `screen` into the world.
    /// `None` when the camera is degenerate (zero viewport, collinear up).
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray> {
        if !self.is_valid() {
            return None;
        }
        let ndc_x = 2.0 * screen.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y;

        let inverse = self.view_projection().inverse();
        // perspective_rh maps depth to [0, 1]; any second depth on the same
        // pixel gives the direction, mid-range keeps f32 error small.
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let deeper = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));
        Ray::new(near, deeper - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn center_ray_points_forward() {
        let ray = camera().screen_point_to_ray(Vec2::new(400.0, 300.0)).unwrap();
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4, "dir was {:?}", ray.dir);
        assert!(ray.origin.z < 0.0 && ray.origin.z > -0.02);
    }

    #[test]
    fn top_left_ray_leans_up_and_left() {
        let ray = camera().screen_point_to_ray(Vec2::new(0.0, 0.0)).unwrap();
        assert!(ray.dir.x < 0.0);
        assert!(ray.dir.y > 0.0);
        assert!(ray.dir.z < 0.0);
    }

    #[test]
    fn degenerate_camera_yields_no_ray() {
        let mut cam = camera();
        cam.resize(0.0, 600.0);
        assert!(cam.screen_point_to_ray(Vec2::ZERO).is_none());

        let cam = camera().with_up(Vec3::NEG_Z);
        assert!(cam.screen_point_to_ray(Vec2::ZERO).is_none());
    }
}
