//! Transform component for placing boxes in world space.
//!
//! World space is Y-up: the ground plane's `x` maps to world X and its `y`
//! maps to world Z.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::rect::Rect;

/// Position and scale of an axis-aligned box. `position` is the box centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Box standing on the ground over `footprint`, `height` tall.
    pub fn from_footprint(footprint: Rect, height: f32) -> Self {
        let center = footprint.center();
        Self {
            position: Vec3::new(center.x, height * 0.5, center.y),
            scale: Vec3::new(footprint.width, height, footprint.length),
        }
    }

    /// Ground-plane rectangle covered by the box.
    pub fn footprint(&self) -> Rect {
        let half = Vec2::new(self.scale.x, self.scale.z) * 0.5;
        let min = Vec2::new(self.position.x, self.position.z) - half;
        Rect::new(min.x, min.y, self.scale.x, self.scale.z)
    }

    /// World Y of the box's upper face.
    pub fn top(&self) -> f32 {
        self.position.y + self.scale.y * 0.5
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_from_footprint_centres_box() {
        let t = Transform::from_footprint(Rect::square(10.0, 20.0, 8.0), 30.0);
        assert_eq!(t.position, Vec3::new(14.0, 15.0, 24.0));
        assert_eq!(t.scale, Vec3::new(8.0, 30.0, 8.0));
        assert_eq!(t.top(), 30.0);
    }

    #[test]
    fn transform_footprint_inverts_from_footprint() {
        let rect = Rect::new(-40.0, 12.5, 6.0, 9.0);
        let t = Transform::from_footprint(rect, 3.0);
        let back = t.footprint();
        assert!((back.x - rect.x).abs() < 1e-5);
        assert!((back.y - rect.y).abs() < 1e-5);
        assert_eq!(back.width, rect.width);
        assert_eq!(back.length, rect.length);
    }

    #[test]
    fn transform_matrix_maps_unit_cube_corner() {
        let t = Transform::from_footprint(Rect::square(0.0, 0.0, 2.0), 4.0);
        let corner = t.to_matrix().transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!((corner - Vec3::new(2.0, 4.0, 2.0)).length() < 1e-5);
    }
}
