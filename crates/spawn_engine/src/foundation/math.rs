//! Math utilities and types
//!
//! Provides the fundamental math types used for instance placement.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform at the given position with identity rotation and scale
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Compose this transform (as parent) with a child-local transform,
    /// producing the child's world-space transform.
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            position: self.position + self.rotation * child.position.component_mul(&self.scale),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }

    /// Check that every component of the transform is a finite number
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
            && self.scale.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_compose_is_noop() {
        let parent = Transform::identity();
        let child = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        let world = parent.compose(&child);
        assert_relative_eq!(world.position, child.position);
    }

    #[test]
    fn test_compose_applies_parent_offset_and_scale() {
        let parent = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::identity(),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));

        let world = parent.compose(&child);
        assert_relative_eq!(world.position, Vec3::new(12.0, 0.0, 0.0));
        assert_relative_eq!(world.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_compose_rotates_child_position() {
        // 90 degrees around Z maps +X to +Y
        let parent = Transform {
            position: Vec3::zeros(),
            rotation: Quat::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2),
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let child = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));

        let world = parent.compose(&child);
        assert_relative_eq!(world.position, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        let mut t = Transform::identity();
        assert!(t.is_finite());

        t.position.x = f32::NAN;
        assert!(!t.is_finite());
    }
}
