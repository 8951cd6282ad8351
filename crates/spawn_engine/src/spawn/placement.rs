//! Placement parameters for spawn requests
//!
//! A [`Placement`] describes where a spawned instance should end up:
//! optional position and orientation (omitted components retain the
//! prior/template value), an optional parent for containment, whether the
//! supplied coordinates are world-space or local to the parent, and the
//! target ownership scope.

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::spawn::handle::SpawnHandle;
use serde::{Deserialize, Serialize};

/// Logical scene/region an active instance belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub u32);

impl SceneId {
    /// The root scene every instance belongs to unless told otherwise
    pub const ROOT: Self = Self(0);
}

impl Default for SceneId {
    fn default() -> Self {
        Self::ROOT
    }
}

/// Coordinate space of the supplied placement values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    /// Position and rotation are absolute world coordinates
    #[default]
    World,
    /// Position and rotation are relative to the parent's transform
    Local,
}

/// Where and under what ownership a spawned instance is activated
#[derive(Debug, Clone, Default)]
pub struct Placement {
    /// Target position; `None` retains the prior/template position
    pub position: Option<Vec3>,
    /// Target orientation; `None` retains the prior/template orientation
    pub rotation: Option<Quat>,
    /// Containing instance; `None` detaches from any previous parent
    pub parent: Option<SpawnHandle>,
    /// Coordinate space of `position`/`rotation`
    pub space: Space,
    /// Target ownership scope; `None` retains the prior/default scene
    pub scene: Option<SceneId>,
}

impl Placement {
    /// Placement at a world-space position
    pub fn at(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Set the orientation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Attach to a parent instance
    #[must_use]
    pub fn with_parent(mut self, parent: SpawnHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Interpret position/rotation as local to the parent
    #[must_use]
    pub fn local(mut self) -> Self {
        self.space = Space::Local;
        self
    }

    /// Set the target ownership scope
    #[must_use]
    pub fn in_scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Validate that the supplied components are finite numbers.
    ///
    /// # Panics
    ///
    /// Panics if position or rotation contain NaN or infinite values;
    /// spawning at an undefined location is a programmer error.
    pub fn validate(&self) {
        if let Some(position) = &self.position {
            assert!(
                position.iter().all(|x| x.is_finite()),
                "placement position contains non-finite values: {position:?}"
            );
        }
        if let Some(rotation) = &self.rotation {
            assert!(
                rotation.coords.iter().all(|x| x.is_finite()),
                "placement rotation contains non-finite values: {rotation:?}"
            );
        }
    }

    /// Resolve this placement against the prior transform of the instance
    /// being activated and (for local-space placement) the parent's world
    /// transform.
    pub(crate) fn resolve(
        &self,
        prior: &Transform,
        parent_world: Option<&Transform>,
    ) -> Transform {
        let mut target = prior.clone();
        if let Some(position) = self.position {
            target.position = position;
        }
        if let Some(rotation) = self.rotation {
            target.rotation = rotation;
        }

        match (self.space, parent_world) {
            (Space::Local, Some(parent)) => parent.compose(&target),
            _ => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_placement_retains_prior_transform() {
        let prior = Transform::from_position(Vec3::new(4.0, 5.0, 6.0));
        let resolved = Placement::default().resolve(&prior, None);
        assert_relative_eq!(resolved.position, prior.position);
    }

    #[test]
    fn test_world_placement_overrides_position() {
        let prior = Transform::from_position(Vec3::new(4.0, 5.0, 6.0));
        let placement = Placement::at(Vec3::new(1.0, 1.0, 1.0));

        let resolved = placement.resolve(&prior, None);
        assert_relative_eq!(resolved.position, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_local_placement_composes_with_parent() {
        let parent = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        let placement = Placement::at(Vec3::new(1.0, 0.0, 0.0)).local();

        let resolved = placement.resolve(&Transform::identity(), Some(&parent));
        assert_relative_eq!(resolved.position, Vec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_local_placement_without_parent_falls_back_to_world() {
        let placement = Placement::at(Vec3::new(1.0, 2.0, 3.0)).local();
        let resolved = placement.resolve(&Transform::identity(), None);
        assert_relative_eq!(resolved.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn test_validate_rejects_nan_position() {
        Placement::at(Vec3::new(f32::NAN, 0.0, 0.0)).validate();
    }
}
