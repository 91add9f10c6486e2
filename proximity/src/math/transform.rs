use super::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform: a unit rotation followed by a translation.
///
/// Points are mapped as `p' = rotation * p + translation`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    rotation: Quat,
    translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            translation: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// True only when the rotation is exactly the identity (`q` or `-q`), no tolerance.
    pub fn is_identity_rotation(&self) -> bool {
        self.rotation == Quat::IDENTITY || self.rotation == -Quat::IDENTITY
    }

    pub fn is_identity(&self) -> bool {
        self.is_identity_rotation() && self.translation == Vec3::ZERO
    }

    #[inline]
    pub fn transform_point(&self, pt: Vec3) -> Vec3 {
        self.rotation * pt + self.translation
    }

    #[inline]
    pub fn inverse_transform_point(&self, pt: Vec3) -> Vec3 {
        self.rotation.conjugate() * (pt - self.translation)
    }

    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    #[inline]
    pub fn inverse_rotate(&self, v: Vec3) -> Vec3 {
        self.rotation.conjugate() * v
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_identity_rotation_accepts_both_signs() {
        let mut tf = Transform::from_translation(DVec3::new(1.0, 2.0, 3.0));
        assert!(tf.is_identity_rotation());
        assert!(!tf.is_identity());

        tf.set_rotation(-Quat::IDENTITY);
        assert!(tf.is_identity_rotation());

        tf.set_rotation(Quat::from_rotation_z(1.0e-9));
        assert!(!tf.is_identity_rotation());
    }

    #[test]
    fn test_transform_round_trip() {
        let tf = Transform::new(
            Quat::from_axis_angle(DVec3::new(1.0, 1.0, 0.0).normalize(), 0.7),
            DVec3::new(-3.0, 0.5, 2.0),
        );
        let pt = DVec3::new(0.25, -1.0, 4.0);
        let back = tf.inverse_transform_point(tf.transform_point(pt));
        assert!(back.abs_diff_eq(pt, 1e-12));
    }
}
