/// Accumulated rotation state and offset rotation
use nalgebra::{Rotation3, Vector3};

use crate::geometry::Point3D;

/// Rotation angle around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians). Angles grow without bound; the
    /// trig functions take care of periodicity.
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation helpers for body-local offsets
pub struct Transform;

impl Transform {
    /// Rotation about x, then y, then z, each applied to the previous result
    pub fn rotation_matrix(rotation: &RotationState) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);

        rz * ry * rx
    }

    /// Rotate a local offset into the body's current frame
    pub fn rotate_offset(offset: &Point3D, rotation: &RotationState) -> Point3D {
        Self::rotation_matrix(rotation) * *offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert_approx_eq!(state.x, 0.1);
        assert_approx_eq!(state.y, 0.2);
        assert_approx_eq!(state.z, 0.3);
    }

    #[test]
    fn test_identity_rotation() {
        let offset = Point3D::new(64.0, -64.0, 64.0);
        let rotated = Transform::rotate_offset(&offset, &RotationState::zero());
        assert_approx_eq!((rotated - offset).norm(), 0.0);
    }

    #[test]
    fn test_quarter_turns_follow_right_hand_rule() {
        let about_x = Transform::rotate_offset(&Point3D::new(0.0, 1.0, 0.0), &RotationState::new(FRAC_PI_2, 0.0, 0.0));
        assert_approx_eq!((about_x - Point3D::new(0.0, 0.0, 1.0)).norm(), 0.0);

        let about_z = Transform::rotate_offset(&Point3D::new(1.0, 0.0, 0.0), &RotationState::new(0.0, 0.0, FRAC_PI_2));
        assert_approx_eq!((about_z - Point3D::new(0.0, 1.0, 0.0)).norm(), 0.0);
    }

    #[test]
    fn test_axis_order_matters() {
        let offset = Point3D::new(1.0, 0.0, 0.0);

        // x first, then y
        let x_then_y = Transform::rotate_offset(&offset, &RotationState::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        assert_approx_eq!((x_then_y - Point3D::new(0.0, 0.0, -1.0)).norm(), 0.0);

        // y first, then x
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        let y_then_x = rx * (ry * offset);
        assert_approx_eq!((y_then_x - Point3D::new(0.0, 1.0, 0.0)).norm(), 0.0);

        assert!((x_then_y - y_then_x).norm() > 1.0);
    }
}
