//! Euler rotation of 3D points under the Bunge convention.
//!
//! Angles follow the 3-1-3 (Z–X′–Z″) intrinsic convention standard in EBSD
//! texture analysis: rotate by φ1 about z, then Φ about the rotated x axis,
//! then φ2 about the twice-rotated z axis. As fixed-axis matrices this
//! composes to R = Rz(φ1)·Rx(Φ)·Rz(φ2), applied actively to the geometry.
//! The same matrix is applied uniformly to cell vertices, axis indicators,
//! and vector endpoints so the whole scene rotates consistently.

use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Bunge Euler angles (φ1, Φ, φ2) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub phi1: f64,
    pub cap_phi: f64,
    pub phi2: f64,
}

impl EulerAngles {
    pub fn new(phi1: f64, cap_phi: f64, phi2: f64) -> Self {
        Self { phi1, cap_phi, phi2 }
    }

    /// Construct from angles given in radians.
    pub fn from_radians(phi1: f64, cap_phi: f64, phi2: f64) -> Self {
        Self::new(phi1.to_degrees(), cap_phi.to_degrees(), phi2.to_degrees())
    }

    /// Whether all angles are finite (rejects NaN and infinities).
    pub fn is_finite(&self) -> bool {
        self.phi1.is_finite() && self.cap_phi.is_finite() && self.phi2.is_finite()
    }

    /// Each angle wrapped into [0, 360).
    pub fn normalised(&self) -> Self {
        Self {
            phi1: self.phi1.rem_euclid(360.0),
            cap_phi: self.cap_phi.rem_euclid(360.0),
            phi2: self.phi2.rem_euclid(360.0),
        }
    }

    /// The composite rotation matrix R = Rz(φ1)·Rx(Φ)·Rz(φ2).
    pub fn rotation_matrix(&self) -> Rotation3<f64> {
        let rz1 = Rotation3::from_axis_angle(&Vector3::z_axis(), self.phi1.to_radians());
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.cap_phi.to_radians());
        let rz2 = Rotation3::from_axis_angle(&Vector3::z_axis(), self.phi2.to_radians());
        rz1 * rx * rz2
    }
}

/// Apply one rotation to a set of points, preserving order. Each call
/// produces a fresh vector; the input is never mutated.
pub fn rotate_points(points: &[Point3<f64>], rotation: &Rotation3<f64>) -> Vec<Point3<f64>> {
    points.iter().map(|p| rotation * p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_angles_are_identity() {
        let r = EulerAngles::new(0.0, 0.0, 0.0).rotation_matrix();
        let points = [
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        for (p, q) in points.iter().zip(rotate_points(&points, &r)) {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
            assert_relative_eq!(p.z, q.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let angles = [
            EulerAngles::new(12.0, 23.0, 34.0),
            EulerAngles::new(90.0, 45.0, 270.0),
            EulerAngles::new(359.9, 180.0, 0.1),
        ];
        let p = Point3::new(0.3, -1.7, 2.9);
        for a in angles {
            let q = rotate_points(&[p], &a.rotation_matrix())[0];
            assert_relative_eq!(q.coords.norm(), p.coords.norm(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phi1_rotates_about_z() {
        // φ1 = 90° takes x̂ to ŷ under an active rotation.
        let r = EulerAngles::new(90.0, 0.0, 0.0).rotation_matrix();
        let q = r * Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cap_phi_rotates_about_rotated_x() {
        // With φ1 = 90°, the intrinsic x′ axis is the lab ŷ axis, so
        // (φ1, Φ) = (90°, 90°) takes ẑ to x̂.
        let r = EulerAngles::new(90.0, 90.0, 0.0).rotation_matrix();
        let q = r * Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(q.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(q.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalised_wraps_into_range() {
        let a = EulerAngles::new(-30.0, 400.0, 360.0).normalised();
        assert_relative_eq!(a.phi1, 330.0, epsilon = 1e-12);
        assert_relative_eq!(a.cap_phi, 40.0, epsilon = 1e-12);
        assert_relative_eq!(a.phi2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_radians_conversion() {
        let a = EulerAngles::from_radians(std::f64::consts::PI, 0.0, 0.0);
        assert_relative_eq!(a.phi1, 180.0, epsilon = 1e-12);
    }
}
