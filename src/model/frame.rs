use nalgebra::{Matrix3, Vector3};

/// Local right-handed coordinate system of a base, base pair or step.
///
/// The columns of `rotation` are the unit x-, y- and z-axes expressed in the
/// laboratory frame. Frames produced by the analysis keep `RᵀR = I` and
/// `det(R) = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Vector3<f64>,
    pub rotation: Matrix3<f64>,
}

impl Frame {
    pub fn new(origin: Vector3<f64>, rotation: Matrix3<f64>) -> Self {
        Self { origin, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Matrix3::identity())
    }

    #[inline]
    pub fn axis(&self, i: usize) -> Vector3<f64> {
        self.rotation.column(i).into_owned()
    }

    #[inline]
    pub fn x_axis(&self) -> Vector3<f64> {
        self.axis(0)
    }

    #[inline]
    pub fn y_axis(&self) -> Vector3<f64> {
        self.axis(1)
    }

    #[inline]
    pub fn z_axis(&self) -> Vector3<f64> {
        self.axis(2)
    }

    /// Returns a copy with the y- and z-axes negated. The x-axis is kept.
    pub fn with_flipped_yz(&self) -> Self {
        let mut rotation = self.rotation;
        rotation.set_column(1, &(-self.y_axis()));
        rotation.set_column(2, &(-self.z_axis()));
        Self::new(self.origin, rotation)
    }

    /// Maps a point given in this frame's local coordinates to the laboratory frame.
    pub fn to_global(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local + self.origin
    }

    /// Largest deviation of `RᵀR` from the identity and of `det(R)` from one.
    pub fn orthonormality_error(&self) -> f64 {
        let gram = self.rotation.transpose() * self.rotation - Matrix3::identity();
        let det = (self.rotation.determinant() - 1.0).abs();
        gram.amax().max(det)
    }

    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        self.orthonormality_error() <= tolerance
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;

    #[test]
    fn identity_is_orthonormal() {
        let frame = Frame::identity();
        assert!(frame.is_orthonormal(1e-12));
        assert_eq!(frame.x_axis(), Vector3::x());
        assert_eq!(frame.z_axis(), Vector3::z());
    }

    #[test]
    fn flipping_keeps_x_and_handedness() {
        let rotation = Rotation3::from_euler_angles(0.3, -0.7, 1.1).into_inner();
        let frame = Frame::new(Vector3::new(1.0, 2.0, 3.0), rotation);
        let flipped = frame.with_flipped_yz();

        assert_eq!(flipped.x_axis(), frame.x_axis());
        assert_eq!(flipped.y_axis(), -frame.y_axis());
        assert_eq!(flipped.z_axis(), -frame.z_axis());
        assert_eq!(flipped.origin, frame.origin);
        assert!(flipped.is_orthonormal(1e-12));
        assert_eq!(flipped.with_flipped_yz(), frame);
    }

    #[test]
    fn skewed_matrix_is_not_orthonormal() {
        let mut frame = Frame::identity();
        frame.rotation[(0, 1)] = 0.2;
        assert!(!frame.is_orthonormal(1e-6));
    }

    #[test]
    fn to_global_applies_rotation_then_translation() {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let frame = Frame::new(Vector3::new(0.0, 0.0, 5.0), rotation.into_inner());
        let p = frame.to_global(&Vector3::new(1.0, 0.0, 0.0));
        assert!((p - Vector3::new(0.0, 1.0, 5.0)).norm() < 1e-12);
    }
}
