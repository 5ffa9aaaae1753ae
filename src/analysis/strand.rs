use crate::model::frame::Frame;

/// Brings a fitted base frame into the duplex convention.
///
/// Residues of the second strand (`index >= total / 2`, zero-based) get their
/// y- and z-axes negated so that the z-axes of paired bases point the same
/// way. The x-axis is untouched, and so is every first-strand frame.
pub fn orient(frame: &Frame, index: usize, total: usize) -> Frame {
    if index >= total / 2 {
        frame.with_flipped_yz()
    } else {
        *frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Rotation3, Vector3};

    fn sample() -> Frame {
        let rotation = Rotation3::from_euler_angles(0.2, -0.4, 1.1).into_inner();
        Frame::new(Vector3::new(1.0, 2.0, 3.0), rotation)
    }

    #[test]
    fn first_strand_is_unchanged() {
        let frame = sample();
        assert_eq!(orient(&frame, 0, 8), frame);
        assert_eq!(orient(&frame, 3, 8), frame);
    }

    #[test]
    fn second_strand_flips_y_and_z_only() {
        let frame = sample();
        let flipped = orient(&frame, 4, 8);
        assert_eq!(flipped.origin, frame.origin);
        assert_eq!(flipped.x_axis(), frame.x_axis());
        assert_eq!(flipped.y_axis(), -frame.y_axis());
        assert_eq!(flipped.z_axis(), -frame.z_axis());
        assert!(flipped.is_orthonormal(1e-12));
    }

    #[test]
    fn flip_keeps_handedness() {
        let flipped = orient(&Frame::identity(), 1, 2);
        assert!((flipped.rotation.determinant() - 1.0).abs() < 1e-15);
        assert_eq!(
            flipped.rotation,
            Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0))
        );
    }
}
