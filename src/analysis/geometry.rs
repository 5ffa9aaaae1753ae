//! Frame algebra shared by the pair, step and local helical builders.

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use super::error::Singularity;

/// Angle between two vectors in radians, in `[0, π]`.
///
/// The cosine is clamped so that rounding on (anti)parallel unit vectors
/// never produces NaN.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Rotation matrix for a right-handed rotation of `angle` radians about a
/// unit `axis`.
pub fn axis_rotation(axis: &Vector3<f64>, angle: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Unit::new_unchecked(*axis), angle).into_inner()
}

/// Returns `magnitude` with the sign of `orientation`; zero orientation
/// counts as positive.
#[inline]
pub fn signed(magnitude: f64, orientation: f64) -> f64 {
    if orientation < 0.0 { -magnitude } else { magnitude }
}

/// Outcome of relating two axes through the axis perpendicular to both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hinge {
    /// The axes coincide; there is nothing to bend.
    Straight,
    /// Unit hinge axis and the bend angle (radians) between the two axes.
    Bent { axis: Vector3<f64>, angle: f64 },
}

/// Hinge axis `normalize(from × to)` and the angle between `from` and `to`.
///
/// A cross product shorter than `tolerance` means the axes are parallel. When
/// they point the same way the pair is [`Hinge::Straight`]; when they point
/// opposite ways the half-angle construction has no defined axis.
pub fn hinge(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
    tolerance: f64,
    what: &'static str,
) -> Result<Hinge, Singularity> {
    let cross = from.cross(to);
    let norm = cross.norm();
    if norm < tolerance {
        return if from.dot(to) > 0.0 {
            Ok(Hinge::Straight)
        } else {
            Err(Singularity(what))
        };
    }
    Ok(Hinge::Bent {
        axis: cross / norm,
        angle: angle_between(from, to),
    })
}

/// Average of two rotation matrices, each column rescaled to unit length.
///
/// Both inputs are expected to share one common axis after the half-angle
/// rotation; the remaining two averaged columns are then orthogonal and only
/// need rescaling.
pub fn mean_rotation(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    let mut mean = (a + b) * 0.5;
    for mut column in mean.column_iter_mut() {
        let norm = column.norm();
        if norm > 0.0 {
            column /= norm;
        }
    }
    mean
}

/// Nearest proper rotation to `m` in the Frobenius sense.
///
/// Used for the plain average of two base frames, which is not orthonormal
/// unless the frames coincide.
pub fn nearest_rotation(m: &Matrix3<f64>) -> Matrix3<f64> {
    let svd = m.svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return *m;
    };
    let mut r = u * v_t;
    if r.determinant() < 0.0 {
        let mut u = u;
        let flipped = -u.column(2).into_owned();
        u.set_column(2, &flipped);
        r = u * v_t;
    }
    r
}

/// Components of `v` along the three columns of `frame`.
#[inline]
pub fn project(v: &Vector3<f64>, frame: &Matrix3<f64>) -> Vector3<f64> {
    frame.transpose() * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn angle_is_clamped_for_parallel_vectors() {
        let v = Vector3::new(0.3, 0.4, 0.5).normalize();
        assert_eq!(angle_between(&v, &v), 0.0);
        assert!(approx_eq(angle_between(&v, &(-v)), PI, 1e-12));
        assert!(approx_eq(angle_between(&Vector3::x(), &Vector3::y()), FRAC_PI_2, 1e-12));
        assert_eq!(angle_between(&Vector3::zeros(), &Vector3::x()), 0.0);
    }

    #[test]
    fn axis_rotation_is_right_handed() {
        let r = axis_rotation(&Vector3::z(), FRAC_PI_2);
        assert!((r * Vector3::x() - Vector3::y()).norm() < 1e-12);
        assert!(approx_eq(r.determinant(), 1.0, 1e-12));
    }

    #[test]
    fn hinge_rotation_carries_from_towards_to() {
        let from = Vector3::new(0.0, 0.2, 1.0).normalize();
        let to = Vector3::new(0.3, -0.1, 1.0).normalize();
        let Hinge::Bent { axis, angle } = hinge(&from, &to, 1e-8, "test").unwrap() else {
            panic!("expected a bent hinge");
        };
        let rotated = axis_rotation(&axis, angle) * from;
        assert!((rotated - to).norm() < 1e-12);
    }

    #[test]
    fn hinge_distinguishes_parallel_from_antiparallel() {
        let v = Vector3::new(1.0, 2.0, 3.0).normalize();
        assert_eq!(hinge(&v, &v, 1e-8, "test"), Ok(Hinge::Straight));
        assert_eq!(hinge(&v, &(-v), 1e-8, "opposed"), Err(Singularity("opposed")));
    }

    #[test]
    fn signed_follows_orientation() {
        assert_eq!(signed(3.0, -0.1), -3.0);
        assert_eq!(signed(3.0, 0.1), 3.0);
        assert_eq!(signed(3.0, 0.0), 3.0);
    }

    #[test]
    fn mean_of_rotations_about_shared_axis_is_halfway() {
        let a = axis_rotation(&Vector3::z(), 0.2);
        let b = axis_rotation(&Vector3::z(), 0.8);
        let mean = mean_rotation(&a, &b);
        let expected = axis_rotation(&Vector3::z(), 0.5);
        assert!((mean - expected).amax() < 1e-12);
    }

    #[test]
    fn nearest_rotation_recovers_orthonormal_matrix() {
        let a = axis_rotation(&Vector3::new(1.0, 1.0, 0.0).normalize(), 0.4);
        let b = axis_rotation(&Vector3::new(0.0, 1.0, 1.0).normalize(), -0.3);
        let r = nearest_rotation(&((a + b) * 0.5));
        assert!((r.transpose() * r - Matrix3::identity()).amax() < 1e-12);
        assert!(approx_eq(r.determinant(), 1.0, 1e-12));

        let exact = axis_rotation(&Vector3::x(), 1.0);
        assert!((nearest_rotation(&exact) - exact).amax() < 1e-12);
    }

    #[test]
    fn projection_onto_frame_columns() {
        let frame = axis_rotation(&Vector3::z(), FRAC_PI_2);
        let p = project(&Vector3::new(0.0, 2.0, 1.0), &frame);
        assert!((p - Vector3::new(2.0, 0.0, 1.0)).norm() < 1e-12);
    }
}
