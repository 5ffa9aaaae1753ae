//! Local helical parameters of a base-pair step.
//!
//! The local helical axis is the direction perpendicular to both the change
//! of the x-axes and the change of the y-axes between the two pair frames.
//! Each frame is tipped onto that axis independently; displacements locate
//! the point where the axis passes the first base pair.

use nalgebra::{Matrix3, Vector3};

use super::error::Singularity;
use super::geometry::{Hinge, angle_between, axis_rotation, hinge, signed};
use crate::model::frame::Frame;
use crate::model::params::LocalHelicalParams;

/// A frame rotated about its own hinge so that its z-axis lies on the local
/// helical axis.
struct Aligned {
    rotation: Matrix3<f64>,
    /// Tip-inclination angle (radians) and the hinge it was removed about.
    tipped: Option<(f64, Vector3<f64>)>,
}

fn align(frame: &Frame, axis: &Vector3<f64>, tolerance: f64) -> Result<Aligned, Singularity> {
    Ok(
        match hinge(axis, &frame.z_axis(), tolerance, "base-pair normal opposes the helical axis")? {
            Hinge::Straight => Aligned {
                rotation: frame.rotation,
                tipped: None,
            },
            Hinge::Bent { axis: h, angle } => Aligned {
                rotation: axis_rotation(&h, -angle) * frame.rotation,
                tipped: Some((angle, h)),
            },
        },
    )
}

/// Measures x-displacement, y-displacement, helical rise, inclination, tip
/// and helical twist between consecutive base-pair frames.
///
/// Helical twist is the unsigned angle between the aligned y-axes, in
/// `[0°, 180°]`.
///
/// Identical pair orientations describe a straight step along the common
/// z-axis: only the helical rise can be non-zero. Otherwise the helical axis
/// must be well defined and, when the origins are offset off-axis, the
/// helical twist must not vanish.
pub fn build_local(
    first: &Frame,
    second: &Frame,
    tolerance: f64,
) -> Result<LocalHelicalParams, Singularity> {
    let dx = second.x_axis() - first.x_axis();
    let dy = second.y_axis() - first.y_axis();
    let travel = second.origin - first.origin;

    if dx.norm() < tolerance && dy.norm() < tolerance {
        return Ok(LocalHelicalParams {
            h_rise: travel.dot(&first.z_axis()),
            ..Default::default()
        });
    }

    let cross = dx.cross(&dy);
    let norm = cross.norm();
    if norm < tolerance {
        return Err(Singularity("local helical axis is undefined"));
    }
    let axis = cross / norm;

    let h1 = align(first, &axis, tolerance)?;
    let h2 = align(second, &axis, tolerance)?;

    let h1_x: Vector3<f64> = h1.rotation.column(0).into_owned();
    let h1_y: Vector3<f64> = h1.rotation.column(1).into_owned();
    let h2_y: Vector3<f64> = h2.rotation.column(1).into_owned();
    let hm_y = (h1_y + h2_y) * 0.5;

    let h_twist = angle_between(&h1_y, &h2_y);
    let h_rise = travel.dot(&axis);

    let (tip, inclination) = match h1.tipped {
        None => (0.0, 0.0),
        Some((angle, hinge1)) => {
            let phase = signed(angle_between(&hinge1, &h1_y), hinge1.cross(&hm_y).dot(&axis));
            (angle * phase.cos(), angle * phase.sin())
        }
    };

    let chord = travel - axis * h_rise;
    let (x_displacement, y_displacement) = if chord.norm() < tolerance {
        (0.0, 0.0)
    } else {
        let half = 0.5 * h_twist;
        if half.sin().abs() < tolerance {
            return Err(Singularity("helical twist vanishes for an off-axis step"));
        }
        let toward_axis =
            (axis_rotation(&axis, std::f64::consts::FRAC_PI_2 - half) * chord).normalize();
        let distance = chord.norm() * 0.5 / half.sin();
        let offset = -(toward_axis * distance);
        (offset.dot(&h1_x), offset.dot(&h1_y))
    };

    Ok(LocalHelicalParams {
        x_displacement,
        y_displacement,
        h_rise,
        inclination: inclination.to_degrees(),
        tip: tip.to_degrees(),
        h_twist: h_twist.to_degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Unit};

    const TOL: f64 = 1e-8;

    fn rot(axis: &Unit<Vector3<f64>>, deg: f64) -> Matrix3<f64> {
        Rotation3::from_axis_angle(axis, deg.to_radians()).into_inner()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Pair frame `k` of an ideal helix about the z-axis, with the pair
    /// origin displaced by `(dx, dy)` in its own frame and `tilt` applied
    /// before the helical turn.
    fn helix_frame(k: f64, twist: f64, rise: f64, dx: f64, dy: f64, tilt: &Matrix3<f64>) -> Frame {
        let turn = rot(&Vector3::z_axis(), k * twist);
        let rotation = turn * tilt;
        let origin = turn * Vector3::new(dx, dy, 0.0) + Vector3::z() * (k * rise);
        Frame::new(origin, rotation)
    }

    #[test]
    fn identical_frames_give_zero_local_parameters() {
        let f = Frame::new(
            Vector3::new(-1.0, 0.5, 7.0),
            Rotation3::from_euler_angles(1.0, -0.2, 0.3).into_inner(),
        );
        let p = build_local(&f, &f, TOL).unwrap();
        assert_eq!(p, LocalHelicalParams::default());
    }

    #[test]
    fn parallel_translation_is_pure_rise() {
        let first = Frame::identity();
        let second = Frame::new(Vector3::new(0.3, 0.0, 3.2), Matrix3::identity());
        let p = build_local(&first, &second, TOL).unwrap();
        assert!(approx(p.h_rise, 3.2));
        assert_eq!(p.h_twist, 0.0);
        assert_eq!(p.x_displacement, 0.0);
    }

    #[test]
    fn ideal_helix_recovers_twist_and_rise() {
        let i = Matrix3::identity();
        let first = helix_frame(0.0, 36.0, 3.4, 0.0, 0.0, &i);
        let second = helix_frame(1.0, 36.0, 3.4, 0.0, 0.0, &i);
        let p = build_local(&first, &second, TOL).unwrap();
        assert!(approx(p.h_twist, 36.0), "{p:?}");
        assert!(approx(p.h_rise, 3.4), "{p:?}");
        for v in [p.x_displacement, p.y_displacement, p.tip, p.inclination] {
            assert!(v.abs() < 1e-9, "{p:?}");
        }
    }

    #[test]
    fn off_axis_pairs_report_displacement() {
        let i = Matrix3::identity();
        for (dx, dy) in [(-2.5, 0.0), (0.0, 1.2), (1.5, -0.7)] {
            let first = helix_frame(0.0, 32.0, 3.3, dx, dy, &i);
            let second = helix_frame(1.0, 32.0, 3.3, dx, dy, &i);
            let p = build_local(&first, &second, TOL).unwrap();
            assert!(approx(p.x_displacement, dx), "dx {dx}: {p:?}");
            assert!(approx(p.y_displacement, dy), "dy {dy}: {p:?}");
            assert!(approx(p.h_rise, 3.3));
            assert!(approx(p.h_twist, 32.0));
        }
    }

    #[test]
    fn inclined_pairs_report_inclination() {
        let incline = rot(&Vector3::x_axis(), 20.0);
        let first = helix_frame(0.0, 36.0, 3.4, 0.0, 0.0, &incline);
        let second = helix_frame(1.0, 36.0, 3.4, 0.0, 0.0, &incline);
        let p = build_local(&first, &second, TOL).unwrap();
        assert!(approx(p.inclination, 20.0), "{p:?}");
        assert!(p.tip.abs() < 1e-9, "{p:?}");
        assert!(approx(p.h_twist, 36.0), "{p:?}");
    }

    #[test]
    fn helical_twist_is_unsigned() {
        let i = Matrix3::identity();
        let first = helix_frame(0.0, -30.0, 3.0, 0.0, 0.0, &i);
        let second = helix_frame(1.0, -30.0, 3.0, 0.0, 0.0, &i);
        let p = build_local(&first, &second, TOL).unwrap();
        assert!(approx(p.h_twist, 30.0), "{p:?}");
        assert!(approx(p.h_rise, 3.0), "{p:?}");
    }

    #[test]
    fn undefined_axis_is_singular() {
        // Pure bend about x changes only the y-axis; no axis is perpendicular
        // to both differences.
        let second = Frame::new(Vector3::z() * 3.0, rot(&Vector3::x_axis(), 10.0));
        let err = build_local(&Frame::identity(), &second, TOL).unwrap_err();
        assert_eq!(err, Singularity("local helical axis is undefined"));
    }

    #[test]
    fn off_axis_step_without_twist_is_singular() {
        // With this tolerance sin(18°) counts as zero while the axis is still
        // defined and the 1.5 Å offset leaves a chord of about 0.93 Å.
        let i = Matrix3::identity();
        let first = helix_frame(0.0, 36.0, 3.4, 1.5, 0.0, &i);
        let second = helix_frame(1.0, 36.0, 3.4, 1.5, 0.0, &i);
        let err = build_local(&first, &second, 0.35).unwrap_err();
        assert_eq!(err, Singularity("helical twist vanishes for an off-axis step"));
    }

    #[test]
    fn normal_opposing_axis_cannot_be_aligned() {
        let err = align(&Frame::identity(), &-Vector3::z(), TOL).err();
        assert_eq!(err, Some(Singularity("base-pair normal opposes the helical axis")));

        let aligned = align(&Frame::identity(), &Vector3::z(), TOL).unwrap();
        assert!(aligned.tipped.is_none());
    }
}
