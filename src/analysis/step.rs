//! Base-pair step frames and the six inter-pair parameters.
//!
//! The mid-step rotation is the column-normalised mean of the two bent
//! rotations, so it stays orthonormal. The x- and y-columns of the raw mean
//! have length `cos(twist / 2)`; shift and slide projected onto the raw mean
//! would shrink by that factor. Rise is measured along the shared z-axis and
//! is the same either way.

use nalgebra::Vector3;

use super::error::Singularity;
use super::geometry::{Hinge, angle_between, axis_rotation, hinge, mean_rotation, project, signed};
use crate::model::frame::Frame;
use crate::model::params::StepParams;

/// Builds the mid-step frame between consecutive base-pair frames and
/// measures shift, slide, rise, tilt, roll and twist.
///
/// Both frames are bent about the hinge of their z-axes by half the roll-tilt
/// angle, in opposite senses, so that the z-axes meet. The twist magnitude is
/// the angle between the y-axes of the unbent pair frames; its sign comes
/// from the bent y-axes about the mean z-axis.
pub fn build_step(
    first: &Frame,
    second: &Frame,
    tolerance: f64,
) -> Result<(Frame, StepParams), Singularity> {
    let (r1, r2, bend, axis) = match hinge(
        &first.z_axis(),
        &second.z_axis(),
        tolerance,
        "consecutive base pairs have anti-parallel z-axes",
    )? {
        Hinge::Straight => (first.rotation, second.rotation, 0.0, None),
        Hinge::Bent { axis, angle } => (
            axis_rotation(&axis, angle / 2.0) * first.rotation,
            axis_rotation(&axis, -angle / 2.0) * second.rotation,
            angle,
            Some(axis),
        ),
    };

    let rm = mean_rotation(&r1, &r2);
    let m_y: Vector3<f64> = rm.column(1).into_owned();
    let m_z: Vector3<f64> = rm.column(2).into_owned();

    let y1: Vector3<f64> = r1.column(1).into_owned();
    let y2: Vector3<f64> = r2.column(1).into_owned();
    let twist = signed(
        angle_between(&first.y_axis(), &second.y_axis()),
        y1.cross(&y2).dot(&m_z),
    );

    let phase = axis.map_or(0.0, |h| {
        signed(angle_between(&h, &m_y), h.cross(&m_y).dot(&m_z))
    });

    let d = project(&(second.origin - first.origin), &rm);
    let origin = (first.origin + second.origin) * 0.5;

    let params = StepParams {
        shift: d.x,
        slide: d.y,
        rise: d.z,
        tilt: (bend * phase.sin()).to_degrees(),
        roll: (bend * phase.cos()).to_degrees(),
        twist: twist.to_degrees(),
    };
    Ok((Frame::new(origin, rm), params))
}
