//! Base-pair frames and the six intra-pair parameters.
//!
//! Two frames come out of every pair. The parameters are measured in the
//! half-angle frame `Rm`, obtained by bending both bases about the hinge of
//! their y-axes until those coincide. Steps and local helical parameters are
//! measured between plain averages of the two base frames instead, see
//! [`pair_frame`].
//!
//! Both frames are kept orthonormal. `Rm` has its columns rescaled after
//! averaging, and the plain average is projected onto the nearest rotation.
//! A raw average has x- and z-columns of length `cos(propeller / 2)`, so
//! shear and stagger projected onto it would shrink by that factor.

use nalgebra::Vector3;

use super::error::Singularity;
use super::geometry::{
    Hinge, angle_between, axis_rotation, hinge, mean_rotation, nearest_rotation, project, signed,
};
use crate::model::frame::Frame;
use crate::model::params::BasePairParams;

/// Builds the half-angle mean frame of bases `a` (strand I) and `b` (strand
/// II, already oriented) and measures shear, stretch, stagger, buckle,
/// propeller and opening.
///
/// Y-axes that are parallel and point the same way need no bending: buckle
/// and opening are zero and propeller is the angle between the x-axes. This
/// is the case for a symmetric pair. Fails when the two y-axes are
/// anti-parallel, which leaves the hinge axis undefined.
pub fn build_pair(
    a: &Frame,
    b: &Frame,
    tolerance: f64,
) -> Result<(Frame, BasePairParams), Singularity> {
    let (ra, rb, bend, gamma) = match hinge(
        &b.y_axis(),
        &a.y_axis(),
        tolerance,
        "paired bases have anti-parallel y-axes",
    )? {
        Hinge::Straight => (a.rotation, b.rotation, 0.0, None),
        Hinge::Bent { axis, angle } => (
            axis_rotation(&axis, -angle / 2.0) * a.rotation,
            axis_rotation(&axis, angle / 2.0) * b.rotation,
            angle,
            Some(axis),
        ),
    };

    let rm = mean_rotation(&ra, &rb);
    let m_x: Vector3<f64> = rm.column(0).into_owned();
    let m_y: Vector3<f64> = rm.column(1).into_owned();

    let xa: Vector3<f64> = ra.column(0).into_owned();
    let xb: Vector3<f64> = rb.column(0).into_owned();
    let propeller = signed(angle_between(&xb, &xa), xb.cross(&xa).dot(&m_y));

    let phase = gamma.map_or(0.0, |g| {
        signed(angle_between(&g, &m_x), g.cross(&m_x).dot(&m_y))
    });

    let d = project(&(a.origin - b.origin), &rm);
    let origin = (a.origin + b.origin) * 0.5;

    let params = BasePairParams {
        shear: d.x,
        stretch: d.y,
        stagger: d.z,
        buckle: (bend * phase.cos()).to_degrees(),
        propeller: propeller.to_degrees(),
        opening: (bend * phase.sin()).to_degrees(),
    };
    Ok((Frame::new(origin, rm), params))
}

/// Reference frame of a base pair used for step and local helical analysis:
/// the arithmetic mean of both origins and of both rotations, the latter
/// projected back onto the nearest proper rotation.
pub fn pair_frame(a: &Frame, b: &Frame) -> Frame {
    Frame::new(
        (a.origin + b.origin) * 0.5,
        nearest_rotation(&((a.rotation + b.rotation) * 0.5)),
    )
}
