//! Base reference frames from quaternion least-squares superposition.
//!
//! The observed side-chain beads `E` of a residue are superposed onto the
//! standard beads `S` of its base type. The optimal rotation is the unit
//! quaternion that maximizes `Σ e_i · R s_i`, found as the eigenvector of the
//! largest eigenvalue of the symmetric 4×4 key matrix built from the
//! cross-covariance of the centered bead sets.

use nalgebra::{Matrix3, Matrix4, SymmetricEigen, Vector3, Vector4};

use super::error::Error;
use super::reference::ReferenceGeometry;
use crate::model::frame::Frame;
use crate::model::residue::Residue;

/// Result of superposing standard beads onto observed ones: `e ≈ R s + t`.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
    /// Unit quaternion `(q0, q1, q2, q3)` with scalar part first. Its sign is
    /// whatever the eigen solver returned; `R(q) = R(-q)`.
    pub quaternion: Vector4<f64>,
    /// Root-mean-square distance between `R s + t` and `e`.
    pub rmsd: f64,
}

/// Why a superposition is not possible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SuperpositionError {
    #[error("bead sets differ in length: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("need at least 3 beads to fix a frame, got {0}")]
    TooFewBeads(usize),

    /// The two largest eigenvalues of the key matrix are tied; the bead set
    /// is collinear or otherwise too symmetric to fix a rotation.
    #[error(
        "degenerate superposition: largest eigenvalues {largest:.3e} and {second:.3e} are tied"
    )]
    EigenvalueTie { largest: f64, second: f64 },
}

/// Standard formula for the rotation matrix of a unit quaternion.
///
/// Quadratic in `q`, so `q` and `-q` give the same matrix.
pub fn quaternion_to_rotation(q: &Vector4<f64>) -> Matrix3<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    Matrix3::new(
        q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3,
        2.0 * (q1 * q2 - q0 * q3),
        2.0 * (q1 * q3 + q0 * q2),
        2.0 * (q2 * q1 + q0 * q3),
        q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3,
        2.0 * (q2 * q3 - q0 * q1),
        2.0 * (q3 * q1 - q0 * q2),
        2.0 * (q3 * q2 + q0 * q1),
        q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3,
    )
}

fn centroid(points: &[Vector3<f64>]) -> Vector3<f64> {
    points.iter().sum::<Vector3<f64>>() / points.len() as f64
}

/// Horn key matrix of a cross-covariance `c`, where `c[(j, k)]` correlates
/// standard coordinate `j` with observed coordinate `k`.
fn key_matrix(c: &Matrix3<f64>) -> Matrix4<f64> {
    Matrix4::new(
        c[(0, 0)] + c[(1, 1)] + c[(2, 2)],
        c[(1, 2)] - c[(2, 1)],
        c[(2, 0)] - c[(0, 2)],
        c[(0, 1)] - c[(1, 0)],
        c[(1, 2)] - c[(2, 1)],
        c[(0, 0)] - c[(1, 1)] - c[(2, 2)],
        c[(0, 1)] + c[(1, 0)],
        c[(2, 0)] + c[(0, 2)],
        c[(2, 0)] - c[(0, 2)],
        c[(0, 1)] + c[(1, 0)],
        -c[(0, 0)] + c[(1, 1)] - c[(2, 2)],
        c[(1, 2)] + c[(2, 1)],
        c[(0, 1)] - c[(1, 0)],
        c[(2, 0)] + c[(0, 2)],
        c[(1, 2)] + c[(2, 1)],
        -c[(0, 0)] - c[(1, 1)] + c[(2, 2)],
    )
}

/// Superposes `standard` onto `observed`.
///
/// `tie_tolerance` is relative to the largest eigenvalue magnitude of the key
/// matrix.
pub fn superpose(
    standard: &[Vector3<f64>],
    observed: &[Vector3<f64>],
    tie_tolerance: f64,
) -> Result<Superposition, SuperpositionError> {
    let n = standard.len();
    if n != observed.len() {
        return Err(SuperpositionError::LengthMismatch(n, observed.len()));
    }
    if n < 3 {
        return Err(SuperpositionError::TooFewBeads(n));
    }

    let s_cog = centroid(standard);
    let e_cog = centroid(observed);

    // C = (SᵀE − (Sᵀ1)(1ᵀE)/n) / (n − 1), accumulated on centered beads.
    let covariance = standard
        .iter()
        .zip(observed)
        .map(|(s, e)| (s - s_cog) * (e - e_cog).transpose())
        .sum::<Matrix3<f64>>()
        / (n - 1) as f64;

    let eigen = SymmetricEigen::new(key_matrix(&covariance));

    let mut order: Vec<usize> = (0..4).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
    let largest = eigen.eigenvalues[order[0]];
    let second = eigen.eigenvalues[order[1]];

    let scale = eigen.eigenvalues.amax();
    if scale == 0.0 || largest - second <= tie_tolerance * scale {
        return Err(SuperpositionError::EigenvalueTie { largest, second });
    }

    let quaternion: Vector4<f64> = eigen.eigenvectors.column(order[0]).into_owned();
    let rotation = quaternion_to_rotation(&quaternion);
    let translation = e_cog - rotation * s_cog;

    let sum_sq: f64 = standard
        .iter()
        .zip(observed)
        .map(|(s, e)| (rotation * s + translation - e).norm_squared())
        .sum();

    Ok(Superposition {
        rotation,
        translation,
        quaternion,
        rmsd: (sum_sq / n as f64).sqrt(),
    })
}

/// Base frame of one residue together with the quality of its fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseFit {
    pub frame: Frame,
    pub rmsd: f64,
}

/// Fits the reference frame of `residue` against `reference`.
///
/// The residue's side-chain beads are matched to the reference beads by name;
/// the number of side-chain beads must equal the reference count for the
/// base type.
pub fn fit_base(
    residue: &Residue,
    reference: &dyn ReferenceGeometry,
    tie_tolerance: f64,
) -> Result<BaseFit, Error> {
    let base = residue
        .base_type()
        .map_err(|_| Error::UnsupportedResidue {
            index: residue.index,
            name: residue.name.clone(),
        })?;

    let standard = reference.lookup(base).ok_or_else(|| {
        Error::geometry_fit(residue.index, base, "no reference geometry for this base type")
    })?;

    let found = residue.side_chain_beads().count();
    if found != standard.len() {
        return Err(Error::geometry_fit(
            residue.index,
            base,
            format!(
                "expected {} side-chain beads, found {}",
                standard.len(),
                found
            ),
        ));
    }

    let observed = standard
        .names()
        .map(|name| {
            residue
                .bead(name)
                .map(|b| Vector3::from(b.position))
                .ok_or_else(|| {
                    Error::geometry_fit(residue.index, base, format!("missing bead {name}"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let standard: Vec<Vector3<f64>> = standard.positions().map(Vector3::from).collect();

    let fit = superpose(&standard, &observed, tie_tolerance)
        .map_err(|e| Error::geometry_fit(residue.index, base, e.to_string()))?;

    Ok(BaseFit {
        frame: Frame::new(fit.translation, fit.rotation),
        rmsd: fit.rmsd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reference::{BeadSet, StandardBases};
    use crate::model::bead::Bead;
    use crate::model::types::BaseType;
    use nalgebra::{Rotation3, UnitQuaternion};

    const TOL: f64 = 1e-10;

    fn known_rotation() -> Matrix3<f64> {
        Rotation3::from_axis_angle(
            &nalgebra::Unit::new_normalize(Vector3::new(0.3, -0.8, 0.5)),
            1.234,
        )
        .into_inner()
    }

    fn place(set: &BeadSet, rotation: &Matrix3<f64>, t: &Vector3<f64>) -> Vec<Bead> {
        set.beads
            .iter()
            .map(|b| {
                let p = rotation * Vector3::from(b.position) + t;
                Bead::new(b.name.clone(), [p.x, p.y, p.z])
            })
            .collect()
    }

    #[test]
    fn exact_fit_recovers_rotation_and_translation_for_every_base() {
        let reference = StandardBases::embedded();
        let r0 = known_rotation();
        let t = Vector3::new(12.5, -3.25, 40.0);

        for (i, base) in BaseType::ALL.into_iter().enumerate() {
            let set = reference.lookup(base).unwrap();
            let residue = Residue::new(i + 1, base.to_string()).with_beads(place(set, &r0, &t));

            let fit = fit_base(&residue, reference, TOL).unwrap();
            assert!((fit.frame.rotation - r0).amax() < 1e-9, "{base}: rotation");
            assert!((fit.frame.origin - t).norm() < 1e-9, "{base}: origin");
            assert!(fit.rmsd < 1e-9, "{base}: rmsd {}", fit.rmsd);
            assert!(fit.frame.is_orthonormal(1e-6), "{base}: orthonormality");
        }
    }

    #[test]
    fn fitted_frames_are_orthonormal_for_noisy_beads() {
        let reference = StandardBases::embedded();
        let set = reference.lookup(BaseType::G).unwrap();
        let mut beads = place(set, &known_rotation(), &Vector3::new(1.0, 2.0, 3.0));
        beads[0].position[2] += 0.31;
        beads[2].position[0] -= 0.17;
        beads[3].position[1] += 0.22;

        let residue = Residue::new(1, "DG").with_beads(beads);
        let fit = fit_base(&residue, reference, TOL).unwrap();
        assert!(fit.frame.is_orthonormal(1e-6));
        assert!(fit.rmsd > 0.0);
    }

    #[test]
    fn quaternion_sign_does_not_change_rotation() {
        let q = Vector4::new(0.7, -0.1, 0.5, 0.3).normalize();
        assert!((quaternion_to_rotation(&q) - quaternion_to_rotation(&(-q))).amax() < 1e-15);
    }

    #[test]
    fn quaternion_formula_matches_nalgebra() {
        let q = Vector4::new(0.7, -0.1, 0.5, 0.3).normalize();
        let unit = UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q[0], q[1], q[2], q[3]));
        let expected = unit.to_rotation_matrix().into_inner();
        assert!((quaternion_to_rotation(&q) - expected).amax() < 1e-12);
    }

    #[test]
    fn unsupported_residue_is_rejected() {
        let residue = Residue::new(3, "DU").with_beads(vec![Bead::new("SC1", [0.0; 3])]);
        let err = fit_base(&residue, StandardBases::embedded(), TOL).unwrap_err();
        assert!(matches!(err, Error::UnsupportedResidue { index: 3, .. }));
    }

    #[test]
    fn bead_count_mismatch_is_a_fit_error() {
        let reference = StandardBases::embedded();
        let set = reference.lookup(BaseType::C).unwrap();
        let residue = Residue::new(5, "DA")
            .with_beads(place(set, &Matrix3::identity(), &Vector3::zeros()));
        let err = fit_base(&residue, reference, TOL).unwrap_err();
        match err {
            Error::GeometryFit { index, base, detail } => {
                assert_eq!(index, 5);
                assert_eq!(base, BaseType::A);
                assert!(detail.contains("expected 4"), "{detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_named_bead_is_a_fit_error() {
        let residue = Residue::new(1, "DT").with_beads(vec![
            Bead::new("SC1", [0.0, 0.0, 0.0]),
            Bead::new("SC2", [1.0, 0.0, 0.0]),
            Bead::new("SC5", [0.0, 1.0, 0.0]),
        ]);
        let err = fit_base(&residue, StandardBases::embedded(), TOL).unwrap_err();
        assert!(err.to_string().contains("missing bead SC3"), "{err}");
    }

    #[test]
    fn missing_reference_is_a_fit_error() {
        let reference = StandardBases {
            bases: Default::default(),
        };
        let residue = Residue::new(1, "DC");
        let err = fit_base(&residue, &reference, TOL).unwrap_err();
        assert!(matches!(err, Error::GeometryFit { .. }));
    }

    #[test]
    fn collinear_beads_are_flagged_as_degenerate() {
        let line = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        ];
        let shifted: Vec<Vector3<f64>> = line.iter().map(|p| p + Vector3::new(0.0, 5.0, 0.0)).collect();
        let err = superpose(&line, &shifted, TOL).unwrap_err();
        assert!(matches!(err, SuperpositionError::EigenvalueTie { .. }));
    }

    #[test]
    fn superpose_rejects_short_or_mismatched_sets() {
        let p = [Vector3::zeros(), Vector3::x()];
        assert_eq!(superpose(&p, &p, TOL), Err(SuperpositionError::TooFewBeads(2)));
        let q = [Vector3::zeros(), Vector3::x(), Vector3::y()];
        assert_eq!(
            superpose(&q, &p, TOL),
            Err(SuperpositionError::LengthMismatch(3, 2))
        );
    }

    #[test]
    fn superposition_error_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(SuperpositionError::TooFewBeads(2));
        assert_eq!(err.to_string(), "need at least 3 beads to fix a frame, got 2");
        assert_eq!(
            SuperpositionError::EigenvalueTie { largest: 2.0, second: 2.0 }.to_string(),
            "degenerate superposition: largest eigenvalues 2.000e0 and 2.000e0 are tied"
        );
    }
}
