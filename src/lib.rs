//! Helical parameters of coarse-grained double-stranded DNA.
//!
//! Each base is given a reference frame by least-squares superposition of its
//! side-chain beads onto a standard geometry. Paired bases are combined into
//! base-pair frames, and consecutive base pairs into step frames. Three
//! parameter tables come out of it: base-pair parameters, step parameters
//! and local helical parameters.
//!
//! # Features
//!
//! - **Frame fitting**: quaternion superposition with fit RMSD, degenerate
//!   bead sets reported instead of resolved arbitrarily
//! - **Base-pair parameters**: shear, stretch, stagger, buckle, propeller, opening
//! - **Step parameters**: shift, slide, rise, tilt, roll, twist
//! - **Local helical parameters**: x/y-displacement, helical rise, inclination,
//!   tip, helical twist
//! - **I/O**: coarse-grained PDB and GRO input, column-oriented JSON tables,
//!   PDB pseudo-atoms for frame origins
//!
//! # Quick Start
//!
//! The entry point is [`analyze`], which takes the residues of a duplex in
//! file order (strand I 5'→3', then strand II 5'→3') and an
//! [`AnalysisConfig`]:
//!
//! ```
//! use cghelix::{
//!     AnalysisConfig, BaseType, Bead, Frame, ReferenceGeometry, Residue, StandardBases, analyze,
//! };
//! use nalgebra::{Rotation3, Vector3};
//!
//! // Place the standard beads of a base so that its frame is `frame`.
//! let reference = StandardBases::embedded();
//! let place = |index: usize, base: BaseType, frame: &Frame| {
//!     let beads: Vec<Bead> = reference
//!         .lookup(base)
//!         .unwrap()
//!         .beads
//!         .iter()
//!         .map(|b| {
//!             let p = frame.to_global(&Vector3::from(b.position));
//!             Bead::new(b.name.clone(), [p.x, p.y, p.z])
//!         })
//!         .collect();
//!     Residue::new(index, format!("D{base}")).with_beads(beads)
//! };
//!
//! // Two stacked G·C pairs: 36° twist, 3.4 Å rise.
//! let lower = Frame::identity();
//! let upper = Frame::new(
//!     Vector3::new(0.0, 0.0, 3.4),
//!     Rotation3::from_axis_angle(&Vector3::z_axis(), 36f64.to_radians()).into_inner(),
//! );
//! let residues = vec![
//!     place(1, BaseType::G, &lower),
//!     place(2, BaseType::G, &upper),
//!     place(3, BaseType::C, &upper.with_flipped_yz()),
//!     place(4, BaseType::C, &lower.with_flipped_yz()),
//! ];
//!
//! let analysis = analyze(&residues, &AnalysisConfig::default())?;
//! assert_eq!(analysis.base_pairs.len(), 2);
//!
//! let step = analysis.steps.get(0).unwrap();
//! assert!((step.twist - 36.0).abs() < 1e-6);
//! assert!((step.rise - 3.4).abs() < 1e-6);
//!
//! let local = analysis.local.get(0).unwrap();
//! assert!((local.h_twist - 36.0).abs() < 1e-6);
//! # Ok::<(), cghelix::AnalysisError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Structure readers (PDB, GRO) and result writers (JSON, PDB centers)
//! - [`analyze`] / [`Pipeline`] — The full analysis
//! - [`AnalysisConfig`] — Reference geometry, tolerances and parallelism
//!
//! # Data Types
//!
//! ## Input
//!
//! - [`Residue`] — One nucleotide with its named beads
//! - [`Bead`] — Named bead position
//! - [`BaseType`] — A, C, G or T
//!
//! ## Output
//!
//! - [`HelicalAnalysis`] — Frames and parameter tables of one duplex
//! - [`Frame`] — Origin plus rotation matrix whose columns are the local axes
//! - [`ParameterTable`] — Ordered records, serialized column by column
//! - [`BasePairParams`], [`StepParams`], [`LocalHelicalParams`] — One record each
//!
//! ## Reference Geometry
//!
//! - [`ReferenceGeometry`] — Provider of standard beads per base type
//! - [`StandardBases`] — Embedded or user-supplied TOML geometry

mod analysis;
mod model;

pub mod io;

pub use model::bead::Bead;
pub use model::frame::Frame;
pub use model::params::{
    BasePairParams, ColumnSummary, LocalHelicalParams, ParameterTable, Record, StepParams,
};
pub use model::residue::{Residue, pair_partner};
pub use model::types::{BaseType, ParseBaseTypeError};

pub use analysis::{
    AnalysisConfig, BaseFit, BeadSet, HelicalAnalysis, Pipeline, ReferenceBead,
    ReferenceGeometry, Singularity, Stage, StandardBases, Superposition, SuperpositionError,
    analyze, build_local, build_pair, build_step, fit_base, load_reference, orient, pair_frame,
    quaternion_to_rotation, superpose,
};

pub use analysis::Error as AnalysisError;
