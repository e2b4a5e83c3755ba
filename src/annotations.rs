//! Genes and diseases that are linked to HPO terms
//!
//! The underlying principle for all annotations is the same:
//!
//! - Each record (gene or disease) has a unique numerical identifier
//!   within its own id space.
//! - Each record holds the [`crate::HpoTermId`]s it is **directly**
//!   linked to. The upward inheritance along `is_a` edges is recorded on
//!   the terms only (see [`crate::Ontology`]), never mirrored back onto
//!   the records.
//! - Records are owned by the ontology; one record exists per id.
//!
//! Diseases come in three families, [`OmimDisease`], [`OrphaDisease`] and
//! [`DecipherDisease`], each with an independent id space.

use core::fmt::Debug;
use core::hash::Hash;
use std::fmt::Display;

mod decipher_disease;
mod disease;
mod gene;
mod omim_disease;
mod orpha_disease;

pub use disease::{Disease, DiseaseIterator};
pub use gene::{Gene, GeneId, GeneIterator, Genes};

pub use decipher_disease::{
    DecipherDisease, DecipherDiseaseId, DecipherDiseaseIterator, DecipherDiseases,
};
pub use omim_disease::{OmimDisease, OmimDiseaseId, OmimDiseaseIterator, OmimDiseases};
pub use orpha_disease::{OrphaDisease, OrphaDiseaseId, OrphaDiseaseIterator, OrphaDiseases};

/// Common constraints for the ids of annotation records
///
/// An id must be unique only within its annotation type: a gene and a
/// disease may share the same numerical value.
pub trait AnnotationId:
    Clone
    + Copy
    + Debug
    + Hash
    + PartialEq
    + PartialOrd
    + Eq
    + Ord
    + Display
    + From<u32>
    + for<'a> TryFrom<&'a str>
{
    /// Returns the integer representation of the annotation id
    fn as_u32(&self) -> u32;
}
