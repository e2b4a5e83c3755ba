use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::disease::DiseaseIterator;
use crate::annotations::{AnnotationId, Disease};
use crate::term::HpoGroup;
use crate::{HpoError, HpoTermId};

/// A set of [`OrphaDiseaseId`]s
pub type OrphaDiseases = HashSet<OrphaDiseaseId>;

/// A unique identifier for an [`OrphaDisease`]
///
/// With the standard Jax masterdata this is the Orphanet ORPHA code.
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct OrphaDiseaseId {
    inner: u32,
}

impl AnnotationId for OrphaDiseaseId {
    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for OrphaDiseaseId {
    type Error = HpoError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(OrphaDiseaseId {
            inner: value.parse::<u32>()?,
        })
    }
}

impl From<u32> for OrphaDiseaseId {
    fn from(inner: u32) -> Self {
        OrphaDiseaseId { inner }
    }
}

impl Display for OrphaDiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ORPHA:{}", self.inner)
    }
}

/// A single Orphanet disease
#[derive(Default, Debug, Clone)]
pub struct OrphaDisease {
    id: OrphaDiseaseId,
    name: String,
    hpos: HpoGroup,
}

impl Disease for OrphaDisease {
    type Id = OrphaDiseaseId;

    fn new(id: Self::Id, name: &str) -> OrphaDisease {
        Self {
            name: name.to_string(),
            id,
            hpos: HpoGroup::default(),
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn add_term<I: Into<HpoTermId>>(&mut self, term_id: I) -> bool {
        self.hpos.insert(term_id)
    }

    fn hpo_terms(&self) -> &HpoGroup {
        &self.hpos
    }
}

impl PartialEq for OrphaDisease {
    fn eq(&self, other: &OrphaDisease) -> bool {
        self.id == other.id
    }
}

impl Eq for OrphaDisease {}

impl Hash for OrphaDisease {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Iterates [`OrphaDisease`]s
pub type OrphaDiseaseIterator<'a> = DiseaseIterator<'a, OrphaDiseaseId>;

impl<'a> Iterator for DiseaseIterator<'a, OrphaDiseaseId> {
    type Item = &'a OrphaDisease;
    fn next(&mut self) -> Option<Self::Item> {
        self.diseases.next().map(|orpha_id| {
            self.ontology
                .orpha_disease(orpha_id)
                .expect("disease must exist in ontology when it is linked to a term")
        })
    }
}
