use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::disease::DiseaseIterator;
use crate::annotations::{AnnotationId, Disease};
use crate::term::HpoGroup;
use crate::{HpoError, HpoTermId};

/// A set of [`DecipherDiseaseId`]s
pub type DecipherDiseases = HashSet<DecipherDiseaseId>;

/// A unique identifier for a [`DecipherDisease`]
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct DecipherDiseaseId {
    inner: u32,
}

impl AnnotationId for DecipherDiseaseId {
    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for DecipherDiseaseId {
    type Error = HpoError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(DecipherDiseaseId {
            inner: value.parse::<u32>()?,
        })
    }
}

impl From<u32> for DecipherDiseaseId {
    fn from(inner: u32) -> Self {
        DecipherDiseaseId { inner }
    }
}

impl Display for DecipherDiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DECIPHER:{}", self.inner)
    }
}

/// A single DECIPHER disease
#[derive(Default, Debug, Clone)]
pub struct DecipherDisease {
    id: DecipherDiseaseId,
    name: String,
    hpos: HpoGroup,
}

impl Disease for DecipherDisease {
    type Id = DecipherDiseaseId;

    fn new(id: Self::Id, name: &str) -> DecipherDisease {
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

impl PartialEq for DecipherDisease {
    fn eq(&self, other: &DecipherDisease) -> bool {
        self.id == other.id
    }
}

impl Eq for DecipherDisease {}

impl Hash for DecipherDisease {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Iterates [`DecipherDisease`]s
pub type DecipherDiseaseIterator<'a> = DiseaseIterator<'a, DecipherDiseaseId>;

impl<'a> Iterator for DiseaseIterator<'a, DecipherDiseaseId> {
    type Item = &'a DecipherDisease;
    fn next(&mut self) -> Option<Self::Item> {
        self.diseases.next().map(|decipher_id| {
            self.ontology
                .decipher_disease(decipher_id)
                .expect("disease must exist in ontology when it is linked to a term")
        })
    }
}
