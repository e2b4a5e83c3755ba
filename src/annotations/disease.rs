use std::collections::hash_set;
use std::hash::Hash;

use crate::annotations::AnnotationId;
use crate::set::HpoSet;
use crate::term::HpoGroup;
use crate::{HpoTermId, Ontology};

/// Shared interface of [`super::OmimDisease`], [`super::OrphaDisease`]
/// and [`super::DecipherDisease`]
///
/// Every disease record has a unique id within its source, a display
/// name and the set of **directly** linked HPO terms. Ancestor
/// propagation happens on the term side only.
pub trait Disease: PartialEq + Eq + Hash + Clone {
    /// The id type of the disease source
    type Id: AnnotationId;

    /// Initializes a new disease record
    ///
    /// Records should be created through the ontology builder so every
    /// disease exists exactly once per registry.
    fn new(id: Self::Id, name: &str) -> Self;

    /// The unique id of the disease within its source
    fn id(&self) -> &Self::Id;

    /// The display name of the disease
    fn name(&self) -> &str;

    /// Records a direct link to an HPO term
    ///
    /// Returns `false` if the term was already linked.
    fn add_term<I: Into<HpoTermId>>(&mut self, term_id: I) -> bool;

    /// The directly linked HPO terms
    fn hpo_terms(&self) -> &HpoGroup;

    /// Returns an [`HpoSet`] of the directly linked terms
    fn to_hpo_set<'a>(&self, ontology: &'a Ontology) -> HpoSet<'a> {
        HpoSet::new(ontology, self.hpo_terms().clone())
    }
}

/// Iterates disease records from a set of disease ids
///
/// The concrete `Iterator` implementations live next to each disease
/// type because the registry lookup differs per source.
pub struct DiseaseIterator<'a, T> {
    pub(crate) ontology: &'a Ontology,
    pub(crate) diseases: hash_set::Iter<'a, T>,
}

impl<'a, T> DiseaseIterator<'a, T> {
    /// Constructs a new iterator over the given id set
    pub fn new(diseases: &'a std::collections::HashSet<T>, ontology: &'a Ontology) -> Self {
        DiseaseIterator {
            diseases: diseases.iter(),
            ontology,
        }
    }
}
