//! Structs related to single HPO terms: ids, groups and term views

use core::fmt::Debug;

use crate::Ontology;

mod group;
mod hpoterm;
mod hpotermid;
mod information_content;
pub(crate) mod internal;

pub use group::{HpoGroup, Iter as HpoTermIds};
pub use hpoterm::HpoTerm;
pub use hpotermid::HpoTermId;
pub use information_content::{InformationContent, InformationContentKind};

/// A set of parent [`HpoTermId`]s
pub type HpoParents = HpoGroup;

/// A set of child [`HpoTermId`]s
pub type HpoChildren = HpoGroup;

/// Iterates [`HpoTerm`]s, resolving the ids of an [`HpoGroup`] against
/// the ontology
pub struct Iter<'a> {
    ids: group::Iter<'a>,
    ontology: &'a Ontology,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(ids: group::Iter<'a>, ontology: &'a Ontology) -> Self {
        Iter { ids, ontology }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| {
            HpoTerm::try_new(self.ontology, id)
                .unwrap_or_else(|_| panic!("invalid HPO term in group: {id}"))
        })
    }
}

impl Debug for Iter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HpoTermIterator")
    }
}

/// An [`HpoTerm`] iterator over an owned [`HpoGroup`]
///
/// Used where a group is created on the fly, e.g. by
/// [`HpoTerm::common_ancestors`], and must be carried along with the
/// iterator.
pub struct Combined<'a> {
    group: HpoGroup,
    ontology: &'a Ontology,
}

impl<'a> Combined<'a> {
    pub(crate) fn new(group: HpoGroup, ontology: &'a Ontology) -> Self {
        Self { group, ontology }
    }

    /// Returns an iterator of the contained [`HpoTerm`]s
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.group.iter(), self.ontology)
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.group.len()
    }

    /// Returns `true` if there are no terms
    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Returns the underlying id group
    pub fn ids(&self) -> &HpoGroup {
        &self.group
    }
}

impl<'a> IntoIterator for &'a Combined<'a> {
    type Item = HpoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
