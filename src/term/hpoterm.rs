use std::collections::{HashMap, VecDeque};

use crate::annotations::{DecipherDiseases, Genes, OmimDiseases, OrphaDiseases};
use crate::annotations::{DecipherDiseaseIterator, GeneIterator, OmimDiseaseIterator, OrphaDiseaseIterator};
use crate::similarity::Similarity;
use crate::term;
use crate::term::internal::HpoTermInternal;
use crate::term::{Combined, HpoGroup, InformationContent};
use crate::{HpoError, HpoResult, HpoTermId, Ontology};

/// A single term of the ontology
///
/// `HpoTerm` is a lightweight view that combines the term record with a
/// reference to the [`Ontology`], so all graph traversal can be done
/// directly on the term. Instances are created through
/// [`Ontology::hpo`], [`Ontology::get_hpo_object`] or iteration.
#[derive(Clone, Copy)]
pub struct HpoTerm<'a> {
    term: &'a HpoTermInternal,
    ontology: &'a Ontology,
}

impl<'a> HpoTerm<'a> {
    /// Constructs an `HpoTerm` for the given [`HpoTermId`]
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the id is not part of the ontology
    pub fn try_new<I: Into<HpoTermId>>(ontology: &'a Ontology, id: I) -> HpoResult<HpoTerm<'a>> {
        let id = id.into();
        let term = ontology
            .get(id)
            .ok_or_else(|| HpoError::NotFound(format!("term {id}")))?;
        Ok(HpoTerm { term, ontology })
    }

    pub(crate) fn new(ontology: &'a Ontology, term: &'a HpoTermInternal) -> HpoTerm<'a> {
        HpoTerm { term, ontology }
    }

    /// Returns the [`HpoTermId`] of the term, e.g. `HP:0000118`
    pub fn id(&self) -> HpoTermId {
        *self.term.id()
    }

    /// Returns the display name of the term
    pub fn name(&self) -> &'a str {
        self.term.name()
    }

    /// Returns the long definition, or an empty string
    pub fn definition(&self) -> &'a str {
        self.term.definition()
    }

    /// Returns the comment, or an empty string
    pub fn comment(&self) -> &'a str {
        self.term.comment()
    }

    /// Returns the synonym strings of the term
    pub fn synonyms(&self) -> &'a [String] {
        self.term.synonyms()
    }

    /// Returns the alternative ids that resolve to this term
    pub fn alt_ids(&self) -> &'a HpoGroup {
        self.term.alt_ids()
    }

    /// Returns `true` if the term is flagged obsolete
    pub fn is_obsolete(&self) -> bool {
        self.term.obsolete()
    }

    /// Returns the replacement term of an obsolete term, if one is
    /// recorded
    pub fn replaced_by(&self) -> Option<HpoTerm<'a>> {
        self.term
            .replacement()
            .and_then(|id| HpoTerm::try_new(self.ontology, id).ok())
    }

    /// Returns the ids of the direct parent terms
    pub fn parent_ids(&self) -> &'a HpoGroup {
        self.term.parents()
    }

    /// Returns an iterator of the direct parent terms
    pub fn parents(&self) -> term::Iter<'a> {
        term::Iter::new(self.parent_ids().iter(), self.ontology)
    }

    /// Returns the ids of the direct child terms
    pub fn children_ids(&self) -> &'a HpoGroup {
        self.term.children()
    }

    /// Returns an iterator of the direct child terms
    pub fn children(&self) -> term::Iter<'a> {
        term::Iter::new(self.children_ids().iter(), self.ontology)
    }

    /// Returns the ids of all ancestors (transitive parents, excluding
    /// the term itself)
    pub fn ancestor_ids(&self) -> &'a HpoGroup {
        self.term.all_parents()
    }

    /// Returns an iterator of all ancestor terms
    pub fn ancestors(&self) -> term::Iter<'a> {
        term::Iter::new(self.ancestor_ids().iter(), self.ontology)
    }

    /// Returns the ids of all descendants (transitive children,
    /// excluding the term itself)
    pub fn descendant_ids(&self) -> &'a HpoGroup {
        self.term.all_children()
    }

    /// Returns an iterator of all descendant terms
    pub fn descendants(&self) -> term::Iter<'a> {
        term::Iter::new(self.descendant_ids().iter(), self.ontology)
    }

    /// Returns `true` if `other` is an ancestor of `self`
    pub fn child_of(&self, other: &HpoTerm) -> bool {
        self.ancestor_ids().contains(&other.id())
    }

    /// Returns `true` if `other` is a descendant of `self`
    pub fn parent_of(&self, other: &HpoTerm) -> bool {
        other.child_of(self)
    }

    /// Returns the common ancestors of both terms, where each term
    /// counts as its own ancestor
    ///
    /// With this *shared* definition a term that is an ancestor of the
    /// other (or equal to it) is itself part of the result. This is the
    /// variant the similarity kernels use. See
    /// [`HpoTerm::strict_common_ancestor_ids`] for the exclusive
    /// variant.
    pub fn common_ancestor_ids(&self, other: &HpoTerm) -> HpoGroup {
        let lhs = self.ancestor_ids() | self.id();
        let rhs = other.ancestor_ids() | other.id();
        &lhs & &rhs
    }

    /// Returns the common ancestors of both terms, excluding the terms
    /// themselves
    pub fn strict_common_ancestor_ids(&self, other: &HpoTerm) -> HpoGroup {
        self.ancestor_ids() & other.ancestor_ids()
    }

    /// Returns the union of both terms' ancestors, where each term
    /// counts as its own ancestor
    pub fn union_ancestor_ids(&self, other: &HpoTerm) -> HpoGroup {
        &(self.ancestor_ids() | self.id()) | &(other.ancestor_ids() | other.id())
    }

    /// Returns an iterator of the shared common ancestors
    pub fn common_ancestors(&self, other: &HpoTerm) -> Combined<'a> {
        Combined::new(self.common_ancestor_ids(other), self.ontology)
    }

    /// Returns an iterator of the combined ancestors of both terms
    pub fn union_ancestors(&self, other: &HpoTerm) -> Combined<'a> {
        Combined::new(self.union_ancestor_ids(other), self.ontology)
    }

    /// Returns the ids of all genes annotated to the term or any of its
    /// descendants
    pub fn gene_ids(&self) -> &'a Genes {
        self.term.genes()
    }

    /// Returns an iterator of all genes of the term
    pub fn genes(&self) -> GeneIterator<'a> {
        GeneIterator::new(self.gene_ids(), self.ontology)
    }

    /// Returns the ids of all OMIM diseases annotated to the term or
    /// any of its descendants
    pub fn omim_disease_ids(&self) -> &'a OmimDiseases {
        self.term.omim_diseases()
    }

    /// Returns an iterator of all OMIM diseases of the term
    pub fn omim_diseases(&self) -> OmimDiseaseIterator<'a> {
        OmimDiseaseIterator::new(self.omim_disease_ids(), self.ontology)
    }

    /// Returns the ids of all Orpha diseases annotated to the term or
    /// any of its descendants
    pub fn orpha_disease_ids(&self) -> &'a OrphaDiseases {
        self.term.orpha_diseases()
    }

    /// Returns an iterator of all Orpha diseases of the term
    pub fn orpha_diseases(&self) -> OrphaDiseaseIterator<'a> {
        OrphaDiseaseIterator::new(self.orpha_disease_ids(), self.ontology)
    }

    /// Returns the ids of all DECIPHER diseases annotated to the term
    /// or any of its descendants
    pub fn decipher_disease_ids(&self) -> &'a DecipherDiseases {
        self.term.decipher_diseases()
    }

    /// Returns an iterator of all DECIPHER diseases of the term
    pub fn decipher_diseases(&self) -> DecipherDiseaseIterator<'a> {
        DecipherDiseaseIterator::new(self.decipher_disease_ids(), self.ontology)
    }

    /// Returns the ids of OMIM diseases that are explicitly excluded
    /// (`NOT` qualified) for this term
    ///
    /// Negative associations are direct links only, they are not
    /// propagated to ancestors and do not participate in information
    /// content, similarity or enrichment.
    pub fn omim_excluded_disease_ids(&self) -> &'a OmimDiseases {
        self.term.omim_excluded()
    }

    /// Returns the ids of Orpha diseases explicitly excluded for this term
    pub fn orpha_excluded_disease_ids(&self) -> &'a OrphaDiseases {
        self.term.orpha_excluded()
    }

    /// Returns the ids of DECIPHER diseases explicitly excluded for this term
    pub fn decipher_excluded_disease_ids(&self) -> &'a DecipherDiseases {
        self.term.decipher_excluded()
    }

    /// Returns the [`InformationContent`] of the term
    pub fn information_content(&self) -> &'a InformationContent {
        self.term.information_content()
    }

    /// Returns `true` if the term is `HP:0012823 | Clinical modifier`
    /// or one of its descendants
    pub fn is_modifier(&self) -> bool {
        self.id() == crate::MODIFIER_ID || self.ancestor_ids().contains(&crate::MODIFIER_ID)
    }

    /// Returns the top-level category terms the term belongs to
    ///
    /// See [`Ontology::categories`] for the definition of categories.
    pub fn categories(&self) -> HpoGroup {
        &(self.ancestor_ids() | self.id()) & self.ontology.categories()
    }

    /// Returns the shortest path to an ancestor term as
    /// `(number of steps, [self, ..., ancestor])`
    ///
    /// # Errors
    ///
    /// [`HpoError::DomainError`] if `other` is neither `self` nor an
    /// ancestor of `self`
    pub fn shortest_path_to_parent(&self, other: &HpoTerm) -> HpoResult<(usize, Vec<HpoTermId>)> {
        let path = self.path_to_ancestor(other)?;
        Ok((path.len() - 1, path))
    }

    /// Returns the number of edges on the shortest path to the root
    pub fn shortest_path_to_root(&self) -> HpoResult<usize> {
        let root = HpoTerm::try_new(self.ontology, crate::ROOT_ID)?;
        Ok(self.path_to_ancestor(&root)?.len() - 1)
    }

    /// Returns the number of edges on the longest path to the root
    ///
    /// Well defined because the graph is a DAG with a unique root.
    pub fn longest_path_to_root(&self) -> usize {
        self.parents()
            .map(|parent| parent.longest_path_to_root() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the shortest path to another term, traversing via a
    /// common ancestor when the terms are not comparable
    ///
    /// The result is `(steps, [self, ..., other], steps_up, steps_down)`
    /// where `steps_up` counts the edges from `self` up to the chosen
    /// common ancestor and `steps_down` the edges from there down to
    /// `other`.
    ///
    /// # Errors
    ///
    /// [`HpoError::DomainError`] if the terms share no common ancestor
    pub fn path_to_other(
        &self,
        other: &HpoTerm,
    ) -> HpoResult<(usize, Vec<HpoTermId>, usize, usize)> {
        let common = self.common_ancestor_ids(other);
        if common.is_empty() {
            return Err(HpoError::DomainError(format!(
                "no common ancestor between {} and {}",
                self.id(),
                other.id()
            )));
        }

        let mut best: Option<(usize, Vec<HpoTermId>, usize, usize)> = None;
        for ancestor_id in &common {
            let ancestor = HpoTerm::try_new(self.ontology, ancestor_id)?;
            let up = self.path_to_ancestor(&ancestor)?;
            let down = other.path_to_ancestor(&ancestor)?;
            let steps_up = up.len() - 1;
            let steps_down = down.len() - 1;
            let steps = steps_up + steps_down;

            if best.as_ref().map_or(true, |(s, _, _, _)| steps < *s) {
                let mut path = up;
                for id in down.iter().rev().skip(1) {
                    path.push(*id);
                }
                best = Some((steps, path, steps_up, steps_down));
            }
        }
        best.ok_or_else(|| {
            HpoError::DomainError(format!(
                "no path between {} and {}",
                self.id(),
                other.id()
            ))
        })
    }

    /// Returns the number of edges between `self` and `other`, via a
    /// common ancestor if needed
    pub fn distance_to_term(&self, other: &HpoTerm) -> HpoResult<usize> {
        self.path_to_other(other).map(|(steps, _, _, _)| steps)
    }

    /// Calculates the similarity to another term with the given kernel
    pub fn similarity_score(&self, other: &HpoTerm, similarity: &impl Similarity) -> f64 {
        similarity.calculate(self, other)
    }

    /// Breadth-first walk up the `is_a` edges to `other`, returning the
    /// shortest `[self, ..., other]` sequence
    fn path_to_ancestor(&self, other: &HpoTerm) -> HpoResult<Vec<HpoTermId>> {
        let target = other.id();
        if self.id() == target {
            return Ok(vec![self.id()]);
        }
        if !self.ancestor_ids().contains(&target) {
            return Err(HpoError::DomainError(format!(
                "{} is not an ancestor of {}",
                target,
                self.id()
            )));
        }

        let mut predecessor: HashMap<HpoTermId, HpoTermId> = HashMap::new();
        let mut queue = VecDeque::from([self.id()]);
        while let Some(current_id) = queue.pop_front() {
            if current_id == target {
                let mut path = vec![target];
                let mut cursor = target;
                while let Some(previous) = predecessor.get(&cursor) {
                    path.push(*previous);
                    cursor = *previous;
                }
                path.reverse();
                return Ok(path);
            }
            let current = HpoTerm::try_new(self.ontology, current_id)?;
            for parent in current.parent_ids() {
                if parent != self.id() && !predecessor.contains_key(&parent) {
                    predecessor.insert(parent, current_id);
                    queue.push_back(parent);
                }
            }
        }

        Err(HpoError::DomainError(format!(
            "{} is not reachable from {}",
            target,
            self.id()
        )))
    }
}

impl PartialEq for HpoTerm<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for HpoTerm<'_> {}

impl std::fmt::Debug for HpoTerm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HpoTerm({} | {})", self.id(), self.name())
    }
}
