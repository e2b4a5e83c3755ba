//! An `HpoSet` represents a collection of HPO terms, e.g. the clinical
//! information of a patient or the phenotype of a disease

use crate::annotations::{DecipherDiseases, Genes, OmimDiseases, OrphaDiseases};
use crate::annotations::{DecipherDisease, Disease, Gene, OmimDisease, OrphaDisease};
use crate::ontology::TermQuery;
use crate::similarity::{
    Builtins, CombinerWeights, GroupSimilarity, Similarity, SimilarityCombiner, StandardCombiner,
};
use crate::term::{HpoGroup, InformationContentKind, Iter};
use crate::utils::{Combinations, CombinationsOneWay};
use crate::{HpoError, HpoResult, HpoTerm, HpoTermId, Ontology};

/// A set of unique HPO terms
///
/// A typical use case is recording the clinical information of a
/// patient: the set can be reduced to its most specific terms, cleansed
/// of modifier and obsolete terms, aggregated and compared to other
/// sets, genes or diseases.
///
/// As in a set, each term appears at most once and the order of terms
/// carries no meaning.
#[must_use]
pub struct HpoSet<'a> {
    ontology: &'a Ontology,
    group: HpoGroup,
}

impl<'a> HpoSet<'a> {
    /// Constructs an `HpoSet` from a group of term ids
    pub fn new(ontology: &'a Ontology, group: HpoGroup) -> Self {
        Self { ontology, group }
    }

    /// Constructs an `HpoSet` from term queries
    ///
    /// Every query is resolved through
    /// [`Ontology::get_hpo_object`], so ids, `HP:xxxxxxx` strings and
    /// exact names can be mixed.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when a query does not resolve
    pub fn from_queries<Q, I>(ontology: &'a Ontology, queries: I) -> HpoResult<Self>
    where
        Q: Into<TermQuery>,
        I: IntoIterator<Item = Q>,
    {
        let mut group = HpoGroup::new();
        for query in queries {
            group.insert(ontology.get_hpo_object(query)?.id());
        }
        Ok(Self::new(ontology, group))
    }

    /// Constructs an `HpoSet` from its serialized form, e.g. `"12+34+56"`
    ///
    /// The order of the indices is irrelevant.
    ///
    /// # Errors
    ///
    /// - [`HpoError::ParseIntError`] for non-numeric segments
    /// - [`HpoError::NotFound`] when an index is not part of the ontology
    pub fn from_serialized(ontology: &'a Ontology, serialized: &str) -> HpoResult<Self> {
        let mut group = HpoGroup::new();
        for segment in serialized.split('+') {
            let id = HpoTermId::from(segment.parse::<u32>()?);
            if ontology.get(id).is_none() {
                return Err(HpoError::NotFound(format!("term {id}")));
            }
            group.insert(id);
        }
        Ok(Self::new(ontology, group))
    }

    /// Serializes the set into `"i1+i2+…"` with ascending indices
    pub fn serialize(&self) -> String {
        let ids: Vec<String> = self
            .group
            .iter()
            .map(|id| id.as_u32().to_string())
            .collect();
        ids.join("+")
    }

    /// Returns the number of terms in the set
    pub fn len(&self) -> usize {
        self.group.len()
    }

    /// Returns `true` if the set contains no terms
    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Returns `true` if the set contains the term
    pub fn contains(&self, id: &HpoTermId) -> bool {
        self.group.contains(id)
    }

    /// Returns the term at the given position, ascending by id
    pub fn get(&self, index: usize) -> Option<HpoTerm<'a>> {
        let id = self.group.get(index)?;
        HpoTerm::try_new(self.ontology, *id).ok()
    }

    /// Returns an iterator of the terms of the set
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns a new set that contains only the most specific terms
    ///
    /// A term is removed when it is an ancestor of another member, so
    /// the result holds only terms without a descendant in the set.
    pub fn child_nodes(&self) -> HpoSet<'a> {
        let group = self
            .group
            .iter()
            .filter(|id| {
                !self.group.iter().any(|other| {
                    self.ontology
                        .get(other)
                        .expect("set members must be part of the ontology")
                        .all_parents()
                        .contains(id)
                })
            })
            .collect();
        HpoSet::new(self.ontology, group)
    }

    /// Removes all modifier terms in place
    ///
    /// Modifier terms are `HP:0012823 | Clinical modifier` and all its
    /// descendants.
    pub fn remove_modifier(&mut self) {
        self.group = self.iter().filter(|term| !term.is_modifier()).collect();
    }

    /// Returns a new set without modifier terms
    pub fn without_modifier(&self) -> HpoSet<'a> {
        HpoSet::new(
            self.ontology,
            self.iter().filter(|term| !term.is_modifier()).collect(),
        )
    }

    /// Removes all obsolete terms in place
    pub fn remove_obsolete(&mut self) {
        self.group = self.iter().filter(|term| !term.is_obsolete()).collect();
    }

    /// Returns a new set without obsolete terms
    pub fn without_obsolete(&self) -> HpoSet<'a> {
        HpoSet::new(
            self.ontology,
            self.iter().filter(|term| !term.is_obsolete()).collect(),
        )
    }

    /// Replaces obsolete terms in place
    ///
    /// Obsolete terms with a `replaced_by` id become the replacement
    /// term; obsolete terms without a replacement stay in the set.
    pub fn replace_obsolete(&mut self) {
        self.group = self
            .iter()
            .map(|term| match term.replaced_by() {
                Some(replacement) if term.is_obsolete() => replacement.id(),
                _ => term.id(),
            })
            .collect();
    }

    /// Returns a new set with obsolete terms replaced
    pub fn with_replaced_obsolete(&self) -> HpoSet<'a> {
        HpoSet::new(
            self.ontology,
            self.iter()
                .map(|term| match term.replaced_by() {
                    Some(replacement) if term.is_obsolete() => replacement.id(),
                    _ => term.id(),
                })
                .collect(),
        )
    }

    /// Returns the cleaned-up version of the set
    ///
    /// Replaces obsolete terms by their recorded replacement, drops
    /// obsolete terms without one, removes modifier terms and finally
    /// reduces the set to its most specific terms.
    pub fn basic(&self) -> HpoSet<'a> {
        self.with_replaced_obsolete()
            .without_obsolete()
            .without_modifier()
            .child_nodes()
    }

    /// Returns the ids of all genes that are associated with the set
    ///
    /// The result is the union of the (inherited) gene annotations of
    /// all members.
    pub fn gene_ids(&self) -> Genes {
        self.iter()
            .flat_map(|term| term.gene_ids().iter().copied())
            .collect()
    }

    /// Returns all genes associated with the set, ascending by gene id
    pub fn all_genes(&self) -> Vec<&'a Gene> {
        let mut genes: Vec<&Gene> = self
            .gene_ids()
            .iter()
            .map(|gene_id| {
                self.ontology
                    .gene(gene_id)
                    .expect("gene must exist in ontology when it is linked to a term")
            })
            .collect();
        genes.sort_by_key(|gene| *gene.id());
        genes
    }

    /// Returns the ids of all OMIM diseases associated with the set
    pub fn omim_disease_ids(&self) -> OmimDiseases {
        self.iter()
            .flat_map(|term| term.omim_disease_ids().iter().copied())
            .collect()
    }

    /// Returns all OMIM diseases of the set, ascending by disease id
    pub fn omim_diseases(&self) -> Vec<&'a OmimDisease> {
        let mut diseases: Vec<&OmimDisease> = self
            .omim_disease_ids()
            .iter()
            .map(|disease_id| {
                self.ontology
                    .omim_disease(disease_id)
                    .expect("disease must exist in ontology when it is linked to a term")
            })
            .collect();
        diseases.sort_by_key(|disease| *disease.id());
        diseases
    }

    /// Returns the ids of all Orpha diseases associated with the set
    pub fn orpha_disease_ids(&self) -> OrphaDiseases {
        self.iter()
            .flat_map(|term| term.orpha_disease_ids().iter().copied())
            .collect()
    }

    /// Returns all Orpha diseases of the set, ascending by disease id
    pub fn orpha_diseases(&self) -> Vec<&'a OrphaDisease> {
        let mut diseases: Vec<&OrphaDisease> = self
            .orpha_disease_ids()
            .iter()
            .map(|disease_id| {
                self.ontology
                    .orpha_disease(disease_id)
                    .expect("disease must exist in ontology when it is linked to a term")
            })
            .collect();
        diseases.sort_by_key(|disease| *disease.id());
        diseases
    }

    /// Returns the ids of all DECIPHER diseases associated with the set
    pub fn decipher_disease_ids(&self) -> DecipherDiseases {
        self.iter()
            .flat_map(|term| term.decipher_disease_ids().iter().copied())
            .collect()
    }

    /// Returns all DECIPHER diseases of the set, ascending by disease id
    pub fn decipher_diseases(&self) -> Vec<&'a DecipherDisease> {
        let mut diseases: Vec<&DecipherDisease> = self
            .decipher_disease_ids()
            .iter()
            .map(|disease_id| {
                self.ontology
                    .decipher_disease(disease_id)
                    .expect("disease must exist in ontology when it is linked to a term")
            })
            .collect();
        diseases.sort_by_key(|disease| *disease.id());
        diseases
    }

    /// Returns the aggregated information content of the set
    pub fn information_content(&self, kind: InformationContentKind) -> SetInformationContent {
        let all: Vec<f64> = self
            .iter()
            .map(|term| term.information_content().get_kind(kind))
            .collect();
        SetInformationContent::new(all)
    }

    /// Returns statistics over the pairwise distances of the set's terms
    ///
    /// The distance between two terms is the number of edges on their
    /// shortest path via a common ancestor; unreachable pairs are
    /// skipped.
    pub fn variance(&self) -> SetVariance {
        let terms: Vec<HpoTerm> = self.iter().collect();
        let distances: Vec<usize> = CombinationsOneWay::new(terms)
            .filter_map(|(a, b)| a.distance_to_term(&b).ok())
            .collect();
        SetVariance::new(distances)
    }

    /// Returns all ordered term pairs of the set, including self-pairs
    pub fn combinations(&self) -> Combinations<HpoTerm<'a>> {
        Combinations::new(self.terms())
    }

    /// Returns all unordered term pairs of the set, excluding self-pairs
    pub fn combinations_one_way(&self) -> CombinationsOneWay<HpoTerm<'a>> {
        CombinationsOneWay::new(self.terms())
    }

    /// Materializes the members with the lifetime of the ontology
    fn terms(&self) -> Vec<HpoTerm<'a>> {
        self.group
            .iter()
            .map(|id| {
                HpoTerm::try_new(self.ontology, id)
                    .expect("set members must be part of the ontology")
            })
            .collect()
    }

    /// Calculates the similarity to another set
    ///
    /// `kind` selects the information content table, `method` the
    /// pairwise kernel (see [`Builtins`]) and `combine` the combiner
    /// (see [`StandardCombiner`]). An empty set on either side yields
    /// `0.0`.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] for unknown `method` or `combine` names
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use phenosim::{HpoSet, Ontology};
    /// use phenosim::term::InformationContentKind;
    ///
    /// let ontology = Ontology::from_standard("/path/to/jax/data/").unwrap();
    /// let patient = HpoSet::from_queries(&ontology, ["HP:0002650"]).unwrap();
    /// let reference = HpoSet::from_queries(&ontology, ["HP:0009121"]).unwrap();
    ///
    /// let score = patient
    ///     .similarity(&reference, InformationContentKind::Omim, "graphic", "funSimAvg")
    ///     .unwrap();
    /// assert!((0.0..=1.0).contains(&score));
    /// ```
    pub fn similarity(
        &self,
        other: &HpoSet,
        kind: InformationContentKind,
        method: &str,
        combine: &str,
    ) -> HpoResult<f64> {
        let similarity = Builtins::new(method, kind)?;
        let combiner = StandardCombiner::new(combine)?;
        GroupSimilarity::new(combiner, similarity).calculate(self, other, kind)
    }

    /// Calculates the similarity to another set with a custom kernel
    /// and combiner
    ///
    /// `weight_kind` selects the information content used by weighted
    /// combiners.
    ///
    /// # Errors
    ///
    /// See [`GroupSimilarity::calculate`]
    pub fn similarity_with<S: Similarity, C: SimilarityCombiner>(
        &self,
        other: &HpoSet,
        similarity: S,
        combiner: C,
        weight_kind: InformationContentKind,
    ) -> HpoResult<f64> {
        GroupSimilarity::new(combiner, similarity).calculate(self, other, weight_kind)
    }

    /// Returns the information content weights of this set
    ///
    /// One weight per term, in set (ascending id) order.
    pub fn weights(&self, kind: InformationContentKind) -> Vec<f64> {
        CombinerWeights::new(self, self, kind).rows().to_vec()
    }
}

impl<'a> IntoIterator for &'a HpoSet<'a> {
    type Item = HpoTerm<'a>;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.group.iter(), self.ontology)
    }
}

/// Aggregated information content of an [`HpoSet`]
///
/// Returned by [`HpoSet::information_content`]. The `all` values are in
/// set (ascending id) order.
#[derive(Debug, Clone, PartialEq)]
pub struct SetInformationContent {
    all: Vec<f64>,
}

impl SetInformationContent {
    fn new(all: Vec<f64>) -> Self {
        Self { all }
    }

    /// The mean information content, `0.0` for an empty set
    pub fn mean(&self) -> f64 {
        if self.all.is_empty() {
            return 0.0;
        }
        self.total() / self.all.len() as f64
    }

    /// The sum of all information content values
    pub fn total(&self) -> f64 {
        self.all.iter().sum()
    }

    /// The largest information content value, `0.0` for an empty set
    pub fn max(&self) -> f64 {
        self.all.iter().copied().fold(0.0, f64::max)
    }

    /// The individual information content values
    pub fn all(&self) -> &[f64] {
        &self.all
    }
}

/// Pairwise-distance statistics of an [`HpoSet`]
///
/// Returned by [`HpoSet::variance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVariance {
    distances: Vec<usize>,
}

impl SetVariance {
    fn new(distances: Vec<usize>) -> Self {
        Self { distances }
    }

    /// The mean pairwise distance, `0.0` when fewer than two terms
    pub fn mean(&self) -> f64 {
        if self.distances.is_empty() {
            return 0.0;
        }
        self.distances.iter().sum::<usize>() as f64 / self.distances.len() as f64
    }

    /// The smallest pairwise distance
    pub fn min(&self) -> usize {
        self.distances.iter().min().copied().unwrap_or(0)
    }

    /// The largest pairwise distance
    pub fn max(&self) -> usize {
        self.distances.iter().max().copied().unwrap_or(0)
    }

    /// All pairwise distances
    pub fn all(&self) -> &[usize] {
        &self.distances
    }
}
