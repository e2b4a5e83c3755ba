//! [`Builder`] creates [`Ontology`] values, either from the standard
//! master data (through the parsers) or manually term by term
//!
//! The builder moves through a fixed sequence of typestates so that
//! every construction step happens exactly once and in the right order:
//!
//! ```text
//! Builder<LooseCollection> : add individual terms
//!   |
//!   terms_complete()
//!   |
//!   v
//! Builder<AllTerms> : define parent-child relationships
//!   |
//!   connect_all_terms()?  -- computes closures, validates the graph
//!   |
//!   v
//! Builder<ConnectedTerms> : annotate terms with genes/diseases
//!   |
//!   calculate_information_content()
//!   |
//!   v
//! Builder<FullyAnnotated>
//!   |
//!   build_minimal() or build_with_defaults()?
//!   |
//!   v
//! Ontology
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::annotations::Disease;
use crate::annotations::{DecipherDisease, DecipherDiseaseId};
use crate::annotations::{Gene, GeneId};
use crate::annotations::{OmimDisease, OmimDiseaseId};
use crate::annotations::{OrphaDisease, OrphaDiseaseId};
use crate::ontology::termarena::Arena;
use crate::term::internal::HpoTermInternal;
use crate::term::HpoGroup;
use crate::{HpoError, HpoResult, HpoTermId, Ontology};

/// State of [`Builder`] that contains some 'loose', unconnected terms
pub struct LooseCollection;

/// State of [`Builder`] that contains all terms of the ontology, not yet
/// connected to each other
pub struct AllTerms;

/// State of [`Builder`] with all terms connected and closures cached
pub struct ConnectedTerms;

/// State of [`Builder`] with terms, annotations and information content
pub struct FullyAnnotated;

fn transition_state<TX, TY>(builder: Builder<TX>) -> Builder<TY> {
    Builder::<TY> {
        hpo_terms: builder.hpo_terms,
        genes: builder.genes,
        omim_diseases: builder.omim_diseases,
        orpha_diseases: builder.orpha_diseases,
        decipher_diseases: builder.decipher_diseases,
        negative_omim_diseases: builder.negative_omim_diseases,
        negative_orpha_diseases: builder.negative_orpha_diseases,
        negative_decipher_diseases: builder.negative_decipher_diseases,
        hpo_version: builder.hpo_version,
        state: PhantomData,
    }
}

/// Visit states of the ancestor-closure computation
#[derive(Clone, Copy, PartialEq)]
enum Visit {
    Visiting,
    Done,
}

/// Builder to create an [`Ontology`]
///
/// There is rarely a need to use the builder directly, use
/// [`Ontology::from_standard`] for the Jax master data instead. The
/// builder is the tool for custom or test ontologies.
///
/// # Examples
///
/// ```
/// use phenosim::Builder;
///
/// let mut builder = Builder::new();
/// builder.new_term("All", 1u32);
/// builder.new_term("First child", 2u32);
/// builder.new_term("Second child", 3u32);
///
/// let mut builder = builder.terms_complete();
/// builder.add_parent(1u32, 2u32).unwrap();
/// builder.add_parent(1u32, 3u32).unwrap();
///
/// let mut builder = builder.connect_all_terms().unwrap();
/// builder.annotate_gene(11u32.into(), "GENE1", 2u32.into()).unwrap();
///
/// let ontology = builder.calculate_information_content().build_minimal();
///
/// assert_eq!(ontology.len(), 3);
/// assert_eq!(ontology.hpo(1u32).unwrap().name(), "All");
/// ```
pub struct Builder<T> {
    hpo_terms: Arena,
    genes: HashMap<GeneId, Gene>,
    omim_diseases: HashMap<OmimDiseaseId, OmimDisease>,
    orpha_diseases: HashMap<OrphaDiseaseId, OrphaDisease>,
    decipher_diseases: HashMap<DecipherDiseaseId, DecipherDisease>,
    negative_omim_diseases: HashMap<OmimDiseaseId, OmimDisease>,
    negative_orpha_diseases: HashMap<OrphaDiseaseId, OrphaDisease>,
    negative_decipher_diseases: HashMap<DecipherDiseaseId, DecipherDisease>,
    hpo_version: Option<String>,
    state: PhantomData<T>,
}

impl Default for Builder<LooseCollection> {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder<LooseCollection> {
    /// Creates a new `Builder` without any terms
    pub fn new() -> Builder<LooseCollection> {
        Builder::<LooseCollection> {
            hpo_terms: Arena::default(),
            genes: HashMap::default(),
            omim_diseases: HashMap::default(),
            orpha_diseases: HashMap::default(),
            decipher_diseases: HashMap::default(),
            negative_omim_diseases: HashMap::default(),
            negative_orpha_diseases: HashMap::default(),
            negative_decipher_diseases: HashMap::default(),
            hpo_version: None,
            state: PhantomData,
        }
    }

    /// Inserts a term record
    ///
    /// # Errors
    ///
    /// [`HpoError::InvariantViolation`] when a term with the same id
    /// was added before
    pub(crate) fn add_term(&mut self, term: HpoTermInternal) -> HpoResult<()> {
        let id = *term.id();
        if self.hpo_terms.insert(term) {
            Ok(())
        } else {
            Err(HpoError::InvariantViolation(format!(
                "duplicate term id {id}"
            )))
        }
    }

    /// Adds a new term with the given name and id
    ///
    /// The term has no connections and no annotations yet.
    ///
    /// # Errors
    ///
    /// [`HpoError::InvariantViolation`] when a term with the same id
    /// was added before
    pub fn new_term<I: Into<HpoTermId>>(&mut self, name: &str, id: I) -> HpoResult<()> {
        self.add_term(HpoTermInternal::new(name.to_string(), id.into()))
    }

    /// Records the release version of the ontology data
    pub fn set_hpo_version(&mut self, version: &str) {
        self.hpo_version = Some(version.to_string());
    }

    /// Indicates that all terms are added
    ///
    /// Afterwards no new terms can be added, but terms can be connected
    /// to their parents.
    #[must_use]
    pub fn terms_complete(self) -> Builder<AllTerms> {
        transition_state(self)
    }
}

impl Builder<AllTerms> {
    /// Connects a term to its parent term
    ///
    /// # Errors
    ///
    /// - [`HpoError::NotFound`] when parent or child do not exist
    /// - [`HpoError::InvariantViolation`] when the parent is obsolete
    ///   (obsolete terms must never be `is_a` targets)
    pub fn add_parent<I: Into<HpoTermId> + Copy, J: Into<HpoTermId> + Copy>(
        &mut self,
        parent_id: I,
        child_id: J,
    ) -> HpoResult<()> {
        let parent = self
            .hpo_terms
            .get_mut(parent_id.into())
            .ok_or_else(|| HpoError::NotFound(format!("term {}", parent_id.into())))?;
        if parent.obsolete() {
            return Err(HpoError::InvariantViolation(format!(
                "obsolete term {} used as is_a target",
                parent_id.into()
            )));
        }
        parent.add_child(child_id);

        let child = self
            .hpo_terms
            .get_mut(child_id.into())
            .ok_or_else(|| HpoError::NotFound(format!("term {}", child_id.into())))?;
        child.add_parent(parent_id);
        Ok(())
    }

    /// Caches the ancestor and descendant closures of every term
    ///
    /// # Errors
    ///
    /// - [`HpoError::InvariantViolation`] when the `is_a` graph contains
    ///   a cycle
    /// - [`HpoError::InvariantViolation`] when the graph does not have
    ///   exactly one non-obsolete root, `HP:0000001`
    pub fn connect_all_terms(mut self) -> HpoResult<Builder<ConnectedTerms>> {
        let ids = self.hpo_terms.keys();

        let mut visited: HashMap<HpoTermId, Visit> = HashMap::with_capacity(ids.len());
        for id in &ids {
            self.cache_ancestors(*id, &mut visited)?;
        }

        self.validate_root()?;

        // the descendant closure is the inverse of the ancestor closure
        for id in ids {
            let ancestors = self.hpo_terms.get_unchecked(id).all_parents().clone();
            for ancestor in &ancestors {
                self.hpo_terms
                    .get_unchecked_mut(ancestor)
                    .all_children_mut()
                    .insert(id);
            }
        }

        Ok(transition_state(self))
    }

    /// Depth-first ancestor accumulation with memoization
    ///
    /// Every term is processed once: its parents are resolved first,
    /// then their cached ancestor sets are merged. A term that is
    /// re-entered while still being processed proves a cycle.
    fn cache_ancestors(
        &mut self,
        term_id: HpoTermId,
        visited: &mut HashMap<HpoTermId, Visit>,
    ) -> HpoResult<()> {
        match visited.get(&term_id) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::Visiting) => {
                return Err(HpoError::InvariantViolation(format!(
                    "cycle in the is_a graph involving {term_id}"
                )))
            }
            None => {}
        }
        visited.insert(term_id, Visit::Visiting);

        let parents = self.hpo_terms.get_unchecked(term_id).parents().clone();
        let mut ancestors = HpoGroup::default();
        for parent in &parents {
            self.cache_ancestors(parent, visited)?;
            for grandparent in self.hpo_terms.get_unchecked(parent).all_parents() {
                ancestors.insert(grandparent);
            }
        }

        let term = self.hpo_terms.get_unchecked_mut(term_id);
        *term.all_parents_mut() = ancestors | parents;

        visited.insert(term_id, Visit::Done);
        Ok(())
    }

    /// Exactly one non-obsolete term without parents may exist and it
    /// must be `HP:0000001 | All`
    fn validate_root(&self) -> HpoResult<()> {
        let roots: Vec<HpoTermId> = self
            .hpo_terms
            .values()
            .iter()
            .filter(|term| term.parents().is_empty() && !term.obsolete())
            .map(|term| *term.id())
            .collect();
        match roots.as_slice() {
            [root] if *root == crate::ROOT_ID => Ok(()),
            [root] => Err(HpoError::InvariantViolation(format!(
                "unexpected root term {root}"
            ))),
            [] => Err(HpoError::InvariantViolation(
                "ontology has no root term".to_string(),
            )),
            _ => Err(HpoError::InvariantViolation(format!(
                "ontology has {} root terms",
                roots.len()
            ))),
        }
    }
}

impl Builder<ConnectedTerms> {
    /// Links a gene to a term
    ///
    /// The gene is created on first use; a differing symbol for a known
    /// gene id is ignored. The term and all its ancestors record the
    /// gene, the gene records only the directly linked term.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_gene(
        &mut self,
        gene_id: GeneId,
        symbol: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        match self.genes.entry(gene_id) {
            Entry::Occupied(entry) => {
                if entry.get().symbol() != symbol {
                    debug!(
                        "gene {gene_id} already known as {}, ignoring symbol {symbol}",
                        entry.get().symbol()
                    );
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Gene::new(gene_id, symbol));
            }
        }
        self.genes
            .get_mut(&gene_id)
            .expect("gene was inserted above")
            .add_term(term_id);
        self.link_gene_term(term_id, gene_id)
    }

    /// Links an OMIM disease to a term
    ///
    /// Registry and propagation semantics are the same as for
    /// [`Builder::annotate_gene`].
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_omim_disease(
        &mut self,
        disease_id: OmimDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.omim_diseases
            .entry(disease_id)
            .or_insert_with(|| OmimDisease::new(disease_id, name))
            .add_term(term_id);
        self.link_omim_disease_term(term_id, disease_id)
    }

    /// Links an Orpha disease to a term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_orpha_disease(
        &mut self,
        disease_id: OrphaDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.orpha_diseases
            .entry(disease_id)
            .or_insert_with(|| OrphaDisease::new(disease_id, name))
            .add_term(term_id);
        self.link_orpha_disease_term(term_id, disease_id)
    }

    /// Links a DECIPHER disease to a term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_decipher_disease(
        &mut self,
        disease_id: DecipherDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.decipher_diseases
            .entry(disease_id)
            .or_insert_with(|| DecipherDisease::new(disease_id, name))
            .add_term(term_id);
        self.link_decipher_disease_term(term_id, disease_id)
    }

    /// Records a negative (`NOT` qualified) OMIM association
    ///
    /// Negative links are direct only: neither the term's ancestors nor
    /// any IC or similarity computation take them into account.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_negative_omim_disease(
        &mut self,
        disease_id: OmimDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.negative_omim_diseases
            .entry(disease_id)
            .or_insert_with(|| OmimDisease::new(disease_id, name))
            .add_term(term_id);
        self.hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?
            .add_omim_excluded(disease_id);
        Ok(())
    }

    /// Records a negative (`NOT` qualified) Orpha association
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_negative_orpha_disease(
        &mut self,
        disease_id: OrphaDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.negative_orpha_diseases
            .entry(disease_id)
            .or_insert_with(|| OrphaDisease::new(disease_id, name))
            .add_term(term_id);
        self.hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?
            .add_orpha_excluded(disease_id);
        Ok(())
    }

    /// Records a negative (`NOT` qualified) DECIPHER association
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when the term does not exist
    pub fn annotate_negative_decipher_disease(
        &mut self,
        disease_id: DecipherDiseaseId,
        name: &str,
        term_id: HpoTermId,
    ) -> HpoResult<()> {
        self.negative_decipher_diseases
            .entry(disease_id)
            .or_insert_with(|| DecipherDisease::new(disease_id, name))
            .add_term(term_id);
        self.hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?
            .add_decipher_excluded(disease_id);
        Ok(())
    }

    /// Calculates the information content of every term for every
    /// annotation kind and transitions to the final state
    #[must_use]
    pub fn calculate_information_content(mut self) -> Builder<FullyAnnotated> {
        let n_genes = self.genes.len();
        let n_omim = self.omim_diseases.len();
        let n_orpha = self.orpha_diseases.len();
        let n_decipher = self.decipher_diseases.len();

        for term in self.hpo_terms.values_mut() {
            let gene_count = term.genes().len();
            let omim_count = term.omim_diseases().len();
            let orpha_count = term.orpha_diseases().len();
            let decipher_count = term.decipher_diseases().len();

            let ic = term.information_content_mut();
            ic.set_gene(n_genes, gene_count);
            ic.set_omim_disease(n_omim, omim_count);
            ic.set_orpha_disease(n_orpha, orpha_count);
            ic.set_decipher_disease(n_decipher, decipher_count);
        }

        debug!(
            "information content calculated: {n_genes} genes, {n_omim} OMIM, \
             {n_orpha} Orpha, {n_decipher} DECIPHER diseases"
        );
        transition_state(self)
    }

    /// Adds the gene to the term and, recursively, to all its ancestors
    ///
    /// The recursion stops as soon as a term already carries the gene:
    /// by construction all its ancestors do as well.
    fn link_gene_term(&mut self, term_id: HpoTermId, gene_id: GeneId) -> HpoResult<()> {
        let term = self
            .hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?;

        if term.add_gene(gene_id) {
            let parents = term.parents().clone();
            for parent in &parents {
                self.link_gene_term(parent, gene_id)?;
            }
        }
        Ok(())
    }

    fn link_omim_disease_term(
        &mut self,
        term_id: HpoTermId,
        disease_id: OmimDiseaseId,
    ) -> HpoResult<()> {
        let term = self
            .hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?;

        if term.add_omim_disease(disease_id) {
            let parents = term.parents().clone();
            for parent in &parents {
                self.link_omim_disease_term(parent, disease_id)?;
            }
        }
        Ok(())
    }

    fn link_orpha_disease_term(
        &mut self,
        term_id: HpoTermId,
        disease_id: OrphaDiseaseId,
    ) -> HpoResult<()> {
        let term = self
            .hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?;

        if term.add_orpha_disease(disease_id) {
            let parents = term.parents().clone();
            for parent in &parents {
                self.link_orpha_disease_term(parent, disease_id)?;
            }
        }
        Ok(())
    }

    fn link_decipher_disease_term(
        &mut self,
        term_id: HpoTermId,
        disease_id: DecipherDiseaseId,
    ) -> HpoResult<()> {
        let term = self
            .hpo_terms
            .get_mut(term_id)
            .ok_or_else(|| HpoError::NotFound(format!("term {term_id}")))?;

        if term.add_decipher_disease(disease_id) {
            let parents = term.parents().clone();
            for parent in &parents {
                self.link_decipher_disease_term(parent, disease_id)?;
            }
        }
        Ok(())
    }
}

impl Builder<FullyAnnotated> {
    /// Builds the [`Ontology`] and sets the default categories
    ///
    /// This method requires the standard Jax terms `HP:0000001 | All`
    /// and `HP:0000118 | Phenotypic abnormality` to be present.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when one of the category roots is missing
    pub fn build_with_defaults(self) -> HpoResult<Ontology> {
        let mut ontology = self.build_minimal();
        ontology.set_default_categories()?;
        Ok(ontology)
    }

    /// Builds the [`Ontology`] without assigning categories
    ///
    /// Use this for custom ontologies that do not follow the standard
    /// Jax layout.
    pub fn build_minimal(self) -> Ontology {
        let mut ontology = Ontology {
            hpo_terms: self.hpo_terms,
            genes: self.genes,
            omim_diseases: self.omim_diseases,
            orpha_diseases: self.orpha_diseases,
            decipher_diseases: self.decipher_diseases,
            negative_omim_diseases: self.negative_omim_diseases,
            negative_orpha_diseases: self.negative_orpha_diseases,
            negative_decipher_diseases: self.negative_decipher_diseases,
            hpo_version: self.hpo_version,
            ..Default::default()
        };
        ontology.build_lookup_tables();
        ontology
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn diamond_builder() -> Builder<AllTerms> {
        // 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder.new_term("left", 2u32).unwrap();
        builder.new_term("right", 3u32).unwrap();
        builder.new_term("bottom", 4u32).unwrap();

        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 2u32).unwrap();
        builder.add_parent(1u32, 3u32).unwrap();
        builder.add_parent(2u32, 4u32).unwrap();
        builder.add_parent(3u32, 4u32).unwrap();
        builder
    }

    #[test]
    fn closures_of_a_diamond() {
        let builder = diamond_builder().connect_all_terms().unwrap();
        let ontology = builder.calculate_information_content().build_minimal();

        let bottom = ontology.hpo(4u32).unwrap();
        assert_eq!(bottom.ancestor_ids().len(), 3);
        assert!(!bottom.ancestor_ids().contains(&4u32.into()));

        let root = ontology.hpo(1u32).unwrap();
        assert_eq!(root.descendant_ids().len(), 3);
        assert!(!root.descendant_ids().contains(&1u32.into()));
    }

    #[test]
    fn duplicate_term_is_rejected() {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        assert_eq!(
            builder.new_term("All again", 1u32),
            Err(HpoError::InvariantViolation("duplicate term id HP:0000001".into()))
        );
    }

    #[test]
    fn cycle_is_detected() {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder.new_term("a", 2u32).unwrap();
        builder.new_term("b", 3u32).unwrap();

        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 2u32).unwrap();
        builder.add_parent(2u32, 3u32).unwrap();
        builder.add_parent(3u32, 2u32).unwrap();

        assert!(matches!(
            builder.connect_all_terms(),
            Err(HpoError::InvariantViolation(_))
        ));
    }

    #[test]
    fn missing_root_is_detected() {
        let mut builder = Builder::new();
        builder.new_term("not the root", 7u32).unwrap();
        let builder = builder.terms_complete();
        assert!(matches!(
            builder.connect_all_terms(),
            Err(HpoError::InvariantViolation(_))
        ));
    }

    #[test]
    fn obsolete_terms_are_no_parents() {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder
            .add_term({
                let mut term = HpoTermInternal::new("obsolete".to_string(), 2u32.into());
                *term.obsolete_mut() = true;
                term
            })
            .unwrap();
        builder.new_term("child", 3u32).unwrap();

        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 3u32).unwrap();
        assert!(matches!(
            builder.add_parent(2u32, 3u32),
            Err(HpoError::InvariantViolation(_))
        ));
    }

    #[test]
    fn annotation_propagation_is_asymmetric() {
        let builder = diamond_builder().connect_all_terms().unwrap();
        let mut builder = builder;
        builder.annotate_gene(42u32.into(), "GENE42", 4u32.into()).unwrap();
        let ontology = builder.calculate_information_content().build_minimal();

        // the term and all ancestors carry the gene
        for id in [1u32, 2, 3, 4] {
            assert!(
                ontology.hpo(id).unwrap().gene_ids().contains(&42u32.into()),
                "gene must be present on term {id}"
            );
        }

        // the gene only records the direct link
        let gene = ontology.gene(&42u32.into()).unwrap();
        assert_eq!(gene.hpo_terms().len(), 1);
        assert!(gene.hpo_terms().contains(&4u32.into()));
    }

    #[test]
    fn negative_annotations_stay_direct() {
        let builder = diamond_builder().connect_all_terms().unwrap();
        let mut builder = builder;
        builder
            .annotate_negative_omim_disease(600u32.into(), "Some disease", 4u32.into())
            .unwrap();
        let ontology = builder.calculate_information_content().build_minimal();

        assert!(ontology
            .hpo(4u32)
            .unwrap()
            .omim_excluded_disease_ids()
            .contains(&600u32.into()));
        // no upward propagation
        assert!(ontology
            .hpo(2u32)
            .unwrap()
            .omim_excluded_disease_ids()
            .is_empty());
        // no impact on the positive annotations or the IC
        assert!(ontology.hpo(4u32).unwrap().omim_disease_ids().is_empty());
        assert_eq!(
            ontology.hpo(4u32).unwrap().information_content().omim_disease(),
            0.0
        );
    }
}
