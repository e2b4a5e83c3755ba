use core::fmt::Debug;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::annotations::{DecipherDisease, DecipherDiseaseId};
use crate::annotations::{Gene, GeneId};
use crate::annotations::{OmimDisease, OmimDiseaseId};
use crate::annotations::{OrphaDisease, OrphaDiseaseId};
use crate::parser;
use crate::term::internal::HpoTermInternal;
use crate::term::{HpoGroup, HpoTerm};
use crate::{HpoError, HpoResult, HpoTermId};

pub mod builder;
mod termarena;

pub use builder::Builder;
use termarena::Arena;

/// A custom information content table, keyed by term id
pub type CustomIcTable = HashMap<HpoTermId, f64>;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` is the main interface of the crate and owns all data
///
/// It holds all [`HpoTerm`]s, their `is_a` relationships with cached
/// transitive closures, and all [`Gene`], [`OmimDisease`],
/// [`OrphaDisease`] and [`DecipherDisease`] records together with their
/// term annotations.
///
/// Once constructed, the ontology is read-only: all query methods take
/// `&self` and a shared reference can be used from many threads at once.
/// Replacing the data means building a new `Ontology` value.
///
/// # Construction
///
/// Download the master data from [Jax HPO](https://hpo.jax.org/) into one
/// folder:
///
/// - `hp.obo` (terms and their relationships)
/// - `phenotype_to_genes.txt` (gene annotations)
/// - `phenotype.hpoa` (OMIM / ORPHA / DECIPHER disease annotations)
///
/// and load it with [`Ontology::from_standard`]. Custom ontologies can
/// be assembled through the [`Builder`].
///
/// # Layout
///
/// ```mermaid
/// erDiagram
///     ONTOLOGY ||--|{ HPOTERM : contains
///     HPOTERM ||--|{ HPOTERM : is_a
///     HPOTERM }|--o{ DISEASE : phenotype_of
///     HPOTERM }|--o{ GENE : phenotype_of
/// ```
///
/// Terms record the ids of their annotations, annotations record the
/// ids of their *directly* linked terms. There is no direct relation
/// between genes and diseases, only the indirect one via shared terms.
#[derive(Default)]
pub struct Ontology {
    pub(crate) hpo_terms: Arena,
    pub(crate) genes: HashMap<GeneId, Gene>,
    pub(crate) omim_diseases: HashMap<OmimDiseaseId, OmimDisease>,
    pub(crate) orpha_diseases: HashMap<OrphaDiseaseId, OrphaDisease>,
    pub(crate) decipher_diseases: HashMap<DecipherDiseaseId, DecipherDisease>,
    pub(crate) negative_omim_diseases: HashMap<OmimDiseaseId, OmimDisease>,
    pub(crate) negative_orpha_diseases: HashMap<OrphaDiseaseId, OrphaDisease>,
    pub(crate) negative_decipher_diseases: HashMap<DecipherDiseaseId, DecipherDisease>,
    pub(crate) hpo_version: Option<String>,
    names: HashMap<String, HpoTermId>,
    names_lowercase: HashMap<String, HpoTermId>,
    synonyms_lowercase: HashMap<String, HpoTermId>,
    alt_term_ids: HashMap<HpoTermId, HpoTermId>,
    categories: HpoGroup,
    custom_ic_tables: HashMap<String, Arc<CustomIcTable>>,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.hpo_terms.len())
    }
}

/// A query for a single term: either an id or an exact name
///
/// `TermQuery` is usually created implicitly through the `From`
/// conversions of [`Ontology::get_hpo_object`]: an integer or a string
/// starting with `HP:` is an id query, any other string a name query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermQuery {
    /// Query by [`HpoTermId`]
    Id(HpoTermId),
    /// Query by the exact term name
    Name(String),
}

impl From<u32> for TermQuery {
    fn from(id: u32) -> Self {
        TermQuery::Id(id.into())
    }
}

impl From<HpoTermId> for TermQuery {
    fn from(id: HpoTermId) -> Self {
        TermQuery::Id(id)
    }
}

impl From<&str> for TermQuery {
    fn from(query: &str) -> Self {
        if query.starts_with("HP:") {
            match HpoTermId::try_from(query) {
                Ok(id) => TermQuery::Id(id),
                Err(_) => TermQuery::Name(query.to_string()),
            }
        } else {
            TermQuery::Name(query.to_string())
        }
    }
}

impl Ontology {
    /// Initializes the ontology from the standard Jax master data
    ///
    /// The folder must contain `hp.obo`, `phenotype_to_genes.txt` and
    /// `phenotype.hpoa` under exactly these names.
    ///
    /// # Errors
    ///
    /// - [`HpoError::CannotOpenFile`] when a file is missing
    /// - [`HpoError::ParseError`] for malformed input data
    /// - [`HpoError::InvariantViolation`] when the `is_a` graph is
    ///   cyclic or does not have the single root `HP:0000001`
    pub fn from_standard(folder: &str) -> HpoResult<Self> {
        let path = Path::new(folder);
        let obo = path.join(crate::OBO_FILENAME);
        let genes = path.join(crate::GENE_FILENAME);
        let diseases = path.join(crate::DISEASE_FILENAME);
        parser::load_from_standard_files(&obo, &genes, &diseases)
    }

    /// Returns the number of terms in the ontology
    pub fn len(&self) -> usize {
        self.hpo_terms.len()
    }

    /// Returns `true` if the ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.hpo_terms.is_empty()
    }

    /// Returns the release version of the loaded data, if known
    ///
    /// e.g. `2023-04-05`
    pub fn hpo_version(&self) -> Option<&str> {
        self.hpo_version.as_deref()
    }

    /// Returns the [`HpoTerm`] of the provided id
    ///
    /// Returns `None` if no such term exists. Use
    /// [`Ontology::get_hpo_object`] for a typed error instead.
    pub fn hpo<I: Into<HpoTermId>>(&self, term_id: I) -> Option<HpoTerm<'_>> {
        HpoTerm::try_new(self, term_id.into()).ok()
    }

    /// Returns the term for an id, a `HP:xxxxxxx` string or an exact name
    ///
    /// Ids are also resolved through the `alt_id`s of the terms.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when no term matches the query
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use phenosim::Ontology;
    ///
    /// let ontology = Ontology::from_standard("/path/to/jax/data/").unwrap();
    /// let a = ontology.get_hpo_object("HP:0002650").unwrap();
    /// let b = ontology.get_hpo_object("Scoliosis").unwrap();
    /// let c = ontology.get_hpo_object(2650u32).unwrap();
    /// assert_eq!(a.id(), b.id());
    /// assert_eq!(b.id(), c.id());
    /// ```
    pub fn get_hpo_object<Q: Into<TermQuery>>(&self, query: Q) -> HpoResult<HpoTerm<'_>> {
        match query.into() {
            TermQuery::Id(id) => {
                let id = self.resolve_alt_id(id);
                HpoTerm::try_new(self, id)
            }
            TermQuery::Name(name) => self.match_name(&name),
        }
    }

    /// Returns the term with the given exact name
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when no term carries the name
    pub fn match_name(&self, name: &str) -> HpoResult<HpoTerm<'_>> {
        match self.names.get(name) {
            Some(id) => HpoTerm::try_new(self, *id),
            None => Err(HpoError::NotFound(format!("term with name: {name}"))),
        }
    }

    /// Returns the first term whose name or synonym matches the query
    /// exactly, ignoring case
    ///
    /// Name matches win over synonym matches; within each group the
    /// term with the lowest id wins.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when neither a name nor a synonym matches
    pub fn synonym_match(&self, query: &str) -> HpoResult<HpoTerm<'_>> {
        let query = query.to_lowercase();
        self.names_lowercase
            .get(&query)
            .or_else(|| self.synonyms_lowercase.get(&query))
            .map_or_else(
                || Err(HpoError::NotFound(format!("term with name or synonym: {query}"))),
                |id| HpoTerm::try_new(self, *id),
            )
    }

    /// Returns a lazy iterator of all terms whose name contains the
    /// query, case-insensitive, in ascending id order
    pub fn search<'a>(&'a self, query: &str) -> SearchIter<'a> {
        SearchIter::new(self, query, false)
    }

    /// Like [`Ontology::search`], but also matches against synonyms
    pub fn synonym_search<'a>(&'a self, query: &str) -> SearchIter<'a> {
        SearchIter::new(self, query, true)
    }

    /// Returns the shortest path between two terms
    ///
    /// The result is `(steps, [a, ..., b], steps_up, steps_down)`; see
    /// [`HpoTerm::path_to_other`].
    ///
    /// # Errors
    ///
    /// - [`HpoError::NotFound`] when a query does not resolve
    /// - [`HpoError::DomainError`] when the terms are not connected
    pub fn path<P: Into<TermQuery>, Q: Into<TermQuery>>(
        &self,
        a: P,
        b: Q,
    ) -> HpoResult<(usize, Vec<HpoTermId>, usize, usize)> {
        let a = self.get_hpo_object(a)?;
        let b = self.get_hpo_object(b)?;
        a.path_to_other(&b)
    }

    /// Returns an iterator of all terms, ascending by id
    pub fn hpos(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns a reference to the [`Gene`] of the provided id
    pub fn gene(&self, gene_id: &GeneId) -> Option<&Gene> {
        self.genes.get(gene_id)
    }

    /// Returns a reference to the [`Gene`] with the provided symbol
    ///
    /// Genes are not indexed by name, so this is a linear search.
    /// Prefer [`Ontology::gene`] when the id is known.
    pub fn gene_by_name(&self, symbol: &str) -> Option<&Gene> {
        self.genes.values().find(|&gene| gene.name() == symbol)
    }

    /// Returns an iterator of all genes
    pub fn genes(&self) -> std::collections::hash_map::Values<'_, GeneId, Gene> {
        self.genes.values()
    }

    /// Returns a reference to the [`OmimDisease`] of the provided id
    pub fn omim_disease(&self, disease_id: &OmimDiseaseId) -> Option<&OmimDisease> {
        self.omim_diseases.get(disease_id)
    }

    /// Returns an iterator of all OMIM diseases
    pub fn omim_diseases(
        &self,
    ) -> std::collections::hash_map::Values<'_, OmimDiseaseId, OmimDisease> {
        self.omim_diseases.values()
    }

    /// Returns a reference to the [`OrphaDisease`] of the provided id
    pub fn orpha_disease(&self, disease_id: &OrphaDiseaseId) -> Option<&OrphaDisease> {
        self.orpha_diseases.get(disease_id)
    }

    /// Returns an iterator of all Orpha diseases
    pub fn orpha_diseases(
        &self,
    ) -> std::collections::hash_map::Values<'_, OrphaDiseaseId, OrphaDisease> {
        self.orpha_diseases.values()
    }

    /// Returns a reference to the [`DecipherDisease`] of the provided id
    pub fn decipher_disease(&self, disease_id: &DecipherDiseaseId) -> Option<&DecipherDisease> {
        self.decipher_diseases.get(disease_id)
    }

    /// Returns an iterator of all DECIPHER diseases
    pub fn decipher_diseases(
        &self,
    ) -> std::collections::hash_map::Values<'_, DecipherDiseaseId, DecipherDisease> {
        self.decipher_diseases.values()
    }

    /// Returns the negative (`NOT` qualified) [`OmimDisease`] record of
    /// the provided id
    ///
    /// Negative records live in their own registry and are not part of
    /// information content, similarity or enrichment.
    pub fn negative_omim_disease(&self, disease_id: &OmimDiseaseId) -> Option<&OmimDisease> {
        self.negative_omim_diseases.get(disease_id)
    }

    /// Returns the negative (`NOT` qualified) [`OrphaDisease`] record of
    /// the provided id
    pub fn negative_orpha_disease(&self, disease_id: &OrphaDiseaseId) -> Option<&OrphaDisease> {
        self.negative_orpha_diseases.get(disease_id)
    }

    /// Returns the negative (`NOT` qualified) [`DecipherDisease`]
    /// record of the provided id
    pub fn negative_decipher_disease(
        &self,
        disease_id: &DecipherDiseaseId,
    ) -> Option<&DecipherDisease> {
        self.negative_decipher_diseases.get(disease_id)
    }

    /// Returns the top-level category terms of the ontology
    ///
    /// With the default categories these are the direct children of
    /// `HP:0000001 | All` other than `HP:0000118`, plus the direct
    /// children of `HP:0000118 | Phenotypic abnormality`.
    pub fn categories(&self) -> &HpoGroup {
        &self.categories
    }

    /// Stores a custom information content table under the given key
    ///
    /// A previously stored table with the same key is replaced. The
    /// tables are handed out as [`Arc`] snapshots, so readers that
    /// already hold the old table are not affected by the replacement.
    pub fn set_custom_ic(&mut self, key: &str, table: CustomIcTable) {
        self.custom_ic_tables.insert(key.to_string(), Arc::new(table));
    }

    /// Returns the custom information content table stored under `key`
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when no table is stored under the key
    pub fn custom_ic(&self, key: &str) -> HpoResult<Arc<CustomIcTable>> {
        self.custom_ic_tables
            .get(key)
            .cloned()
            .ok_or_else(|| HpoError::NotFound(format!("custom IC table: {key}")))
    }

    /// Returns the custom information content of a single term
    ///
    /// Terms without an entry in the table yield the `0.0` sentinel,
    /// like the built-in kinds.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when no table is stored under the key
    pub fn custom_ic_of<I: Into<HpoTermId>>(&self, key: &str, term_id: I) -> HpoResult<f64> {
        let table = self
            .custom_ic_tables
            .get(key)
            .ok_or_else(|| HpoError::NotFound(format!("custom IC table: {key}")))?;
        Ok(table.get(&term_id.into()).copied().unwrap_or(0.0))
    }
}

/// Crate-internal plumbing
impl Ontology {
    pub(crate) fn get(&self, term_id: HpoTermId) -> Option<&HpoTermInternal> {
        self.hpo_terms.get(term_id)
    }

    fn resolve_alt_id(&self, id: HpoTermId) -> HpoTermId {
        if self.hpo_terms.get(id).is_none() {
            if let Some(primary) = self.alt_term_ids.get(&id) {
                return *primary;
            }
        }
        id
    }

    /// Fills the name, synonym and alt-id lookup tables
    ///
    /// Called once by the builder; terms are iterated ascending by id so
    /// the first (lowest) term wins on name collisions.
    pub(crate) fn build_lookup_tables(&mut self) {
        for term in self.hpo_terms.values() {
            let id = *term.id();
            self.names.entry(term.name().to_string()).or_insert(id);
            self.names_lowercase
                .entry(term.name().to_lowercase())
                .or_insert(id);
            for synonym in term.synonyms() {
                self.synonyms_lowercase
                    .entry(synonym.to_lowercase())
                    .or_insert(id);
            }
            for alt_id in term.alt_ids() {
                self.alt_term_ids.entry(alt_id).or_insert(id);
            }
        }
        debug!(
            "lookup tables: {} names, {} synonyms, {} alt ids",
            self.names.len(),
            self.synonyms_lowercase.len(),
            self.alt_term_ids.len()
        );
    }

    /// Sets the default categories of the standard Jax ontology
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] when `HP:0000001` or `HP:0000118` are
    /// missing
    pub(crate) fn set_default_categories(&mut self) -> HpoResult<()> {
        let categories: HpoGroup = {
            let root = self
                .hpo(crate::ROOT_ID)
                .ok_or_else(|| HpoError::NotFound("root term HP:0000001".to_string()))?;
            let phenotypes = self
                .hpo(crate::PHENOTYPE_ID)
                .ok_or_else(|| HpoError::NotFound("term HP:0000118".to_string()))?;
            root.children_ids()
                .iter()
                .filter(|id| id != &crate::PHENOTYPE_ID)
                .chain(phenotypes.children_ids())
                .collect()
        };
        self.categories = categories;
        Ok(())
    }
}

/// An iterator of all [`HpoTerm`]s of the ontology, ascending by id
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, HpoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> Iterator for Iter<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|term| HpoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = HpoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.hpo_terms.values().iter(),
            ontology: self,
        }
    }
}

/// Lazily yields terms whose name (or synonym) contains a query string
///
/// Created by [`Ontology::search`] and [`Ontology::synonym_search`].
/// The terms are yielded in ascending id order.
pub struct SearchIter<'a> {
    inner: std::slice::Iter<'a, HpoTermInternal>,
    ontology: &'a Ontology,
    query: String,
    include_synonyms: bool,
}

impl<'a> SearchIter<'a> {
    fn new(ontology: &'a Ontology, query: &str, include_synonyms: bool) -> Self {
        Self {
            inner: ontology.hpo_terms.values().iter(),
            ontology,
            query: query.to_lowercase(),
            include_synonyms,
        }
    }
}

impl<'a> Iterator for SearchIter<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        for term in self.inner.by_ref() {
            if term.name().to_lowercase().contains(&self.query)
                || (self.include_synonyms
                    && term
                        .synonyms()
                        .iter()
                        .any(|synonym| synonym.to_lowercase().contains(&self.query)))
            {
                return Some(HpoTerm::new(self.ontology, term));
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::internal::HpoTermInternal;

    fn small_ontology() -> Ontology {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder.new_term("Phenotypic abnormality", 118u32).unwrap();
        builder
            .add_term({
                let mut term =
                    HpoTermInternal::new("Abnormal curiosity".to_string(), 3000u32.into());
                term.add_synonym("Strange inquisitiveness");
                term.add_alt_id(900_000u32.into());
                term
            })
            .unwrap();

        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 118u32).unwrap();
        builder.add_parent(118u32, 3000u32).unwrap();
        builder
            .connect_all_terms()
            .unwrap()
            .calculate_information_content()
            .build_minimal()
    }

    #[test]
    fn query_by_id_and_name() {
        let ontology = small_ontology();

        assert!(ontology.hpo(118u32).is_some());
        assert!(ontology.hpo(999u32).is_none());

        assert_eq!(
            ontology.get_hpo_object("HP:0000118").unwrap().id(),
            HpoTermId::from(118u32)
        );
        assert_eq!(
            ontology.get_hpo_object("Abnormal curiosity").unwrap().id(),
            HpoTermId::from(3000u32)
        );
        assert!(matches!(
            ontology.get_hpo_object("No such term"),
            Err(HpoError::NotFound(_))
        ));
    }

    #[test]
    fn query_by_alt_id() {
        let ontology = small_ontology();
        assert_eq!(
            ontology.get_hpo_object(900_000u32).unwrap().id(),
            HpoTermId::from(3000u32)
        );
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let ontology = small_ontology();

        let hits: Vec<HpoTermId> = ontology.search("abnormal").map(|term| term.id()).collect();
        let expected: Vec<HpoTermId> = vec![118u32.into(), 3000u32.into()];
        assert_eq!(hits, expected);

        assert!(ontology.search("inquisitive").next().is_none());
        assert!(ontology.synonym_search("inquisitive").next().is_some());
    }

    #[test]
    fn synonym_matching() {
        let ontology = small_ontology();
        assert_eq!(
            ontology.synonym_match("strange INQUISITIVENESS").unwrap().id(),
            HpoTermId::from(3000u32)
        );
        assert_eq!(
            ontology.synonym_match("abnormal curiosity").unwrap().id(),
            HpoTermId::from(3000u32)
        );
        assert!(ontology.synonym_match("nothing").is_err());
    }

    #[test]
    fn iteration_is_ascending() {
        let ontology = small_ontology();
        let ids: Vec<u32> = ontology.hpos().map(|term| term.id().as_u32()).collect();
        assert_eq!(ids, vec![1, 118, 3000]);
    }

    #[test]
    fn custom_ic_tables() {
        let mut ontology = small_ontology();
        assert!(ontology.custom_ic("clinical").is_err());

        let mut table = CustomIcTable::new();
        table.insert(3000u32.into(), 1.5);
        ontology.set_custom_ic("clinical", table);

        let snapshot = ontology.custom_ic("clinical").unwrap();
        assert_eq!(ontology.custom_ic_of("clinical", 3000u32).unwrap(), 1.5);
        assert_eq!(ontology.custom_ic_of("clinical", 118u32).unwrap(), 0.0);

        // replacing the table does not alter the snapshot
        ontology.set_custom_ic("clinical", CustomIcTable::new());
        assert_eq!(snapshot.get(&3000u32.into()), Some(&1.5));
        assert_eq!(ontology.custom_ic_of("clinical", 3000u32).unwrap(), 0.0);
    }
}
