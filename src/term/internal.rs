use std::hash::Hash;

use crate::annotations::{DecipherDiseaseId, DecipherDiseases};
use crate::annotations::{GeneId, Genes};
use crate::annotations::{OmimDiseaseId, OmimDiseases};
use crate::annotations::{OrphaDiseaseId, OrphaDiseases};
use crate::term::{HpoGroup, HpoTermId, InformationContent};
use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_DISEASES, DEFAULT_NUM_GENES, DEFAULT_NUM_PARENTS};

/// The actual term record owned by the ontology arena
///
/// Clients never interact with this struct directly, they use the
/// [`crate::HpoTerm`] view which combines the record with a reference to
/// the ontology.
///
/// Parents and children hold the direct `is_a` adjacency. The
/// `all_parents`/`all_children` groups are the cached transitive
/// closures, excluding the term itself; they are filled once during the
/// build and never touched afterwards.
#[derive(Clone, Debug)]
pub(crate) struct HpoTermInternal {
    id: HpoTermId,
    name: String,
    definition: String,
    comment: String,
    synonyms: Vec<String>,
    alt_ids: HpoGroup,
    obsolete: bool,
    replacement: Option<HpoTermId>,
    parents: HpoGroup,
    children: HpoGroup,
    all_parents: HpoGroup,
    all_children: HpoGroup,
    genes: Genes,
    omim_diseases: OmimDiseases,
    orpha_diseases: OrphaDiseases,
    decipher_diseases: DecipherDiseases,
    omim_excluded: OmimDiseases,
    orpha_excluded: OrphaDiseases,
    decipher_excluded: DecipherDiseases,
    ic: InformationContent,
}

impl Hash for HpoTermInternal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl HpoTermInternal {
    pub fn new(name: String, id: HpoTermId) -> HpoTermInternal {
        HpoTermInternal {
            id,
            name,
            definition: String::new(),
            comment: String::new(),
            synonyms: Vec::new(),
            alt_ids: HpoGroup::default(),
            obsolete: false,
            replacement: None,
            parents: HpoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            children: HpoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: HpoGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            all_children: HpoGroup::new(),
            genes: Genes::with_capacity(DEFAULT_NUM_GENES),
            omim_diseases: OmimDiseases::with_capacity(DEFAULT_NUM_DISEASES),
            orpha_diseases: OrphaDiseases::with_capacity(DEFAULT_NUM_DISEASES),
            decipher_diseases: DecipherDiseases::with_capacity(DEFAULT_NUM_DISEASES),
            omim_excluded: OmimDiseases::default(),
            orpha_excluded: OrphaDiseases::default(),
            decipher_excluded: DecipherDiseases::default(),
            ic: InformationContent::default(),
        }
    }

    pub fn id(&self) -> &HpoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut String {
        &mut self.definition
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn comment_mut(&mut self) -> &mut String {
        &mut self.comment
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn add_synonym(&mut self, synonym: &str) {
        self.synonyms.push(synonym.to_string());
    }

    pub fn alt_ids(&self) -> &HpoGroup {
        &self.alt_ids
    }

    pub fn add_alt_id(&mut self, id: HpoTermId) {
        self.alt_ids.insert(id);
    }

    pub fn obsolete(&self) -> bool {
        self.obsolete
    }

    pub fn obsolete_mut(&mut self) -> &mut bool {
        &mut self.obsolete
    }

    pub fn replacement(&self) -> Option<HpoTermId> {
        self.replacement
    }

    /// Records the replacement of an obsolete term
    ///
    /// The first recorded replacement wins, further ids are ignored.
    pub fn set_replacement(&mut self, id: HpoTermId) {
        self.replacement.get_or_insert(id);
    }

    pub fn parents(&self) -> &HpoGroup {
        &self.parents
    }

    pub fn children(&self) -> &HpoGroup {
        &self.children
    }

    pub fn all_parents(&self) -> &HpoGroup {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut HpoGroup {
        &mut self.all_parents
    }

    pub fn all_children(&self) -> &HpoGroup {
        &self.all_children
    }

    pub fn all_children_mut(&mut self) -> &mut HpoGroup {
        &mut self.all_children
    }

    /// `true` once the ancestor cache of the term is built
    ///
    /// Terms without parents (the root) are considered cached from the
    /// start.
    pub fn parents_cached(&self) -> bool {
        if self.parents.is_empty() {
            true
        } else {
            !self.all_parents.is_empty()
        }
    }

    pub fn add_parent<I: Into<HpoTermId>>(&mut self, parent_id: I) {
        self.parents.insert(parent_id.into());
    }

    pub fn add_child<I: Into<HpoTermId>>(&mut self, child_id: I) {
        self.children.insert(child_id.into());
    }

    pub fn add_gene(&mut self, gene_id: GeneId) -> bool {
        self.genes.insert(gene_id)
    }

    pub fn add_omim_disease(&mut self, disease_id: OmimDiseaseId) -> bool {
        self.omim_diseases.insert(disease_id)
    }

    pub fn add_orpha_disease(&mut self, disease_id: OrphaDiseaseId) -> bool {
        self.orpha_diseases.insert(disease_id)
    }

    pub fn add_decipher_disease(&mut self, disease_id: DecipherDiseaseId) -> bool {
        self.decipher_diseases.insert(disease_id)
    }

    pub fn add_omim_excluded(&mut self, disease_id: OmimDiseaseId) -> bool {
        self.omim_excluded.insert(disease_id)
    }

    pub fn add_orpha_excluded(&mut self, disease_id: OrphaDiseaseId) -> bool {
        self.orpha_excluded.insert(disease_id)
    }

    pub fn add_decipher_excluded(&mut self, disease_id: DecipherDiseaseId) -> bool {
        self.decipher_excluded.insert(disease_id)
    }

    pub fn genes(&self) -> &Genes {
        &self.genes
    }

    pub fn omim_diseases(&self) -> &OmimDiseases {
        &self.omim_diseases
    }

    pub fn orpha_diseases(&self) -> &OrphaDiseases {
        &self.orpha_diseases
    }

    pub fn decipher_diseases(&self) -> &DecipherDiseases {
        &self.decipher_diseases
    }

    pub fn omim_excluded(&self) -> &OmimDiseases {
        &self.omim_excluded
    }

    pub fn orpha_excluded(&self) -> &OrphaDiseases {
        &self.orpha_excluded
    }

    pub fn decipher_excluded(&self) -> &DecipherDiseases {
        &self.decipher_excluded
    }

    pub fn information_content(&self) -> &InformationContent {
        &self.ic
    }

    pub fn information_content_mut(&mut self) -> &mut InformationContent {
        &mut self.ic
    }
}

impl PartialEq for HpoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HpoTermInternal {}
