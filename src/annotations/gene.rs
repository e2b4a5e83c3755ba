use core::fmt::Debug;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::AnnotationId;
use crate::set::HpoSet;
use crate::term::HpoGroup;
use crate::{HpoError, HpoTermId, Ontology};

/// A set of [`GeneId`]s
///
/// The set does not contain the [`Gene`] records themselves, only their
/// ids. Terms use it to record which genes annotate them.
pub type Genes = HashSet<GeneId>;

/// A unique identifier for a [`Gene`]
///
/// With the standard Jax masterdata this is the NCBI (Entrez) gene id
/// from the `ncbi_gene_id` column of `phenotype_to_genes.txt`.
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct GeneId {
    inner: u32,
}

impl AnnotationId for GeneId {
    fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GeneId {
    type Error = HpoError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(GeneId {
            inner: value.parse::<u32>()?,
        })
    }
}

impl From<u32> for GeneId {
    fn from(inner: u32) -> Self {
        GeneId { inner }
    }
}

impl Display for GeneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// A single gene with its direct HPO-term annotations
///
/// Identity is the [`GeneId`]; the HUGO symbol is a display attribute
/// only. The `hpo` set holds exactly the terms the gene was linked to in
/// the annotation data, *not* their ancestors.
#[derive(Default, Debug, Clone)]
pub struct Gene {
    id: GeneId,
    name: String,
    hpos: HpoGroup,
}

impl Gene {
    /// Initializes a new gene
    ///
    /// This method should rarely, if ever, be used directly. Genes are
    /// created by the ontology builder so that each gene exists only once.
    pub(crate) fn new(id: GeneId, name: &str) -> Gene {
        Gene {
            id,
            name: name.to_string(),
            hpos: HpoGroup::default(),
        }
    }

    /// The unique [`GeneId`] of the gene
    pub fn id(&self) -> &GeneId {
        &self.id
    }

    /// The HUGO gene symbol
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The HUGO gene symbol, alias of [`Gene::name`]
    pub fn symbol(&self) -> &str {
        &self.name
    }

    /// Records a direct link to an HPO term
    pub(crate) fn add_term<I: Into<HpoTermId>>(&mut self, term_id: I) -> bool {
        self.hpos.insert(term_id)
    }

    /// The directly linked HPO terms
    pub fn hpo_terms(&self) -> &HpoGroup {
        &self.hpos
    }

    /// Returns an [`HpoSet`] of the directly linked terms
    pub fn to_hpo_set<'a>(&self, ontology: &'a Ontology) -> HpoSet<'a> {
        HpoSet::new(ontology, self.hpos.clone())
    }
}

impl PartialEq for Gene {
    fn eq(&self, other: &Gene) -> bool {
        self.id == other.id
    }
}
impl Eq for Gene {}

impl Hash for Gene {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Iterates [`Gene`]s from a set of [`GeneId`]s
pub struct GeneIterator<'a> {
    ontology: &'a Ontology,
    genes: std::collections::hash_set::Iter<'a, GeneId>,
}

impl<'a> GeneIterator<'a> {
    /// Constructs a new iterator over the given id set
    pub fn new(genes: &'a Genes, ontology: &'a Ontology) -> Self {
        GeneIterator {
            genes: genes.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for GeneIterator<'a> {
    type Item = &'a Gene;
    fn next(&mut self) -> Option<Self::Item> {
        self.genes.next().map(|gene_id| {
            self.ontology
                .gene(gene_id)
                .expect("gene must exist in ontology when it is linked to a term")
        })
    }
}

impl Debug for GeneIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeneIterator")
    }
}
