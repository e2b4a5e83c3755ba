//! `phenosim` is a library to work with the [Human Phenotype Ontology](https://hpo.jax.org)
//! and its gene and disease annotations.
//!
//! It loads the ontology from the standard Jax master data into a frozen
//! in-memory graph and answers structural and semantic queries on it:
//! ancestors and descendants, paths, per-term information content,
//! pairwise and set-based similarity scores and hypergeometric enrichment
//! of genes or diseases in a set of HPO terms.
//!
//! # Quickstart
//!
//! ```no_run
//! use phenosim::{HpoSet, Ontology};
//! use phenosim::term::InformationContentKind;
//!
//! let ontology = Ontology::from_standard("/path/to/jax/data/").unwrap();
//!
//! let scoliosis = ontology.get_hpo_object("HP:0002650").unwrap();
//! println!("{} | {}", scoliosis.id(), scoliosis.name());
//!
//! for gene in scoliosis.genes() {
//!     println!("{}", gene.symbol());
//! }
//!
//! let patient = HpoSet::from_queries(
//!     &ontology,
//!     ["HP:0002650", "HP:0008458"],
//! ).unwrap();
//! let reference = HpoSet::from_queries(
//!     &ontology,
//!     ["HP:0010674", "HP:0009121"],
//! ).unwrap();
//!
//! let score = patient
//!     .similarity(&reference, InformationContentKind::Omim, "graphic", "funSimAvg")
//!     .unwrap();
//! assert!((0.0..=1.0).contains(&score));
//! ```
//!
//! The ontology is built once and read-only afterwards. All data is owned
//! by the [`Ontology`]; terms, genes and diseases reference each other by
//! id only, so `&Ontology` can be shared freely between threads.

use std::num::ParseIntError;

use thiserror::Error;

pub mod annotations;
pub mod matrix;
mod ontology;
pub(crate) mod parser;
mod set;
pub mod similarity;
pub mod stats;
pub mod term;
pub mod utils;

pub use ontology::builder;
pub use ontology::{
    Builder, CustomIcTable, Iter as OntologyIter, Ontology, SearchIter, TermQuery,
};
pub use set::{HpoSet, SetInformationContent, SetVariance};
pub use term::{HpoGroup, HpoTerm, HpoTermId};

/// Initial capacity for the direct-parent groups of a term
const DEFAULT_NUM_PARENTS: usize = 8;
/// Initial capacity for the ancestor cache of a term
const DEFAULT_NUM_ALL_PARENTS: usize = 48;
/// Initial capacity for per-term gene annotation sets
const DEFAULT_NUM_GENES: usize = 40;
/// Initial capacity for per-term disease annotation sets
const DEFAULT_NUM_DISEASES: usize = 16;

/// The root of the ontology: `HP:0000001 | All`
pub const ROOT_ID: HpoTermId = HpoTermId::from_u32(1);
/// `HP:0000118 | Phenotypic abnormality`, the top phenotype category
pub const PHENOTYPE_ID: HpoTermId = HpoTermId::from_u32(118);
/// `HP:0012823 | Clinical modifier`; the term and its descendants are
/// modifier terms
pub const MODIFIER_ID: HpoTermId = HpoTermId::from_u32(12823);

pub(crate) const OBO_FILENAME: &str = "hp.obo";
pub(crate) const GENE_FILENAME: &str = "phenotype_to_genes.txt";
pub(crate) const DISEASE_FILENAME: &str = "phenotype.hpoa";

/// Error type for all fallible operations of the crate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HpoError {
    /// A term, gene, disease, similarity method or combiner is unknown
    #[error("not found: {0}")]
    NotFound(String),
    /// Malformed input data, e.g. an invalid OBO stanza or an `is_a`
    /// reference to a term that does not exist
    #[error("unable to parse: {0}")]
    ParseError(String),
    /// The ontology data violates a structural guarantee, e.g. a cycle
    /// in the `is_a` graph or a missing root term
    #[error("ontology invariant violated: {0}")]
    InvariantViolation(String),
    /// A structurally valid request that is not defined for its
    /// arguments, e.g. the path to a term that is not an ancestor
    #[error("invalid operation: {0}")]
    DomainError(String),
    /// Out-of-range access into a [`matrix::Matrix`]
    #[error("index [{row}, {col}] out of range for a {rows}x{cols} matrix")]
    IndexError {
        /// requested row
        row: usize,
        /// requested column
        col: usize,
        /// number of rows in the matrix
        rows: usize,
        /// number of columns in the matrix
        cols: usize,
    },
    /// An input file is missing or not readable
    #[error("cannot open file: {0}")]
    CannotOpenFile(String),
    /// An id could not be parsed into an integer
    #[error("unable to parse integer")]
    ParseIntError,
}

impl From<ParseIntError> for HpoError {
    fn from(_: ParseIntError) -> Self {
        HpoError::ParseIntError
    }
}

/// Crate-wide `Result` with [`HpoError`]
pub type HpoResult<T> = Result<T, HpoError>;
