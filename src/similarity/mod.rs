//! Similarity scores between two terms or two sets of terms
//!
//! Pairwise scores are computed by types implementing [`Similarity`];
//! the built-in kernels live in [`defaults`] and can be selected by
//! name through [`Builtins::new`] or a [`KernelTable`]. For set-vs-set
//! comparisons the pairwise scores of all term combinations form a
//! [`Matrix`] which a [`SimilarityCombiner`] reduces to a single score.

use std::collections::HashMap;

use crate::matrix::Matrix;
use crate::set::HpoSet;
use crate::term::InformationContentKind;
use crate::{HpoError, HpoResult, HpoTerm};

pub mod defaults;

pub use defaults::{
    Distance, Equal, GraphIc, InformationCoefficient, Jc, Jc2, Lin, Relevance, Resnik,
};

/// Trait for similarity score calculation between two [`HpoTerm`]s
pub trait Similarity {
    /// Calculates the similarity between term `a` and term `b`
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64;
}

impl Similarity for Box<dyn Similarity + Send + Sync> {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        (**self).calculate(a, b)
    }
}

/// The built-in similarity kernels, tagged by their registered name
///
/// | Name | Kernel |
/// |---|---|
/// | `resnik` | [`Resnik`] |
/// | `lin` | [`Lin`] |
/// | `jc` | [`Jc`] |
/// | `jc2` | [`Jc2`] |
/// | `rel` | [`Relevance`] |
/// | `ic` | [`InformationCoefficient`] |
/// | `graphic` | [`GraphIc`] |
/// | `dist` | [`Distance`] |
/// | `equal` | [`Equal`] |
#[derive(Debug, Clone, Copy)]
pub enum Builtins {
    /// Resnik similarity
    Resnik(InformationContentKind),
    /// Lin similarity
    Lin(InformationContentKind),
    /// Jiang & Conrath similarity, bounded form
    Jc(InformationContentKind),
    /// Jiang & Conrath similarity, inverted form
    Jc2(InformationContentKind),
    /// Relevance similarity
    Relevance(InformationContentKind),
    /// Raw MICA information content
    InformationCoefficient(InformationContentKind),
    /// Graph based ancestor-set similarity
    GraphIc,
    /// Distance based similarity
    Distance,
    /// Identity
    Equal,
}

impl Builtins {
    /// Resolves a method name into the matching kernel
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] for an unknown method name
    pub fn new(method: &str, kind: InformationContentKind) -> HpoResult<Self> {
        match method {
            "resnik" => Ok(Self::Resnik(kind)),
            "lin" => Ok(Self::Lin(kind)),
            "jc" => Ok(Self::Jc(kind)),
            "jc2" => Ok(Self::Jc2(kind)),
            "rel" => Ok(Self::Relevance(kind)),
            "ic" => Ok(Self::InformationCoefficient(kind)),
            "graphic" => Ok(Self::GraphIc),
            "dist" => Ok(Self::Distance),
            "equal" => Ok(Self::Equal),
            other => Err(HpoError::NotFound(format!("similarity method: {other}"))),
        }
    }
}

impl Similarity for Builtins {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        match self {
            Builtins::Resnik(kind) => Resnik::new(*kind).calculate(a, b),
            Builtins::Lin(kind) => Lin::new(*kind).calculate(a, b),
            Builtins::Jc(kind) => Jc::new(*kind).calculate(a, b),
            Builtins::Jc2(kind) => Jc2::new(*kind).calculate(a, b),
            Builtins::Relevance(kind) => Relevance::new(*kind).calculate(a, b),
            Builtins::InformationCoefficient(kind) => {
                InformationCoefficient::new(*kind).calculate(a, b)
            }
            Builtins::GraphIc => GraphIc::new().calculate(a, b),
            Builtins::Distance => Distance::new().calculate(a, b),
            Builtins::Equal => Equal::new().calculate(a, b),
        }
    }
}

/// A boxed kernel, as produced by a [`KernelTable`]
pub type BoxedSimilarity = Box<dyn Similarity + Send + Sync>;

/// Factory creating a kernel for an annotation kind
type KernelFactory = Box<dyn Fn(InformationContentKind) -> BoxedSimilarity + Send + Sync>;

/// A registry of similarity kernels, addressable by name
///
/// The table starts out with all [`Builtins`] registered;
/// [`KernelTable::register`] adds custom kernels, replacing an existing
/// entry of the same name.
///
/// # Examples
///
/// ```
/// use phenosim::similarity::{KernelTable, Similarity};
/// use phenosim::term::InformationContentKind;
/// use phenosim::HpoTerm;
///
/// struct AlwaysOne;
/// impl Similarity for AlwaysOne {
///     fn calculate(&self, _: &HpoTerm, _: &HpoTerm) -> f64 {
///         1.0
///     }
/// }
///
/// let mut table = KernelTable::default();
/// table.register("one", |_| Box::new(AlwaysOne));
///
/// assert!(table.create("one", InformationContentKind::Omim).is_ok());
/// assert!(table.create("resnik", InformationContentKind::Omim).is_ok());
/// assert!(table.create("no-such-kernel", InformationContentKind::Omim).is_err());
/// ```
pub struct KernelTable {
    kernels: HashMap<String, KernelFactory>,
}

impl Default for KernelTable {
    fn default() -> Self {
        let mut table = Self {
            kernels: HashMap::new(),
        };
        for name in [
            "resnik", "lin", "jc", "jc2", "rel", "ic", "graphic", "dist", "equal",
        ] {
            table.register(name, move |kind| {
                Box::new(
                    Builtins::new(name, kind)
                        .expect("builtin kernel names are always registered"),
                )
            });
        }
        table
    }
}

impl KernelTable {
    /// Registers a kernel factory under the given name
    ///
    /// An existing kernel of the same name is replaced.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(InformationContentKind) -> BoxedSimilarity + Send + Sync + 'static,
    {
        self.kernels.insert(name.to_string(), Box::new(factory));
    }

    /// Creates the kernel registered under `name` for the given kind
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] for an unknown kernel name
    pub fn create(&self, name: &str, kind: InformationContentKind) -> HpoResult<BoxedSimilarity> {
        self.kernels
            .get(name)
            .map(|factory| factory(kind))
            .ok_or_else(|| HpoError::NotFound(format!("similarity method: {name}")))
    }
}

/// The per-term weights used by weighted combiners
///
/// Row weights belong to the terms of the left-hand set, column weights
/// to the terms of the right-hand set. The standard weights are the
/// terms' information content of the compared kind.
pub struct CombinerWeights {
    rows: Vec<f64>,
    cols: Vec<f64>,
}

impl CombinerWeights {
    /// Information content weights for both sets
    pub fn new(a: &HpoSet, b: &HpoSet, kind: InformationContentKind) -> Self {
        Self {
            rows: a
                .iter()
                .map(|term| term.information_content().get_kind(kind))
                .collect(),
            cols: b
                .iter()
                .map(|term| term.information_content().get_kind(kind))
                .collect(),
        }
    }

    /// The weights of the left-hand set, one per matrix row
    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    /// The weights of the right-hand set, one per matrix column
    pub fn cols(&self) -> &[f64] {
        &self.cols
    }
}

/// Combines a matrix of pairwise term similarities into a single
/// set-vs-set score
pub trait SimilarityCombiner {
    /// Implements the actual combination logic
    ///
    /// The `weights` carry one value per row and column; combiners that
    /// do not weigh their scores ignore them.
    fn combine(&self, m: &Matrix, weights: &CombinerWeights) -> f64;

    /// Reduces the matrix, short-circuiting empty matrices to `0.0`
    fn calculate(&self, m: &Matrix, weights: &CombinerWeights) -> f64 {
        if m.is_empty() {
            return 0.0;
        }
        self.combine(m, weights)
    }

    /// The maximum value of each row
    fn row_maxes(&self, m: &Matrix) -> Vec<f64> {
        m.rows()
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// The maximum value of each column
    fn col_maxes(&self, m: &Matrix) -> Vec<f64> {
        m.cols()
            .map(|col| col.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }
}

/// The built-in combination strategies
///
/// All methods are described in
/// [Schlicker A, et. al., BMC Bioinf (2006)](https://pubmed.ncbi.nlm.nih.gov/16776819/)
/// and [Wang JZ, et. al., Bioinformatics (2007)](https://pubmed.ncbi.nlm.nih.gov/17344234/).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StandardCombiner {
    /// Mean of the row-max mean and the column-max mean
    #[default]
    FunSimAvg,
    /// The larger of the row-max mean and the column-max mean
    FunSimMax,
    /// Best-match average: mean over all row and column maxima
    Bma,
    /// Best-match weighted average: row and column maxima weighted by
    /// the information content of their terms
    Bmwa,
}

impl StandardCombiner {
    /// Resolves a combiner name
    ///
    /// Valid names are `funSimAvg`, `funSimMax`, `BMA` and `BMWA`.
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] for an unknown combiner name
    pub fn new(name: &str) -> HpoResult<Self> {
        match name {
            "funSimAvg" => Ok(Self::FunSimAvg),
            "funSimMax" => Ok(Self::FunSimMax),
            "BMA" => Ok(Self::Bma),
            "BMWA" => Ok(Self::Bmwa),
            other => Err(HpoError::NotFound(format!("combine method: {other}"))),
        }
    }

    fn fun_sim_avg(&self, m: &Matrix) -> f64 {
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);
        let row_mean = mean(&row_maxes);
        let col_mean = mean(&col_maxes);

        (row_mean + col_mean) / 2.0
    }

    fn fun_sim_max(&self, m: &Matrix) -> f64 {
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        mean(&row_maxes).max(mean(&col_maxes))
    }

    fn bma(&self, m: &Matrix) -> f64 {
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);
        let n = row_maxes.len() + col_maxes.len();

        (row_maxes.iter().sum::<f64>() + col_maxes.iter().sum::<f64>()) / n as f64
    }

    fn bmwa(&self, m: &Matrix, weights: &CombinerWeights) -> f64 {
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        let weight_sum: f64 = weights.rows().iter().sum::<f64>() + weights.cols().iter().sum::<f64>();
        if weight_sum == 0.0 {
            return 0.0;
        }

        let weighted: f64 = row_maxes
            .iter()
            .zip(weights.rows())
            .map(|(max, weight)| max * weight)
            .sum::<f64>()
            + col_maxes
                .iter()
                .zip(weights.cols())
                .map(|(max, weight)| max * weight)
                .sum::<f64>();

        weighted / weight_sum
    }
}

impl SimilarityCombiner for StandardCombiner {
    fn combine(&self, m: &Matrix, weights: &CombinerWeights) -> f64 {
        match self {
            StandardCombiner::FunSimAvg => self.fun_sim_avg(m),
            StandardCombiner::FunSimMax => self.fun_sim_max(m),
            StandardCombiner::Bma => self.bma(m),
            StandardCombiner::Bmwa => self.bmwa(m, weights),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculates the similarity score between two sets of HPO terms
///
/// Combines a pairwise [`Similarity`] kernel with a
/// [`SimilarityCombiner`]. The most convenient entry point is
/// [`HpoSet::similarity`], which resolves both from their names.
pub struct GroupSimilarity<S, C> {
    similarity: S,
    combiner: C,
}

impl Default for GroupSimilarity<Builtins, StandardCombiner> {
    fn default() -> Self {
        Self {
            similarity: Builtins::GraphIc,
            combiner: StandardCombiner::FunSimAvg,
        }
    }
}

impl<S: Similarity, C: SimilarityCombiner> GroupSimilarity<S, C> {
    /// Constructs a new `GroupSimilarity`
    pub fn new(combiner: C, similarity: S) -> Self {
        Self {
            combiner,
            similarity,
        }
    }

    /// Calculates the similarity between two sets of terms
    ///
    /// `weight_kind` selects the information content used for weighted
    /// combiners. An empty set on either side yields `0.0`.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::HpoError::IndexError`] from the score matrix
    /// construction; does not occur for well-formed sets.
    pub fn calculate(
        &self,
        a: &HpoSet,
        b: &HpoSet,
        weight_kind: InformationContentKind,
    ) -> HpoResult<f64> {
        if a.is_empty() || b.is_empty() {
            return Ok(0.0);
        }

        let mut scores = Vec::with_capacity(a.len() * b.len());
        for t1 in a {
            for t2 in b {
                scores.push(self.similarity.calculate(&t1, &t2));
            }
        }
        let m = Matrix::new(a.len(), b.len(), scores)?;
        let weights = CombinerWeights::new(a, b, weight_kind);

        Ok(self.combiner.calculate(&m, &weights))
    }
}
