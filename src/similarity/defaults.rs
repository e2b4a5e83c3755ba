//! The built-in similarity kernels
//!
//! All kernels can also be selected by name through
//! [`crate::similarity::Builtins`] or a [`crate::similarity::KernelTable`].

use crate::similarity::Similarity;
use crate::term::InformationContentKind;
use crate::HpoTerm;

/// Returns the information content of the most informative common
/// ancestor of both terms
///
/// Common ancestors follow the shared definition: each term counts as
/// its own ancestor, so `mica(a, a)` is at least `IC(a)`.
fn mica(a: &HpoTerm, b: &HpoTerm, kind: InformationContentKind) -> f64 {
    a.common_ancestors(b)
        .iter()
        .map(|term| term.information_content().get_kind(kind))
        .fold(0.0, f64::max)
}

/// Similarity score from Resnik
///
/// The information content of the most informative common ancestor
/// (MICA).
///
/// For a detailed description see
/// [Resnik P, Proceedings of the 14th IJCAI, (1995)](https://www.ijcai.org/Proceedings/95-1/Papers/059.pdf)
#[derive(Debug, Clone, Copy)]
pub struct Resnik {
    kind: InformationContentKind,
}

impl Resnik {
    /// Constructs a Resnik kernel for the given annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Resnik {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        mica(a, b, self.kind)
    }
}

/// Similarity score from Lin
///
/// `2 * MICA / (IC(a) + IC(b))`, `0.0` when the denominator is zero.
///
/// For a detailed description see
/// [Lin D, Proceedings of the 15th ICML, (1998)](https://dl.acm.org/doi/10.5555/645527.657297)
#[derive(Debug, Clone, Copy)]
pub struct Lin {
    kind: InformationContentKind,
}

impl Lin {
    /// Constructs a Lin kernel for the given annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Lin {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        let ic_combined = a.information_content().get_kind(self.kind)
            + b.information_content().get_kind(self.kind);

        if ic_combined == 0.0 {
            return 0.0;
        }

        2.0 * mica(a, b, self.kind) / ic_combined
    }
}

/// Jiang & Conrath distance, converted into a bounded similarity
///
/// `1 - min(1, IC(a) + IC(b) - 2 * MICA)`, clamped into `[0, 1]`.
///
/// For a detailed description see
/// [Jiang J, Conrath D, Rocling X, (1997)](https://aclanthology.org/O97-1002.pdf)
#[derive(Debug, Clone, Copy)]
pub struct Jc {
    kind: InformationContentKind,
}

impl Jc {
    /// Constructs a Jiang & Conrath kernel for the given annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Jc {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        let distance = a.information_content().get_kind(self.kind)
            + b.information_content().get_kind(self.kind)
            - 2.0 * mica(a, b, self.kind);

        (1.0 - distance.min(1.0)).clamp(0.0, 1.0)
    }
}

/// Jiang & Conrath distance, converted by inversion
///
/// `1 / (1 + IC(a) + IC(b) - 2 * MICA)`
#[derive(Debug, Clone, Copy)]
pub struct Jc2 {
    kind: InformationContentKind,
}

impl Jc2 {
    /// Constructs the inverted Jiang & Conrath kernel for the given
    /// annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Jc2 {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        let distance = a.information_content().get_kind(self.kind)
            + b.information_content().get_kind(self.kind)
            - 2.0 * mica(a, b, self.kind);

        1.0 / (1.0 + distance.max(0.0))
    }
}

/// Relevance similarity score from Schlicker
///
/// `lin(a, b) * (1 - exp(-MICA))`
///
/// For a detailed description see
/// [Schlicker A, et.al., BMC Bioinformatics, (2006)](https://bmcbioinformatics.biomedcentral.com/articles/10.1186/1471-2105-7-302)
#[derive(Debug, Clone, Copy)]
pub struct Relevance {
    kind: InformationContentKind,
}

impl Relevance {
    /// Constructs a Relevance kernel for the given annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Relevance {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        let resnik = mica(a, b, self.kind);
        let lin = Lin::new(self.kind).calculate(a, b);

        lin * (1.0 - (-resnik).exp())
    }
}

/// The raw information content of the most informative common ancestor
///
/// Identical to [`Resnik`] except for its registered name.
#[derive(Debug, Clone, Copy)]
pub struct InformationCoefficient {
    kind: InformationContentKind,
}

impl InformationCoefficient {
    /// Constructs the kernel for the given annotation kind
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for InformationCoefficient {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        mica(a, b, self.kind)
    }
}

/// Graph based similarity over the ancestor sets
///
/// The number of common ancestors divided by the number of combined
/// ancestors, where each term counts as its own ancestor. Unlike the
/// other kernels it does not use any information content.
#[derive(Default, Debug, Clone, Copy)]
pub struct GraphIc {}

impl GraphIc {
    /// Constructs a `GraphIC` kernel
    pub fn new() -> Self {
        Self::default()
    }
}

impl Similarity for GraphIc {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        if a.id() == b.id() {
            return 1.0;
        }

        // the inclusive union always contains both terms, so the
        // denominator cannot be zero
        let common = a.common_ancestor_ids(b).len();
        let union = a.union_ancestor_ids(b).len();

        common as f64 / union as f64
    }
}

/// Similarity score based on the distance between the terms
///
/// `1 / (1 + steps)` where `steps` is the length of the shortest path
/// via a common ancestor. Terms without a common ancestor score `0.0`.
#[derive(Default, Debug, Clone, Copy)]
pub struct Distance {}

impl Distance {
    /// Constructs a distance based kernel
    pub fn new() -> Self {
        Self::default()
    }
}

impl Similarity for Distance {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        a.distance_to_term(b)
            .map_or(0.0, |steps| 1.0 / (1.0 + steps as f64))
    }
}

/// Identity kernel: `1.0` for the same term, `0.0` otherwise
#[derive(Default, Debug, Clone, Copy)]
pub struct Equal {}

impl Equal {
    /// Constructs the identity kernel
    pub fn new() -> Self {
        Self::default()
    }
}

impl Similarity for Equal {
    fn calculate(&self, a: &HpoTerm, b: &HpoTerm) -> f64 {
        if a.id() == b.id() {
            1.0
        } else {
            0.0
        }
    }
}
