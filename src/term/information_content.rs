//! Per-term information content for each annotation kind

use crate::HpoResult;

/// Selects which annotation kind an information content value refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InformationContentKind {
    /// IC based on gene annotations
    Gene,
    /// IC based on OMIM disease annotations
    Omim,
    /// IC based on Orphanet disease annotations
    Orpha,
    /// IC based on DECIPHER disease annotations
    Decipher,
}

impl TryFrom<&str> for InformationContentKind {
    type Error = crate::HpoError;

    fn try_from(value: &str) -> HpoResult<Self> {
        match value {
            "gene" => Ok(Self::Gene),
            "omim" => Ok(Self::Omim),
            "orpha" => Ok(Self::Orpha),
            "decipher" => Ok(Self::Decipher),
            other => Err(crate::HpoError::NotFound(format!(
                "information content kind: {other}"
            ))),
        }
    }
}

/// The information content of a single term, one value per annotation kind
///
/// The IC is defined as `-ln(n / N)` where `N` is the number of
/// annotation records of the kind in the whole ontology and `n` the
/// number of records linked to the term or any of its descendants.
///
/// A value of `0.0` is a sentinel for *unknown*: terms without any
/// annotation of the kind keep it, so callers must not interpret `0.0`
/// as "maximally general".
#[derive(Clone, Default, Debug)]
pub struct InformationContent {
    gene: f64,
    omim: f64,
    orpha: f64,
    decipher: f64,
}

/// `-ln(n / N)`, or the `0.0` sentinel when either count is zero
fn calculate(total: usize, current: usize) -> f64 {
    if total == 0 || current == 0 {
        0.0
    } else {
        -(current as f64 / total as f64).ln()
    }
}

impl InformationContent {
    /// Returns the gene-based information content
    pub fn gene(&self) -> f64 {
        self.gene
    }

    /// Returns the OMIM-disease-based information content
    pub fn omim_disease(&self) -> f64 {
        self.omim
    }

    /// Returns the Orpha-disease-based information content
    pub fn orpha_disease(&self) -> f64 {
        self.orpha
    }

    /// Returns the DECIPHER-disease-based information content
    pub fn decipher_disease(&self) -> f64 {
        self.decipher
    }

    /// Returns the information content of the given kind
    pub fn get_kind(&self, kind: InformationContentKind) -> f64 {
        match kind {
            InformationContentKind::Gene => self.gene(),
            InformationContentKind::Omim => self.omim_disease(),
            InformationContentKind::Orpha => self.orpha_disease(),
            InformationContentKind::Decipher => self.decipher_disease(),
        }
    }

    pub(crate) fn set_gene(&mut self, total: usize, current: usize) {
        self.gene = calculate(total, current);
    }

    pub(crate) fn set_omim_disease(&mut self, total: usize, current: usize) {
        self.omim = calculate(total, current);
    }

    pub(crate) fn set_orpha_disease(&mut self, total: usize, current: usize) {
        self.orpha = calculate(total, current);
    }

    pub(crate) fn set_decipher_disease(&mut self, total: usize, current: usize) {
        self.decipher = calculate(total, current);
    }
}
