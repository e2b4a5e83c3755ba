//! Statistical enrichment of genes and diseases in sets of HPO terms
//!
//! Use the enrichment to check whether the annotations of a term set,
//! e.g. a patient's clinical information, point towards specific genes
//! or diseases. The calculation models the annotation links as an urn
//! and computes the hypergeometric survival function: how likely is it
//! to observe at least as many links to a gene/disease in the set as
//! were actually observed.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::annotations::{AnnotationId, DecipherDiseaseId, GeneId, OmimDiseaseId, OrphaDiseaseId};
use crate::HpoTerm;

pub mod hypergeom;

/// The enrichment result of a single gene or disease
///
/// The p-value is the enrichment score: the results of the enrichment
/// functions are sorted by it in ascending order, so the most enriched
/// records come first.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment<T> {
    item: T,
    count: u64,
    pvalue: f64,
    fold_enrichment: f64,
}

impl<T: AnnotationId> Enrichment<T> {
    pub(crate) fn new(item: T, count: u64, pvalue: f64, fold_enrichment: f64) -> Self {
        Self {
            item,
            count,
            pvalue,
            fold_enrichment,
        }
    }

    /// The id of the enriched gene or disease
    pub fn item(&self) -> &T {
        &self.item
    }

    /// The number of annotation links between the record and the query
    /// set
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The probability of observing at least `count` links by chance
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// The fold enrichment over the background population
    pub fn fold_enrichment(&self) -> f64 {
        self.fold_enrichment
    }
}

/// Annotation-link counts of a collection of terms
///
/// For every annotation record the number of terms that carry it,
/// together with the total number of links. Built once for the whole
/// ontology (the background population) and once for the query set.
struct SampleSet<T> {
    total_links: u64,
    counts: HashMap<u32, u64>,
    phantom: PhantomData<T>,
}

fn count_links<'a, I, F, A>(terms: I, mut annotation_ids: F) -> (u64, HashMap<u32, u64>)
where
    I: IntoIterator<Item = HpoTerm<'a>>,
    F: FnMut(&HpoTerm<'a>) -> A,
    A: IntoIterator<Item = u32>,
{
    let mut total = 0u64;
    let mut counts: HashMap<u32, u64> = HashMap::new();
    for term in terms {
        for id in annotation_ids(&term) {
            total += 1;
            counts
                .entry(id)
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
    }
    (total, counts)
}

impl<'a> SampleSet<GeneId> {
    /// Counts the gene links of the given terms
    fn gene<I: IntoIterator<Item = HpoTerm<'a>>>(terms: I) -> Self {
        let (total_links, counts) = count_links(terms, |term| {
            term.gene_ids().iter().map(|id| id.as_u32()).collect::<Vec<u32>>()
        });
        Self {
            total_links,
            counts,
            phantom: PhantomData,
        }
    }
}

impl<'a> SampleSet<OmimDiseaseId> {
    /// Counts the OMIM disease links of the given terms
    fn omim_disease<I: IntoIterator<Item = HpoTerm<'a>>>(terms: I) -> Self {
        let (total_links, counts) = count_links(terms, |term| {
            term.omim_disease_ids()
                .iter()
                .map(|id| id.as_u32())
                .collect::<Vec<u32>>()
        });
        Self {
            total_links,
            counts,
            phantom: PhantomData,
        }
    }
}

impl<'a> SampleSet<OrphaDiseaseId> {
    /// Counts the Orpha disease links of the given terms
    fn orpha_disease<I: IntoIterator<Item = HpoTerm<'a>>>(terms: I) -> Self {
        let (total_links, counts) = count_links(terms, |term| {
            term.orpha_disease_ids()
                .iter()
                .map(|id| id.as_u32())
                .collect::<Vec<u32>>()
        });
        Self {
            total_links,
            counts,
            phantom: PhantomData,
        }
    }
}

impl<'a> SampleSet<DecipherDiseaseId> {
    /// Counts the DECIPHER disease links of the given terms
    fn decipher_disease<I: IntoIterator<Item = HpoTerm<'a>>>(terms: I) -> Self {
        let (total_links, counts) = count_links(terms, |term| {
            term.decipher_disease_ids()
                .iter()
                .map(|id| id.as_u32())
                .collect::<Vec<u32>>()
        });
        Self {
            total_links,
            counts,
            phantom: PhantomData,
        }
    }
}

impl<T: AnnotationId> SampleSet<T> {
    /// The total number of annotation links in the sample
    fn total(&self) -> u64 {
        self.total_links
    }

    /// The number of links of a single record, `None` when absent
    fn get(&self, key: &T) -> Option<u64> {
        self.counts.get(&key.as_u32()).copied()
    }

    /// Iterates `(record id, link count)` pairs
    fn counts(&self) -> impl Iterator<Item = (T, u64)> + '_ {
        self.counts.iter().map(|(id, count)| (T::from(*id), *count))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Builder;

    #[test]
    fn sample_set_counts_links() {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder.new_term("a", 2u32).unwrap();
        builder.new_term("b", 3u32).unwrap();
        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 2u32).unwrap();
        builder.add_parent(2u32, 3u32).unwrap();
        let mut builder = builder.connect_all_terms().unwrap();
        builder.annotate_gene(10u32.into(), "G1", 3u32.into()).unwrap();
        builder.annotate_gene(20u32.into(), "G2", 2u32.into()).unwrap();
        let ontology = builder.calculate_information_content().build_minimal();

        let background = SampleSet::<GeneId>::gene(ontology.hpos());
        // G1 is linked to 3, 2 and 1; G2 to 2 and 1
        assert_eq!(background.total(), 5);
        assert_eq!(background.get(&10u32.into()), Some(3));
        assert_eq!(background.get(&20u32.into()), Some(2));
        assert_eq!(background.get(&99u32.into()), None);
        assert_eq!(background.counts().count(), 2);
    }
}
