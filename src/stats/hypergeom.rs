//! Hypergeometric enrichment of genes and diseases
//!
//! For an annotation kind the urn holds every (term, annotation) link
//! of the ontology, using the inherited term-side annotations. Drawing
//! the links of the query set, the survival function gives the
//! probability of seeing a record's observed link count or more by
//! chance.
//!
//! The numeric backend is isolated behind [`hypergeom_sf`].

use statrs::distribution::{DiscreteCDF, Hypergeometric};

use crate::annotations::{AnnotationId, DecipherDiseaseId, GeneId, OmimDiseaseId, OrphaDiseaseId};
use crate::set::HpoSet;
use crate::stats::{Enrichment, SampleSet};
use crate::{HpoError, HpoResult, Ontology};

/// The hypergeometric survival function `P(X > x)`
///
/// `population` is the total number of links, `successes` the links of
/// the tested record, `draws` the number of links in the query sample.
///
/// # Errors
///
/// [`HpoError::DomainError`] when `successes` or `draws` exceed the
/// population
pub fn hypergeom_sf(x: u64, population: u64, successes: u64, draws: u64) -> HpoResult<f64> {
    let distribution = Hypergeometric::new(population, successes, draws).map_err(|_| {
        HpoError::DomainError(format!(
            "invalid hypergeometric parameters: N={population}, K={successes}, n={draws}"
        ))
    })?;
    Ok(distribution.sf(x))
}

/// Calculates the hypergeometric enrichment of all records of one kind
///
/// Records without any link into the sample do not appear in the
/// result. The output is sorted by ascending p-value; ties are broken
/// by ascending record id.
fn enrichment<T: AnnotationId>(
    background: &SampleSet<T>,
    sample: &SampleSet<T>,
) -> HpoResult<Vec<Enrichment<T>>> {
    let mut res = Vec::new();
    for (item, observed) in sample.counts() {
        let successes = background.get(&item).ok_or_else(|| {
            HpoError::DomainError(format!(
                "record {item} of the sample is missing in the background population"
            ))
        })?;

        // `sf` is exclusive (`more than x`), the test is inclusive
        // (`x or more`), hence the `- 1`
        let pvalue = hypergeom_sf(observed - 1, background.total(), successes, sample.total())?;
        let fold_enrichment = (observed as f64 / sample.total() as f64)
            / (successes as f64 / background.total() as f64);

        res.push(Enrichment::new(item, observed, pvalue, fold_enrichment));
    }

    res.sort_by(|a, b| {
        a.pvalue()
            .partial_cmp(&b.pvalue())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item().cmp(b.item()))
    });
    Ok(res)
}

/// Calculates the gene enrichment of the query set
///
/// # Errors
///
/// [`HpoError::DomainError`] when the query set is not drawn from the
/// given ontology
///
/// # Examples
///
/// ```no_run
/// use phenosim::{HpoSet, Ontology};
/// use phenosim::stats::hypergeom::gene_enrichment;
///
/// let ontology = Ontology::from_standard("/path/to/jax/data/").unwrap();
/// let patient = HpoSet::from_queries(
///     &ontology,
///     ["HP:0002650", "HP:0008458"],
/// ).unwrap();
///
/// for record in gene_enrichment(&ontology, &patient).unwrap().iter().take(10) {
///     println!("{}\t{}", record.item(), record.pvalue());
/// }
/// ```
pub fn gene_enrichment(ontology: &Ontology, set: &HpoSet) -> HpoResult<Vec<Enrichment<GeneId>>> {
    let background = SampleSet::gene(ontology.hpos());
    let sample = SampleSet::gene(set.iter());
    enrichment(&background, &sample)
}

/// Calculates the OMIM disease enrichment of the query set
///
/// # Errors
///
/// [`HpoError::DomainError`] when the query set is not drawn from the
/// given ontology
pub fn omim_disease_enrichment(
    ontology: &Ontology,
    set: &HpoSet,
) -> HpoResult<Vec<Enrichment<OmimDiseaseId>>> {
    let background = SampleSet::omim_disease(ontology.hpos());
    let sample = SampleSet::omim_disease(set.iter());
    enrichment(&background, &sample)
}

/// Calculates the Orpha disease enrichment of the query set
///
/// # Errors
///
/// [`HpoError::DomainError`] when the query set is not drawn from the
/// given ontology
pub fn orpha_disease_enrichment(
    ontology: &Ontology,
    set: &HpoSet,
) -> HpoResult<Vec<Enrichment<OrphaDiseaseId>>> {
    let background = SampleSet::orpha_disease(ontology.hpos());
    let sample = SampleSet::orpha_disease(set.iter());
    enrichment(&background, &sample)
}

/// Calculates the DECIPHER disease enrichment of the query set
///
/// # Errors
///
/// [`HpoError::DomainError`] when the query set is not drawn from the
/// given ontology
pub fn decipher_disease_enrichment(
    ontology: &Ontology,
    set: &HpoSet,
) -> HpoResult<Vec<Enrichment<DecipherDiseaseId>>> {
    let background = SampleSet::decipher_disease(ontology.hpos());
    let sample = SampleSet::decipher_disease(set.iter());
    enrichment(&background, &sample)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Builder;

    /// chain 1 -> 2 -> 3 with two genes and two OMIM diseases
    fn test_ontology() -> Ontology {
        let mut builder = Builder::new();
        builder.new_term("All", 1u32).unwrap();
        builder.new_term("a", 2u32).unwrap();
        builder.new_term("b", 3u32).unwrap();
        let mut builder = builder.terms_complete();
        builder.add_parent(1u32, 2u32).unwrap();
        builder.add_parent(2u32, 3u32).unwrap();
        let mut builder = builder.connect_all_terms().unwrap();
        builder.annotate_gene(10u32.into(), "G1", 3u32.into()).unwrap();
        builder.annotate_gene(20u32.into(), "G2", 1u32.into()).unwrap();
        builder
            .annotate_omim_disease(600u32.into(), "D1", 3u32.into())
            .unwrap();
        builder
            .annotate_omim_disease(700u32.into(), "D2", 2u32.into())
            .unwrap();
        builder.calculate_information_content().build_minimal()
    }

    #[test]
    fn survival_function() {
        // reference values from the scipy implementation
        let p = hypergeom_sf(7, 50, 25, 13).unwrap();
        assert!((p - 0.26009737477738537).abs() < 1e-9);

        assert!(hypergeom_sf(1, 10, 20, 5).is_err());
    }

    #[test]
    fn sample_counts_and_pvalues() {
        let ontology = test_ontology();
        let set = HpoSet::from_queries(&ontology, [3u32]).unwrap();

        // term 3 only carries its specific gene G1, the root-level
        // gene G2 is not inherited downwards
        let enrichments = gene_enrichment(&ontology, &set).unwrap();
        assert_eq!(enrichments.len(), 1);

        let record = &enrichments[0];
        assert_eq!(record.item(), &10u32.into());
        assert_eq!(record.count(), 1);
        // urn: 4 links total, 3 of them to G1, 1 drawn
        assert!((record.pvalue() - 0.75).abs() < 1e-12);
        assert!((record.fold_enrichment() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rerun_is_deterministic() {
        let ontology = test_ontology();
        let set = HpoSet::from_queries(&ontology, [2u32, 3u32]).unwrap();

        let first = omim_disease_enrichment(&ontology, &set).unwrap();
        let second = omim_disease_enrichment(&ontology, &set).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ties_are_broken_by_id() {
        let ontology = test_ontology();
        let set = HpoSet::from_queries(&ontology, [1u32, 2u32, 3u32]).unwrap();

        // within the full set every disease has the same observed and
        // background counts, so the p-values tie
        let enrichments = omim_disease_enrichment(&ontology, &set).unwrap();
        assert_eq!(enrichments.len(), 2);
        assert!(enrichments[0].item() < enrichments[1].item());
    }

    #[test]
    fn empty_set_yields_no_records() {
        let ontology = test_ontology();
        let set = HpoSet::new(&ontology, crate::HpoGroup::new());
        assert!(gene_enrichment(&ontology, &set).unwrap().is_empty());
    }
}
