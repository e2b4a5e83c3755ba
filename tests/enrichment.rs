//! Hypergeometric enrichment on the fixture data

mod common;

use phenosim::stats::hypergeom::{
    decipher_disease_enrichment, gene_enrichment, omim_disease_enrichment,
    orpha_disease_enrichment,
};
use phenosim::HpoSet;

#[test]
fn gene_enrichment_ranks_the_specific_gene_first() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, [2650u32, 2943u32, 8458u32]).unwrap();

    let enrichments = gene_enrichment(&ontology, &set).unwrap();
    assert_eq!(enrichments.len(), 2);

    // TBX6 hits all three terms of the set, FBN1 only Scoliosis itself
    assert_eq!(enrichments[0].item(), &6911u32.into());
    assert_eq!(enrichments[0].count(), 3);
    assert_eq!(enrichments[1].item(), &2200u32.into());
    assert_eq!(enrichments[1].count(), 1);
    assert!(enrichments[0].pvalue() < enrichments[1].pvalue());
    assert!(enrichments[0].fold_enrichment() > 1.0);

    for record in &enrichments {
        assert!(record.pvalue() > 0.0);
        assert!(record.pvalue() <= 1.0);
    }
}

#[test]
fn omim_enrichment_ordering_is_exact() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, [2650u32]).unwrap();

    let enrichments = omim_disease_enrichment(&ontology, &set).unwrap();
    let ids: Vec<u32> = enrichments
        .iter()
        .map(|record| {
            use phenosim::annotations::AnnotationId;
            record.item().as_u32()
        })
        .collect();

    // Marfan syndrome has the fewest background links and ranks first;
    // the remaining two diseases tie on the p-value and are ordered by
    // their id
    assert_eq!(ids, vec![154_700, 118_100, 277_300]);
}

#[test]
fn reruns_are_bit_identical() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, [2650u32, 925u32, 2943u32]).unwrap();

    let first = gene_enrichment(&ontology, &set).unwrap();
    for _ in 0..10 {
        let rerun = gene_enrichment(&ontology, &set).unwrap();
        assert_eq!(first, rerun);
    }

    let omim_first = omim_disease_enrichment(&ontology, &set).unwrap();
    for _ in 0..10 {
        assert_eq!(omim_first, omim_disease_enrichment(&ontology, &set).unwrap());
    }
}

#[test]
fn disease_kind_registries_are_independent() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, [2650u32]).unwrap();

    let orpha = orpha_disease_enrichment(&ontology, &set).unwrap();
    assert_eq!(orpha.len(), 1);

    let decipher = decipher_disease_enrichment(&ontology, &set).unwrap();
    assert_eq!(decipher.len(), 1);
}

#[test]
fn negative_annotations_do_not_appear() {
    let ontology = common::ontology();

    // the NOT-qualified disease link of Kyphoscoliosis must not show up
    let set = HpoSet::from_queries(&ontology, [2751u32]).unwrap();
    let enrichments = omim_disease_enrichment(&ontology, &set).unwrap();
    assert!(enrichments.is_empty());
}

#[test]
fn empty_set_enrichment_is_empty() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, std::iter::empty::<u32>()).unwrap();
    assert!(gene_enrichment(&ontology, &set).unwrap().is_empty());
}
