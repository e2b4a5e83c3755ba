//! Construction, lookup and invariant tests against the fixture data

mod common;

use phenosim::annotations::{AnnotationId, Disease};
use phenosim::{HpoError, HpoTermId};

#[test]
fn loads_the_fixture_ontology() {
    let ontology = common::ontology();

    assert_eq!(ontology.len(), 17);
    assert_eq!(ontology.hpo_version(), Some("2024-03-06"));
    assert_eq!(ontology.genes().count(), 3);
    assert_eq!(ontology.omim_diseases().count(), 4);
    assert_eq!(ontology.orpha_diseases().count(), 2);
    assert_eq!(ontology.decipher_diseases().count(), 1);
}

#[test]
fn scoliosis_term() {
    let ontology = common::ontology();
    let scoliosis = ontology.get_hpo_object("HP:0002650").unwrap();

    assert_eq!(scoliosis.name(), "Scoliosis");
    assert!(scoliosis.parent_ids().contains(&10674u32.into()));

    let children: Vec<HpoTermId> = scoliosis.children_ids().iter().collect();
    let expected: Vec<HpoTermId> = vec![
        2751u32.into(),
        2943u32.into(),
        2944u32.into(),
        8458u32.into(),
        100_884u32.into(),
    ];
    assert_eq!(children, expected);

    assert!(scoliosis
        .definition()
        .starts_with("The presence of an abnormal lateral curvature"));
    assert_eq!(scoliosis.synonyms().len(), 2);
}

#[test]
fn facade_queries() {
    let ontology = common::ontology();

    // id, HP-string and name queries resolve to the same term
    let by_id = ontology.get_hpo_object(2650u32).unwrap();
    let by_str = ontology.get_hpo_object("HP:0002650").unwrap();
    let by_name = ontology.get_hpo_object("Scoliosis").unwrap();
    assert_eq!(by_id, by_str);
    assert_eq!(by_str, by_name);

    // alternative ids resolve to the primary term
    assert_eq!(
        ontology.get_hpo_object("HP:0002555").unwrap().id(),
        HpoTermId::from(2650u32)
    );

    assert!(matches!(
        ontology.get_hpo_object("HP:9999999"),
        Err(HpoError::NotFound(_))
    ));
    assert!(matches!(
        ontology.get_hpo_object("Not a term name"),
        Err(HpoError::NotFound(_))
    ));
}

#[test]
fn search_is_ordered_and_case_insensitive() {
    let ontology = common::ontology();

    let hits: Vec<HpoTermId> = ontology.search("SCOLIOSIS").map(|term| term.id()).collect();
    let expected: Vec<HpoTermId> = vec![
        2650u32.into(),
        2751u32.into(),
        2943u32.into(),
        2944u32.into(),
        8458u32.into(),
        100_884u32.into(),
    ];
    assert_eq!(hits, expected);

    // "spine" only matches one term name, but several synonyms
    let by_name: Vec<HpoTermId> = ontology.search("spine").map(|term| term.id()).collect();
    let expected: Vec<HpoTermId> = vec![99_999u32.into()];
    assert_eq!(by_name, expected);

    let with_synonyms: Vec<HpoTermId> = ontology
        .synonym_search("spine")
        .map(|term| term.id())
        .collect();
    let expected: Vec<HpoTermId> = vec![
        925u32.into(),
        2650u32.into(),
        2943u32.into(),
        99_999u32.into(),
    ];
    assert_eq!(with_synonyms, expected);

    assert!(ontology.search("no such phenotype").next().is_none());
}

#[test]
fn synonym_matching() {
    let ontology = common::ontology();

    assert_eq!(
        ontology.synonym_match("Curved Spine").unwrap().id(),
        HpoTermId::from(2650u32)
    );
    // exact name matches win over synonyms
    assert_eq!(
        ontology.synonym_match("scoliosis").unwrap().id(),
        HpoTermId::from(2650u32)
    );
    assert_eq!(
        ontology.match_name("Thoracic scoliosis").unwrap().id(),
        HpoTermId::from(2943u32)
    );
    assert!(ontology.match_name("thoracic scoliosis").is_err());
}

#[test]
fn ancestor_descendant_symmetry() {
    let ontology = common::ontology();

    let mut ancestor_pairs = 0usize;
    let mut descendant_pairs = 0usize;

    for term in &ontology {
        // no term is its own ancestor or descendant
        assert!(!term.ancestor_ids().contains(&term.id()));
        assert!(!term.descendant_ids().contains(&term.id()));

        // direct parents are ancestors
        for parent in term.parent_ids() {
            assert!(term.ancestor_ids().contains(&parent));
        }

        // every ancestor lists the term as descendant
        for ancestor_id in term.ancestor_ids() {
            let ancestor = ontology.hpo(ancestor_id).unwrap();
            assert!(ancestor.descendant_ids().contains(&term.id()));
            ancestor_pairs += 1;
        }
        descendant_pairs += term.descendant_ids().len();
    }

    assert_eq!(ancestor_pairs, descendant_pairs);
}

#[test]
fn single_root() {
    let ontology = common::ontology();

    let roots: Vec<HpoTermId> = ontology
        .hpos()
        .filter(|term| term.parent_ids().is_empty() && !term.is_obsolete())
        .map(|term| term.id())
        .collect();
    assert_eq!(roots, vec![phenosim::ROOT_ID]);
}

#[test]
fn gene_annotation_is_asymmetric() {
    let ontology = common::ontology();

    // terms inherit the annotations of their descendants
    let vertebral = ontology.hpo(925u32).unwrap();
    let symbols: Vec<&str> = {
        let mut genes: Vec<&str> = vertebral.genes().map(|gene| gene.symbol()).collect();
        genes.sort_unstable();
        genes
    };
    assert_eq!(symbols, vec!["COL2A1", "FBN1", "TBX6"]);

    // the gene records only keep their direct links
    let fbn1 = ontology.gene_by_name("FBN1").unwrap();
    let fbn1_terms: Vec<HpoTermId> = fbn1.hpo_terms().iter().collect();
    assert_eq!(fbn1_terms, vec![HpoTermId::from(2650u32)]);

    let tbx6 = ontology.gene_by_name("TBX6").unwrap();
    let tbx6_terms: Vec<HpoTermId> = tbx6.hpo_terms().iter().collect();
    let expected: Vec<HpoTermId> = vec![2943u32.into(), 8458u32.into()];
    assert_eq!(tbx6_terms, expected);

    // an inherited term is not mirrored back onto the gene
    assert!(!fbn1.hpo_terms().contains(&925u32.into()));
    assert!(vertebral.gene_ids().contains(fbn1.id()));
}

#[test]
fn disease_annotations() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();

    let mut omim: Vec<u32> = scoliosis
        .omim_disease_ids()
        .iter()
        .map(|id| id.as_u32())
        .collect();
    omim.sort_unstable();
    assert_eq!(omim, vec![118_100, 154_700, 277_300]);

    let orpha: Vec<u32> = scoliosis
        .orpha_disease_ids()
        .iter()
        .map(|id| id.as_u32())
        .collect();
    assert_eq!(orpha, vec![558]);

    // DECIPHER:18 is annotated at a child term and inherited
    assert!(scoliosis.decipher_disease_ids().contains(&18u32.into()));

    let marfan = ontology.omim_disease(&154_700u32.into()).unwrap();
    assert_eq!(marfan.name(), "Marfan syndrome");
    let direct: Vec<HpoTermId> = marfan.hpo_terms().iter().collect();
    let expected: Vec<HpoTermId> = vec![925u32.into(), 2650u32.into()];
    assert_eq!(direct, expected);
}

#[test]
fn negative_annotations_are_direct_only() {
    let ontology = common::ontology();

    let kyphoscoliosis = ontology.hpo(2751u32).unwrap();
    assert!(kyphoscoliosis
        .omim_excluded_disease_ids()
        .contains(&181_800u32.into()));
    // negative links are not propagated upwards
    assert!(ontology
        .hpo(2650u32)
        .unwrap()
        .omim_excluded_disease_ids()
        .is_empty());

    // the negative registry holds its own record
    let negative = ontology.negative_omim_disease(&181_800u32.into()).unwrap();
    assert_eq!(negative.name(), "Scapuloperoneal syndrome, neurogenic type");
    assert!(negative.hpo_terms().contains(&2751u32.into()));

    // negative links do not contribute to the positive sets
    assert!(kyphoscoliosis.omim_disease_ids().is_empty());
}

#[test]
fn information_content_values() {
    let ontology = common::ontology();

    // 3 of 4 OMIM diseases are annotated to Scoliosis or below
    let scoliosis = ontology.hpo(2650u32).unwrap();
    let expected = -(3.0f64 / 4.0).ln();
    assert!((scoliosis.information_content().omim_disease() - expected).abs() < 1e-12);

    // 2 of 3 genes
    let expected_gene = -(2.0f64 / 3.0).ln();
    assert!((scoliosis.information_content().gene() - expected_gene).abs() < 1e-12);

    // all OMIM diseases reach the vertebral column term: IC = 0
    let vertebral = ontology.hpo(925u32).unwrap();
    assert_eq!(vertebral.information_content().omim_disease(), 0.0);

    // terms without annotations keep the unknown sentinel
    let clinical_course = ontology.hpo(31_797u32).unwrap();
    assert_eq!(clinical_course.information_content().omim_disease(), 0.0);
    assert_eq!(clinical_course.information_content().gene(), 0.0);
}

#[test]
fn obsolete_terms() {
    let ontology = common::ontology();

    let obsolete = ontology.hpo(99_999u32).unwrap();
    assert!(obsolete.is_obsolete());
    assert_eq!(obsolete.replaced_by().unwrap().id(), HpoTermId::from(2650u32));
    assert!(obsolete.parent_ids().is_empty());
}

#[test]
fn categories() {
    let ontology = common::ontology();

    let categories: Vec<HpoTermId> = ontology.categories().iter().collect();
    let expected: Vec<HpoTermId> = vec![12_823u32.into(), 33_127u32.into()];
    assert_eq!(categories, expected);

    let scoliosis = ontology.hpo(2650u32).unwrap();
    let scoliosis_categories: Vec<HpoTermId> = scoliosis.categories().iter().collect();
    assert_eq!(scoliosis_categories, vec![HpoTermId::from(33_127u32)]);

    let clinical_course = ontology.hpo(31_797u32).unwrap();
    assert!(clinical_course.is_modifier());
    assert!(!scoliosis.is_modifier());
}

#[test]
fn concurrent_reads() {
    use rayon::prelude::*;

    let ontology = common::ontology();
    let ids: Vec<HpoTermId> = ontology.hpos().map(|term| term.id()).collect();

    let ancestor_counts: usize = ids
        .par_iter()
        .map(|id| ontology.hpo(*id).unwrap().ancestor_ids().len())
        .sum();

    let sequential: usize = ids
        .iter()
        .map(|id| ontology.hpo(*id).unwrap().ancestor_ids().len())
        .sum();

    assert_eq!(ancestor_counts, sequential);
}
