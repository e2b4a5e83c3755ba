//! Pairwise and set-based similarity scores on the fixture data

mod common;

use phenosim::similarity::{
    Builtins, Distance, Equal, GraphIc, KernelTable, Resnik, Similarity, StandardCombiner,
};
use phenosim::term::InformationContentKind;
use phenosim::{HpoError, HpoSet, HpoTerm};

const OMIM: InformationContentKind = InformationContentKind::Omim;

/// IC of Scoliosis in the fixture: 3 of 4 OMIM diseases
fn ic_scoliosis() -> f64 {
    -(3.0f64 / 4.0).ln()
}

/// IC of the specific Scoliosis children with one OMIM disease each
fn ic_leaf() -> f64 {
    -(1.0f64 / 4.0).ln()
}

#[test]
fn resnik_of_a_term_with_itself_is_its_ic() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();

    let resnik = Resnik::new(OMIM).calculate(&scoliosis, &scoliosis);
    assert!((resnik - scoliosis.information_content().omim_disease()).abs() < 1e-12);
    assert!((resnik - ic_scoliosis()).abs() < 1e-12);
}

#[test]
fn resnik_of_siblings_is_the_parent_ic() {
    let ontology = common::ontology();
    let thoracic = ontology.hpo(2943u32).unwrap();
    let progressive = ontology.hpo(8458u32).unwrap();

    // the most informative common ancestor is Scoliosis
    let resnik = Resnik::new(OMIM).calculate(&thoracic, &progressive);
    assert!((resnik - ic_scoliosis()).abs() < 1e-12);
}

#[test]
fn builtin_kernel_formulas() {
    let ontology = common::ontology();
    let thoracic = ontology.hpo(2943u32).unwrap();
    let progressive = ontology.hpo(8458u32).unwrap();

    let mica = ic_scoliosis();
    let distance = 2.0 * ic_leaf() - 2.0 * mica;

    let lin = Builtins::new("lin", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert!((lin - mica / ic_leaf()).abs() < 1e-12);

    // the Jiang & Conrath distance exceeds 1, so the bounded form is 0
    let jc = Builtins::new("jc", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert_eq!(jc, 0.0);

    let jc2 = Builtins::new("jc2", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert!((jc2 - 1.0 / (1.0 + distance)).abs() < 1e-12);

    let rel = Builtins::new("rel", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert!((rel - lin * (1.0 - (-mica).exp())).abs() < 1e-12);

    // `ic` scores the MICA directly
    let ic = Builtins::new("ic", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert!((ic - mica).abs() < 1e-12);

    let dist = Builtins::new("dist", OMIM)
        .unwrap()
        .calculate(&thoracic, &progressive);
    assert!((dist - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn identity_scores() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();
    let thoracic = ontology.hpo(2943u32).unwrap();

    assert_eq!(Equal::new().calculate(&scoliosis, &scoliosis), 1.0);
    assert_eq!(Equal::new().calculate(&scoliosis, &thoracic), 0.0);

    assert_eq!(GraphIc::new().calculate(&scoliosis, &scoliosis), 1.0);
    assert_eq!(Distance::new().calculate(&scoliosis, &scoliosis), 1.0);
}

#[test]
fn graphic_is_symmetric_and_bounded() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();
    let thoracic = ontology.hpo(2943u32).unwrap();

    let graphic = GraphIc::new();
    let forward = graphic.calculate(&scoliosis, &thoracic);
    let backward = graphic.calculate(&thoracic, &scoliosis);

    assert!((forward - backward).abs() < 1e-12);
    assert!(forward > 0.0);
    assert!(forward < 1.0);
}

#[test]
fn common_ancestor_variants() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();
    let thoracic = ontology.hpo(2943u32).unwrap();

    // shared: an ancestor term is its own common ancestor
    let shared = thoracic.common_ancestor_ids(&scoliosis);
    assert!(shared.contains(&2650u32.into()));

    // strict: only true ancestors of both
    let strict = thoracic.strict_common_ancestor_ids(&scoliosis);
    assert!(!strict.contains(&2650u32.into()));
    assert!(strict.contains(&10_674u32.into()));

    // for the same term, shared includes the term itself
    let self_shared = scoliosis.common_ancestor_ids(&scoliosis);
    assert!(self_shared.contains(&2650u32.into()));
    assert_eq!(
        scoliosis.strict_common_ancestor_ids(&scoliosis).len(),
        scoliosis.ancestor_ids().len()
    );
}

#[test]
fn unknown_method_fails() {
    assert!(matches!(
        Builtins::new("foobar", OMIM),
        Err(HpoError::NotFound(_))
    ));
}

#[test]
fn kernel_registration() {
    struct FixedScore(f64);
    impl Similarity for FixedScore {
        fn calculate(&self, _: &HpoTerm, _: &HpoTerm) -> f64 {
            self.0
        }
    }

    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();
    let thoracic = ontology.hpo(2943u32).unwrap();

    let mut table = KernelTable::default();
    table.register("fixed", |_| Box::new(FixedScore(0.42)));

    let kernel = table.create("fixed", OMIM).unwrap();
    assert_eq!(kernel.calculate(&scoliosis, &thoracic), 0.42);

    // builtins stay available and unknown names fail
    assert!(table.create("graphic", OMIM).is_ok());
    assert!(matches!(
        table.create("not-registered", OMIM),
        Err(HpoError::NotFound(_))
    ));
}

#[test]
fn identical_sets_score_one() {
    let ontology = common::ontology();
    let set = HpoSet::from_queries(&ontology, [2650u32, 2943u32, 925u32]).unwrap();

    for combine in ["funSimAvg", "funSimMax", "BMA"] {
        let score = set.similarity(&set, OMIM, "graphic", combine).unwrap();
        assert!((score - 1.0).abs() < 1e-12, "combine: {combine}");
    }
}

#[test]
fn set_similarity_is_symmetric() {
    let ontology = common::ontology();
    let children = HpoSet::from_queries(
        &ontology,
        ["HP:0002943", "HP:0008458", "HP:0100884", "HP:0002944", "HP:0002751"],
    )
    .unwrap();
    let lineage = HpoSet::from_queries(
        &ontology,
        ["HP:0002650", "HP:0010674", "HP:0000925", "HP:0009121"],
    )
    .unwrap();

    for combine in ["funSimAvg", "funSimMax", "BMA", "BMWA"] {
        let forward = children
            .similarity(&lineage, OMIM, "graphic", combine)
            .unwrap();
        let backward = lineage
            .similarity(&children, OMIM, "graphic", combine)
            .unwrap();
        assert!(
            (forward - backward).abs() < 1e-12,
            "combine: {combine}, forward: {forward}, backward: {backward}"
        );
        assert!(forward > 0.0);
        assert!(forward <= 1.0);
    }
}

#[test]
fn combiners_differ() {
    let ontology = common::ontology();
    let children = HpoSet::from_queries(&ontology, [2943u32, 8458u32]).unwrap();
    let lineage = HpoSet::from_queries(&ontology, [2650u32, 925u32]).unwrap();

    let avg = children
        .similarity(&lineage, OMIM, "graphic", "funSimAvg")
        .unwrap();
    let max = children
        .similarity(&lineage, OMIM, "graphic", "funSimMax")
        .unwrap();

    // funSimMax takes the better of the two means
    assert!(max >= avg);
}

#[test]
fn custom_kernel_set_similarity() {
    let ontology = common::ontology();
    let set_a = HpoSet::from_queries(&ontology, [2650u32, 2943u32]).unwrap();
    let set_b = HpoSet::from_queries(&ontology, [925u32]).unwrap();

    let score = set_a
        .similarity_with(&set_b, GraphIc::new(), StandardCombiner::FunSimAvg, OMIM)
        .unwrap();
    let named = set_a
        .similarity(&set_b, OMIM, "graphic", "funSimAvg")
        .unwrap();
    assert!((score - named).abs() < 1e-12);
}

#[test]
fn gene_kind_uses_the_gene_ic() {
    let ontology = common::ontology();
    let scoliosis = ontology.hpo(2650u32).unwrap();

    let resnik = Resnik::new(InformationContentKind::Gene);
    let score = resnik.calculate(&scoliosis, &scoliosis);
    assert!((score - -(2.0f64 / 3.0).ln()).abs() < 1e-12);
}
