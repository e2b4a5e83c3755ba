use phenosim::Ontology;

/// Loads the fixture ontology, a small Scoliosis-centered subset of the
/// HPO with gene and OMIM / ORPHA / DECIPHER annotations
pub fn ontology() -> Ontology {
    Ontology::from_standard("tests/fixtures").expect("fixture ontology must load")
}
