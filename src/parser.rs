//! Parsing of the HPO master data provided by Jax
//!
//! The three input files and the exact data the core needs from them:
//!
//! - `hp.obo`: terms and their `is_a` relationships ([`hp_obo`])
//! - `phenotype_to_genes.txt`: gene-term links ([`gene_to_hpo`])
//! - `phenotype.hpoa`: disease-term links for OMIM, ORPHA and DECIPHER,
//!   including `NOT` qualified negative links ([`disease_to_hpo`])

use std::path::Path;

use crate::ontology::builder::Builder;
use crate::{HpoResult, Ontology};

pub(crate) mod hp_obo;

/// Parser for HPO - gene associations from `phenotype_to_genes.txt`
pub(crate) mod gene_to_hpo {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    use tracing::debug;

    use crate::annotations::GeneId;
    use crate::ontology::builder::{Builder, ConnectedTerms};
    use crate::{HpoError, HpoResult, HpoTermId};

    struct ParsedGene<'a> {
        gene_id: GeneId,
        symbol: &'a str,
        hpo: HpoTermId,
    }

    /// Parses a single data line of `phenotype_to_genes.txt`
    ///
    /// ```text
    /// HP:0000002  Abnormality of body height  81848   SPRY4   orphadata   ORPHA:432
    /// ```
    ///
    /// The first four columns are required, additional columns are
    /// tolerated and ignored. The `hpo_name` column may be empty.
    fn parse_line(line: &str) -> HpoResult<ParsedGene<'_>> {
        let mut cols = line.split('\t');

        let Some(hpo) = cols.next() else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        // the term name column is not needed
        if cols.next().is_none() {
            return Err(HpoError::ParseError(line.to_string()));
        }

        let Some(gene_id) = cols.next() else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        let Some(symbol) = cols.next() else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        Ok(ParsedGene {
            gene_id: GeneId::try_from(gene_id)
                .map_err(|_| HpoError::ParseError(format!("invalid gene id in: {line}")))?,
            symbol: symbol.trim_end(),
            hpo: HpoTermId::try_from(hpo)?,
        })
    }

    /// Parses `phenotype_to_genes.txt` and links every gene to its terms
    ///
    /// The first non-comment line is a header and is skipped, as is
    /// every line starting with `#`.
    ///
    /// # Errors
    ///
    /// - [`HpoError::CannotOpenFile`] when the file is not readable
    /// - [`HpoError::ParseError`] for rows with missing columns
    /// - [`HpoError::NotFound`] when a row references an unknown term
    pub fn parse<P: AsRef<Path>>(
        file: P,
        builder: &mut Builder<ConnectedTerms>,
    ) -> HpoResult<()> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| HpoError::CannotOpenFile(filename.clone()))?;
        let reader = BufReader::new(file);

        let mut n_links = 0usize;
        let mut header_seen = false;
        for line in reader.lines() {
            let line = line
                .map_err(|_| HpoError::ParseError(format!("invalid data in {filename}")))?;
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if !header_seen {
                // first non-comment line is the column header
                header_seen = true;
                continue;
            }
            let gene = parse_line(&line)?;
            builder.annotate_gene(gene.gene_id, gene.symbol, gene.hpo)?;
            n_links += 1;
        }
        debug!("parsed {n_links} gene links from {filename}");
        Ok(())
    }

}

/// Parser for HPO - disease associations from `phenotype.hpoa`
///
/// # Example lines
///
/// ```text
/// OMIM:619340  Developmental and epileptic encephalopathy 96      HP:0011097  PMID:31675180  PCS  1/2  P  HPO:probinson[2021-06-21]
/// OMIM:609153  Pseudohyperkalemia                             NOT HP:0001878  PMID:2766660   PCS       P  HPO:lccarmody[2018-10-03]
/// ```
pub(crate) mod disease_to_hpo {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    use tracing::{debug, trace};

    use crate::annotations::{DecipherDiseaseId, OmimDiseaseId, OrphaDiseaseId};
    use crate::ontology::builder::{Builder, ConnectedTerms};
    use crate::{HpoError, HpoResult, HpoTermId};

    enum DiseaseKind<'a> {
        Omim(DiseaseComponents<'a>),
        Orpha(DiseaseComponents<'a>),
        Decipher(DiseaseComponents<'a>),
    }

    struct DiseaseComponents<'a> {
        id: &'a str,
        name: &'a str,
        negative: bool,
        hpo_id: HpoTermId,
    }

    /// Splits a line into its disease components and routes it by the
    /// `database_id` prefix
    ///
    /// Lines with an unknown prefix yield `None` and are skipped.
    fn parse_line(line: &str) -> HpoResult<Option<DiseaseKind<'_>>> {
        let components = match line.split_once(':') {
            Some(("OMIM", _)) => parse_disease_components(line)?.map(DiseaseKind::Omim),
            Some(("ORPHA", _)) => parse_disease_components(line)?.map(DiseaseKind::Orpha),
            Some(("DECIPHER", _)) => parse_disease_components(line)?.map(DiseaseKind::Decipher),
            _ => {
                trace!("skipping line with unknown database: {line}");
                None
            }
        };
        Ok(components)
    }

    fn parse_disease_components(line: &str) -> HpoResult<Option<DiseaseComponents<'_>>> {
        let mut cols = line.trim_end().splitn(5, '\t');

        let Some(id_col) = cols.next() else {
            return Err(HpoError::ParseError(line.to_string()));
        };
        let Some((_, disease_id)) = id_col.split_once(':') else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        let Some(disease_name) = cols.next() else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        let negative = match cols.next() {
            Some("NOT") => true,
            Some("") => false,
            Some(other) => {
                return Err(HpoError::ParseError(format!(
                    "invalid qualifier {other} in: {line}"
                )))
            }
            None => return Err(HpoError::ParseError(line.to_string())),
        };

        let hpo_id = if let Some(id) = cols.next() {
            HpoTermId::try_from(id)?
        } else {
            return Err(HpoError::ParseError(line.to_string()));
        };

        Ok(Some(DiseaseComponents {
            id: disease_id,
            name: disease_name,
            negative,
            hpo_id,
        }))
    }

    /// Parses `phenotype.hpoa` and links every disease to its terms
    ///
    /// `NOT` qualified rows are routed to the negative registries.
    /// Duplicate `(disease, term)` pairs are idempotent.
    ///
    /// # Errors
    ///
    /// - [`HpoError::CannotOpenFile`] when the file is not readable
    /// - [`HpoError::ParseError`] for rows with missing columns or
    ///   invalid ids
    /// - [`HpoError::NotFound`] when a row references an unknown term
    pub fn parse<P: AsRef<Path>>(
        file: P,
        builder: &mut Builder<ConnectedTerms>,
    ) -> HpoResult<()> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| HpoError::CannotOpenFile(filename.clone()))?;
        let reader = BufReader::new(file);

        let mut n_links = 0usize;
        for line in reader.lines() {
            let line = line
                .map_err(|_| HpoError::ParseError(format!("invalid data in {filename}")))?;
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            match parse_line(&line)? {
                Some(DiseaseKind::Omim(omim)) => {
                    let id = OmimDiseaseId::try_from(omim.id)
                        .map_err(|_| HpoError::ParseError(format!("invalid id in: {line}")))?;
                    if omim.negative {
                        builder.annotate_negative_omim_disease(id, omim.name, omim.hpo_id)?;
                    } else {
                        builder.annotate_omim_disease(id, omim.name, omim.hpo_id)?;
                    }
                }
                Some(DiseaseKind::Orpha(orpha)) => {
                    let id = OrphaDiseaseId::try_from(orpha.id)
                        .map_err(|_| HpoError::ParseError(format!("invalid id in: {line}")))?;
                    if orpha.negative {
                        builder.annotate_negative_orpha_disease(id, orpha.name, orpha.hpo_id)?;
                    } else {
                        builder.annotate_orpha_disease(id, orpha.name, orpha.hpo_id)?;
                    }
                }
                Some(DiseaseKind::Decipher(decipher)) => {
                    let id = DecipherDiseaseId::try_from(decipher.id)
                        .map_err(|_| HpoError::ParseError(format!("invalid id in: {line}")))?;
                    if decipher.negative {
                        builder.annotate_negative_decipher_disease(
                            id,
                            decipher.name,
                            decipher.hpo_id,
                        )?;
                    } else {
                        builder.annotate_decipher_disease(id, decipher.name, decipher.hpo_id)?;
                    }
                }
                None => continue,
            }
            n_links += 1;
        }
        debug!("parsed {n_links} disease links from {filename}");
        Ok(())
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn correct_omim() {
            let s = "OMIM:600171\tGonadal agenesis\t\tHP:0000055\tOMIM:600171\tTAS\tP\tHPO:skoehler[2014-11-27]";
            match parse_line(s).unwrap().unwrap() {
                DiseaseKind::Omim(omim) => {
                    assert_eq!(omim.name, "Gonadal agenesis");
                    assert_eq!(omim.id, "600171");
                    assert!(!omim.negative);
                    assert_eq!(omim.hpo_id, HpoTermId::from(55u32));
                }
                _ => panic!("OMIM line must parse as OMIM"),
            }
        }

        #[test]
        fn correct_orpha() {
            let s = "ORPHA:93\tFoo\t\tHP:0000055\tORPHA:93\tTAS\tP\tHPO:skoehler[2014-11-27]";
            assert!(matches!(
                parse_line(s).unwrap().unwrap(),
                DiseaseKind::Orpha(_)
            ));
        }

        #[test]
        fn correct_decipher() {
            let s = "DECIPHER:7\tBar\t\tHP:0000055\tDECIPHER:7\tTAS\tP\tHPO:skoehler[2014-11-27]";
            assert!(matches!(
                parse_line(s).unwrap().unwrap(),
                DiseaseKind::Decipher(_)
            ));
        }

        #[test]
        fn negative_qualifier() {
            let s = "OMIM:600171\tGonadal agenesis\tNOT\tHP:0000055\tOMIM:600171\tTAS\tP\tHPO:skoehler";
            match parse_line(s).unwrap().unwrap() {
                DiseaseKind::Omim(omim) => assert!(omim.negative),
                _ => panic!("OMIM line must parse as OMIM"),
            }
        }

        #[test]
        fn unknown_database_is_skipped() {
            let s = "MONDO:600171\tFoo\t\tHP:0000055";
            assert!(parse_line(s).unwrap().is_none());
        }

        #[test]
        fn invalid_qualifier() {
            let s = "OMIM:600171\tGonadal agenesis\tMAYBE\tHP:0000055";
            assert!(parse_line(s).is_err());
        }

        #[test]
        fn space_separated_line_fails() {
            let s = "OMIM:600171 Gonadal agenesis  HP:0000055";
            assert!(parse_line(s).is_err());
        }
    }
}

/// Builds a complete [`Ontology`] from the three standard files
pub(crate) fn load_from_standard_files<P: AsRef<Path>>(
    obo_file: P,
    gene_file: P,
    disease_file: P,
) -> HpoResult<Ontology> {
    let builder = Builder::new();
    let builder = hp_obo::read_obo_file(obo_file, builder)?;
    let mut builder = builder.connect_all_terms()?;
    gene_to_hpo::parse(gene_file, &mut builder)?;
    disease_to_hpo::parse(disease_file, &mut builder)?;
    builder.calculate_information_content().build_with_defaults()
}
