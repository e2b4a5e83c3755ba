//! Parser for the `hp.obo` master data file
//!
//! The file starts with a header block (key-value metadata, of which
//! only `data-version` is kept), followed by `[Term]` stanzas separated
//! by blank lines. `[Typedef]` and other stanza types are ignored, as
//! are lines starting with `#`.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::ontology::builder::{AllTerms, Builder, LooseCollection};
use crate::term::internal::HpoTermInternal;
use crate::{HpoError, HpoResult, HpoTermId};

/// `(child, parent)` pairs collected while reading the stanzas
type Connections = Vec<(HpoTermId, HpoTermId)>;

/// Reads `hp.obo` into the builder and connects all terms to their
/// parents
///
/// # Errors
///
/// - [`HpoError::CannotOpenFile`] when the file is not readable
/// - [`HpoError::ParseError`] for malformed stanzas or `is_a` references
///   to unknown terms
/// - [`HpoError::InvariantViolation`] for duplicate term ids or obsolete
///   `is_a` targets
pub(crate) fn read_obo_file<P: AsRef<Path>>(
    filename: P,
    mut builder: Builder<LooseCollection>,
) -> HpoResult<Builder<AllTerms>> {
    let file_content = fs::read_to_string(&filename)
        .map_err(|_| HpoError::CannotOpenFile(filename.as_ref().display().to_string()))?;

    let mut connections: Connections = Vec::new();
    let mut n_terms = 0usize;

    for (idx, stanza) in file_content.split("\n\n").enumerate() {
        let stanza = stanza.trim_start_matches('\n');
        if idx == 0 && !stanza.starts_with("[Term]") {
            if let Some(version) = header_version(stanza) {
                builder.set_hpo_version(version);
            }
            continue;
        }
        if let Some(body) = stanza.strip_prefix("[Term]\n") {
            let term = term_from_stanza(body, &mut connections)?;
            builder.add_term(term)?;
            n_terms += 1;
        } else {
            trace!("ignoring stanza: {stanza:.20}");
        }
    }
    debug!("parsed {n_terms} terms from hp.obo");

    let mut builder = builder.terms_complete();
    for (child, parent) in connections {
        builder.add_parent(parent, child).map_err(|err| match err {
            HpoError::NotFound(what) => {
                HpoError::ParseError(format!("unknown is_a target: {what}"))
            }
            other => other,
        })?;
    }
    Ok(builder)
}

/// Extracts `data-version` from the file header, e.g.
/// `data-version: hp/releases/2023-04-05` becomes `2023-04-05`
fn header_version(header: &str) -> Option<&str> {
    header
        .lines()
        .find_map(|line| line.strip_prefix("data-version: "))
        .map(|version| version.rsplit('/').next().unwrap_or(version).trim())
}

/// Parses one `[Term]` stanza body
///
/// `is_a` targets are recorded in `connections` because they can only
/// be resolved once all terms exist.
fn term_from_stanza(stanza: &str, connections: &mut Connections) -> HpoResult<HpoTermInternal> {
    let mut id: Option<HpoTermId> = None;
    let mut name: Option<&str> = None;
    let mut definition: Option<String> = None;
    let mut comment: Option<&str> = None;
    let mut synonyms: Vec<String> = Vec::new();
    let mut alt_ids: Vec<HpoTermId> = Vec::new();
    let mut parents: Vec<HpoTermId> = Vec::new();
    let mut obsolete = false;
    let mut replacement: Option<HpoTermId> = None;

    for line in stanza.lines() {
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(": ") else {
            return Err(HpoError::ParseError(format!("invalid stanza line: {line}")));
        };
        match key {
            "id" => {
                if id.is_some() {
                    return Err(HpoError::ParseError(format!(
                        "stanza with more than one id: {value}"
                    )));
                }
                id = Some(HpoTermId::try_from(value)?);
            }
            "name" => name = Some(value),
            "def" => definition = Some(quoted_portion(value)?),
            "comment" => comment = Some(value),
            "synonym" => synonyms.push(quoted_portion(value)?),
            "alt_id" => alt_ids.push(HpoTermId::try_from(value)?),
            "is_a" => {
                // strip the optional `! name` comment
                let target = value.split(" !").next().unwrap_or(value).trim();
                parents.push(HpoTermId::try_from(target)?);
            }
            "is_obsolete" => obsolete = value == "true",
            "replaced_by" => {
                // the first replacement wins
                if replacement.is_none() {
                    replacement = Some(HpoTermId::try_from(value)?);
                }
            }
            _ => {}
        }
    }

    let id = id.ok_or_else(|| HpoError::ParseError("stanza without id".to_string()))?;
    let name = name.ok_or_else(|| HpoError::ParseError(format!("term {id} without name")))?;

    let mut term = HpoTermInternal::new(name.to_string(), id);
    if let Some(definition) = definition {
        *term.definition_mut() = definition;
    }
    if let Some(comment) = comment {
        *term.comment_mut() = comment.to_string();
    }
    for synonym in &synonyms {
        term.add_synonym(synonym);
    }
    for alt_id in alt_ids {
        term.add_alt_id(alt_id);
    }
    *term.obsolete_mut() = obsolete;
    if let Some(replacement) = replacement {
        term.set_replacement(replacement);
    }
    for parent in parents {
        connections.push((id, parent));
    }
    Ok(term)
}

/// Returns the quoted portion of a value like
/// `"Some text" [HP:probinson]`, dropping provenance and scope tags
fn quoted_portion(value: &str) -> HpoResult<String> {
    let rest = value
        .strip_prefix('"')
        .ok_or_else(|| HpoError::ParseError(format!("expected quoted string: {value}")))?;

    let mut result = String::with_capacity(rest.len());
    let mut escaped = false;
    for c in rest.chars() {
        match (escaped, c) {
            (true, _) => {
                result.push(c);
                escaped = false;
            }
            (false, '\\') => escaped = true,
            (false, '"') => return Ok(result),
            (false, _) => result.push(c),
        }
    }
    Err(HpoError::ParseError(format!(
        "unterminated quoted string: {value}"
    )))
}
