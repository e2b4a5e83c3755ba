use crate::term::internal::HpoTermInternal;
use crate::HpoTermId;

/// Storage of all term records, owned by the ontology
///
/// Terms are kept sorted by their [`HpoTermId`], so lookups are binary
/// searches and iteration always yields terms in ascending id order.
/// The latter is a guarantee the search facade relies on.
#[derive(Default)]
pub(crate) struct Arena {
    terms: Vec<HpoTermInternal>,
}

impl Arena {
    /// Number of terms in the arena
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Adds a term, keeping the arena sorted by id
    ///
    /// Returns `false` if a term with the same id is already present;
    /// the existing term is kept.
    pub fn insert(&mut self, term: HpoTermInternal) -> bool {
        // terms usually arrive in ascending id order, so appending is
        // the hot path
        if self
            .terms
            .last()
            .map_or(true, |last| last.id() < term.id())
        {
            self.terms.push(term);
            return true;
        }
        match self.index_of(term.id()) {
            Ok(_) => false,
            Err(idx) => {
                self.terms.insert(idx, term);
                true
            }
        }
    }

    pub fn get(&self, id: HpoTermId) -> Option<&HpoTermInternal> {
        self.index_of(&id).ok().map(|idx| &self.terms[idx])
    }

    pub fn get_unchecked(&self, id: HpoTermId) -> &HpoTermInternal {
        let idx = self
            .index_of(&id)
            .unwrap_or_else(|_| panic!("term {id} must be present in the arena"));
        &self.terms[idx]
    }

    pub fn get_mut(&mut self, id: HpoTermId) -> Option<&mut HpoTermInternal> {
        self.index_of(&id).ok().map(|idx| &mut self.terms[idx])
    }

    pub fn get_unchecked_mut(&mut self, id: HpoTermId) -> &mut HpoTermInternal {
        let idx = self
            .index_of(&id)
            .unwrap_or_else(|_| panic!("term {id} must be present in the arena"));
        &mut self.terms[idx]
    }

    /// All terms, ascending by id
    pub fn values(&self) -> &[HpoTermInternal] {
        &self.terms
    }

    pub fn values_mut(&mut self) -> &mut [HpoTermInternal] {
        &mut self.terms
    }

    /// All term ids, ascending
    pub fn keys(&self) -> Vec<HpoTermId> {
        self.terms.iter().map(|term| *term.id()).collect()
    }

    fn index_of(&self, id: &HpoTermId) -> Result<usize, usize> {
        self.terms.binary_search_by_key(id, |term| *term.id())
    }
}
