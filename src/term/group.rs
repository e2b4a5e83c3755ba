//! [`HpoGroup`], an ordered set of [`HpoTermId`]s with fast set algebra

use std::collections::HashSet;
use std::ops::{BitAnd, BitOr};

use smallvec::SmallVec;

use crate::term;
use crate::{HpoTerm, HpoTermId, Ontology};

/// Number of ids stored inline before the group spills to the heap
const INLINE_GROUP_SIZE: usize = 8;

/// A sorted set of [`HpoTermId`]s
///
/// Every id occurs at most once and iteration is always in ascending
/// order. The group backs parent/child adjacency, the ancestor and
/// descendant closures and the membership of [`crate::HpoSet`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HpoGroup {
    ids: SmallVec<[HpoTermId; INLINE_GROUP_SIZE]>,
}

impl HpoGroup {
    /// Constructs a new, empty `HpoGroup`
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty `HpoGroup` with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no ids
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of ids in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds an id to the group
    ///
    /// Returns whether the id was newly inserted:
    ///
    /// - `true` if the group did not previously contain the id
    /// - `false` if the id was already present
    pub fn insert<I: Into<HpoTermId>>(&mut self, id: I) -> bool {
        let id: HpoTermId = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Appends an id without checking order or uniqueness
    ///
    /// Only valid when the caller guarantees ascending insertion, as the
    /// merge-walks of the set operators do.
    fn insert_unchecked(&mut self, id: HpoTermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the id
    pub fn contains(&self, id: &HpoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns the id at the given position, if present
    pub fn get(&self, index: usize) -> Option<&HpoTermId> {
        self.ids.get(index)
    }

    /// Returns an iterator of the ids in ascending order
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns an iterator of [`HpoTerm`]s for the contained ids
    pub fn terms<'a>(&'a self, ontology: &'a Ontology) -> term::Iter<'a> {
        term::Iter::new(self.iter(), ontology)
    }
}

impl From<Vec<HpoTermId>> for HpoGroup {
    fn from(ids: Vec<HpoTermId>) -> Self {
        let mut group = HpoGroup::with_capacity(ids.len());
        for id in ids {
            group.insert(id);
        }
        group
    }
}

impl From<HashSet<HpoTermId>> for HpoGroup {
    fn from(ids: HashSet<HpoTermId>) -> Self {
        let mut group = HpoGroup::with_capacity(ids.len());
        for id in ids {
            group.insert(id);
        }
        group
    }
}

impl FromIterator<HpoTermId> for HpoGroup {
    fn from_iter<T: IntoIterator<Item = HpoTermId>>(iter: T) -> Self {
        let mut group = HpoGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> FromIterator<HpoTerm<'a>> for HpoGroup {
    fn from_iter<T: IntoIterator<Item = HpoTerm<'a>>>(iter: T) -> Self {
        iter.into_iter().map(|term| term.id()).collect()
    }
}

impl<'a> IntoIterator for &'a HpoGroup {
    type Item = HpoTermId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            iter: self.ids.iter(),
        }
    }
}

impl BitOr for &HpoGroup {
    type Output = HpoGroup;

    /// Union of two groups
    ///
    /// Both sides are sorted ascendingly, so they are merged in a single
    /// parallel walk that always takes the smaller head element.
    fn bitor(self, rhs: &HpoGroup) -> HpoGroup {
        let mut group = HpoGroup::with_capacity(self.len() + rhs.len());
        let mut lhs = self.iter();
        let mut rhs = rhs.iter();

        let mut left = lhs.next();
        let mut right = rhs.next();

        loop {
            match (left, right) {
                (Some(l), Some(r)) => match l.cmp(&r) {
                    std::cmp::Ordering::Less => {
                        group.insert_unchecked(l);
                        left = lhs.next();
                    }
                    std::cmp::Ordering::Greater => {
                        group.insert_unchecked(r);
                        right = rhs.next();
                    }
                    std::cmp::Ordering::Equal => {
                        group.insert_unchecked(l);
                        left = lhs.next();
                        right = rhs.next();
                    }
                },
                (Some(l), None) => {
                    group.insert_unchecked(l);
                    left = lhs.next();
                }
                (None, Some(r)) => {
                    group.insert_unchecked(r);
                    right = rhs.next();
                }
                _ => return group,
            }
        }
    }
}

impl BitOr for HpoGroup {
    type Output = HpoGroup;

    fn bitor(self, rhs: HpoGroup) -> HpoGroup {
        (&self).bitor(&rhs)
    }
}

impl BitOr<HpoTermId> for &HpoGroup {
    type Output = HpoGroup;

    fn bitor(self, rhs: HpoTermId) -> HpoGroup {
        let mut group = self.clone();
        group.insert(rhs);
        group
    }
}

impl BitAnd for &HpoGroup {
    type Output = HpoGroup;

    /// Intersection of two groups
    fn bitand(self, rhs: &HpoGroup) -> HpoGroup {
        let (small, large) = if self.len() < rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut group = HpoGroup::with_capacity(small.len());
        for id in &small.ids {
            if large.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}

impl BitAnd for HpoGroup {
    type Output = HpoGroup;

    fn bitand(self, rhs: HpoGroup) -> HpoGroup {
        (&self).bitand(&rhs)
    }
}

/// Iterates the [`HpoTermId`]s of an [`HpoGroup`]
pub struct Iter<'a> {
    iter: std::slice::Iter<'a, HpoTermId>,
}

impl Iterator for Iter<'_> {
    type Item = HpoTermId;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }
}
