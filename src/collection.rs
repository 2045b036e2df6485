//! Generic ordered container of schema-validated entities.
//!
//! A collection never holds an entity that fails its schema: invalid items
//! are rejected at the boundary, not stored and cleaned later. The lenient
//! path (`with_items`, `add`) drops invalid items with a diagnostic; the
//! strict path (`strict`) fails construction on the first invalid item.
//!
//! One parameterized container replaces the per-entity copies (images,
//! videos, quotes, social links and the top-level article list).

use std::collections::HashSet;
use std::fmt;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ArticleError, Result};
use crate::schema::Entity;

/// Insertion-ordered collection of validated entities.
///
/// Backing storage is private; all mutation goes through the operations
/// below. Ordering is insertion order; no sorting or deduplication is
/// performed automatically. Duplicate-ID inserts are appended as-is and
/// [`get`](Collection::get) returns the first match, so callers relying on
/// uniqueness must deduplicate before insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from items, dropping any that fail their schema.
    ///
    /// Never fails; each dropped item is reported through a diagnostic.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        collection.add(items);
        collection
    }

    /// Create a collection from items, failing on the first invalid one.
    ///
    /// Returns no partial collection: either every item passes its schema
    /// or the whole construction is rejected.
    pub fn strict(items: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut valid = Vec::new();
        for item in items {
            let violations = item.violations();
            if !violations.is_empty() {
                return Err(ArticleError::Rejected(violations.into()));
            }
            valid.push(item);
        }
        Ok(Self { items: valid })
    }

    /// Add items, dropping any that fail their schema.
    pub fn add(&mut self, items: impl IntoIterator<Item = T>) -> &mut Self {
        for item in items {
            let violations = item.violations();
            if violations.is_empty() {
                self.items.push(item);
            } else {
                for violation in &violations {
                    tracing::debug!(
                        kind = T::KIND,
                        field = violation.field,
                        rule = %violation.rule,
                        "entity rejected on insert"
                    );
                }
            }
        }
        self
    }

    /// Return the first entity with the given ID.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Return the first entity with the given ID, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Remove every entity whose ID is in `ids`.
    pub fn remove<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        self.items.retain(|item| !ids.contains(item.id()));
        self
    }

    /// Return a new collection holding the entities that pass every
    /// predicate (logical AND).
    pub fn filter(&self, predicates: &[&dyn Fn(&T) -> bool]) -> Self
    where
        T: Clone,
    {
        let items = self
            .items
            .iter()
            .filter(|item| predicates.iter().all(|pred| pred(item)))
            .cloned()
            .collect();
        Self { items }
    }

    /// IDs of all entities, in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(Entity::id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Normalize every entity in place, then drop the ones that still fail
    /// their schema.
    ///
    /// An entity that clears itself to empty during its own normalization
    /// no longer satisfies its required rules and is removed here, keeping
    /// the container always valid.
    pub fn normalize(&mut self) {
        for item in &mut self.items {
            item.normalize();
        }
        self.items.retain(|item| {
            let valid = item.is_valid();
            if !valid {
                tracing::debug!(kind = T::KIND, "entity dropped after normalization");
            }
            valid
        });
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for Collection<T>
where
    T: Entity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CollectionVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T> Visitor<'de> for CollectionVisitor<T>
        where
            T: Entity + Deserialize<'de>,
        {
            type Value = Collection<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a sequence of {} entities", T::KIND)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                // External input goes through the lenient path.
                let mut collection = Collection::new();
                while let Some(item) = seq.next_element::<T>()? {
                    collection.add([item]);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_seq(CollectionVisitor(std::marker::PhantomData))
    }
}
