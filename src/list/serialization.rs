//! Serde support for the ordered sets.
//!
//! Both sets serialize as a sequence of their keys in ascending order and
//! deserialize from any sequence of keys; duplicates collapse and the input
//! does not need to be sorted.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::list::coarse::CoarseList;
use crate::list::lazy::LazyList;
use crate::list::types::{Key, OrderedSet};

/// Writes the keys seen by one traversal.
///
/// The keys are collected first: a traversal cannot be aborted with an error,
/// and under concurrent mutation the length is only known once it finishes.
fn serialize_set<T, S>(set: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: OrderedSet,
    S: Serializer,
{
    let keys = set.to_vec();
    let mut seq = serializer.serialize_seq(Some(keys.len()))?;
    for key in &keys {
        seq.serialize_element(key)?;
    }
    seq.end()
}

struct SetVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for SetVisitor<T>
where
    T: OrderedSet + Default,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of integer keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let set = T::default();
        while let Some(key) = seq.next_element::<Key>()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl Serialize for LazyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_set(self, serializer)
    }
}

impl<'de> Deserialize<'de> for LazyList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}

impl Serialize for CoarseList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_set(self, serializer)
    }
}

impl<'de> Deserialize<'de> for CoarseList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_ascending() {
        let lazy: LazyList = [15, 10, 12].into_iter().collect();
        let coarse: CoarseList = [15, 10, 12].into_iter().collect();

        assert_eq!(serde_json::to_string(&lazy).unwrap(), "[10,12,15]");
        assert_eq!(serde_json::to_string(&coarse).unwrap(), "[10,12,15]");
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let lazy: LazyList = serde_json::from_str("[3,1,3,2]").unwrap();
        let coarse: CoarseList = serde_json::from_str("[3,1,3,2]").unwrap();

        assert_eq!(lazy.to_vec(), vec![1, 2, 3]);
        assert_eq!(lazy.len(), 3);
        assert_eq!(coarse.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_deserialize_rejects_non_sequence() {
        let result: Result<LazyList, _> = serde_json::from_str("{\"keys\":[1]}");
        assert!(result.is_err());

        let result: Result<CoarseList, _> = serde_json::from_str("[1,\"two\"]");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_set() {
        let lazy = LazyList::new();
        assert_eq!(serde_json::to_string(&lazy).unwrap(), "[]");

        let back: LazyList = serde_json::from_str("[]").unwrap();
        assert!(back.is_empty());
    }
}
