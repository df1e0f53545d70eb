//! Normalized collection responses.
//!
//! Every list or detail endpoint answers with the same envelope:
//!
//! ```text
//! {
//!   "success": true,
//!   "code": 200,
//!   "<collection>": { "allIds": [1, 2], "byId": { "1": {..}, "2": {..} } },
//!   ...
//! }
//! ```
//!
//! `allIds` keeps the order the records were fetched in; `byId` maps each id
//! to the record's full projection so clients can look entities up without
//! duplicating nested objects. Several named collections can share one
//! envelope.
//!
//! A record that appears twice in the same input keeps both entries in
//! `allIds`, while `byId` holds the later projection.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::RecordId;

/// Status code carried by every successful envelope.
pub const STATUS_OK: u16 = 200;

/// Top-level envelope keys that collection names may not shadow.
pub const RESERVED_KEYS: &[&str] = &["success", "code"];

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// An entity that can be placed in a normalized collection.
///
/// The projection is the record's `Serialize` output, which must be a JSON
/// object.
pub trait Record: Serialize {
    /// The record's unique identifier, or `None` if it has none.
    fn record_id(&self) -> Option<RecordId>;
}

impl<R: Record + ?Sized> Record for &R {
    fn record_id(&self) -> Option<RecordId> {
        (**self).record_id()
    }
}

/// Untyped rows are identified by their `"id"` member.
impl Record for Value {
    fn record_id(&self) -> Option<RecordId> {
        match self.get("id")? {
            Value::Number(n) => n
                .as_i64()
                .map(RecordId::Int)
                .or_else(|| n.as_u64().map(RecordId::UInt)),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedCollection
// ---------------------------------------------------------------------------

/// One `{allIds, byId}` block.
///
/// Equality compares `byId` in order, matching the serialized form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCollection {
    all_ids: Vec<RecordId>,
    by_id: IndexMap<String, Value>,
}

impl NormalizedCollection {
    /// Normalize records in iteration order.
    pub fn from_records<I>(records: I) -> Result<Self, CoreError>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        let mut collection = Self::default();
        for record in records {
            collection.push(&record)?;
        }
        Ok(collection)
    }

    /// Append a single record.
    pub fn push<R: Record + ?Sized>(&mut self, record: &R) -> Result<(), CoreError> {
        let id = record
            .record_id()
            .ok_or_else(|| CoreError::Integrity("record has no integer or string id".into()))?;

        let projection = serde_json::to_value(record).map_err(|e| {
            CoreError::Integrity(format!("record {id} could not be projected: {e}"))
        })?;
        if !projection.is_object() {
            return Err(CoreError::Integrity(format!(
                "record {id} does not project to a key/value mapping"
            )));
        }

        self.by_id.insert(id.key(), projection);
        self.all_ids.push(id);
        Ok(())
    }

    pub fn all_ids(&self) -> &[RecordId] {
        &self.all_ids
    }

    pub fn by_id(&self) -> &IndexMap<String, Value> {
        &self.by_id
    }

    /// Look up a record's projection by id.
    pub fn get(&self, id: &RecordId) -> Option<&Value> {
        self.by_id.get(&id.key())
    }

    /// Number of entries in `allIds` (duplicates included).
    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }
}

impl PartialEq for NormalizedCollection {
    fn eq(&self, other: &Self) -> bool {
        self.all_ids == other.all_ids && self.by_id.iter().eq(other.by_id.iter())
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A success envelope holding one or more named collections.
///
/// Built fresh per request:
///
/// ```ignore
/// let envelope = Envelope::success()
///     .with_collection("leads", &leads)?
///     .with_collection("funnelSteps", &steps)?;
/// ```
///
/// Two envelopes are equal only if their collections also appear in the same
/// order.
#[derive(Debug, Clone)]
pub struct Envelope {
    code: u16,
    collections: IndexMap<String, NormalizedCollection>,
}

impl Envelope {
    /// An empty envelope with `success: true` and `code: 200`.
    pub fn success() -> Self {
        Self {
            code: STATUS_OK,
            collections: IndexMap::new(),
        }
    }

    /// Normalize `records` and add them under `name`.
    pub fn with_collection<I>(mut self, name: &str, records: I) -> Result<Self, CoreError>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        let collection = NormalizedCollection::from_records(records).inspect_err(|e| {
            tracing::warn!(collection = name, error = %e, "Failed to normalize collection");
        })?;
        self.insert(name, collection)?;
        Ok(self)
    }

    /// Add a single record as a one-element collection.
    pub fn with_record<R: Record + ?Sized>(self, name: &str, record: &R) -> Result<Self, CoreError> {
        self.with_collection(name, std::iter::once(record))
    }

    /// Add an already-normalized collection under `name`.
    pub fn insert(&mut self, name: &str, collection: NormalizedCollection) -> Result<(), CoreError> {
        if RESERVED_KEYS.contains(&name) {
            tracing::warn!(collection = name, "Collection name shadows an envelope key");
            return Err(CoreError::Integrity(format!(
                "collection name '{name}' is reserved"
            )));
        }
        if self.collections.contains_key(name) {
            tracing::warn!(collection = name, "Duplicate collection name");
            return Err(CoreError::Integrity(format!(
                "collection '{name}' appears more than once"
            )));
        }

        tracing::debug!(collection = name, records = collection.len(), "Normalized collection");
        self.collections.insert(name.to_string(), collection);
        Ok(())
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn collection(&self, name: &str) -> Option<&NormalizedCollection> {
        self.collections.get(name)
    }

    /// Collection names in insertion order.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.collections.iter().eq(other.collections.iter())
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.collections.len() + 2))?;
        map.serialize_entry("success", &self.is_success())?;
        map.serialize_entry("code", &self.code)?;
        for (name, collection) in &self.collections {
            map.serialize_entry(name, collection)?;
        }
        map.end()
    }
}

/// Shorthand for an envelope with a single collection.
pub fn normalize<I>(name: &str, records: I) -> Result<Envelope, CoreError>
where
    I: IntoIterator,
    I::Item: Record,
{
    Envelope::success().with_collection(name, records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn rows(values: Value) -> Vec<Value> {
        match values {
            Value::Array(items) => items,
            other => panic!("expected array, got {other}"),
        }
    }

    #[derive(Serialize)]
    struct Widget {
        id: i64,
        label: &'static str,
    }

    impl Record for Widget {
        fn record_id(&self) -> Option<RecordId> {
            Some(RecordId::Int(self.id))
        }
    }

    // -- envelope shape --------------------------------------------------------

    #[test]
    fn two_items_produce_documented_envelope() {
        let input = rows(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));

        let envelope = normalize("items", &input).unwrap();

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": true,
                "code": 200,
                "items": {
                    "allIds": [1, 2],
                    "byId": {
                        "1": {"id": 1, "name": "A"},
                        "2": {"id": 2, "name": "B"},
                    },
                },
            })
        );
    }

    #[test]
    fn top_level_keys_are_ordered_success_code_then_collections() {
        let envelope = Envelope::success()
            .with_collection("leads", rows(json!([{"id": 1}])))
            .unwrap()
            .with_collection("todos", rows(json!([{"id": 9}])))
            .unwrap();

        let text = serde_json::to_string(&envelope).unwrap();
        let success = text.find("\"success\"").unwrap();
        let code = text.find("\"code\"").unwrap();
        let leads = text.find("\"leads\"").unwrap();
        let todos = text.find("\"todos\"").unwrap();
        assert!(success < code && code < leads && leads < todos);
    }

    #[test]
    fn empty_input_gives_empty_collection() {
        let envelope = normalize("leads", Vec::<Value>::new()).unwrap();

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "code": 200, "leads": {"allIds": [], "byId": {}}})
        );
    }

    #[test]
    fn envelope_without_collections_has_only_metadata() {
        let json = serde_json::to_value(Envelope::success()).unwrap();
        assert_eq!(json, json!({"success": true, "code": 200}));
    }

    // -- collection properties -------------------------------------------------

    #[test]
    fn unique_ids_fill_both_views_consistently() {
        let input: Vec<Widget> = (1..=25)
            .map(|id| Widget { id, label: "w" })
            .collect();

        let collection = NormalizedCollection::from_records(&input).unwrap();

        assert_eq!(collection.len(), 25);
        assert_eq!(collection.by_id().len(), 25);
        let ids: HashSet<String> = collection.all_ids().iter().map(RecordId::key).collect();
        let keys: HashSet<String> = collection.by_id().keys().cloned().collect();
        assert_eq!(ids, keys);
    }

    #[test]
    fn all_ids_preserve_input_order() {
        let input = rows(json!([{"id": 5}, {"id": 2}, {"id": 9}, {"id": 1}]));

        let collection = NormalizedCollection::from_records(&input).unwrap();

        let expected: Vec<RecordId> = [5, 2, 9, 1].into_iter().map(RecordId::Int).collect();
        assert_eq!(collection.all_ids(), expected.as_slice());
    }

    #[test]
    fn by_id_holds_full_projection() {
        let widget = Widget { id: 3, label: "gear" };

        let collection = NormalizedCollection::from_records([&widget]).unwrap();

        assert_eq!(
            collection.get(&RecordId::Int(3)),
            Some(&json!({"id": 3, "label": "gear"}))
        );
    }

    #[test]
    fn single_record_matches_one_element_sequence() {
        let widget = Widget { id: 4, label: "bolt" };

        let single = Envelope::success().with_record("widgets", &widget).unwrap();
        let wrapped = Envelope::success()
            .with_collection("widgets", vec![&widget])
            .unwrap();

        assert_eq!(single, wrapped);
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            serde_json::to_value(&wrapped).unwrap()
        );
    }

    #[test]
    fn two_collections_are_independent() {
        let envelope = Envelope::success()
            .with_collection("opportunities", rows(json!([{"id": 1}, {"id": 2}])))
            .unwrap()
            .with_collection("funnelSteps", rows(json!([{"id": 2}, {"id": 3}, {"id": 4}])))
            .unwrap();

        let json = serde_json::to_value(&envelope).unwrap();
        let keys: HashSet<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            HashSet::from(["success", "code", "opportunities", "funnelSteps"])
        );
        assert_eq!(envelope.collection("opportunities").unwrap().len(), 2);
        assert_eq!(envelope.collection("funnelSteps").unwrap().len(), 3);
        assert_eq!(
            envelope.collection_names().collect::<Vec<_>>(),
            vec!["opportunities", "funnelSteps"]
        );
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let input = rows(json!([{"id": 1, "v": "a"}, {"id": "x", "v": "b"}]));

        let first = serde_json::to_value(normalize("items", &input).unwrap()).unwrap();
        let second = serde_json::to_value(normalize("items", &input).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn string_ids_keep_their_type_in_all_ids() {
        let input = rows(json!([{"id": "a-1"}, {"id": 2}]));

        let json = serde_json::to_value(normalize("mixed", &input).unwrap()).unwrap();

        assert_eq!(json["mixed"]["allIds"], json!(["a-1", 2]));
        assert_eq!(json["mixed"]["byId"]["a-1"], json!({"id": "a-1"}));
        assert_eq!(json["mixed"]["byId"]["2"], json!({"id": 2}));
    }

    #[test]
    fn duplicate_ids_keep_both_entries_and_last_projection() {
        let input = rows(json!([{"id": 1, "v": "x"}, {"id": 1, "v": "y"}]));

        let json = serde_json::to_value(normalize("items", &input).unwrap()).unwrap();

        assert_eq!(json["items"]["allIds"], json!([1, 1]));
        assert_eq!(json["items"]["byId"], json!({"1": {"id": 1, "v": "y"}}));
    }

    // -- integrity violations --------------------------------------------------

    #[test]
    fn record_without_id_is_rejected() {
        let input = rows(json!([{"id": 1}, {"name": "anonymous"}]));

        let result = normalize("items", &input);

        assert_matches!(result, Err(CoreError::Integrity(_)));
    }

    #[test]
    fn ids_above_i64_range_are_accepted() {
        let input = rows(json!([{"id": u64::MAX, "v": "big"}]));

        let json = serde_json::to_value(normalize("items", &input).unwrap()).unwrap();

        assert_eq!(json["items"]["allIds"], json!([u64::MAX]));
        assert_eq!(
            json["items"]["byId"]["18446744073709551615"],
            json!({"id": u64::MAX, "v": "big"})
        );
    }

    #[test]
    fn fractional_id_is_rejected() {
        let input = rows(json!([{"id": 1.5}]));

        assert_matches!(
            normalize("items", &input),
            Err(CoreError::Integrity(msg)) if msg.contains("integer or string id")
        );
    }

    #[test]
    fn envelope_equality_respects_collection_order() {
        let leads = rows(json!([{"id": 1}]));
        let todos = rows(json!([{"id": 2}]));

        let first = Envelope::success()
            .with_collection("leads", &leads)
            .unwrap()
            .with_collection("todos", &todos)
            .unwrap();
        let second = Envelope::success()
            .with_collection("todos", &todos)
            .unwrap()
            .with_collection("leads", &leads)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn non_scalar_id_is_rejected() {
        let input = rows(json!([{"id": [1, 2]}]));

        assert_matches!(normalize("items", &input), Err(CoreError::Integrity(_)));
    }

    #[test]
    fn non_object_projection_is_rejected() {
        #[derive(Serialize)]
        struct Bare(i64);

        impl Record for Bare {
            fn record_id(&self) -> Option<RecordId> {
                Some(RecordId::Int(self.0))
            }
        }

        let result = normalize("bare", [Bare(1)]);

        assert_matches!(result, Err(CoreError::Integrity(msg)) if msg.contains("record 1"));
    }

    #[test]
    fn duplicate_collection_name_is_rejected() {
        let result = Envelope::success()
            .with_collection("leads", rows(json!([{"id": 1}])))
            .unwrap()
            .with_collection("leads", rows(json!([{"id": 2}])));

        assert_matches!(result, Err(CoreError::Integrity(msg)) if msg.contains("leads"));
    }

    #[test]
    fn reserved_collection_names_are_rejected() {
        for name in RESERVED_KEYS {
            let result = normalize(name, rows(json!([{"id": 1}])));
            assert_matches!(result, Err(CoreError::Integrity(_)), "name: {name}");
        }
    }
}
