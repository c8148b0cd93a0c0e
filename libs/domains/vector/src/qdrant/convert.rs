//! Mapping between the Pinecone-shaped domain types and Qdrant's gRPC types.

use std::collections::HashMap;

use qdrant_client::qdrant::{
    point_id::PointIdOptions, value::Kind, Condition, Filter, ListValue, PointId, Range, Struct,
    Value as QdrantValue,
};
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};
use crate::models::{FieldCondition, FilterValue, MetadataFilter, VectorMetadata};

/// Payload key holding the caller's record id, since Qdrant ids are u64 or UUID
pub const RECORD_ID_KEY: &str = "record_id";

/// Numeric ids stay numeric, UUIDs pass through, anything else gets a stable v5 UUID.
pub fn point_id(record_id: &str) -> PointId {
    if let Ok(num) = record_id.parse::<u64>() {
        return PointId::from(num);
    }
    match Uuid::parse_str(record_id) {
        Ok(uuid) => PointId::from(uuid.to_string()),
        Err(_) => PointId::from(Uuid::new_v5(&Uuid::NAMESPACE_OID, record_id.as_bytes()).to_string()),
    }
}

fn point_id_to_string(point_id: &PointId) -> Option<String> {
    match &point_id.point_id_options {
        Some(PointIdOptions::Num(num)) => Some(num.to_string()),
        Some(PointIdOptions::Uuid(uuid)) => Some(uuid.clone()),
        None => None,
    }
}

pub fn json_to_qdrant(value: serde_json::Value) -> Option<QdrantValue> {
    let kind = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Kind::IntegerValue(i),
            None => Kind::DoubleValue(n.as_f64()?),
        },
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().filter_map(json_to_qdrant).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .filter_map(|(k, v)| json_to_qdrant(v).map(|v| (k, v)))
                .collect(),
        }),
    };
    Some(QdrantValue { kind: Some(kind) })
}

pub fn qdrant_to_json(value: QdrantValue) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(i),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(qdrant_to_json).collect())
        }
        Some(Kind::StructValue(st)) => serde_json::Value::Object(
            st.fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_to_json(v)))
                .collect(),
        ),
    }
}

/// Metadata plus the record id, as a Qdrant payload
pub fn to_payload(
    record_id: &str,
    metadata: &VectorMetadata,
) -> VectorResult<HashMap<String, QdrantValue>> {
    let serde_json::Value::Object(doc) = serde_json::to_value(metadata)? else {
        return Err(VectorError::Internal("metadata is not an object".to_string()));
    };

    let mut payload: HashMap<String, QdrantValue> = doc
        .into_iter()
        .filter_map(|(k, v)| json_to_qdrant(v).map(|v| (k, v)))
        .collect();
    payload.insert(RECORD_ID_KEY.to_string(), QdrantValue::from(record_id.to_string()));
    Ok(payload)
}

/// Recover `(record_id, metadata)` from a scored point
pub fn from_payload(
    point_id: Option<&PointId>,
    mut payload: HashMap<String, QdrantValue>,
) -> VectorResult<(String, VectorMetadata)> {
    let record_id = match payload.remove(RECORD_ID_KEY).map(qdrant_to_json) {
        Some(serde_json::Value::String(id)) => id,
        _ => point_id
            .and_then(point_id_to_string)
            .ok_or_else(|| VectorError::Qdrant("point has no id".to_string()))?,
    };

    let doc: serde_json::Map<String, serde_json::Value> = payload
        .into_iter()
        .map(|(k, v)| (k, qdrant_to_json(v)))
        .collect();
    let metadata = serde_json::from_value(serde_json::Value::Object(doc))?;

    Ok((record_id, metadata))
}

fn integer(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

fn eq_condition(field: &str, value: &FilterValue) -> Condition {
    match value {
        FilterValue::String(s) => Condition::matches(field, s.clone()),
        FilterValue::Bool(b) => Condition::matches(field, *b),
        FilterValue::Number(n) => match integer(*n) {
            Some(i) => Condition::matches(field, i),
            None => Condition::range(
                field,
                Range {
                    gte: Some(*n),
                    lte: Some(*n),
                    ..Default::default()
                },
            ),
        },
    }
}

fn any_of_condition(field: &str, values: &[FilterValue]) -> VectorResult<Condition> {
    if let Some(strings) = values
        .iter()
        .map(|v| match v {
            FilterValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect::<Option<Vec<String>>>()
    {
        return Ok(Condition::matches(field, strings));
    }

    if let Some(ints) = values
        .iter()
        .map(|v| match v {
            FilterValue::Number(n) => integer(*n),
            _ => None,
        })
        .collect::<Option<Vec<i64>>>()
    {
        return Ok(Condition::matches(field, ints));
    }

    Err(VectorError::Validation(format!(
        "$in on '{}' must list only strings or only integers",
        field
    )))
}

fn field_conditions(field: &str, condition: &FieldCondition) -> VectorResult<Vec<Condition>> {
    let mut conditions = Vec::new();
    if let Some(eq) = &condition.eq {
        conditions.push(eq_condition(field, eq));
    }
    if let Some(values) = &condition.any_of {
        conditions.push(any_of_condition(field, values)?);
    }
    if condition.gte.is_some() || condition.lte.is_some() {
        conditions.push(Condition::range(
            field,
            Range {
                gte: condition.gte,
                lte: condition.lte,
                ..Default::default()
            },
        ));
    }
    Ok(conditions)
}

/// All field conditions must hold
pub fn to_filter(filter: &MetadataFilter) -> VectorResult<Filter> {
    let mut must = Vec::new();
    for (field, condition) in filter.iter() {
        must.extend(field_conditions(field, condition)?);
    }
    Ok(Filter::must(must))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_id_numeric() {
        assert_eq!(
            point_id("42").point_id_options,
            Some(PointIdOptions::Num(42))
        );
    }

    #[test]
    fn test_point_id_uuid_passthrough() {
        let uuid = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            point_id(uuid).point_id_options,
            Some(PointIdOptions::Uuid(uuid.to_string()))
        );
    }

    #[test]
    fn test_point_id_slug_is_stable() {
        let a = point_id("acme-corp");
        let b = point_id("acme-corp");
        assert_eq!(a, b);
        assert!(matches!(a.point_id_options, Some(PointIdOptions::Uuid(_))));
        assert_ne!(a, point_id("other-corp"));
    }

    #[test]
    fn test_json_round_trip_nested() {
        let value = json!({"tags": ["B2B", "AI"], "team_size": 12, "ratio": 0.5, "nested": {"ok": true}});
        let converted = json_to_qdrant(value.clone()).unwrap();
        assert_eq!(qdrant_to_json(converted), value);
    }

    #[test]
    fn test_payload_round_trip_keeps_record_id() {
        let metadata = VectorMetadata {
            name: Some("Acme".into()),
            team_size: Some(12),
            regions: Some(vec!["Europe".into()]),
            is_hiring: Some(true),
            ..Default::default()
        };

        let payload = to_payload("acme-corp", &metadata).unwrap();
        assert!(payload.contains_key(RECORD_ID_KEY));
        assert!(payload.contains_key("isHiring"));

        let (id, restored) = from_payload(None, payload).unwrap();
        assert_eq!(id, "acme-corp");
        assert_eq!(restored, metadata);
    }

    #[test]
    fn test_from_payload_falls_back_to_point_id() {
        let (id, metadata) = from_payload(Some(&PointId::from(7u64)), HashMap::new()).unwrap();
        assert_eq!(id, "7");
        assert_eq!(metadata, VectorMetadata::default());
    }

    #[test]
    fn test_filter_translation_counts_conditions() {
        let filter = MetadataFilter::new()
            .with("industry", FieldCondition::eq("Fintech"))
            .with("isHiring", FieldCondition::eq(true))
            .with("batch", FieldCondition::any_of(["W21", "S21"]))
            .with("team_size", FieldCondition::between(Some(10.0), Some(50.0)));

        let translated = to_filter(&filter).unwrap();
        assert_eq!(translated.must.len(), 4);
    }

    #[test]
    fn test_filter_rejects_mixed_in_list() {
        let filter = MetadataFilter::new().with(
            "batch",
            FieldCondition::any_of([FilterValue::from("W21"), FilterValue::from(true)]),
        );
        assert!(matches!(to_filter(&filter), Err(VectorError::Validation(_))));
    }
}
