//! Filterable metadata fields.
//!
//! One table drives both the JSON schema handed to the language model and
//! the sanitizer applied to whatever filter comes back, so the two cannot
//! drift apart.

use domain_vector::{FieldCondition, FilterValue, MetadataFilter};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    In,
    Gte,
    Lte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::In => "$in",
            Operator::Gte => "$gte",
            Operator::Lte => "$lte",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "$eq" => Some(Operator::Eq),
            "$in" => Some(Operator::In),
            "$gte" => Some(Operator::Gte),
            "$lte" => Some(Operator::Lte),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FilterField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub operators: &'static [Operator],
    pub description: &'static str,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField {
        name: "batch",
        kind: FieldKind::Text,
        operators: &[Operator::Eq],
        description: "YC batch, e.g. \"W24\" or \"S23\"",
    },
    FilterField {
        name: "industry",
        kind: FieldKind::Text,
        operators: &[Operator::Eq, Operator::In],
        description: "Industry, e.g. \"Fintech\", \"Healthcare\"; $in for several",
    },
    FilterField {
        name: "location",
        kind: FieldKind::Text,
        operators: &[Operator::Eq, Operator::In],
        description: "Company location, e.g. \"London, England, United Kingdom\"",
    },
    FilterField {
        name: "regions",
        kind: FieldKind::Text,
        operators: &[Operator::In],
        description: "Regions, e.g. [\"Europe\", \"Remote\"]",
    },
    FilterField {
        name: "stage",
        kind: FieldKind::Text,
        operators: &[Operator::Eq, Operator::In],
        description: "Company stage, e.g. \"Early\", \"Growth\"",
    },
    FilterField {
        name: "team_size",
        kind: FieldKind::Number,
        operators: &[Operator::Eq, Operator::Gte, Operator::Lte],
        description: "Number of employees",
    },
    FilterField {
        name: "tags",
        kind: FieldKind::Text,
        operators: &[Operator::In],
        description: "Tags, e.g. [\"Hardware\", \"Robotics\"]",
    },
    FilterField {
        name: "isHiring",
        kind: FieldKind::Bool,
        operators: &[Operator::Eq],
        description: "Whether the company is hiring",
    },
];

pub fn field(name: &str) -> Option<&'static FilterField> {
    FILTER_FIELDS.iter().find(|f| f.name == name)
}

fn operand_schema(kind: FieldKind, operator: Operator) -> Value {
    let scalar = match kind {
        FieldKind::Text => "string",
        FieldKind::Number => "number",
        FieldKind::Bool => "boolean",
    };
    match operator {
        Operator::In => json!({ "type": "array", "items": { "type": scalar } }),
        _ => json!({ "type": scalar }),
    }
}

/// JSON schema of the `filter` argument
pub fn filter_schema() -> Value {
    let properties: Map<String, Value> = FILTER_FIELDS
        .iter()
        .map(|f| {
            let ops: Map<String, Value> = f
                .operators
                .iter()
                .map(|op| (op.as_str().to_string(), operand_schema(f.kind, *op)))
                .collect();
            (
                f.name.to_string(),
                json!({
                    "type": "object",
                    "description": f.description,
                    "properties": ops,
                    "additionalProperties": false,
                }),
            )
        })
        .collect();

    json!({
        "type": "object",
        "description": "Optional metadata filter in Pinecone syntax; fields are ANDed",
        "properties": properties,
        "additionalProperties": false,
    })
}

fn scalar(kind: FieldKind, value: &Value) -> Option<FilterValue> {
    match (kind, value) {
        (FieldKind::Text, Value::String(s)) if !s.trim().is_empty() => {
            Some(FilterValue::String(s.trim().to_string()))
        }
        (FieldKind::Number, Value::Number(n)) => n.as_f64().map(FilterValue::Number),
        (FieldKind::Bool, Value::Bool(b)) => Some(FilterValue::Bool(*b)),
        _ => None,
    }
}

fn condition(field: &FilterField, operators: &Map<String, Value>) -> FieldCondition {
    let mut condition = FieldCondition::default();

    for (raw_op, value) in operators {
        let Some(op) = Operator::parse(raw_op).filter(|op| field.operators.contains(op)) else {
            continue;
        };
        match op {
            Operator::Eq => condition.eq = scalar(field.kind, value),
            Operator::In => {
                let values: Vec<FilterValue> = value
                    .as_array()
                    .map(|items| items.iter().filter_map(|v| scalar(field.kind, v)).collect())
                    .unwrap_or_default();
                if !values.is_empty() {
                    condition.any_of = Some(values);
                }
            }
            Operator::Gte => condition.gte = value.as_f64(),
            Operator::Lte => condition.lte = value.as_f64(),
        }
    }

    condition
}

/// Keep only known fields, allowed operators and well-typed operands.
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_filter(raw: &Value) -> Option<MetadataFilter> {
    let object = raw.as_object()?;
    let mut filter = MetadataFilter::new();

    for (name, operators) in object {
        let (Some(field), Some(operators)) = (field(name), operators.as_object()) else {
            tracing::debug!(field = %name, "Dropping unsupported filter field");
            continue;
        };
        filter.insert(name.as_str(), condition(field, operators));
    }

    (!filter.is_empty()).then_some(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_field_and_operator() {
        let schema = filter_schema();
        for field in FILTER_FIELDS {
            let props = &schema["properties"][field.name]["properties"];
            for op in field.operators {
                assert!(props.get(op.as_str()).is_some(), "{} {}", field.name, op.as_str());
            }
        }
        assert_eq!(
            schema["properties"]["industry"]["properties"]["$in"]["items"]["type"],
            "string"
        );
        assert_eq!(schema["properties"]["isHiring"]["properties"]["$eq"]["type"], "boolean");
    }

    #[test]
    fn test_sanitize_keeps_valid_conditions() {
        let raw = json!({
            "industry": {"$in": ["Fintech", "AI"]},
            "team_size": {"$gte": 20},
            "isHiring": {"$eq": true}
        });

        let filter = sanitize_filter(&raw).unwrap();
        assert_eq!(filter.len(), 3);
        assert_eq!(
            filter.get("industry"),
            Some(&FieldCondition::any_of(["Fintech", "AI"]))
        );
        assert_eq!(filter.get("team_size").unwrap().gte, Some(20.0));
        assert_eq!(filter.get("isHiring"), Some(&FieldCondition::eq(true)));
    }

    #[test]
    fn test_sanitize_drops_unknown_fields_and_operators() {
        let raw = json!({
            "funding_date": {"$gte": 2024},
            "batch": {"$in": ["W24"], "$eq": "W24"},
            "regions": {"$eq": "Europe"}
        });

        let filter = sanitize_filter(&raw).unwrap();
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get("batch"), Some(&FieldCondition::eq("W24")));
    }

    #[test]
    fn test_sanitize_drops_mistyped_operands() {
        let raw = json!({
            "isHiring": {"$eq": "yes"},
            "team_size": {"$lte": "fifty"},
            "tags": {"$in": [1, 2]}
        });
        assert!(sanitize_filter(&raw).is_none());
    }

    #[test]
    fn test_sanitize_non_object() {
        assert!(sanitize_filter(&json!("industry = fintech")).is_none());
        assert!(sanitize_filter(&json!({})).is_none());
    }
}
