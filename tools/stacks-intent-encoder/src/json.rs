use serde_json::{json, Map, Value};
use stacks_intent_types::ClarityValue;

/// Render a value as `{ "type": ..., "value": ... }` the way Stacks API clients present
/// read-only results. Integers become decimal strings so nothing loses precision.
pub fn cv_to_json(value: &ClarityValue) -> Value {
    match value {
        ClarityValue::Bool(b) => json!({ "type": "bool", "value": b }),
        ClarityValue::Int(v) => json!({ "type": "int", "value": v.to_string() }),
        ClarityValue::UInt(v) => json!({ "type": "uint", "value": v.to_string() }),
        ClarityValue::Buffer(bytes) => json!({
            "type": type_string(value),
            "value": format!("0x{}", hex::encode(bytes)),
        }),
        ClarityValue::OptionalNone => json!({ "type": type_string(value), "value": Value::Null }),
        ClarityValue::OptionalSome(inner) => json!({ "type": type_string(value), "value": cv_to_json(inner) }),
        ClarityValue::ResponseOk(inner) => json!({
            "type": type_string(value),
            "value": cv_to_json(inner),
            "success": true,
        }),
        ClarityValue::ResponseErr(inner) => json!({
            "type": type_string(value),
            "value": cv_to_json(inner),
            "success": false,
        }),
        ClarityValue::StandardPrincipal(_) | ClarityValue::ContractPrincipal(_) => json!({
            "type": "principal",
            "value": value.as_principal(),
        }),
        ClarityValue::List(items) => json!({
            "type": type_string(value),
            "value": items.iter().map(cv_to_json).collect::<Vec<_>>(),
        }),
        ClarityValue::Tuple(members) => {
            let rendered: Map<String, Value> =
                members.iter().map(|(key, member)| (key.clone(), cv_to_json(member))).collect();
            json!({ "type": type_string(value), "value": rendered })
        }
        ClarityValue::StringAscii(s) | ClarityValue::StringUtf8(s) => {
            json!({ "type": type_string(value), "value": s })
        }
    }
}

/// Clarity type signature of a concrete value, e.g. `(response (tuple (amount uint)) UnknownType)`.
pub fn type_string(value: &ClarityValue) -> String {
    match value {
        ClarityValue::Bool(_) => "bool".to_string(),
        ClarityValue::Int(_) => "int".to_string(),
        ClarityValue::UInt(_) => "uint".to_string(),
        ClarityValue::Buffer(bytes) => format!("(buff {})", bytes.len()),
        ClarityValue::OptionalNone => "(optional none)".to_string(),
        ClarityValue::OptionalSome(inner) => format!("(optional {})", type_string(inner)),
        ClarityValue::ResponseOk(inner) => format!("(response {} UnknownType)", type_string(inner)),
        ClarityValue::ResponseErr(inner) => format!("(response UnknownType {})", type_string(inner)),
        ClarityValue::StandardPrincipal(_) | ClarityValue::ContractPrincipal(_) => "principal".to_string(),
        ClarityValue::List(items) => {
            let elem = items.first().map(type_string).unwrap_or_else(|| "UnknownType".to_string());
            format!("(list {} {elem})", items.len())
        }
        ClarityValue::Tuple(members) => {
            let fields: Vec<String> =
                members.iter().map(|(key, member)| format!("({key} {})", type_string(member))).collect();
            format!("(tuple {})", fields.join(" "))
        }
        ClarityValue::StringAscii(s) => format!("(string-ascii {})", s.len()),
        ClarityValue::StringUtf8(s) => format!("(string-utf8 {})", s.len()),
    }
}
