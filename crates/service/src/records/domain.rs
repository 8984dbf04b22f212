use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create request as received. Every field is optional so that a missing
/// field is reported as a validation error instead of a decoding error.
/// Values may be JSON strings or numbers (`"age": 30` is accepted).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordInput {
    #[serde(default)]
    pub cpf: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub postal_code: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
}

/// A record ready for the presence checks; absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub cpf: String,
    pub name: String,
    pub age: String,
    pub postal_code: String,
    pub address: String,
}

fn text(v: Option<Value>) -> String {
    match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl From<CreateRecordInput> for NewRecord {
    fn from(i: CreateRecordInput) -> Self {
        NewRecord {
            cpf: text(i.cpf),
            name: text(i.name),
            age: text(i.age),
            postal_code: text(i.postal_code),
            address: text(i.address),
        }
    }
}
