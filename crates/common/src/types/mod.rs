use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A stored registration row as it travels over HTTP.
///
/// Field names are camelCase on the wire (`postalCode`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub cpf: String,
    pub name: String,
    pub age: String,
    pub postal_code: String,
    #[serde(default)]
    pub address: String,
}

/// Body of a `POST /records` request sent by the form client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordBody {
    pub cpf: String,
    pub name: String,
    pub age: String,
    pub postal_code: String,
    pub address: String,
}

/// `{ "message": ... }` acknowledgment returned by a successful create.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}

/// `{ "error": ... }` body returned by every failed request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
