use thiserror::Error;

/// Failure of the postal-code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The directory answered but does not know the code.
    #[error("postal code not found")]
    NotFound,
    /// Transport failure, non-2xx status or an unreadable body.
    #[error("address lookup failed: {0}")]
    Unavailable(String),
}

/// Failure talking to the record service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RequestError::Decode(e.to_string())
        } else {
            RequestError::Transport(e.to_string())
        }
    }
}

/// What the user is told. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid postal code!")]
    InvalidPostalCode,
    #[error("Postal code not found!")]
    PostalCodeNotFound,
    #[error("Failed to fetch the address!")]
    LookupFailed,
    #[error("Fill in all fields!")]
    MissingFields,
    #[error("A record with this CPF already exists!")]
    Duplicate,
    #[error("Failed to register the record!")]
    SubmitFailed,
    #[error("Could not load the records!")]
    LoadFailed,
}

impl FormError {
    pub fn title(&self) -> &'static str { "Error" }
}

impl From<RequestError> for FormError {
    /// Failed create. A 409 from the service is a duplicate CPF.
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::Status { status: 409, .. } => FormError::Duplicate,
            _ => FormError::SubmitFailed,
        }
    }
}

impl From<LookupError> for FormError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound => FormError::PostalCodeNotFound,
            LookupError::Unavailable(_) => FormError::LookupFailed,
        }
    }
}
