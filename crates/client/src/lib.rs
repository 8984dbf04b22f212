//! Form client for the record service.
//!
//! Holds the state of the registration form (five fields, the loaded list,
//! a loading flag) and performs the postal-code lookup and the two service
//! calls. Rendering is plain text; widgets and layout live elsewhere.

pub mod address;
pub mod api;
pub mod errors;
pub mod form;
pub mod view;

use configs::ClientConfig;

pub use address::{Address, AddressResolver, ViaCepResolver};
pub use api::{HttpRecordsClient, RecordsApi};
pub use errors::{FormError, LookupError, RequestError};
pub use form::{FormClient, FormFields, Submission};

/// Form client wired to the configured service and address directory.
pub fn from_config(cfg: &ClientConfig) -> FormClient<ViaCepResolver, HttpRecordsClient> {
    FormClient::new(
        ViaCepResolver::new(&cfg.address_lookup_url),
        HttpRecordsClient::new(&cfg.service_url),
    )
}
