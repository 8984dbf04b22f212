use tokio::sync::watch;
use tracing::{info, warn};

use common::types::{CreateRecordBody, RegistrationRecord};

use crate::address::AddressResolver;
use crate::api::RecordsApi;
use crate::errors::FormError;

/// Minimum postal-code length accepted before a lookup is attempted.
pub const MIN_POSTAL_CODE_LEN: usize = 8;

pub const MSG_REGISTERED: &str = "Record registered successfully!";

/// The five inputs of the form. `address` is filled by the lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub cpf: String,
    pub name: String,
    pub age: String,
    pub postal_code: String,
    pub address: String,
}

impl FormFields {
    /// All five present (blank counts as missing).
    pub fn is_complete(&self) -> bool {
        [&self.cpf, &self.name, &self.age, &self.postal_code, &self.address]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = FormFields::default();
    }

    fn to_body(&self) -> CreateRecordBody {
        CreateRecordBody {
            cpf: self.cpf.clone(),
            name: self.name.clone(),
            age: self.age.clone(),
            postal_code: self.postal_code.clone(),
            address: self.address.clone(),
        }
    }
}

/// Outcome of a successful submit: the record was stored and the fields
/// cleared; `reload` tells whether the refreshed list arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub reload: Result<(), FormError>,
}

/// Form state plus its collaborators.
///
/// Every operation borrows the client mutably, so a second reload or submit
/// cannot start while one is in flight. The loading flag lives in a watch
/// channel so a renderer can observe it during that borrow.
pub struct FormClient<A, R> {
    resolver: A,
    api: R,
    fields: FormFields,
    records: Vec<RegistrationRecord>,
    loading: watch::Sender<bool>,
}

impl<A: AddressResolver, R: RecordsApi> FormClient<A, R> {
    pub fn new(resolver: A, api: R) -> Self {
        let (loading, _) = watch::channel(false);
        Self { resolver, api, fields: FormFields::default(), records: Vec::new(), loading }
    }

    pub fn fields(&self) -> &FormFields { &self.fields }

    pub fn fields_mut(&mut self) -> &mut FormFields { &mut self.fields }

    pub fn records(&self) -> &[RegistrationRecord] { &self.records }

    pub fn is_loading(&self) -> bool { *self.loading.borrow() }

    /// Receiver that sees the loading flag flip while a reload is in flight.
    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Initial load, run once when the client starts.
    pub async fn start(&mut self) -> Result<(), FormError> {
        self.reload().await
    }

    /// Postal-code field lost focus: validate the length locally, then resolve
    /// and fill the address. On failure the address field is left as it was.
    pub async fn postal_code_blur(&mut self) -> Result<&str, FormError> {
        if self.fields.postal_code.chars().count() < MIN_POSTAL_CODE_LEN {
            return Err(FormError::InvalidPostalCode);
        }
        let address = self.resolver.lookup(&self.fields.postal_code).await.map_err(|e| {
            warn!(postal_code = %self.fields.postal_code, error = %e, "address lookup failed");
            FormError::from(e)
        })?;
        self.fields.address = address.to_string();
        Ok(&self.fields.address)
    }

    /// Send the form. Requires all five fields; on success clears them and
    /// reloads the full list.
    pub async fn submit(&mut self) -> Result<Submission, FormError> {
        if !self.fields.is_complete() {
            return Err(FormError::MissingFields);
        }
        if let Err(e) = self.api.create(&self.fields.to_body()).await {
            warn!(error = %e, "create request failed");
            return Err(FormError::from(e));
        }
        info!(cpf = %self.fields.cpf, "record submitted");
        self.fields.clear();
        Ok(Submission { reload: self.reload().await })
    }

    /// Fetch the whole set and replace the local list. The loading flag is
    /// cleared whether the call succeeds or fails; on failure the previous
    /// list stays.
    pub async fn reload(&mut self) -> Result<(), FormError> {
        self.loading.send_replace(true);
        let result = self.api.list().await;
        self.loading.send_replace(false);
        match result {
            Ok(rows) => {
                self.records = rows;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "list request failed");
                Err(FormError::LoadFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::errors::{LookupError, RequestError};
    use async_trait::async_trait;
    use common::types::Ack;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    struct FakeResolver {
        calls: AtomicUsize,
        answer: Result<Address, LookupError>,
    }

    impl FakeResolver {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer: Ok(Address {
                    street: "Praça da Sé".into(),
                    neighborhood: "Sé".into(),
                    city: "São Paulo".into(),
                    region: "SP".into(),
                }),
            }
        }

        fn failing(e: LookupError) -> Self {
            Self { calls: AtomicUsize::new(0), answer: Err(e) }
        }
    }

    #[async_trait]
    impl AddressResolver for FakeResolver {
        async fn lookup(&self, _postal_code: &str) -> Result<Address, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    /// Behaves like the record service: stores creates, lists them back.
    #[derive(Clone, Default)]
    struct FakeApi {
        rows: Arc<Mutex<Vec<RegistrationRecord>>>,
        creates: Arc<AtomicUsize>,
        fail_create: Arc<AtomicBool>,
        fail_list: Arc<AtomicBool>,
        // when set, the next list call waits for this before answering
        gate: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
    }

    #[async_trait]
    impl RecordsApi for FakeApi {
        async fn create(&self, b: &CreateRecordBody) -> Result<Ack, RequestError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(RequestError::Status { status: 500, message: "Failed to save the record!".into() });
            }
            if self.rows.lock().unwrap().iter().any(|r| r.cpf == b.cpf) {
                return Err(RequestError::Status {
                    status: 409,
                    message: "A record with this CPF already exists!".into(),
                });
            }
            self.rows.lock().unwrap().push(RegistrationRecord {
                cpf: b.cpf.clone(),
                name: b.name.clone(),
                age: b.age.clone(),
                postal_code: b.postal_code.clone(),
                address: b.address.clone(),
            });
            Ok(Ack { message: MSG_REGISTERED.into() })
        }

        async fn list(&self) -> Result<Vec<RegistrationRecord>, RequestError> {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(RequestError::Transport("connection refused".into()));
            }
            Ok(self.rows.lock().unwrap().clone())
        }
    }

    fn filled(client: &mut FormClient<FakeResolver, FakeApi>) {
        let f = client.fields_mut();
        f.cpf = "12345678900".into();
        f.name = "Ana".into();
        f.age = "30".into();
        f.postal_code = "01001000".into();
    }

    #[tokio::test]
    async fn short_postal_code_is_rejected_without_lookup() {
        let mut client = FormClient::new(FakeResolver::ok(), FakeApi::default());
        client.fields_mut().postal_code = "0100100".into();
        assert_eq!(client.postal_code_blur().await, Err(FormError::InvalidPostalCode));
        assert_eq!(client.resolver.calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.fields().address, "");
    }

    #[tokio::test]
    async fn blur_fills_formatted_address() {
        let mut client = FormClient::new(FakeResolver::ok(), FakeApi::default());
        client.fields_mut().postal_code = "01001000".into();
        let addr = client.postal_code_blur().await.unwrap().to_string();
        assert_eq!(addr, "Praça da Sé, Sé, São Paulo - SP");
        assert_eq!(client.fields().address, addr);
    }

    #[tokio::test]
    async fn unknown_postal_code_blocks_submit() {
        let api = FakeApi::default();
        let mut client = FormClient::new(FakeResolver::failing(LookupError::NotFound), api.clone());
        filled(&mut client);

        let err = client.postal_code_blur().await.unwrap_err();
        assert_eq!(err, FormError::PostalCodeNotFound);
        assert_eq!(err.to_string(), "Postal code not found!");
        assert_eq!(client.fields().address, "");

        assert_eq!(client.submit().await, Err(FormError::MissingFields));
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_outage_is_reported() {
        let mut client = FormClient::new(
            FakeResolver::failing(LookupError::Unavailable("timeout".into())),
            FakeApi::default(),
        );
        client.fields_mut().postal_code = "01001000".into();
        let err = client.postal_code_blur().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch the address!");
    }

    #[tokio::test]
    async fn any_empty_field_blocks_submit_without_a_call() {
        let api = FakeApi::default();
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());

        let blanks: [fn(&mut FormFields); 5] = [
            |f| f.cpf.clear(),
            |f| f.name.clear(),
            |f| f.age = " ".into(),
            |f| f.postal_code.clear(),
            |f| f.address.clear(),
        ];
        for blank in blanks {
            filled(&mut client);
            client.fields_mut().address = "Praça da Sé, Sé, São Paulo - SP".into();
            blank(client.fields_mut());
            assert_eq!(client.submit().await, Err(FormError::MissingFields));
        }
        assert_eq!(api.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_clears_fields_and_shows_new_record_after_reload() {
        let api = FakeApi::default();
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        client.start().await.unwrap();
        assert!(client.records().is_empty());

        filled(&mut client);
        client.postal_code_blur().await.unwrap();
        let submitted = client.submit().await.unwrap();

        assert_eq!(submitted.reload, Ok(()));
        assert_eq!(client.fields(), &FormFields::default());
        assert_eq!(client.records(), api.rows.lock().unwrap().as_slice());
        assert_eq!(client.records()[0].address, "Praça da Sé, Sé, São Paulo - SP");
        assert!(!client.is_loading());
    }

    #[tokio::test]
    async fn failed_create_keeps_fields() {
        let api = FakeApi::default();
        api.fail_create.store(true, Ordering::SeqCst);
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        filled(&mut client);
        client.postal_code_blur().await.unwrap();
        let before = client.fields().clone();

        let err = client.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to register the record!");
        assert_eq!(client.fields(), &before);
        assert!(client.records().is_empty());
    }

    #[tokio::test]
    async fn successful_create_with_failed_reload_is_still_a_submission() {
        let api = FakeApi::default();
        api.fail_list.store(true, Ordering::SeqCst);
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        filled(&mut client);
        client.postal_code_blur().await.unwrap();

        let submitted = client.submit().await.unwrap();
        assert_eq!(submitted.reload, Err(FormError::LoadFailed));
        assert_eq!(client.fields(), &FormFields::default());
        assert_eq!(api.rows.lock().unwrap().len(), 1);
        assert!(!client.is_loading());
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_list_and_clears_loading() {
        let api = FakeApi::default();
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        filled(&mut client);
        client.postal_code_blur().await.unwrap();
        client.submit().await.unwrap();
        assert_eq!(client.records().len(), 1);

        api.fail_list.store(true, Ordering::SeqCst);
        assert_eq!(client.reload().await, Err(FormError::LoadFailed));
        assert_eq!(client.records().len(), 1);
        assert!(!client.is_loading());
    }

    #[tokio::test]
    async fn duplicate_cpf_is_reported_and_fields_kept() {
        let api = FakeApi::default();
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        filled(&mut client);
        client.postal_code_blur().await.unwrap();
        client.submit().await.unwrap();

        filled(&mut client);
        client.postal_code_blur().await.unwrap();
        let before = client.fields().clone();
        let err = client.submit().await.unwrap_err();
        assert_eq!(err, FormError::Duplicate);
        assert_eq!(err.to_string(), "A record with this CPF already exists!");
        assert_eq!(client.fields(), &before);
        assert_eq!(api.rows.lock().unwrap().len(), 1);
    }

    async fn loading_seen_during_reload(api: FakeApi) -> Result<(), FormError> {
        let mut client = FormClient::new(FakeResolver::ok(), api.clone());
        let (release, gate) = oneshot::channel();
        *api.gate.lock().unwrap() = Some(gate);

        let mut loading = client.loading_watch();
        assert!(!*loading.borrow());
        let observer = async move {
            assert!(*loading.wait_for(|l| *l).await.unwrap());
            release.send(()).unwrap();
            loading
        };
        let (result, mut loading) = tokio::join!(client.reload(), observer);

        assert!(!client.is_loading());
        assert!(!*loading.borrow_and_update());
        result
    }

    #[tokio::test]
    async fn loading_flag_is_up_while_the_list_is_in_flight() {
        assert_eq!(loading_seen_during_reload(FakeApi::default()).await, Ok(()));
    }

    #[tokio::test]
    async fn loading_flag_is_up_while_a_failing_list_is_in_flight() {
        let api = FakeApi::default();
        api.fail_list.store(true, Ordering::SeqCst);
        assert_eq!(loading_seen_during_reload(api).await, Err(FormError::LoadFailed));
    }
}
