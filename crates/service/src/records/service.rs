use std::sync::Arc;

use tracing::{info, instrument};

use common::types::RegistrationRecord;
use models::registration::validate_required;

use super::domain::NewRecord;
use super::repository::RecordRepository;
use crate::errors::ServiceError;

/// Registration business service independent of web framework.
///
/// `R` may be unsized so the server can hold a `RecordService<dyn RecordRepository>`.
pub struct RecordService<R: RecordRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: RecordRepository + ?Sized> RecordService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Store a record after the presence checks on cpf, name, age and postal code.
    /// The address may be empty.
    ///
    /// # Examples
    /// ```
    /// use service::records::{RecordService, domain::NewRecord, repository::mock::MockRecordRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockRecordRepository::default());
    /// let svc = RecordService::new(repo.clone());
    /// let rec = NewRecord { cpf: "123".into(), name: "Ana".into(), age: "30".into(), postal_code: "01001000".into(), address: String::new() };
    /// let stored = tokio_test::block_on(svc.create(rec)).unwrap();
    /// assert_eq!(stored.cpf, "123");
    /// assert_eq!(repo.len(), 1);
    /// ```
    #[instrument(skip(self, record), fields(cpf = %record.cpf))]
    pub async fn create(&self, record: NewRecord) -> Result<RegistrationRecord, ServiceError> {
        validate_required("cpf", &record.cpf)?;
        validate_required("name", &record.name)?;
        validate_required("age", &record.age)?;
        validate_required("postalCode", &record.postal_code)?;

        let stored = self.repo.insert(&record).await?;
        info!(cpf = %stored.cpf, "record_registered");
        Ok(stored)
    }

    /// Every stored record, unfiltered and in storage order.
    pub async fn list(&self) -> Result<Vec<RegistrationRecord>, ServiceError> {
        self.repo.list().await
    }
}
