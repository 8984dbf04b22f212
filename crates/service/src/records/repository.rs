use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use common::types::RegistrationRecord;

use super::domain::NewRecord;
use crate::errors::ServiceError;

/// Repository abstraction for registration persistence.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn insert(&self, record: &NewRecord) -> Result<RegistrationRecord, ServiceError>;
    async fn list(&self) -> Result<Vec<RegistrationRecord>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmRecordRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl RecordRepository for SeaOrmRecordRepository {
    async fn insert(&self, r: &NewRecord) -> Result<RegistrationRecord, ServiceError> {
        let m = models::registration::create(&self.db, &r.cpf, &r.name, &r.age, &r.postal_code, &r.address).await?;
        Ok(m.into())
    }

    async fn list(&self) -> Result<Vec<RegistrationRecord>, ServiceError> {
        let rows = models::registration::list_all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Keeps insertion order and rejects a duplicate cpf like the real table does.
    #[derive(Default)]
    pub struct MockRecordRepository {
        rows: Mutex<Vec<RegistrationRecord>>,
    }

    impl MockRecordRepository {
        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl RecordRepository for MockRecordRepository {
        async fn insert(&self, r: &NewRecord) -> Result<RegistrationRecord, ServiceError> {
            let mut rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            if rows.iter().any(|x| x.cpf == r.cpf) {
                return Err(ServiceError::Conflict(format!("cpf {} already stored", r.cpf)));
            }
            let rec = RegistrationRecord {
                cpf: r.cpf.clone(),
                name: r.name.clone(),
                age: r.age.clone(),
                postal_code: r.postal_code.clone(),
                address: r.address.clone(),
            };
            rows.push(rec.clone());
            Ok(rec)
        }

        async fn list(&self) -> Result<Vec<RegistrationRecord>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.clone())
        }
    }
}
