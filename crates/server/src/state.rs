use std::sync::Arc;

use service::records::{repository::RecordRepository, RecordService};

/// Shared handler state: the record service over whichever repository the
/// process was started with.
#[derive(Clone)]
pub struct ServerState {
    pub records: Arc<RecordService<dyn RecordRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { records: Arc::new(RecordService::new(repo)) }
    }
}
