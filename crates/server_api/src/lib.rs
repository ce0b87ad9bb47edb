use std::sync::Arc;

use shared::{
    domain::{InternRecord, InternStatus, RegistrySummary},
    error::{ApiError, ErrorCode},
    protocol::RegistrationForm,
};
use storage::{Registry, RegistrationSink, StorageError};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ApiContext {
    pub registry: Registry,
    pub sink: Arc<dyn RegistrationSink>,
    registration_gate: Arc<Mutex<()>>,
}

/// One line of the onboarding table. Email is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingRow {
    pub name: String,
    pub department: String,
    pub status: InternStatus,
}

impl From<InternRecord> for OnboardingRow {
    fn from(record: InternRecord) -> Self {
        Self {
            name: record.name,
            department: record.department,
            status: record.status,
        }
    }
}

impl ApiContext {
    pub fn new(registry: Registry, sink: Arc<dyn RegistrationSink>) -> Self {
        Self {
            registry,
            sink,
            registration_gate: Arc::new(Mutex::new(())),
        }
    }
}

/// Validates the form, persists the row, then publishes the record to the
/// registry. A failed append leaves the registry unchanged.
pub async fn register_intern(
    ctx: &ApiContext,
    form: RegistrationForm,
) -> Result<InternRecord, ApiError> {
    let intern = form.validate().map_err(|e| {
        warn!(error = %e, "rejected registration");
        ApiError::from(e)
    })?;
    let pending = InternRecord::from(intern);

    let _gate = ctx.registration_gate.lock().await;
    // The append fsyncs; keep it off the async workers while the gate is held.
    let sink = Arc::clone(&ctx.sink);
    let row = pending.clone();
    tokio::task::spawn_blocking(move || sink.append(&row))
        .await
        .map_err(|e| {
            error!(error = %e, "registration append task failed");
            ApiError::new(ErrorCode::Internal, "registration append task failed")
        })?
        .map_err(storage_error)?;
    let record = ctx
        .registry
        .register(&pending.name, &pending.email, &pending.department);

    info!(
        name = %record.name,
        department = %record.department,
        total = ctx.registry.len(),
        "registered intern"
    );
    Ok(record)
}

pub fn dashboard_summary(ctx: &ApiContext) -> RegistrySummary {
    ctx.registry.summarize()
}

pub fn onboarding_rows(ctx: &ApiContext) -> Vec<OnboardingRow> {
    ctx.registry
        .list_all()
        .into_iter()
        .map(OnboardingRow::from)
        .collect()
}

fn storage_error(err: StorageError) -> ApiError {
    error!(error = %err, "failed to persist registration");
    let code = if err.is_not_found() {
        ErrorCode::StorageNotFound
    } else {
        ErrorCode::Internal
    };
    ApiError::new(code, err.to_string())
}
