//! REGISTER processing pipeline
//!
//! One call per inbound REGISTER: extract, validate, persist the binding,
//! answer. Exactly one response is produced per request.
//!
//! ## Failure policy
//!
//! - Malformed or inconsistent requests get a 400 with a `Reason` header
//!   and never reach the store.
//! - A failed, slow or cancelled store call is reported to the diagnostics
//!   sink and otherwise ignored. The client still gets 200 OK.
//! - If no To-tag can be generated the request is answered with a 500.

mod context;
mod state;

pub use context::RegisterContext;
pub use state::PipelineState;

use std::sync::Arc;

use sipserve_sip_core::{Request, Response, StatusCode};
use tracing::debug;

use crate::config::RegistrarConfig;
use crate::diagnostics::{DiagnosticsSink, RegistrationEvent};
use crate::error::{RegistrarError, Result, StoreError, ValidationError};
use crate::extract;
use crate::response::ResponseBuilder;
use crate::storage::{BindingStore, BindingStoreAdapter};
use crate::tag::{TagGenerator, UuidTagGenerator};
use crate::transaction::ServerTransaction;
use crate::types::{Binding, RegistrationOutcome, RegistrationRequest};
use crate::validate;

/// Everything `process` produced for one request
#[derive(Debug, Clone)]
pub struct ProcessedRegistration {
    pub outcome: RegistrationOutcome,
    pub response: Response,
    /// States visited, in order
    pub trail: Vec<PipelineState>,
}

/// The registrar core.
///
/// Holds no per-request state and is shared freely across tasks; requests
/// for the same or different users may be processed concurrently.
pub struct RegistrationPipeline {
    store: BindingStoreAdapter,
    diagnostics: Arc<dyn DiagnosticsSink>,
    tags: Arc<dyn TagGenerator>,
    responses: ResponseBuilder,
    config: RegistrarConfig,
}

impl RegistrationPipeline {
    pub fn new(store: Arc<dyn BindingStore>, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        let config = RegistrarConfig::default();
        Self {
            store: BindingStoreAdapter::new(store).with_key_prefix(config.key_prefix.clone()),
            diagnostics,
            tags: Arc::new(UuidTagGenerator),
            responses: ResponseBuilder::new(),
            config,
        }
    }

    pub fn with_config(mut self, config: RegistrarConfig) -> Self {
        self.store = self.store.with_key_prefix(config.key_prefix.clone());
        self.responses = match &config.server_header {
            Some(server) => ResponseBuilder::new().with_server(server.clone()),
            None => ResponseBuilder::new(),
        };
        self.config = config;
        self
    }

    pub fn with_tag_generator(mut self, tags: Arc<dyn TagGenerator>) -> Self {
        self.tags = tags;
        self
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// The adapter bindings are written through
    pub fn bindings(&self) -> &BindingStoreAdapter {
        &self.store
    }

    /// Fresh context bounded by the configured store timeout
    pub fn context(&self) -> RegisterContext {
        RegisterContext::new(self.config.store_timeout())
    }

    /// Runs one REGISTER through the pipeline and builds its response
    pub async fn process(&self, request: &Request, ctx: &RegisterContext) -> ProcessedRegistration {
        let mut trail = vec![PipelineState::Received];
        self.diagnostics.record(RegistrationEvent::Received {
            call_id: request.call_id().map(|id| id.value().to_string()),
        });

        advance(&mut trail, PipelineState::Extracting);
        let via_branch = match extract::extract_branch(request) {
            Ok(branch) => branch,
            Err(err) => return self.reject(request, &err, trail),
        };

        advance(&mut trail, PipelineState::Validating);
        let registration = match validate::validate_register(
            request,
            via_branch,
            self.config.default_expires,
        ) {
            Ok(registration) => registration,
            Err(err) => return self.reject(request, &err, trail),
        };
        debug!(
            user = registration.username(),
            branch = %registration.via_branch,
            cseq = registration.cseq,
            "REGISTER validated"
        );

        advance(&mut trail, PipelineState::Persisting);
        let binding = match self.persist(&registration, ctx).await {
            Ok(binding) => binding,
            Err(err) => {
                self.diagnostics.record(RegistrationEvent::PersistenceFailed {
                    user: registration.username().to_string(),
                    error: err.to_string(),
                });
                Binding::new(
                    registration.username(),
                    registration.contact_host.clone(),
                    registration.contact_port,
                    registration.expires_seconds,
                )
            }
        };

        advance(&mut trail, PipelineState::Responding);
        let (outcome, response) = match self.tags.generate() {
            Ok(tag) => {
                self.diagnostics.record(RegistrationEvent::Accepted {
                    user: binding.user.clone(),
                    host: binding.host.clone(),
                    port: binding.port,
                    expires: registration.expires_seconds,
                });
                (
                    RegistrationOutcome::Accepted { binding },
                    self.responses.success(request, &tag),
                )
            }
            Err(err) => {
                self.diagnostics.record(RegistrationEvent::GenerationFailed {
                    error: err.to_string(),
                });
                let status = StatusCode::ServerInternalError;
                let diagnostic = "Failed to generate To tag".to_string();
                (
                    RegistrationOutcome::Rejected {
                        status,
                        reason_phrase: status.reason_phrase().to_string(),
                        diagnostic: diagnostic.clone(),
                    },
                    self.responses.server_error(request, &diagnostic),
                )
            }
        };

        advance(&mut trail, PipelineState::Done);
        ProcessedRegistration {
            outcome,
            response,
            trail,
        }
    }

    /// Processes `request` and answers it on `transaction`.
    ///
    /// The outcome is returned even though the response already went out;
    /// the only error is failing to hand the response over.
    pub async fn handle_register<T: ServerTransaction>(
        &self,
        request: &Request,
        transaction: T,
        ctx: &RegisterContext,
    ) -> Result<RegistrationOutcome> {
        let processed = self.process(request, ctx).await;

        if let Err(err) = transaction.respond(processed.response).await {
            self.diagnostics.record(RegistrationEvent::ResponseFailed {
                error: err.to_string(),
            });
            return Err(RegistrarError::Transaction(err));
        }
        Ok(processed.outcome)
    }

    fn reject(
        &self,
        request: &Request,
        err: &ValidationError,
        mut trail: Vec<PipelineState>,
    ) -> ProcessedRegistration {
        self.diagnostics.record(RegistrationEvent::Rejected {
            reason: err.reason_text().to_string(),
        });

        advance(&mut trail, PipelineState::Responding);
        let status = err.status_code();
        let response = self.responses.rejection(request, err);
        advance(&mut trail, PipelineState::Done);

        ProcessedRegistration {
            outcome: RegistrationOutcome::Rejected {
                status,
                reason_phrase: status.reason_phrase().to_string(),
                diagnostic: err.reason_text().to_string(),
            },
            response,
            trail,
        }
    }

    // The only suspension point. Bounded by the context's deadline and
    // cancellation; cancellation wins if both are ready.
    async fn persist(
        &self,
        registration: &RegistrationRequest,
        ctx: &RegisterContext,
    ) -> std::result::Result<Binding, StoreError> {
        let upsert = self.store.upsert_binding(
            registration.username(),
            &registration.contact_host,
            registration.contact_port,
            registration.expires_seconds,
        );

        tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => Err(StoreError::Cancelled),
            result = tokio::time::timeout(ctx.timeout(), upsert) => match result {
                Ok(stored) => stored,
                Err(_) => Err(StoreError::Timeout(ctx.timeout())),
            },
        }
    }
}

fn advance(trail: &mut Vec<PipelineState>, next: PipelineState) {
    if let Some(current) = trail.last() {
        debug!(from = %current, to = %next, "REGISTER state transition");
    }
    trail.push(next);
}

impl std::fmt::Debug for RegistrationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationPipeline")
            .field("store", &self.store)
            .field("responses", &self.responses)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
