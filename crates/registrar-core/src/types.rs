//! Core types for registration processing

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sipserve_sip_core::StatusCode;

/// Binding lifetime used when a REGISTER names none
pub const DEFAULT_EXPIRES: u32 = 3600;

/// Everything the registrar needs from one REGISTER, extracted and checked.
///
/// Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Topmost Via branch, as sent
    pub via_branch: String,
    pub from_user: String,
    pub to_user: String,
    pub contact_user: String,
    pub contact_host: String,
    pub contact_port: u16,
    pub call_id: String,
    pub from_tag: String,
    pub cseq: u32,
    pub expires_seconds: u32,
    pub body: Bytes,
}

impl RegistrationRequest {
    /// The validated username (From, To and Contact agree on it)
    pub fn username(&self) -> &str {
        &self.from_user
    }
}

/// A persisted user -> reachable address association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub user: String,
    pub host: String,
    pub port: u16,
    pub expires_at: DateTime<Utc>,
}

impl Binding {
    /// Binding expiring `ttl_seconds` from now
    pub fn new(user: impl Into<String>, host: impl Into<String>, port: u16, ttl_seconds: u32) -> Self {
        Self::expiring_in(user, host, port, Duration::from_secs(u64::from(ttl_seconds)))
    }

    pub fn expiring_in(
        user: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        ttl: Duration,
    ) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365));
        Binding {
            user: user.into(),
            host: host.into(),
            port,
            expires_at: Utc::now() + ttl,
        }
    }

    /// Time left before the binding lapses; zero once expired
    pub fn remaining(&self) -> Duration {
        (self.expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Result of processing one REGISTER
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// 200 OK was produced. The binding is the one written, or the one that
    /// was meant to be written if persistence failed.
    Accepted { binding: Binding },

    /// An error response was produced
    Rejected {
        status: StatusCode,
        reason_phrase: String,
        /// Text of the Reason header
        diagnostic: String,
    },
}

impl RegistrationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RegistrationOutcome::Accepted { .. })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RegistrationOutcome::Accepted { .. } => StatusCode::Ok,
            RegistrationOutcome::Rejected { status, .. } => *status,
        }
    }

    pub fn binding(&self) -> Option<&Binding> {
        match self {
            RegistrationOutcome::Accepted { binding } => Some(binding),
            RegistrationOutcome::Rejected { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            RegistrationOutcome::Accepted { .. } => None,
            RegistrationOutcome::Rejected { diagnostic, .. } => Some(diagnostic),
        }
    }
}

/// Opaque To-tag generated for one response. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToTag(String);

impl ToTag {
    pub fn new(value: impl Into<String>) -> Self {
        ToTag(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
