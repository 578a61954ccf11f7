#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sipserve_registrar_core::storage::StoreResult;
use sipserve_registrar_core::{
    BindingStore, MemoryBindingStore, MemoryDiagnostics, RegistrarError, RegistrationPipeline,
    StoreError, TagGenerator, ToTag,
};
use sipserve_sip_core::{
    Address, CSeq, CallId, Contact, Expires, From, Method, Param, Request, To, TypedHeader, Uri,
    Via, ViaHeader,
};

/// Builder for REGISTER requests with every header the registrar needs
#[derive(Debug, Clone)]
pub struct RegisterBuilder {
    pub branch: Option<String>,
    pub via: bool,
    pub from_user: Option<String>,
    pub to_user: Option<String>,
    pub contact: Option<String>,
    pub to_tag: Option<String>,
    pub call_id: Option<String>,
    pub from_tag: Option<String>,
    pub cseq: Option<u32>,
    pub expires: Option<u32>,
}

impl RegisterBuilder {
    pub fn new(user: &str) -> Self {
        Self {
            branch: Some("z9hG4bK776asdhds".to_string()),
            via: true,
            from_user: Some(user.to_string()),
            to_user: Some(user.to_string()),
            contact: Some(format!("<sip:{}@10.0.0.5:5061>", user)),
            to_tag: None,
            call_id: Some(format!("{}-call@10.0.0.5", user)),
            from_tag: Some("1928301774".to_string()),
            cseq: Some(1),
            expires: None,
        }
    }

    pub fn users(mut self, from: &str, to: &str, contact: &str) -> Self {
        self.from_user = Some(from.to_string());
        self.to_user = Some(to.to_string());
        self.contact = Some(format!("<sip:{}@10.0.0.5:5061>", contact));
        self
    }

    pub fn contact(mut self, contact: &str) -> Self {
        self.contact = Some(contact.to_string());
        self
    }

    pub fn without_via(mut self) -> Self {
        self.via = false;
        self
    }

    pub fn without_branch(mut self) -> Self {
        self.branch = None;
        self
    }

    pub fn without_contact(mut self) -> Self {
        self.contact = None;
        self
    }

    pub fn without_call_id(mut self) -> Self {
        self.call_id = None;
        self
    }

    pub fn without_cseq(mut self) -> Self {
        self.cseq = None;
        self
    }

    pub fn without_from_tag(mut self) -> Self {
        self.from_tag = None;
        self
    }

    pub fn to_tag(mut self, tag: &str) -> Self {
        self.to_tag = Some(tag.to_string());
        self
    }

    pub fn expires(mut self, seconds: u32) -> Self {
        self.expires = Some(seconds);
        self
    }

    pub fn build(self) -> Request {
        let mut request = Request::new(Method::Register, Uri::sip("example.com"));

        if self.via {
            let mut hop = ViaHeader::new("UDP", "10.0.0.5", Some(5061));
            if let Some(branch) = &self.branch {
                hop = hop.with_param(Param::branch(branch.clone()));
            }
            request = request.with_header(TypedHeader::Via(Via::new(hop)));
        }
        if let Some(user) = &self.from_user {
            let mut from = From::new(Address::new(Uri::sip("example.com").with_user(user.clone())));
            if let Some(tag) = &self.from_tag {
                from = from.with_tag(tag.clone());
            }
            request = request.with_header(TypedHeader::From(from));
        }
        if let Some(user) = &self.to_user {
            let mut to = To::new(Address::new(Uri::sip("example.com").with_user(user.clone())));
            if let Some(tag) = &self.to_tag {
                to = to.with_tag(tag.clone());
            }
            request = request.with_header(TypedHeader::To(to));
        }
        if let Some(contact) = &self.contact {
            let contact: Contact = contact.parse().expect("test contact parses");
            request = request.with_header(TypedHeader::Contact(contact));
        }
        if let Some(call_id) = &self.call_id {
            request = request.with_header(TypedHeader::CallId(CallId::new(call_id.clone())));
        }
        if let Some(seq) = self.cseq {
            request = request.with_header(TypedHeader::CSeq(CSeq::new(seq, Method::Register)));
        }
        if let Some(expires) = self.expires {
            request = request.with_header(TypedHeader::Expires(Expires::new(expires)));
        }
        request
    }
}

/// Memory store that counts every call made to it
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryBindingStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BindingStore for CountingStore {
    async fn write_fields(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        self.hit();
        self.inner.write_fields(key, fields).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.hit();
        self.inner.exists(key).await
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        self.hit();
        self.inner.set_expiry(key, ttl).await
    }

    async fn read_fields(&self, key: &str) -> StoreResult<Option<HashMap<String, String>>> {
        self.hit();
        self.inner.read_fields(key).await
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        self.hit();
        self.inner.time_to_live(key).await
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        self.hit();
        self.inner.remove(key).await
    }
}

/// Store whose every call fails
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl BindingStore for FailingStore {
    async fn write_fields(&self, _key: &str, _fields: Vec<(String, String)>) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn exists(&self, _key: &str) -> StoreResult<bool> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn set_expiry(&self, _key: &str, _ttl: Duration) -> StoreResult<bool> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn read_fields(&self, _key: &str) -> StoreResult<Option<HashMap<String, String>>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn time_to_live(&self, _key: &str) -> StoreResult<Option<Duration>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn remove(&self, _key: &str) -> StoreResult<bool> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// How a [`StepStore`] behaves once the write has gone through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterWrite {
    ExistsFails,
    ExpiryFails,
    KeyVanishes,
}

/// Memory store whose writes succeed but whose later steps misbehave
#[derive(Debug)]
pub struct StepStore {
    pub inner: MemoryBindingStore,
    after_write: AfterWrite,
    expiry_calls: AtomicUsize,
}

impl StepStore {
    pub fn new(after_write: AfterWrite) -> Self {
        Self {
            inner: MemoryBindingStore::new(),
            after_write,
            expiry_calls: AtomicUsize::new(0),
        }
    }

    pub fn expiry_calls(&self) -> usize {
        self.expiry_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BindingStore for StepStore {
    async fn write_fields(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        self.inner.write_fields(key, fields).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        match self.after_write {
            AfterWrite::ExistsFails => Err(StoreError::Backend("EXISTS failed".to_string())),
            AfterWrite::KeyVanishes => Ok(false),
            AfterWrite::ExpiryFails => self.inner.exists(key).await,
        }
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        self.expiry_calls.fetch_add(1, Ordering::SeqCst);
        match self.after_write {
            AfterWrite::ExpiryFails => Err(StoreError::Backend("EXPIRE failed".to_string())),
            _ => self.inner.set_expiry(key, ttl).await,
        }
    }

    async fn read_fields(&self, key: &str) -> StoreResult<Option<HashMap<String, String>>> {
        self.inner.read_fields(key).await
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        self.inner.time_to_live(key).await
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        self.inner.remove(key).await
    }
}

/// Memory store that sleeps before writing
#[derive(Debug)]
pub struct SlowStore {
    pub inner: MemoryBindingStore,
    pub delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryBindingStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl BindingStore for SlowStore {
    async fn write_fields(&self, key: &str, fields: Vec<(String, String)>) -> StoreResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.write_fields(key, fields).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.inner.exists(key).await
    }

    async fn set_expiry(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        self.inner.set_expiry(key, ttl).await
    }

    async fn read_fields(&self, key: &str) -> StoreResult<Option<HashMap<String, String>>> {
        self.inner.read_fields(key).await
    }

    async fn time_to_live(&self, key: &str) -> StoreResult<Option<Duration>> {
        self.inner.time_to_live(key).await
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        self.inner.remove(key).await
    }
}

/// Tag generator with no entropy
#[derive(Debug, Default)]
pub struct FailingTagGenerator;

impl TagGenerator for FailingTagGenerator {
    fn generate(&self) -> sipserve_registrar_core::Result<ToTag> {
        Err(RegistrarError::TagGeneration("entropy source unavailable".to_string()))
    }
}

pub fn pipeline_with<S: BindingStore + 'static>(
    store: Arc<S>,
) -> (RegistrationPipeline, Arc<MemoryDiagnostics>) {
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let pipeline = RegistrationPipeline::new(store, diagnostics.clone());
    (pipeline, diagnostics)
}
