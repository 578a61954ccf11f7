//! Response construction
//!
//! Every response starts from [`Response::from_request`], which copies Via,
//! From, To, Call-ID and CSeq. Extra headers then *replace* any header of
//! the same name, so a response never carries two To or Reason headers.

use bytes::Bytes;
use sipserve_sip_core::{Reason, Request, Response, StatusCode, To, TypedHeader};

use crate::error::ValidationError;
use crate::types::ToTag;

/// Builds registrar responses
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    server: Option<String>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `Server: {value}` to every response built
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Response to `request` with `headers` replacing same-named ones.
    ///
    /// An empty `reason` uses the status code's default phrase.
    pub fn build(
        &self,
        request: &Request,
        status: StatusCode,
        reason: &str,
        body: impl Into<Bytes>,
        headers: Vec<TypedHeader>,
    ) -> Response {
        let mut response = Response::from_request(request, status, reason, body);
        for header in headers {
            response.replace_header(header);
        }
        if let Some(server) = &self.server {
            response.replace_header(TypedHeader::Server(server.clone()));
        }
        response
    }

    /// 400 carrying the validation failure as a `Reason` header
    pub fn rejection(&self, request: &Request, error: &ValidationError) -> Response {
        self.build(
            request,
            error.status_code(),
            "",
            Bytes::new(),
            vec![TypedHeader::Reason(Reason::new(error.reason_text()))],
        )
    }

    /// 200 OK echoing the request's Contact and carrying a fresh To-tag.
    ///
    /// The To address is the request's, with any tag it had replaced.
    pub fn success(&self, request: &Request, tag: &ToTag) -> Response {
        let mut headers = Vec::with_capacity(2);
        if let Some(contact) = request.contact() {
            headers.push(TypedHeader::Contact(contact.clone()));
        }
        if let Some(to) = request.to() {
            headers.push(TypedHeader::To(To::new(to.address().clone()).with_tag(tag.as_str())));
        }
        self.build(request, StatusCode::Ok, "", Bytes::new(), headers)
    }

    /// 500 for a request the registrar could not finish answering
    pub fn server_error(&self, request: &Request, detail: &str) -> Response {
        self.build(
            request,
            StatusCode::ServerInternalError,
            "",
            Bytes::new(),
            vec![TypedHeader::Reason(Reason::new(detail))],
        )
    }
}
