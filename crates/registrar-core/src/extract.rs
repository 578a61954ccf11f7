//! Header extraction
//!
//! Each function pulls one required element out of a REGISTER request or
//! fails with a [`ValidationError`] that names the missing header or
//! parameter. None of them touch anything outside the request.

use sipserve_sip_core::{HeaderName, Request};
use tracing::trace;

use crate::error::ValidationError;

/// User parts of the three identity headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub from_user: String,
    pub to_user: String,
    pub contact_user: String,
}

/// Where the registrant can be reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAddress {
    pub host: String,
    pub port: u16,
}

/// Branch of the topmost Via hop, returned verbatim
pub fn extract_branch(request: &Request) -> Result<String, ValidationError> {
    let hop = request
        .via()
        .and_then(|via| via.first())
        .ok_or(ValidationError::MissingHeader(HeaderName::Via))?;

    hop.branch().map(str::to_string).ok_or_else(|| {
        trace!(via = %hop, "Via hop carries no branch");
        ValidationError::MissingParameter {
            header: HeaderName::Via,
            param: "branch",
        }
    })
}

/// User parts of From, To and Contact.
///
/// A header without a user part counts as missing; the first absent header
/// in From, To, Contact order is reported.
pub fn extract_identity(request: &Request) -> Result<Identity, ValidationError> {
    let from_user = request
        .from()
        .and_then(|from| from.username())
        .ok_or(ValidationError::MissingHeader(HeaderName::From))?;
    let to_user = request
        .to()
        .and_then(|to| to.username())
        .ok_or(ValidationError::MissingHeader(HeaderName::To))?;
    let contact_user = request
        .contact()
        .and_then(|contact| contact.username())
        .ok_or(ValidationError::MissingHeader(HeaderName::Contact))?;

    Ok(Identity {
        from_user: from_user.to_string(),
        to_user: to_user.to_string(),
        contact_user: contact_user.to_string(),
    })
}

/// Host and port of the Contact URI.
///
/// Only `sip:`/`sips:` contacts are reachable; a missing port falls back to
/// the scheme default (5060 or 5061).
pub fn extract_contact_address(request: &Request) -> Result<ContactAddress, ValidationError> {
    let uri = request
        .contact()
        .and_then(|contact| contact.address())
        .map(|address| address.uri())
        .ok_or(ValidationError::InvalidContact)?;

    if !uri.scheme.is_sip() || uri.host.is_empty() {
        trace!(contact = %uri, "Contact URI is not a reachable SIP address");
        return Err(ValidationError::InvalidContact);
    }
    let port = uri.effective_port().ok_or(ValidationError::InvalidContact)?;

    Ok(ContactAddress {
        host: uri.host.clone(),
        port,
    })
}

pub fn extract_cseq(request: &Request) -> Result<u32, ValidationError> {
    request
        .cseq()
        .map(|cseq| cseq.seq)
        .ok_or(ValidationError::MissingHeader(HeaderName::CSeq))
}

/// Call-ID value; an empty value counts as missing
pub fn extract_call_id(request: &Request) -> Result<String, ValidationError> {
    request
        .call_id()
        .map(|call_id| call_id.value().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingHeader(HeaderName::CallId))
}

pub fn extract_from_tag(request: &Request) -> Result<String, ValidationError> {
    let from = request
        .from()
        .ok_or(ValidationError::MissingHeader(HeaderName::From))?;
    from.tag()
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingParameter {
            header: HeaderName::From,
            param: "tag",
        })
}

/// Requested binding lifetime. Never fails.
///
/// Looks at the Expires header, then the Contact `expires` parameter, then
/// falls back to `default_expires`.
pub fn extract_expires(request: &Request, default_expires: u32) -> u32 {
    request
        .expires()
        .map(|expires| expires.seconds())
        .or_else(|| request.contact().and_then(|contact| contact.expires()))
        .unwrap_or(default_expires)
}
