//! Registration validation
//!
//! Runs the extractors in a fixed order and assembles a
//! [`RegistrationRequest`]. The first failure wins; later headers are not
//! looked at. The Via branch is pulled out earlier, by the pipeline's
//! extraction step, and handed in.

use sipserve_sip_core::{HeaderName, Request};
use tracing::debug;

use crate::error::ValidationError;
use crate::extract::{self, Identity};
use crate::types::RegistrationRequest;

impl Identity {
    /// The shared username when From, To and Contact agree.
    ///
    /// Comparison is exact. On disagreement every differing pair is
    /// reported, in (From, To), (To, Contact), (From, Contact) order.
    pub fn consistent_username(&self) -> Result<&str, ValidationError> {
        let pairs = [
            (HeaderName::From, &self.from_user, HeaderName::To, &self.to_user),
            (HeaderName::To, &self.to_user, HeaderName::Contact, &self.contact_user),
            (HeaderName::From, &self.from_user, HeaderName::Contact, &self.contact_user),
        ];

        let disagreeing: Vec<(HeaderName, HeaderName)> = pairs
            .into_iter()
            .filter(|(_, left, _, right)| left != right)
            .map(|(left, _, right, _)| (left, right))
            .collect();

        if disagreeing.is_empty() {
            Ok(&self.from_user)
        } else {
            Err(ValidationError::IdentityMismatch { disagreeing })
        }
    }
}

/// Username shared by From, To and Contact
pub fn validate_identity_consistency(request: &Request) -> Result<String, ValidationError> {
    let identity = extract::extract_identity(request)?;
    identity.consistent_username().map(str::to_string)
}

/// Extracts and checks everything else needed to register.
///
/// `via_branch` comes from [`extract::extract_branch`]. Order: identity
/// (From, To, Contact, then agreement), Contact address, CSeq, Call-ID,
/// From tag. Expiry never fails and comes last.
pub fn validate_register(
    request: &Request,
    via_branch: String,
    default_expires: u32,
) -> Result<RegistrationRequest, ValidationError> {
    let identity = extract::extract_identity(request)?;
    if let Err(err) = identity.consistent_username() {
        debug!(
            from = %identity.from_user,
            to = %identity.to_user,
            contact = %identity.contact_user,
            "REGISTER identity mismatch"
        );
        return Err(err);
    }

    let contact = extract::extract_contact_address(request)?;
    let cseq = extract::extract_cseq(request)?;
    let call_id = extract::extract_call_id(request)?;
    let from_tag = extract::extract_from_tag(request)?;
    let expires_seconds = extract::extract_expires(request, default_expires);

    let Identity {
        from_user,
        to_user,
        contact_user,
    } = identity;

    Ok(RegistrationRequest {
        via_branch,
        from_user,
        to_user,
        contact_user,
        contact_host: contact.host,
        contact_port: contact.port,
        call_id,
        from_tag,
        cseq,
        expires_seconds,
        body: request.body().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use sipserve_sip_core::{
        Address, CSeq, CallId, Contact, From, Method, Param, To, TypedHeader, Uri, Via, ViaHeader,
    };

    fn identity(from: &str, to: &str, contact: &str) -> Identity {
        Identity {
            from_user: from.to_string(),
            to_user: to.to_string(),
            contact_user: contact.to_string(),
        }
    }

    fn register(from: &str, to: &str, contact: &str) -> Request {
        let user_addr = |user: &str, host: &str| Address::new(Uri::sip(host).with_user(user));
        Request::new(Method::Register, Uri::sip("example.com"))
            .with_header(TypedHeader::Via(Via::new(
                ViaHeader::new("UDP", "10.0.0.5", Some(5060)).with_param(Param::branch("z9hG4bK1")),
            )))
            .with_header(TypedHeader::From(
                From::new(user_addr(from, "example.com")).with_tag("ft"),
            ))
            .with_header(TypedHeader::To(To::new(user_addr(to, "example.com"))))
            .with_header(TypedHeader::Contact(Contact::new(Address::new(
                Uri::sip("10.0.0.5").with_user(contact).with_port(5070),
            ))))
            .with_header(TypedHeader::CallId(CallId::new("call-1")))
            .with_header(TypedHeader::CSeq(CSeq::new(7, Method::Register)))
    }

    #[test]
    fn test_single_disagreeing_header_reports_two_pairs() {
        let err = identity("alice", "alice", "bob").consistent_username().unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdentityMismatch {
                disagreeing: vec![
                    (HeaderName::To, HeaderName::Contact),
                    (HeaderName::From, HeaderName::Contact),
                ]
            }
        );

        let err = identity("alice", "bob", "alice").consistent_username().unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdentityMismatch {
                disagreeing: vec![
                    (HeaderName::From, HeaderName::To),
                    (HeaderName::To, HeaderName::Contact),
                ]
            }
        );
    }

    #[test]
    fn test_all_different_reports_every_pair() {
        let err = identity("a", "b", "c").consistent_username().unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdentityMismatch {
                disagreeing: vec![
                    (HeaderName::From, HeaderName::To),
                    (HeaderName::To, HeaderName::Contact),
                    (HeaderName::From, HeaderName::Contact),
                ]
            }
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert!(identity("alice", "Alice", "alice").consistent_username().is_err());
    }

    #[test]
    fn test_validate_register_collects_every_field() {
        let request = register("alice", "alice", "alice");
        let branch = extract::extract_branch(&request).unwrap();
        let validated = validate_register(&request, branch, 3600).unwrap();

        assert_eq!(validated.via_branch, "z9hG4bK1");
        assert_eq!(validated.username(), "alice");
        assert_eq!(validated.contact_host, "10.0.0.5");
        assert_eq!(validated.contact_port, 5070);
        assert_eq!(validated.call_id, "call-1");
        assert_eq!(validated.from_tag, "ft");
        assert_eq!(validated.cseq, 7);
        assert_eq!(validated.expires_seconds, 3600);
    }

    #[test]
    fn test_branch_is_taken_from_caller_not_request() {
        let mut request = register("alice", "alice", "alice");
        request.headers.retain(|h| !matches!(h, TypedHeader::Via(_)));

        let validated = validate_register(&request, "z9hG4bK-given".to_string(), 60).unwrap();
        assert_eq!(validated.via_branch, "z9hG4bK-given");
        assert_eq!(validated.expires_seconds, 60);
    }

    #[test]
    fn test_identity_checked_before_contact_address() {
        let request = register("alice", "bob", "alice");
        assert!(matches!(
            validate_register(&request, "z9hG4bK1".to_string(), 3600),
            Err(ValidationError::IdentityMismatch { .. })
        ));
        assert_eq!(
            validate_identity_consistency(&register("carol", "carol", "carol")).unwrap(),
            "carol"
        );
    }

    proptest! {
        #[test]
        fn prop_mismatch_reported_iff_users_differ(
            from in "[a-c]{1,2}",
            to in "[a-c]{1,2}",
            contact in "[a-c]{1,2}",
        ) {
            let id = identity(&from, &to, &contact);
            match id.consistent_username() {
                Ok(user) => {
                    prop_assert!(from == to && to == contact);
                    prop_assert_eq!(user, from.as_str());
                }
                Err(ValidationError::IdentityMismatch { disagreeing }) => {
                    let expected = usize::from(from != to)
                        + usize::from(to != contact)
                        + usize::from(from != contact);
                    prop_assert_eq!(disagreeing.len(), expected);
                    // exactly one differing pair cannot happen with three values
                    prop_assert!(expected >= 2);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
