//! Message model types

pub mod address;
pub mod call_id;
pub mod contact;
pub mod cseq;
pub mod expires;
pub mod from;
pub mod headers;
pub mod method;
pub mod param;
pub mod reason;
pub mod sip_request;
pub mod sip_response;
pub mod status;
pub mod to;
pub mod uri;
pub mod version;
pub mod via;

pub use address::Address;
pub use call_id::CallId;
pub use contact::Contact;
pub use cseq::CSeq;
pub use expires::Expires;
pub use from::From;
pub use headers::{HeaderName, TypedHeader};
pub use method::Method;
pub use param::Param;
pub use reason::Reason;
pub use sip_request::Request;
pub use sip_response::Response;
pub use status::StatusCode;
pub use to::To;
pub use uri::{Scheme, Uri};
pub use version::Version;
pub use via::{Via, ViaHeader};
