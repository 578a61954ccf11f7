//! Header names and typed header values

pub mod header_name;
pub mod typed_header;

pub use header_name::HeaderName;
pub use typed_header::TypedHeader;
