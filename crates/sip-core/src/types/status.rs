//! # SIP Status Codes
//!
//! The subset of RFC 3261 response codes a registrar emits or is likely to
//! see, plus [`StatusCode::Custom`] for anything else in 100-699.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! assert_eq!(StatusCode::Ok.to_string(), "200 OK");
//! assert!(StatusCode::BadRequest.is_client_error());
//! assert_eq!(StatusCode::from_u16(500).unwrap(), StatusCode::ServerInternalError);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// 100 Trying
    Trying,
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 423 Interval Too Brief
    IntervalTooBrief,
    /// 500 Server Internal Error
    ServerInternalError,
    /// 503 Service Unavailable
    ServiceUnavailable,
    /// 504 Server Time-out
    ServerTimeout,
    /// Any other code in 100-699
    Custom(u16),
}

impl StatusCode {
    /// Maps a numeric code to a variant; codes outside 100-699 are rejected
    pub fn from_u16(code: u16) -> Result<Self> {
        Ok(match code {
            100 => StatusCode::Trying,
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            401 => StatusCode::Unauthorized,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            423 => StatusCode::IntervalTooBrief,
            500 => StatusCode::ServerInternalError,
            503 => StatusCode::ServiceUnavailable,
            504 => StatusCode::ServerTimeout,
            100..=699 => StatusCode::Custom(code),
            _ => return Err(Error::InvalidStatusCode(code)),
        })
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Trying => 100,
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::IntervalTooBrief => 423,
            StatusCode::ServerInternalError => 500,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::ServerTimeout => 504,
            StatusCode::Custom(code) => *code,
        }
    }

    /// Default reason phrase
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Trying => "Trying",
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::IntervalTooBrief => "Interval Too Brief",
            StatusCode::ServerInternalError => "Server Internal Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::ServerTimeout => "Server Time-out",
            StatusCode::Custom(_) => "Unknown",
        }
    }

    pub fn is_provisional(&self) -> bool {
        (100..200).contains(&self.as_u16())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.as_u16())
    }

    /// Any 4xx, 5xx or 6xx
    pub fn is_error(&self) -> bool {
        self.as_u16() >= 400
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
