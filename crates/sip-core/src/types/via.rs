//! # SIP Via Header
//!
//! A Via header lists the hops a request traversed. The topmost hop's
//! `branch` parameter identifies the transaction (RFC 3261 section 8.1.1.7).
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let hop: ViaHeader = "SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds"
//!     .parse()
//!     .unwrap();
//! assert_eq!(hop.transport, "UDP");
//! assert_eq!(Via::new(hop).branch(), Some("z9hG4bK776asdhds"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{parse_complete, via_parm};
use crate::types::param::{find_param, write_params, Param};

/// One hop of a Via header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaHeader {
    /// Transport token (UDP, TCP, TLS, ...)
    pub transport: String,
    pub host: String,
    pub port: Option<u16>,
    pub params: Vec<Param>,
}

impl ViaHeader {
    pub fn new(transport: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        ViaHeader {
            transport: transport.into(),
            host: host.into(),
            port,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        find_param(&self.params, name)
    }

    /// Raw `branch` token; `None` when the parameter is absent or valueless
    pub fn branch(&self) -> Option<&str> {
        self.param("branch").and_then(Param::value)
    }
}

impl fmt::Display for ViaHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/2.0/{} {}", self.transport, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        write_params(f, &self.params)
    }
}

impl FromStr for ViaHeader {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_complete(s, via_parm).ok_or_else(|| Error::InvalidVia(s.to_string()))
    }
}

/// A Via header: one or more hops, topmost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via(pub Vec<ViaHeader>);

impl Via {
    pub fn new(hop: ViaHeader) -> Self {
        Via(vec![hop])
    }

    pub fn hops(&self) -> &[ViaHeader] {
        &self.0
    }

    /// Topmost hop
    pub fn first(&self) -> Option<&ViaHeader> {
        self.0.first()
    }

    /// Branch of the topmost hop
    pub fn branch(&self) -> Option<&str> {
        self.first().and_then(ViaHeader::branch)
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hop) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", hop)?;
        }
        Ok(())
    }
}
