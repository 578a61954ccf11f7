//! # SIP Parameters
//!
//! Generic `name[=value]` parameters attached to URIs and header values,
//! e.g. `;branch=z9hG4bK776asdhds`, `;tag=1928301774`, `;expires=60` or the
//! flag parameter `;lr`.
//!
//! ```rust
//! use sipserve_sip_core::prelude::*;
//!
//! let tag = Param::tag("1928301774");
//! assert_eq!(tag.to_string(), "tag=1928301774");
//!
//! let lr: Param = "lr".parse().unwrap();
//! assert!(lr.is_flag());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{generic_param, parse_complete};

/// A single `name[=value]` parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    name: String,
    value: Option<String>,
}

impl Param {
    /// Creates a parameter with an optional value
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Param {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    /// Creates a flag parameter (no value)
    pub fn flag(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            value: None,
        }
    }

    /// `tag=<value>`, used on From/To headers
    pub fn tag(tag: impl Into<String>) -> Self {
        Param::new("tag", Some(tag))
    }

    /// `branch=<value>`, used on Via hops
    pub fn branch(branch: impl Into<String>) -> Self {
        Param::new("branch", Some(branch))
    }

    /// `expires=<seconds>`, used on Contact headers
    pub fn expires(seconds: u32) -> Self {
        Param::new("expires", Some(seconds.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// Parameter names compare case-insensitively
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for Param {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_complete(s, generic_param).ok_or_else(|| Error::InvalidParam(s.to_string()))
    }
}

pub(crate) fn find_param<'a>(params: &'a [Param], name: &str) -> Option<&'a Param> {
    params.iter().find(|p| p.is_named(name))
}

/// Sets or replaces the parameter called `name`
pub(crate) fn set_param(params: &mut Vec<Param>, param: Param) {
    params.retain(|p| !p.is_named(param.name()));
    params.push(param);
}

pub(crate) fn write_params(f: &mut fmt::Formatter<'_>, params: &[Param]) -> fmt::Result {
    for param in params {
        write!(f, ";{}", param)?;
    }
    Ok(())
}
