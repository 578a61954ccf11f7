//! SIP Expires header

use std::fmt;

use serde::{Deserialize, Serialize};

/// Requested binding lifetime in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expires(pub u32);

impl Expires {
    pub fn new(seconds: u32) -> Self {
        Expires(seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
