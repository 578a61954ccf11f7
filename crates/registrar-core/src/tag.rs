//! To-tag generation

use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Builder;

use crate::error::{RegistrarError, Result};
use crate::types::ToTag;

/// Source of fresh To-tags, one per successful response
pub trait TagGenerator: Send + Sync {
    fn generate(&self) -> Result<ToTag>;
}

/// Random (version 4) UUID tags drawn from the operating system.
///
/// Unlike `Uuid::new_v4`, a failing entropy source surfaces as
/// [`RegistrarError::TagGeneration`] instead of a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTagGenerator;

impl TagGenerator for UuidTagGenerator {
    fn generate(&self) -> Result<ToTag> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RegistrarError::TagGeneration(e.to_string()))?;
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(ToTag::new(uuid.to_string()))
    }
}
