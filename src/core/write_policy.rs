use std::sync::Arc;

use crate::core::{AppError, Result};

/// Message returned for every rejected write while demo mode is on
pub const DEMO_MODE_MESSAGE: &str = "Demo mode: write operations are disabled";

/// Gate consulted by every write path before touching the store
pub trait WritePolicy: Send + Sync {
    fn is_write_allowed(&self) -> bool;

    /// `Ok(())` when writes are allowed, `WriteDisabled` otherwise
    fn ensure_write_allowed(&self) -> Result<()> {
        if self.is_write_allowed() {
            Ok(())
        } else {
            Err(AppError::WriteDisabled(DEMO_MODE_MESSAGE.to_string()))
        }
    }
}

/// Normal operation
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadWrite;

impl WritePolicy for ReadWrite {
    fn is_write_allowed(&self) -> bool {
        true
    }
}

/// Demo deployments: every write is rejected
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl WritePolicy for ReadOnly {
    fn is_write_allowed(&self) -> bool {
        false
    }
}

pub fn from_demo_mode(demo_mode: bool) -> Arc<dyn WritePolicy> {
    if demo_mode {
        Arc::new(ReadOnly)
    } else {
        Arc::new(ReadWrite)
    }
}
