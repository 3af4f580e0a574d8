//! Cooperative cancellation shared between the caller and a running import.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ImportError;

/// Cloneable cancel signal. Raising it stops the run before its next
/// remote mutation; entities already created are kept.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    canceled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self) -> Result<(), ImportError> {
        if self.is_canceled() {
            Err(ImportError::Canceled)
        } else {
            Ok(())
        }
    }
}
