//! One-shot notifications shown on the next rendered page.
//!
//! The board has no user sessions, so the queue is process-wide: whatever
//! page renders next shows and clears it.

use std::sync::Mutex;

/// Pending messages kept at most; older ones are dropped first
pub const MAX_PENDING_FLASHES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCategory {
    Success,
    Warning,
    Error,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Warning => "warning",
            FlashCategory::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct FlashQueue {
    messages: Mutex<Vec<Flash>>,
}

impl FlashQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, category: FlashCategory, message: impl Into<String>) {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        if messages.len() >= MAX_PENDING_FLASHES {
            let excess = messages.len() + 1 - MAX_PENDING_FLASHES;
            messages.drain(..excess);
        }
        messages.push(Flash {
            category,
            message: message.into(),
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(FlashCategory::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(FlashCategory::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(FlashCategory::Error, message);
    }

    /// Take every pending message, oldest first
    pub fn drain(&self) -> Vec<Flash> {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *messages)
    }
}
