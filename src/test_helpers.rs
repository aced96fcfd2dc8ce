//! Shared test utilities for the srcset-grid test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let resolver = RecordingResolver::echo();
//! let attrs = attributes::build(&list, &resolver).unwrap();
//! assert_eq!(resolver.requested_widths(), vec![1296, 936, 551]);
//! ```

use std::sync::Mutex;

use crate::attributes::{ResolvedSource, SourceResolver};
use crate::size::SizeSpec;

/// Mock resolver that records every request.
/// Uses Mutex (not RefCell) so it stays Sync like real resolvers.
pub struct RecordingResolver {
    requests: Mutex<Vec<SizeSpec>>,
    unavailable: Vec<u32>,
}

impl RecordingResolver {
    /// Answer every request with `img-{width}.jpg` at the requested size.
    pub fn echo() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            unavailable: Vec::new(),
        }
    }

    /// Like [`echo`](Self::echo) but return `None` for the given widths.
    pub fn without(widths: &[u32]) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            unavailable: widths.to_vec(),
        }
    }

    pub fn requests(&self) -> Vec<SizeSpec> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_widths(&self) -> Vec<u32> {
        self.requests()
            .iter()
            .map(SizeSpec::effective_width)
            .collect()
    }
}

impl SourceResolver for RecordingResolver {
    fn resolve(&self, spec: &SizeSpec) -> Option<ResolvedSource> {
        self.requests.lock().unwrap().push(spec.clone());
        let width = spec.effective_width();
        if self.unavailable.contains(&width) {
            return None;
        }
        Some(ResolvedSource {
            url: format!("img-{width}.jpg"),
            width,
            height: spec.effective_height().unwrap_or(0),
        })
    }
}
