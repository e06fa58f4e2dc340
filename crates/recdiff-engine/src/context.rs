//! The compare context threaded through every dispatch.

use recdiff_types::CancellationToken;

use crate::error::{DiffError, DiffResult};

/// Depth bookkeeping plus the cancellation handle.
///
/// Depth counts container recursions only (gzip contents, tar/zip/jar
/// entries); text and class-file decomposition do not advance it. Entering
/// a container is an explicit value transformation via [`child`], never
/// ambient mutable state.
///
/// [`child`]: CompareContext::child
#[derive(Clone, Copy, Debug)]
pub(crate) struct CompareContext<'a> {
    cancel: &'a CancellationToken,
    depth: u32,
    max_depth: u32,
}

impl<'a> CompareContext<'a> {
    /// Root context at depth 0. `max_depth == 0` disables the gate.
    pub(crate) fn new(cancel: &'a CancellationToken, max_depth: u32) -> Self {
        Self {
            cancel,
            depth: 0,
            max_depth,
        }
    }

    /// The context for recursing one container level deeper.
    pub(crate) fn child(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    pub(crate) fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Whether an archive at the current depth must not be expanded.
    pub(crate) fn at_depth_limit(&self) -> bool {
        self.max_depth > 0 && self.depth >= self.max_depth
    }

    /// Fail fast when cancellation has been requested.
    pub(crate) fn ensure_active(&self) -> DiffResult<()> {
        if self.cancel.is_cancelled() {
            return Err(DiffError::Cancelled);
        }
        Ok(())
    }
}
