//! Growable response buffer.
//!
//! `append` is the only place the growth policy lives. Allocation goes through
//! `Vec::try_reserve_exact`, so running out of memory is an error value rather
//! than an abort, and a failed append leaves the buffer untouched.

use crate::config::INITIAL_BUFFER_CAPACITY;
use crate::error_handling::NetworkError;

/// Owned contiguous bytes with an explicit capacity.
///
/// Invariant: `len() <= capacity()` and the backing allocation always holds at
/// least `capacity()` bytes.
#[derive(Debug, Default)]
pub struct GrowableBuffer {
    data: Vec<u8>,
    capacity: usize,
    limit: Option<usize>,
}

impl GrowableBuffer {
    /// An empty buffer; nothing is allocated until the first append.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty buffer that holds at most `limit` bytes.
    ///
    /// Exactly `limit` bytes are accepted however the appends are split; the
    /// terminator slot is dropped at the cap. Going past the limit is reported
    /// exactly like an allocation failure.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes reserved by the growth policy.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the stored bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Appends `bytes`, growing first if they do not fit.
    ///
    /// Growth doubles the current capacity (`INITIAL_BUFFER_CAPACITY` for an
    /// empty buffer) and, if that is still short, goes to
    /// `len + bytes.len() + 1`. The extra byte leaves room for a terminator,
    /// except at a configured limit, where capacity stops at the limit.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::OutOfMemory` if the allocation fails or would
    /// exceed the configured limit. The buffer is unchanged in that case.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), NetworkError> {
        let needed = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(NetworkError::OutOfMemory {
                requested: usize::MAX,
            })?;

        if needed > self.capacity {
            self.grow(needed)?;
        }

        // Fits within the reserved allocation, so this cannot reallocate.
        self.data.extend_from_slice(bytes);
        debug_assert!(self.data.len() <= self.capacity);
        Ok(())
    }

    fn grow(&mut self, needed: usize) -> Result<(), NetworkError> {
        let mut target = if self.capacity == 0 {
            INITIAL_BUFFER_CAPACITY
        } else {
            self.capacity.saturating_mul(2)
        };
        if needed >= target {
            target = needed.saturating_add(1);
        }

        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(NetworkError::OutOfMemory { requested: needed });
            }
            target = target.min(limit).max(needed);
        }

        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| NetworkError::OutOfMemory { requested: target })?;
        self.capacity = target;
        Ok(())
    }
}
