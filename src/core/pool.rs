//! Encoder and render-buffer reuse pools
//!
//! Pools are plain free lists behind a mutex. Acquire and release are safe
//! from any thread; an acquired instance is exclusively owned until it is
//! released. Correctness never depends on reuse: a pool that allocated fresh
//! on every acquisition would behave identically, only slower.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Initial capacity for pooled encoder and render buffers
pub(crate) const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Idle instances retained per pool; surplus releases are dropped
const MAX_IDLE: usize = 64;

pub(crate) struct Pool<T> {
    idle: Mutex<Vec<T>>,
}

impl<T> Pool<T> {
    pub(crate) const fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Pop an idle instance, or build a fresh one if the pool is empty.
    ///
    /// The previous occupant's state is left as released; callers must reset
    /// the instance before use.
    pub(crate) fn get_or_else(&self, fresh: impl FnOnce() -> T) -> T {
        self.idle.lock().pop().unwrap_or_else(fresh)
    }

    pub(crate) fn put(&self, value: T) {
        let mut idle = self.idle.lock();
        if idle.len() < MAX_IDLE {
            idle.push(value);
        }
    }
}

static RENDER_POOL: Pool<Vec<u8>> = Pool::new();

/// Pooled scratch buffer for entry assembly.
///
/// Cleared on acquisition and handed back to the pool on drop, so the buffer
/// is released on every exit path of the assembly code, error returns
/// included. Grown capacity survives reuse.
pub(crate) struct RenderBuf {
    bytes: Vec<u8>,
}

impl RenderBuf {
    pub(crate) fn acquire() -> Self {
        let mut bytes = RENDER_POOL.get_or_else(|| Vec::with_capacity(INITIAL_BUFFER_CAPACITY));
        bytes.clear();
        Self { bytes }
    }
}

impl Deref for RenderBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.bytes
    }
}

impl DerefMut for RenderBuf {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }
}

impl Drop for RenderBuf {
    fn drop(&mut self) {
        RENDER_POOL.put(std::mem::take(&mut self.bytes));
    }
}
