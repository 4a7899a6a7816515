//! Scratch buffer pooling for canonical encoding
//!
//! Leaf hashing encodes every record into a byte buffer before hashing it.
//! The pool hands out buffers under a scoped guard: one logical hash
//! operation owns a buffer for the guard's lifetime, and dropping the guard
//! (normal return, `?` early exit, or unwinding) clears the buffer and puts it
//! back. Buffers never leave the pool's ownership discipline, so concurrent
//! callers can share one pool.

use crate::config::PoolConfig;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Free list of reusable byte buffers.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_pooled: usize,
    max_buffer_capacity: usize,
}

impl BufferPool {
    /// Create a pool that retains at most `max_pooled` buffers, each with a
    /// capacity no larger than `max_buffer_capacity` bytes.
    pub fn new(max_pooled: usize, max_buffer_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_pooled)),
            max_pooled,
            max_buffer_capacity,
        }
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.max_pooled, config.max_buffer_capacity)
    }

    /// Take an empty buffer from the pool, allocating one if none is free.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self.free.lock().pop().unwrap_or_default();
        PooledBuffer { pool: self, buf }
    }

    /// Number of buffers currently waiting in the free list.
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        // Oversized buffers would pin memory from one unusually large record.
        if buf.capacity() > self.max_buffer_capacity {
            return;
        }
        buf.clear();
        let mut free = self.free.lock();
        if free.len() < self.max_pooled {
            free.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::from_config(&PoolConfig::default())
    }
}

/// Scoped ownership of one pooled buffer.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
