use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use crate::{encoder::LINE_TERMINATOR, Message};

const DEFAULT_MAX_IDLE: usize = 64;
// buffers that grew past this are not worth keeping around
const MAX_RETAINED_CAPACITY: usize = 4096;

/// A pool of reusable encoding buffers.
///
/// A buffer is handed to one caller at a time and goes back to the pool when the
/// [`PooledBuffer`] guard is dropped. The pool can be shared between threads.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<String>>,
    max_idle: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

impl BufferPool {
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
        }
    }

    pub fn checkout(&self) -> PooledBuffer<'_> {
        let mut buf = self.idle.lock().pop().unwrap_or_default();
        buf.clear();
        PooledBuffer { buf, pool: self }
    }

    /// Number of buffers waiting to be reused.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn give_back(&self, buf: String) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }

    pub fn encode(&self, message: &Message) -> String {
        let mut buf = self.checkout();
        // writing into a String cannot fail
        let _ = message.write_to(&mut *buf);
        buf.as_str().to_owned()
    }

    /// Encodes the message, the returned bytes are owned by the caller.
    pub fn encode_bytes(&self, message: &Message) -> Vec<u8> {
        let mut buf = self.checkout();
        let _ = message.write_to(&mut *buf);
        buf.as_bytes().to_vec()
    }

    /// Writes the encoded message followed by `\r\n`, returns the number of bytes written.
    pub fn write_with_terminator<W: std::io::Write>(
        &self,
        message: &Message,
        out: &mut W,
    ) -> std::io::Result<usize> {
        let mut buf = self.checkout();
        let _ = message.write_to(&mut *buf);
        buf.push_str(LINE_TERMINATOR);
        out.write_all(buf.as_bytes())?;
        Ok(buf.len())
    }
}

#[derive(Debug)]
pub struct PooledBuffer<'p> {
    buf: String,
    pool: &'p BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}
