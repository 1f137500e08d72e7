//! Pending job bytes for one session.

use crate::protocol::commands::REINITIALIZE;

/// Append-only accumulator for the bytes of the current job.
///
/// A new buffer is primed with the reinitialization preamble so the first job
/// of a session starts from printer defaults. Clearing (explicitly or after a
/// successful send) leaves it empty, without a preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBuffer {
    bytes: Vec<u8>,
    dirty: bool,
}

impl Default for JobBuffer {
    fn default() -> Self {
        Self::primed()
    }
}

impl JobBuffer {
    /// Buffer holding only the reinitialization preamble.
    pub fn primed() -> Self {
        Self {
            bytes: REINITIALIZE.to_vec(),
            dirty: false,
        }
    }

    pub fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
        self.dirty = true;
    }

    /// Drop everything, preamble included.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.dirty = false;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether any operation has been appended since the last clear.
    pub fn has_operations(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_primed() {
        let buffer = JobBuffer::primed();
        assert_eq!(buffer.as_bytes(), &[0x1B, 0x40, 0x1B, 0x53]);
        assert!(!buffer.has_operations());
    }

    #[test]
    fn append_then_clear() {
        let mut buffer = JobBuffer::default();
        buffer.append(b"ab");
        buffer.append(b"c");
        assert_eq!(buffer.as_bytes(), &[0x1B, 0x40, 0x1B, 0x53, b'a', b'b', b'c']);
        assert!(buffer.has_operations());

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.has_operations());

        buffer.append(b"d");
        assert_eq!(buffer.as_bytes(), b"d");
    }
}
