//! Line buffer for console input

/// In-progress input line.
///
/// Byte-oriented, grows on demand. Content that is not valid UTF-8
/// reads back as an empty string.
#[derive(Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create empty buffer
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Push a character
    pub fn push(&mut self, c: u8) {
        self.buf.push(c);
    }

    /// Remove last character, reporting whether anything was removed
    pub fn backspace(&mut self) -> bool {
        self.buf.pop().is_some()
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf).unwrap_or("")
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drain the buffer into an owned line for dispatch
    pub fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut self.buf);
        String::from_utf8(bytes).unwrap_or_default()
    }
}
