//! Chunk-to-line decoder.
//!
//! Transports deliver text in arbitrary pieces: a chunk may hold half a
//! line, several lines, or end in the middle of a multi-byte character.
//! [`LineAssembler`] keeps one pending buffer across calls and hands out
//! only complete `\n`-terminated lines, so its output is identical for every
//! possible way of splitting the same input.
//!
//! The buffer holds bytes rather than `str`. A newline byte never occurs
//! inside a UTF-8 sequence, so splitting on `b'\n'` is always safe, and a
//! character cut in half by the transport is reassembled before decoding.

/// Stateful line decoder
#[derive(Debug, Default, Clone)]
pub struct LineAssembler {
    buffer: Vec<u8>,
    /// Bytes before this offset are known to contain no newline
    scanned: usize,
    lines_emitted: usize,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text chunk and return every line it completed, in order
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        self.feed_bytes(chunk.as_bytes())
    }

    /// Append raw bytes and return every line they completed, in order
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        let mut cursor = self.scanned;

        while let Some(offset) = self.buffer[cursor..].iter().position(|byte| *byte == b'\n') {
            let end = cursor + offset;
            lines.push(decode_line(&self.buffer[start..end]));
            start = end + 1;
            cursor = start;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
        self.scanned = self.buffer.len();
        self.lines_emitted += lines.len();
        lines
    }

    /// Flush the trailing partial line at end of stream.
    ///
    /// Producers are allowed to omit the final newline, so a non-empty
    /// buffer becomes the last line. Whether it parses is for the
    /// interpreter to decide.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = decode_line(&self.buffer);
        self.reset();
        self.lines_emitted += 1;
        Some(line)
    }

    /// Discard any buffered partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.scanned = 0;
    }

    /// The buffered partial line, lossily decoded
    pub fn pending(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Number of lines handed out since creation
    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
