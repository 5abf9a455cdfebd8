use crate::{DecodeError, Framer};
use core_types::Frame;

/// Buffers input and emits a frame whenever a newline is encountered.
///
/// Bytes are decoded as UTF-8. Every `\r` is dropped, so CRLF and LF
/// endings produce the same frame and a lone `\r` never reaches a frame.
/// A multibyte character split across two chunks is held back until the
/// rest of it arrives. Invalid sequences are reported as [`DecodeError`]
/// and scanning resumes right after them.
///
/// NOTE: there is no upper bound on the unterminated line. A peer that
/// never sends `\n` grows `line` without limit.
pub struct LineFramer {
    line: String,
    // Leading bytes of a character cut off by the end of the last chunk.
    partial: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            line: String::with_capacity(256),
            partial: Vec::new(),
        }
    }

    /// The in-progress line that has not seen its terminator yet.
    pub fn pending(&self) -> &str {
        &self.line
    }

    fn scan(&mut self, text: &str, frames: &mut Vec<Result<Frame, DecodeError>>) {
        for ch in text.chars() {
            match ch {
                '\n' => frames.push(Ok(Frame::new_rx(std::mem::take(&mut self.line)))),
                '\r' => {}
                other => self.line.push(other),
            }
        }
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer for LineFramer {
    fn push(&mut self, bytes: &[u8]) -> Vec<Result<Frame, DecodeError>> {
        let mut frames = Vec::new();

        let joined;
        let mut rest: &[u8] = if self.partial.is_empty() {
            bytes
        } else {
            self.partial.extend_from_slice(bytes);
            joined = std::mem::take(&mut self.partial);
            &joined
        };

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.scan(text, &mut frames);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.scan(text, &mut frames);
                    }
                    match err.error_len() {
                        Some(len) => {
                            let (bad, tail) = after.split_at(len.min(after.len()));
                            frames.push(Err(DecodeError {
                                bytes: bad.to_vec(),
                            }));
                            rest = tail;
                        }
                        // Truncated character at the end: wait for more bytes.
                        None => {
                            self.partial = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        frames
    }

    fn reset(&mut self) {
        self.line.clear();
        self.partial.clear();
    }

    fn name(&self) -> &'static str {
        "Lines"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(results: Vec<Result<Frame, DecodeError>>) -> Vec<String> {
        results.into_iter().map(|r| r.unwrap().text).collect()
    }

    #[test]
    fn test_lines_simple() {
        let mut framer = LineFramer::new();
        let frames = texts(framer.push(b"Hello\nWorld\n"));
        assert_eq!(frames, vec!["Hello", "World"]);
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn test_lines_split() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"A").is_empty());
        assert!(framer.push(b"B").is_empty());
        assert_eq!(framer.pending(), "AB");

        let frames = texts(framer.push(b"\n"));
        assert_eq!(frames, vec!["AB"]);
    }

    #[test]
    fn test_crlf_handling() {
        let mut framer = LineFramer::new();
        let frames = texts(framer.push(b"Connected\r\n{\"temp\":21}\n"));
        assert_eq!(frames, vec!["Connected", "{\"temp\":21}"]);
    }

    #[test]
    fn test_lone_cr_is_dropped() {
        let mut framer = LineFramer::new();
        let frames = texts(framer.push(b"DO\rOR\n"));
        assert_eq!(frames, vec!["DOOR"]);
    }

    #[test]
    fn test_consecutive_delimiters_emit_empty_frames() {
        let mut framer = LineFramer::new();
        let frames = texts(framer.push(b"OK\n\r\n\nOK\n"));
        assert_eq!(frames, vec!["OK", "", "", "OK"]);
    }

    #[test]
    fn test_unterminated_tail_is_retained() {
        let mut framer = LineFramer::new();
        let frames = texts(framer.push(b"LIGHT ON\nDOOR"));
        assert_eq!(frames, vec!["LIGHT ON"]);
        assert_eq!(framer.pending(), "DOOR");
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut framer = LineFramer::new();
        // "21°C\n", with the two bytes of '°' in separate chunks
        assert!(framer.push(&[b'2', b'1', 0xC2]).is_empty());
        let frames = texts(framer.push(&[0xB0, b'C', b'\n']));
        assert_eq!(frames, vec!["21°C"]);
    }

    #[test]
    fn test_invalid_utf8_is_reported_and_skipped() {
        let mut framer = LineFramer::new();
        let results = framer.push(b"AB\xFFCD\n");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Err(DecodeError { bytes: vec![0xFF] }));
        assert_eq!(results[1].as_ref().unwrap().text, "ABCD");
    }

    #[test]
    fn test_truncated_char_followed_by_ascii_is_invalid() {
        let mut framer = LineFramer::new();
        assert!(framer.push(&[0xE2, 0x82]).is_empty());
        let results = framer.push(b"X\n");
        assert_eq!(results[0], Err(DecodeError { bytes: vec![0xE2, 0x82] }));
        assert_eq!(results[1].as_ref().unwrap().text, "X");
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut framer = LineFramer::new();
        framer.push(&[b'x', 0xC2]);
        framer.reset();
        assert_eq!(framer.pending(), "");
        assert_eq!(texts(framer.push(b"y\n")), vec!["y"]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError {
            bytes: vec![0xFF, 0x0A],
        };
        assert_eq!(err.to_string(), "invalid UTF-8 sequence [FF, 0A]");
    }

    fn split_at_cuts(bytes: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
        let mut points: Vec<usize> = cuts.iter().map(|c| c % (bytes.len() + 1)).collect();
        points.sort_unstable();
        points.dedup();

        let mut chunks = Vec::new();
        let mut start = 0;
        for point in points {
            chunks.push(bytes[start..point].to_vec());
            start = point;
        }
        chunks.push(bytes[start..].to_vec());
        chunks
    }

    proptest! {
        #[test]
        fn prop_chunk_boundaries_do_not_change_output(
            input in "[a-zA-Z0-9 {}:\",°é\r\n]{0,64}",
            cuts in prop::collection::vec(any::<usize>(), 0..8),
        ) {
            let bytes = input.as_bytes();

            let mut whole = LineFramer::new();
            let expected = texts(whole.push(bytes));

            let mut chunked = LineFramer::new();
            let mut actual = Vec::new();
            for chunk in split_at_cuts(bytes, &cuts) {
                actual.extend(texts(chunked.push(&chunk)));
            }

            prop_assert_eq!(&actual, &expected);
            prop_assert_eq!(chunked.pending(), whole.pending());

            let mut rebuilt: String = actual.concat();
            rebuilt.push_str(chunked.pending());
            let stripped: String = input.chars().filter(|c| *c != '\n' && *c != '\r').collect();
            prop_assert_eq!(rebuilt, stripped);
        }
    }
}
