use std::io::{self, Read};

use nix::unistd;

/// Standard input without any user-space buffering, so bytes after the current line
/// stay in the descriptor for the programs the line starts.
pub struct RawStdin;

impl Read for RawStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        unistd::read(libc::STDIN_FILENO, buf).map_err(io::Error::from)
    }
}

pub struct InputHandler;

impl InputHandler {
    /// Reads one line a byte at a time. Returns `None` at end of input. The line ends at
    /// LF, loses everything from the first CR on, and keeps at most `line_max - 1` bytes;
    /// the rest of an overlong line is consumed and dropped. A line that is not UTF-8
    /// is consumed and reported as `InvalidData`.
    pub fn read_line(input: &mut dyn Read, line_max: usize) -> io::Result<Option<String>> {
        let limit = line_max.saturating_sub(1);
        let mut buf = Vec::with_capacity(limit);
        let mut byte = [0u8; 1];
        let mut seen_any = false;
        let mut cut = false;
        loop {
            match input.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    seen_any = true;
                    if byte[0] == b'\n' {
                        break;
                    }
                    if buf.len() < limit {
                        buf.push(byte[0]);
                    } else {
                        cut = true;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if !seen_any {
            return Ok(None);
        }

        if let Some(cr) = buf.iter().position(|&b| b == b'\r') {
            buf.truncate(cr);
            cut = false;
        }
        // A cut may split the last character; drop the partial sequence.
        if cut {
            let partial = std::str::from_utf8(&buf)
                .err()
                .filter(|e| e.error_len().is_none())
                .map(|e| e.valid_up_to());
            if let Some(end) = partial {
                buf.truncate(end);
            }
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "line is not valid UTF-8"))
    }
}
