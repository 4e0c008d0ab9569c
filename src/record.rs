//! One-line JSON records for structured output mode.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter};

/// Writes one `{...}` record, fields in call order, terminated by a newline.
pub struct RecordWriter<'a> {
    out: &'a mut dyn Write,
    need_comma: bool,
}

impl<'a> RecordWriter<'a> {
    pub fn begin(out: &'a mut dyn Write) -> io::Result<Self> {
        out.write_all(b"{")?;
        Ok(RecordWriter {
            out,
            need_comma: false,
        })
    }

    pub fn field_str(&mut self, key: &str, value: &str) -> io::Result<&mut Self> {
        self.key(key)?;
        write_json(&mut *self.out, value)?;
        Ok(self)
    }

    pub fn field_int(&mut self, key: &str, value: i64) -> io::Result<&mut Self> {
        self.key(key)?;
        write!(self.out, "{}", value)?;
        Ok(self)
    }

    pub fn end(self) -> io::Result<()> {
        self.out.write_all(b"}\n")?;
        self.out.flush()
    }

    fn key(&mut self, key: &str) -> io::Result<()> {
        if self.need_comma {
            self.out.write_all(b",")?;
        }
        self.need_comma = true;
        write_json(&mut *self.out, key)?;
        self.out.write_all(b":")
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(out, ControlEscapes);
    value.serialize(&mut ser).map_err(io::Error::from)
}

/// serde_json's compact output, except that every control character without a
/// two-letter escape of its own (`\n`, `\r`, `\t`) is written as `\u00XX`.
struct ControlEscapes;

impl Formatter for ControlEscapes {
    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let escaped: &[u8] = match char_escape {
            CharEscape::Quote => b"\\\"",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::Backspace => return write_control(writer, 0x08),
            CharEscape::FormFeed => return write_control(writer, 0x0c),
            CharEscape::AsciiControl(byte) => return write_control(writer, byte),
        };
        writer.write_all(escaped)
    }
}

fn write_control<W: ?Sized + Write>(writer: &mut W, byte: u8) -> io::Result<()> {
    write!(writer, "\\u{:04x}", byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(build: impl FnOnce(&mut RecordWriter<'_>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        let mut w = RecordWriter::begin(&mut buf).unwrap();
        build(&mut w).unwrap();
        w.end().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fields_in_call_order() {
        let line = record(|w| {
            w.field_str("command", "hello")?
                .field_str("vendor", "diam Systems Ltd")?
                .field_int("year", 2026)?;
            Ok(())
        });
        assert_eq!(
            line,
            "{\"command\":\"hello\",\"vendor\":\"diam Systems Ltd\",\"year\":2026}\n"
        );
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(record(|_| Ok(())), "{}\n");
    }

    #[test]
    fn test_string_escapes() {
        let line = record(|w| {
            w.field_str("v", "a\"b\\c\nd\re\tf\u{1}g\u{8}h\u{c}")?;
            Ok(())
        });
        assert_eq!(
            line,
            "{\"v\":\"a\\\"b\\\\c\\nd\\re\\tf\\u0001g\\u0008h\\u000c\"}\n"
        );
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let line = record(|w| {
            w.field_str("path", "/tmp/ü")?;
            Ok(())
        });
        assert_eq!(line, "{\"path\":\"/tmp/ü\"}\n");
    }

    #[test]
    fn test_negative_int() {
        let line = record(|w| {
            w.field_int("n", -3)?;
            Ok(())
        });
        assert_eq!(line, "{\"n\":-3}\n");
    }
}
