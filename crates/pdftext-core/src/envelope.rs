//! The JSON object printed on stdout.
//!
//! Output is byte-compatible with Python's `json.dumps` defaults, which
//! existing consumers parse: `", "` and `": "` separators, and everything
//! outside printable ASCII escaped as `\uXXXX`.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::ExtractError;
use crate::extractor::fold_result;

/// Message emitted when the program is invoked with the wrong argument count.
pub const USAGE: &str = "Usage: python3 extract_pdf_text.py <pdf_url>";

/// A single-key JSON object: `{"text": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// Extracted text, or a folded extraction error.
    Text(String),
    /// Usage error; the only failure visible at process level.
    Error(String),
}

impl Envelope {
    pub fn usage() -> Self {
        Envelope::Error(USAGE.to_string())
    }

    /// Wrap an extraction result. Failures become `text`, not `error`.
    pub fn from_result(result: Result<String, ExtractError>) -> Self {
        Envelope::Text(fold_result(result))
    }

    /// Process exit status that accompanies this envelope.
    pub fn exit_code(&self) -> u8 {
        match self {
            Envelope::Text(_) => 0,
            Envelope::Error(_) => 1,
        }
    }

    pub fn write_json<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, PythonFormatter);
        self.serialize(&mut ser)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        String::from_utf8(buf).map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e))
    }
}

/// Formatter matching `json.dumps(obj)` with `ensure_ascii=True`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    // serde_json has already escaped quotes, backslashes and C0 controls;
    // fragments only carry the remaining characters.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
