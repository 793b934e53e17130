//! §6 "Input" — the three ways a grammar or code-block description can be
//! handed to this crate, mirroring `reader::Reader`'s three constructors
//! (`from_str`, `from_reader`, `from_path`).

use std::{io::Read, path::Path};

use crate::{
    error::{LexError, LexResult},
    reader::Reader,
};

/// A not-yet-lexed source. Constructing one never fails for the `&str`/
/// `String` cases; the `Read`/`Path` cases slurp eagerly (§6: "The reader
/// variant slurps the content before lexing; streaming mid-parse is not
/// supported"), so a failure there (the "bad input source, reader I/O
/// failure" case `LexError` exists for) surfaces immediately as a
/// [`LexError`] instead of deferring to the first tokenizer call.
pub enum Source {
    Text(String),
}

impl Source {
    pub(crate) fn into_reader(self) -> Reader {
        match self {
            Source::Text(s) => Reader::from_str(&s),
        }
    }

    /// Reads all of `r` into memory and wraps it as a [`Source`].
    pub fn from_reader(mut r: impl Read) -> LexResult<Self> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)
            .map_err(|e| LexError::new(format!("failed to read source: {e}"), None))?;
        Ok(Source::Text(buf))
    }

    /// Reads the file at `path` into memory and wraps it as a [`Source`].
    pub fn from_path(path: impl AsRef<Path>) -> LexResult<Self> {
        let path = path.as_ref();
        let buf = std::fs::read_to_string(path).map_err(|e| {
            LexError::new(format!("failed to read {}: {e}", path.display()), None)
        })?;
        Ok(Source::Text(buf))
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Text(value.to_string())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_and_string_convert_without_failure() {
        let _: Source = "top_level: EOF;".into();
        let _: Source = String::from("top_level: EOF;").into();
    }

    #[test]
    fn from_reader_slurps_eagerly() {
        let bytes: &[u8] = b"top_level: EOF;";
        let source = Source::from_reader(bytes).expect("in-memory reads never fail");
        match source {
            Source::Text(s) => assert_eq!(s, "top_level: EOF;"),
        }
    }

    #[test]
    fn from_path_surfaces_io_failure_as_a_lex_error() {
        let err = Source::from_path("/nonexistent/path/to/a/grammar.g4")
            .expect_err("a missing file must fail to load");
        assert!(err.message.contains("grammar.g4"));
    }
}
