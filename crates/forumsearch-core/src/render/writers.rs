//! Renderers writing to an `io::Write`
//!
//! `ResultRenderer::render_row` has no error channel, so each renderer stops
//! writing after the first I/O failure and hands it back from `finish()`.

use std::io::{self, Write};

use super::filter::ResultRenderer;
use crate::model::ResultRow;

/// One `column=value` line per row, columns tab-separated
pub struct PlainTextRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PlainTextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> ResultRenderer for PlainTextRenderer<W> {
    fn render_row(&mut self, row: &ResultRow) {
        if self.error.is_some() {
            return;
        }
        let line = row
            .columns()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("\t");
        if let Err(err) = writeln!(self.out, "{}", line) {
            self.error = Some(err);
        }
    }
}

/// One JSON object per line
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> ResultRenderer for JsonLinesRenderer<W> {
    fn render_row(&mut self, row: &ResultRow) {
        if self.error.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, row)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = written {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowValue;

    fn sample() -> ResultRow {
        ResultRow::new()
            .with("postid", 3)
            .with("text", "hello <world>")
            .with("title", RowValue::Null)
    }

    #[test]
    fn test_plain_text_line() {
        let mut renderer = PlainTextRenderer::new(Vec::new());
        renderer.render_row(&sample());
        let out = String::from_utf8(renderer.finish().unwrap()).unwrap();
        assert_eq!(out, "postid=3\ttext=hello <world>\ttitle=NULL\n");
    }

    #[test]
    fn test_json_lines() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        renderer.render_row(&sample());
        renderer.render_row(&ResultRow::new().with("postid", 4));
        let out = String::from_utf8(renderer.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "{\"postid\":3,\"text\":\"hello <world>\",\"title\":null}\n{\"postid\":4}\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_first_write_error_is_reported_by_finish() {
        let mut renderer = PlainTextRenderer::new(BrokenPipe);
        renderer.render_row(&sample());
        renderer.render_row(&sample());
        let err = renderer.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
