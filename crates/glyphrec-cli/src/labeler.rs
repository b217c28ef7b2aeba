//! Terminal labeling
//!
//! Shows each glyph as text art and reads the operator's answer, one line
//! per glyph.

use glyphrec_recog::{KeyPress, LabelRequest, LabelSource, RecogResult};
use std::io::{BufRead, Write};

/// Reads labels from `input`, drawing prompts on `output`
pub struct TerminalLabeler<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalLabeler<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LabelSource for TerminalLabeler<R, W> {
    fn label(&mut self, request: &LabelRequest<'_>) -> RecogResult<KeyPress> {
        let b = request.bbox;
        writeln!(
            self.output,
            "\n{} glyph #{} at ({}, {}) {}x{}",
            request.image.display(),
            request.index + 1,
            b.x,
            b.y,
            b.w,
            b.h
        )?;
        self.output.write_all(request.sample.render_ascii().as_bytes())?;

        loop {
            write!(self.output, "character (esc to stop): ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(KeyPress::Escape);
            }
            if let Some(key) = parse_key(&line) {
                return Ok(key);
            }
        }
    }
}

/// Interpret one input line; `None` for a blank line.
pub fn parse_key(line: &str) -> Option<KeyPress> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.starts_with('\u{1b}') || line.trim().eq_ignore_ascii_case("esc") {
        return Some(KeyPress::Escape);
    }
    line.chars().next().map(KeyPress::Char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrec_core::Box;
    use glyphrec_recog::NormalizedSample;
    use std::path::Path;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("a\n"), Some(KeyPress::Char('a')));
        assert_eq!(parse_key("Qx\r\n"), Some(KeyPress::Char('Q')));
        assert_eq!(parse_key(" \n"), Some(KeyPress::Char(' ')));
        assert_eq!(parse_key("\u{1b}\n"), Some(KeyPress::Escape));
        assert_eq!(parse_key("ESC\n"), Some(KeyPress::Escape));
        assert_eq!(parse_key("\n"), None);
    }

    #[test]
    fn test_labeler_reads_lines() {
        let sample = NormalizedSample::new(2, 1, vec![255.0, 0.0]).unwrap();
        let request = LabelRequest {
            image: Path::new("page.jpg"),
            index: 0,
            bbox: Box::new_unchecked(1, 2, 3, 4),
            sample: &sample,
        };
        let input: &[u8] = b"\nk\nesc\n";
        let mut output = Vec::new();
        let mut labeler = TerminalLabeler::new(input, &mut output);
        assert_eq!(labeler.label(&request).unwrap(), KeyPress::Char('k'));
        assert_eq!(labeler.label(&request).unwrap(), KeyPress::Escape);
        assert_eq!(labeler.label(&request).unwrap(), KeyPress::Escape);
        drop(labeler);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("page.jpg glyph #1 at (1, 2) 3x4"));
        assert!(shown.contains("#.\n"));
    }
}
