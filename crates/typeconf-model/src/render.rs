//! Ariadne-based rendering of build errors and warnings.
//!
//! Model diagnostics are anchored to line numbers (origins come from the
//! frontend), so rendering labels the whole offending line. Output is
//! colorless for stable snapshots and log files.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::error::BuildError;
use crate::warning::Warning;

/// Byte range of a 1-based line in `source`. Out-of-range lines clamp to
/// the start of the file.
pub fn line_range(source: &str, line: u32) -> Range<usize> {
    let mut start = 0usize;
    let mut current = 1u32;
    for (i, byte) in source.bytes().enumerate() {
        if current == line && byte == b'\n' {
            return start..i;
        }
        if byte == b'\n' {
            start = i + 1;
            current += 1;
        }
    }
    if current == line && start < source.len() {
        return start..source.len();
    }
    0..source.len().min(1)
}

/// Render a build error against the original source.
pub fn render_error(error: &BuildError, source: &str) -> String {
    let range = clamp_non_empty(line_range(source, error.line()), source.len());
    let report = Report::build(ReportKind::Error, range.clone())
        .with_message(error.to_string())
        .with_config(Config::default().with_color(false))
        .with_label(
            Label::new(range)
                .with_message("in this entry")
                .with_color(Color::Red),
        )
        .finish();
    write_report(report, source)
}

/// Render a warning against the original source.
pub fn render_warning(warning: &Warning, source: &str) -> String {
    let range = clamp_non_empty(line_range(source, warning.line()), source.len());
    let report = Report::build(ReportKind::Warning, range.clone())
        .with_message(warning.message())
        .with_config(Config::default().with_color(false))
        .with_label(
            Label::new(range)
                .with_message(warning.source().to_string())
                .with_color(Color::Yellow),
        )
        .finish();
    write_report(report, source)
}

/// Ariadne needs a span of at least one character.
fn clamp_non_empty(range: Range<usize>, source_len: usize) -> Range<usize> {
    let start = range.start.min(source_len);
    let end = range.end.min(source_len).max(start);
    if start == end {
        start..end.saturating_add(1).min(source_len)
    } else {
        start..end
    }
}

fn write_report(report: Report<'_, Range<usize>>, source: &str) -> String {
    let mut buf = Vec::new();
    report
        .write(Source::from(source), &mut buf)
        .expect("diagnostic rendering failed");
    String::from_utf8(buf).expect("diagnostic output is valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_range_finds_lines() {
        let src = "aa\nbbb\ncc";
        assert_eq!(line_range(src, 1), 0..2);
        assert_eq!(line_range(src, 2), 3..6);
        assert_eq!(line_range(src, 3), 7..9);
    }

    #[test]
    fn line_range_clamps_out_of_range() {
        let src = "aa\n";
        assert_eq!(line_range(src, 9), 0..1);
    }

    #[test]
    fn rendered_warning_mentions_message_and_source() {
        let src = "a = 1\nxs = [\"int\", \"string\"]\n";
        let w = Warning::MultElemList {
            line: 2,
            source: "[int,string]".into(),
        };
        let out = render_warning(&w, src);
        assert!(out.contains("Warning"));
        assert!(out.contains("only the first is used"));
        assert!(out.contains("[int,string]"));
    }

    #[test]
    fn rendered_error_mentions_the_key() {
        let src = "# @define wobble\nX { a = 1 }\n";
        let err = BuildError::MalformedDefine {
            key: "X".into(),
            annotation: "@define wobble".into(),
            line: 2,
        };
        let out = render_error(&err, src);
        assert!(out.contains("Error"));
        assert!(out.contains("bad @define annotation for 'X'"));
    }
}
