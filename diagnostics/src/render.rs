use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use crate::Severity;
use std::fmt::Write;

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_BOLD_RED: &str = "\u{1b}[1;31m";
const ANSI_BOLD_YELLOW: &str = "\u{1b}[1;33m";
const ANSI_BOLD_BLUE: &str = "\u{1b}[1;34m";

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
  pub color: bool,
}

/// Renders a diagnostic as plain text with caret highlighting.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  render_diagnostic_with_options(provider, diagnostic, RenderOptions::default())
}

pub fn render_diagnostic_with_options(
  provider: &dyn SourceProvider,
  diagnostic: &Diagnostic,
  options: RenderOptions,
) -> String {
  let mut output = String::new();
  write_severity(&mut output, diagnostic.severity, options.color);
  let _ = writeln!(output, "[{}]: {}", diagnostic.code, diagnostic.message);

  let mut labels = Vec::with_capacity(diagnostic.labels.len() + 1);
  labels.push(Label::primary(diagnostic.primary, diagnostic.message.clone()));
  labels.extend(diagnostic.labels.iter().cloned());
  // Primary first, then by position, independent of insertion order.
  labels.sort_by(|a, b| {
    b.is_primary
      .cmp(&a.is_primary)
      .then(a.span.file.cmp(&b.span.file))
      .then(a.span.range.start.cmp(&b.span.range.start))
      .then(a.span.range.end.cmp(&b.span.range.end))
      .then(a.message.cmp(&b.message))
  });

  for label in &labels {
    render_label(provider, &mut output, label, options);
  }
  for note in &diagnostic.notes {
    let _ = writeln!(output, "= note: {}", note);
  }
  output
}

fn render_label(
  provider: &dyn SourceProvider,
  output: &mut String,
  label: &Label,
  options: RenderOptions,
) {
  let name = provider.file_name(label.span.file).unwrap_or("<unknown file>");
  let Some(text) = provider.file_text(label.span.file) else {
    let _ = writeln!(output, " --> {}:?:?", name);
    let _ = writeln!(output, "  = label: {}", label.message);
    return;
  };
  let start = clamp_to_char_boundary(text, label.span.range.start as usize);
  let end = clamp_to_char_boundary(text, label.span.range.end as usize).max(start);
  let (line_no, col) = line_and_column(text, start);
  let _ = writeln!(output, " --> {}:{}:{}", name, line_no, col);

  let lines = line_ranges(text);
  let first = line_no - 1;
  let last = line_index_at(&lines, if end > start { end - 1 } else { end });
  let gutter = (last + 1).to_string().len();
  let _ = writeln!(output, "{:>gutter$} |", "");
  for line_idx in first..=last {
    let (line_start, line_end) = lines[line_idx];
    let line = &text[line_start..line_end];
    let _ = writeln!(output, "{:>gutter$} | {}", line_idx + 1, line);
    let from = start.clamp(line_start, line_end) - line_start;
    let to = end.clamp(line_start, line_end) - line_start;
    let pad = line[..from].chars().count();
    let width = line[from..to].chars().count().max(1);
    let marker = if label.is_primary { '^' } else { '-' };
    let _ = write!(output, "{:>gutter$} | {}", "", " ".repeat(pad));
    if options.color {
      output.push_str(if label.is_primary { ANSI_BOLD_RED } else { ANSI_BOLD_BLUE });
    };
    output.extend(std::iter::repeat(marker).take(width));
    if options.color {
      output.push_str(ANSI_RESET);
    };
    if line_idx == first && !label.message.is_empty() {
      let _ = write!(output, " {}", label.message);
    };
    output.push('\n');
  }
}

fn write_severity(output: &mut String, severity: Severity, color: bool) {
  if !color {
    output.push_str(severity.as_str());
    return;
  };
  output.push_str(match severity {
    Severity::Error => ANSI_BOLD_RED,
    Severity::Warning => ANSI_BOLD_YELLOW,
    Severity::Note => ANSI_BOLD_BLUE,
  });
  output.push_str(severity.as_str());
  output.push_str(ANSI_RESET);
}

fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

/// Byte ranges of every line, excluding the terminating `\n`.
fn line_ranges(text: &str) -> Vec<(usize, usize)> {
  let mut ranges = Vec::new();
  let mut start = 0;
  for (idx, _) in text.match_indices('\n') {
    ranges.push((start, idx));
    start = idx + 1;
  }
  ranges.push((start, text.len()));
  ranges
}

fn line_index_at(lines: &[(usize, usize)], offset: usize) -> usize {
  lines
    .iter()
    .position(|&(_, end)| offset <= end)
    .unwrap_or(lines.len() - 1)
}

/// One-based line and column (in characters) of a byte offset.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
  let lines = line_ranges(text);
  let line_idx = line_index_at(&lines, offset);
  let line_start = lines[line_idx].0;
  (line_idx + 1, text[line_start..offset].chars().count() + 1)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::files::SimpleFiles;
  use crate::Span;
  use crate::TextRange;

  #[test]
  fn renders_single_line_span() {
    let mut files = SimpleFiles::new();
    let file = files.add("test.js", "let x = 1;");
    let diagnostic = Diagnostic::error("TEST0001", "unused variable", Span::new(file, TextRange::new(4, 5)));
    let rendered = render_diagnostic(&files, &diagnostic);
    let expected = "error[TEST0001]: unused variable\n --> test.js:1:5\n  |\n1 | let x = 1;\n  |     ^ unused variable\n";
    assert_eq!(rendered, expected);
  }

  #[test]
  fn renders_multi_line_span() {
    let mut files = SimpleFiles::new();
    let text = "@dec\nclass A {}\n";
    let file = files.add("main.js", text);
    let diagnostic = Diagnostic::error("TEST0002", "decorated class", Span::new(file, TextRange::new(0, 15)));
    let rendered = render_diagnostic(&files, &diagnostic);
    let expected = concat!(
      "error[TEST0002]: decorated class\n",
      " --> main.js:1:1\n",
      "  |\n",
      "1 | @dec\n",
      "  | ^^^^ decorated class\n",
      "2 | class A {}\n",
      "  | ^^^^^^^^^^\n",
    );
    assert_eq!(rendered, expected);
  }

  #[test]
  fn label_order_is_independent_of_insertion() {
    let mut files = SimpleFiles::new();
    let file = files.add("order.js", "abcdefghij\n");
    let primary = Span::new(file, TextRange::new(2, 6));
    let early = Label::secondary(Span::new(file, TextRange::new(0, 1)), "early");
    let late = Label::secondary(Span::new(file, TextRange::new(7, 10)), "late");
    let a = Diagnostic::warning("TEST0003", "main", primary)
      .with_label(late.clone())
      .with_label(early.clone());
    let b = Diagnostic::warning("TEST0003", "main", primary)
      .with_label(early)
      .with_label(late);
    let rendered = render_diagnostic(&files, &a);
    assert_eq!(rendered, render_diagnostic(&files, &b));
    assert!(rendered.find("main").unwrap() < rendered.find("early").unwrap());
    assert!(rendered.find("early").unwrap() < rendered.find("late").unwrap());
  }

  #[test]
  fn clamps_to_char_boundaries() {
    let mut files = SimpleFiles::new();
    let file = files.add("utf8.js", "é = 1");
    let diagnostic = Diagnostic::error("TEST0004", "bad", Span::new(file, TextRange::new(1, 2)));
    let rendered = render_diagnostic(&files, &diagnostic);
    assert!(rendered.contains(" --> utf8.js:1:1"));
  }

  #[test]
  fn missing_source_still_names_the_file() {
    let files = SimpleFiles::new();
    let diagnostic = Diagnostic::error("TEST0005", "gone", Span::new(FileId(3), TextRange::new(0, 1)));
    let rendered = render_diagnostic(&files, &diagnostic);
    assert!(rendered.contains(" --> <unknown file>:?:?"));
  }
}
