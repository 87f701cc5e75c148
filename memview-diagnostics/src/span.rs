use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{bail, Error};
use colored::Colorize;

use crate::DiagnosticLevel;

/// A [`CodeSpan`] represent a slice of code.
///
/// At the moment the slice must not span on multiple lines.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CodeSpan {
    /// The path of the file where this span comes from.
    file_name: PathBuf,
    /// The line number inside the file.
    line_number: NonZeroUsize,
    /// The offset of the first byte of the span, relative to the start of the file.
    file_offset: usize,
    /// The offset of the first byte of the span, relative to the start of the line.
    line_offset: usize,
    /// The length of the span.
    len: usize,
    /// The content of the line.
    line: String,
}

impl CodeSpan {
    /// Create a new [`CodeSpan`] from the content of a file, and the start-length pair.
    pub fn from_str(
        file_name: impl Into<PathBuf>,
        content: impl AsRef<str>,
        offset: usize,
        len: usize,
    ) -> Result<Self, Error> {
        let content = content.as_ref();
        let Some(before) = content.get(..offset) else {
            bail!("The offset exceeds the length of the file");
        };
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = content[offset..]
            .find('\n')
            .map_or(content.len(), |i| offset + i);
        let line = &content[line_start..line_end];

        let line_offset = offset - line_start;
        if line_offset + len > line.len() {
            bail!("Multiline spans are not supported");
        }
        Ok(Self {
            file_name: file_name.into(),
            line_number: NonZeroUsize::MIN.saturating_add(before.matches('\n').count()),
            line: line.into(),
            file_offset: offset,
            line_offset,
            len,
        })
    }

    /// Create a new [`CodeSpan`] from a 1-based line number and a 0-based column counted in
    /// characters, as reported by the tokenizer. Spans reaching past the end of the line are
    /// truncated to it.
    pub fn from_line_column(
        file_name: impl Into<PathBuf>,
        content: impl AsRef<str>,
        line_number: usize,
        column: usize,
        len: usize,
    ) -> Result<Self, Error> {
        if line_number == 0 {
            bail!("Line numbers start from 1");
        }
        let content = content.as_ref();
        let mut offset = 0;
        for (index, line) in content.split('\n').enumerate() {
            if index + 1 < line_number {
                offset += line.len() + 1;
                continue;
            }
            let line_offset = match line.char_indices().nth(column) {
                Some((byte, _)) => byte,
                None if column == line.chars().count() => line.len(),
                None => bail!("Column {} is past the end of line {}", column, line_number),
            };
            let len = len.min(line.len() - line_offset);
            return Self::from_str(file_name, content, offset + line_offset, len);
        }
        bail!("The line {} exceeds the length of the file", line_number)
    }

    /// Get the content of the span as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.line[self.line_offset..self.line_offset + self.len]
    }

    /// The 1-based line of the span.
    pub fn line_number(&self) -> usize {
        self.line_number.get()
    }

    /// Obtain a string (with colors) of this span.
    pub fn to_string(&self, level: DiagnosticLevel) -> String {
        let mut result = String::new();

        result += &format!(
            "{}:{}:{}\n",
            self.file_name.display(),
            self.line_number,
            self.line_offset
        );

        let line_number = self.line_number.get().to_string();
        result += &format!("{} | {}\n", line_number, self.line);

        let pad = line_number.len() + 3 + self.line_offset;
        result += &" ".repeat(pad);

        let color = level.color();
        for _ in 0..(self.len.max(1)) {
            result += &format!("{}", "^".color(color).bold());
        }
        result += "\n";
        result
    }
}
