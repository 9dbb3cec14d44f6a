// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Rc;

use core::fmt;

use anyhow::{bail, Result};

#[derive(Debug)]
struct SourceText {
    file: String,
    contents: String,
    // Byte offset of the first character of every line.
    line_starts: Vec<u32>,
}

/// Text of one file. Clones share the text; equality is identity.
#[derive(Clone)]
pub struct Source {
    text: Rc<SourceText>,
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.text, &other.text)
    }
}

impl Eq for Source {}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text.file)
    }
}

impl Source {
    pub fn from_contents(file: String, contents: String) -> Result<Source> {
        if contents.len() >= u32::MAX as usize {
            bail!("{file} is too large ({} bytes)", contents.len());
        }

        let newlines = contents.match_indices('\n').map(|(at, _)| at as u32 + 1);
        let line_starts = core::iter::once(0).chain(newlines).collect();

        Ok(Source {
            text: Rc::new(SourceText {
                file,
                contents,
                line_starts,
            }),
        })
    }

    pub fn file(&self) -> &str {
        &self.text.file
    }

    pub fn contents(&self) -> &str {
        &self.text.contents
    }

    pub fn num_lines(&self) -> usize {
        self.text.line_starts.len()
    }

    /// Text of the 1-based `line` without its terminator.
    pub fn line(&self, line: u32) -> &str {
        if line == 0 {
            return "";
        }
        let starts = &self.text.line_starts;
        let Some(&start) = starts.get(line as usize - 1) else {
            return "";
        };
        let end = starts
            .get(line as usize)
            .map_or(self.text.contents.len(), |&next| next as usize - 1);
        let text = &self.text.contents[start as usize..end];
        text.trim_end_matches('\r')
    }

    /// 1-based line and column of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let starts = &self.text.line_starts;
        let after = starts.partition_point(|&start| start <= offset);
        let idx = after.saturating_sub(1);
        let start = starts.get(idx).copied().unwrap_or_default();
        (idx as u32 + 1, offset - start + 1)
    }

    pub fn span(&self, start: u32, end: u32) -> Span {
        let (line, col) = self.line_col(start);
        Span {
            source: self.clone(),
            line,
            col,
            start,
            end,
        }
    }

    /// Render `msg` under the source line with a caret at `col`.
    pub fn message(&self, line: u32, col: u32, kind: &str, msg: &str) -> String {
        if line == 0 || line as usize > self.num_lines() {
            return format!("{}: line {line} does not exist", self.file());
        }

        let gutter = " ".repeat(line.to_string().len() + 1);
        let caret = " ".repeat(col.saturating_sub(1) as usize);
        format!(
            "\n--> {}:{line}:{col}\n{gutter}|\n{line} | {}\n{gutter}| {caret}^\n{kind}: {msg}",
            self.file(),
            self.line(line)
        )
    }
}

/// Byte range of a source together with the position it starts at.
#[derive(Clone, PartialEq, Eq)]
pub struct Span {
    pub source: Source,
    pub line: u32,
    pub col: u32,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn text(&self) -> &str {
        let (start, end) = (self.start as usize, self.end as usize);
        &self.source.contents()[start..end]
    }

    pub fn file(&self) -> &str {
        self.source.file()
    }

    /// 1-based line and column one past the last character.
    pub fn end_line_col(&self) -> (u32, u32) {
        self.source.line_col(self.end)
    }

    pub fn message(&self, kind: &str, msg: &str) -> String {
        self.source.message(self.line, self.col, kind, msg)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX: usize = 32;
        let text: String = self.text().escape_debug().collect();
        let mut shown: String = text.chars().take(MAX).collect();
        if shown.len() < text.len() {
            shown.push_str("...");
        }
        write!(
            f,
            "{}:{}:{}:{}, \"{shown}\"",
            self.line, self.col, self.start, self.end
        )
    }
}
