//! Line-oriented source builder
//!
//! Renderers emit an ordered list of lines at an explicit indentation
//! level; the lines are joined once at the end. Caller text is never
//! scanned for placeholders, so snippets cannot collide with the template.

/// Ordered list of emitted source lines
#[derive(Debug, Clone)]
pub struct SourceBuilder {
    lines: Vec<String>,
    level: usize,
    unit: &'static str,
}

impl SourceBuilder {
    /// New builder indenting with `unit` per level
    pub fn new(unit: &'static str) -> Self {
        Self {
            lines: Vec::new(),
            level: 0,
            unit,
        }
    }

    /// Emit one line at the current indentation
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.unit.repeat(self.level), text));
        }
        self
    }

    /// Emit an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Emit a possibly multi-line snippet verbatim, re-indented to the
    /// current level (relative indentation inside the snippet is kept)
    pub fn snippet(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Join all lines with `\n`, dropping trailing blank lines and ending
    /// with exactly one newline
    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indentation() {
        let mut out = SourceBuilder::new("    ");
        out.line("class A:");
        out.indent().line("def f(self):");
        out.indent().line("pass");
        out.dedent().dedent().blank().line("x = 1");
        assert_eq!(out.finish(), "class A:\n    def f(self):\n        pass\n\nx = 1\n");
    }

    #[test]
    fn test_snippet_keeps_relative_indentation() {
        let mut out = SourceBuilder::new("  ");
        out.indent();
        out.snippet("if (x) {\n  y();\r\n\n}");
        assert_eq!(out.finish(), "  if (x) {\n    y();\n\n  }\n");
    }

    #[test]
    fn test_trailing_blanks_dropped() {
        let mut out = SourceBuilder::new("\t");
        out.line("a").blank().blank();
        assert_eq!(out.finish(), "a\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut out = SourceBuilder::new("    ");
        out.dedent().line("top");
        assert_eq!(out.finish(), "top\n");
    }
}
