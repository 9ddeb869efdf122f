//! Line metrics for font fitting

/// Shape of a text block as seen by the font fitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// Length of the longest line, in chars
    pub longest_line: usize,

    /// Number of lines
    pub line_count: usize,
}

impl TextMetrics {
    /// Measure a candidate text block.
    ///
    /// Trailing whitespace is ignored so a final newline does not count as an
    /// extra (empty) line.
    pub fn measure(text: &str) -> Self {
        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            return Self::empty();
        }

        let mut longest_line = 0;
        let mut line_count = 0;
        for line in trimmed.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            longest_line = longest_line.max(line.chars().count());
            line_count += 1;
        }

        Self { longest_line, line_count }
    }

    pub fn empty() -> Self {
        Self { longest_line: 0, line_count: 0 }
    }

    /// True when there is nothing to fit
    pub fn is_empty(&self) -> bool {
        self.longest_line == 0 || self.line_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_multiline_art() {
        let art = "\n╭─────╮\n│ ◉ ◉ │\n╰─────╯\n  lemontine.exe\n";
        let m = TextMetrics::measure(art);
        // Leading newline is kept as an empty first line
        assert_eq!(m.line_count, 5);
        assert_eq!(m.longest_line, 15);
    }

    #[test]
    fn test_measure_ignores_trailing_whitespace() {
        let m = TextMetrics::measure("abc\nde\n\n   \n");
        assert_eq!(m, TextMetrics { longest_line: 3, line_count: 2 });
    }

    #[test]
    fn test_measure_crlf() {
        let m = TextMetrics::measure("ab\r\ncd\r\n");
        assert_eq!(m, TextMetrics { longest_line: 2, line_count: 2 });
    }

    #[test]
    fn test_measure_empty() {
        assert!(TextMetrics::measure("").is_empty());
        assert!(TextMetrics::measure(" \n\t").is_empty());
    }
}
