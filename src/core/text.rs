use crate::core::metrics::{FontId, FontMetrics};

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line. Within a paragraph words are
/// packed greedily: a word joins the current line while the measured width of
/// the joined line stays within `max_width`, otherwise the line is flushed and
/// the word starts the next one. A word wider than `max_width` gets a line of
/// its own and overflows; words are never split.
///
/// Always returns at least one line.
pub fn break_lines<M: FontMetrics + ?Sized>(
    text: &str,
    max_width: f64,
    font: FontId,
    size: f64,
    metrics: &M,
) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut buffer: Vec<&str> = Vec::new();

        for word in paragraph.split_whitespace() {
            buffer.push(word);
            if buffer.len() == 1 {
                continue;
            }

            let candidate = buffer.join(" ");
            if metrics.string_width(&candidate, font, size) > max_width {
                buffer.pop();
                lines.push(buffer.join(" "));
                buffer.clear();
                buffer.push(word);
            }
        }

        lines.push(buffer.join(" "));
    }

    lines
}

/// Height of `line_count` lines: the first takes one line height, every
/// following line an extra `line_height * line_spacing` on top.
pub fn text_height(line_count: usize, line_height: f64, line_spacing: f64) -> f64 {
    if line_count == 0 {
        return 0.0;
    }
    let extra = (line_count - 1) as f64;
    line_count as f64 * line_height + extra * line_height * line_spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FixedMetrics;

    const METRICS: FixedMetrics = FixedMetrics { advance: 1.0, line_height: 1.0 };

    #[test]
    fn test_short_text_is_one_line() {
        let lines = break_lines("Hello world", 200.0, FontId(0), 10.0, &METRICS);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_wraps_greedily() {
        // Every char is 10pt wide at size 10
        let lines = break_lines("aa bb cc dd", 40.0, FontId(0), 10.0, &METRICS);
        assert_eq!(lines, vec!["aa", "bb", "cc", "dd"]);

        let lines = break_lines("aa bb cc dd", 70.0, FontId(0), 10.0, &METRICS);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn test_wrapping_preserves_words() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = break_lines(text, 120.0, FontId(0), 10.0, &METRICS);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(METRICS.string_width(line, FontId(0), 10.0) <= 120.0, "{:?} too wide", line);
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_oversized_word_overflows_on_its_own_line() {
        let lines = break_lines("a verylongword b", 50.0, FontId(0), 10.0, &METRICS);
        assert_eq!(lines, vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = break_lines("first\nsecond line", 1000.0, FontId(0), 10.0, &METRICS);
        assert_eq!(lines, vec!["first", "second line"]);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        assert_eq!(break_lines("", 50.0, FontId(0), 10.0, &METRICS), vec![String::new()]);
    }

    #[test]
    fn test_text_height() {
        assert_eq!(text_height(0, 10.0, 1.0), 0.0);
        assert_eq!(text_height(1, 10.0, 1.0), 10.0);
        assert_eq!(text_height(3, 10.0, 0.5), 30.0 + 2.0 * 5.0);
    }
}
