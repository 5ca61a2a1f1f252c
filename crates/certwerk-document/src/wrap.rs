// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Width-based word wrapping shared by the backends.

/// Wrap `text` so that no line is wider than `max_width`, as measured by
/// `measure`.
///
/// Splits on existing newlines first, then performs greedy word-wrap within
/// each paragraph. Words wider than `max_width` on their own are force-broken
/// between characters.
pub fn wrap_to_width(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();

        for word in words {
            if measure(word) > max_width {
                // Flush any accumulated line.
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                // Force-break the oversized word.
                for c in word.chars() {
                    current_line.push(c);
                    if current_line.chars().count() > 1 && measure(&current_line) > max_width {
                        current_line.pop();
                        result.push(std::mem::take(&mut current_line));
                        current_line.push(c);
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
            } else {
                let candidate = format!("{current_line} {word}");
                if measure(&candidate) <= max_width {
                    current_line = candidate;
                } else {
                    result.push(std::mem::replace(&mut current_line, word.to_owned()));
                }
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character.
    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_to_width("in 15 days", 40.0, chars), vec!["in 15 days"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_to_width("the quick brown fox jumps", 11.0, chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|line| chars(line) <= 11.0));
    }

    #[test]
    fn oversized_words_are_force_broken() {
        let lines = wrap_to_width("ab abcdefghij", 4.0, chars);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_paragraphs_are_kept() {
        assert_eq!(wrap_to_width("a\n\nb", 10.0, chars), vec!["a", "", "b"]);
    }
}
