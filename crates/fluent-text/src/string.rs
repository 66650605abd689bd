//! Convenience methods on `str`.
//!
//! Indices and lengths are in grapheme clusters. Lookups that fall outside
//! the string return `None`.

use icu_normalizer::DecomposingNormalizerBorrowed;
use icu_properties::CodePointMapData;
use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use unicode_segmentation::UnicodeSegmentation;

use crate::graphemes::{grapheme_at, grapheme_byte_range};

pub trait StrExt {
    /// Text between the first `left` and the last `right`.
    ///
    /// `None` when either bookend is missing, both are equal, or they touch.
    fn between(&self, left: &str, right: &str) -> Option<String>;
    /// `"foo-bar_baz qux"` becomes `"fooBarBazQux"`.
    fn camelize(&self) -> String;
    /// Uppercase the first letter of every word and lowercase the rest.
    fn capitalize(&self) -> String;
    /// Text after the first `prefix`, or before it when `prefix` ends the string.
    fn chomp_left(&self, prefix: &str) -> String;
    /// Text before the last `suffix`, or after it when `suffix` is not at the end.
    fn chomp_right(&self, suffix: &str) -> String;
    fn collapse_whitespace(&self) -> String;
    /// Replace every occurrence of each target with `with`.
    fn clean(&self, with: &str, all_of: &[&str]) -> String;
    fn count_occurrences(&self, substring: &str) -> usize;
    fn ensure_left(&self, prefix: &str) -> String;
    fn ensure_right(&self, suffix: &str) -> String;
    /// Grapheme index of the first occurrence of `substring`.
    fn index_of(&self, substring: &str) -> Option<usize>;
    /// First character of every space-separated word.
    fn initials(&self) -> String;
    /// First character of the first and last words.
    fn initials_first_and_last(&self) -> String;
    /// ASCII letters only.
    fn is_alpha(&self) -> bool;
    fn is_alphanumeric(&self) -> bool;
    /// Empty or whitespace only.
    fn is_blank(&self) -> bool;
    fn is_numeric(&self) -> bool;
    /// Contains something shaped like `local@domain.tld`.
    fn is_email(&self) -> bool;
    /// Strip diacritics: `"Crème Brûlée"` becomes `"Creme Brulee"`.
    fn latinize(&self) -> String;
    /// Split on every newline character; `"\r\n"` yields an empty line between.
    fn lines_vec(&self) -> Vec<String>;
    fn pad(&self, n: usize, with: &str) -> String;
    fn pad_left(&self, n: usize, with: &str) -> String;
    fn pad_right(&self, n: usize, with: &str) -> String;
    /// Latinized, lowercased ASCII words joined by `separator`.
    fn slugify(&self, separator: char) -> String;
    fn strip_punctuation(&self) -> String;
    fn times(&self, n: usize) -> String;
    /// `"true"`/`"false"` in any case, surrounding whitespace ignored.
    fn to_bool(&self) -> Option<bool>;
    /// Parsed number truncated toward zero.
    fn to_int(&self) -> Option<i64>;
    fn to_double(&self) -> Option<f64>;
    fn substring(&self, start: usize, len: usize) -> Option<String>;
    fn grapheme_at(&self, index: usize) -> Option<&str>;
}

impl StrExt for str {
    fn between(&self, left: &str, right: &str) -> Option<String> {
        if left == right {
            return None;
        }
        let start = self.find(left)? + left.len();
        let end = self.rfind(right)?;
        if start >= end {
            return None;
        }
        Some(self[start..end].to_string())
    }

    fn camelize(&self) -> String {
        let source = self.clean(" ", &["-", "_"]);
        let Some(first) = source.graphemes(true).next() else {
            return String::new();
        };
        if source.contains(' ') {
            let joined: String = source.capitalize().split(' ').collect();
            let rest: String = joined.graphemes(true).skip(1).collect();
            format!("{first}{rest}")
        } else {
            format!("{}{}", first.to_lowercase(), &source[first.len()..])
        }
    }

    fn capitalize(&self) -> String {
        let mut out = String::with_capacity(self.len());
        let mut at_word_start = true;
        for ch in self.chars() {
            if ch.is_whitespace() {
                at_word_start = true;
                out.push(ch);
            } else if at_word_start {
                at_word_start = false;
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
        }
        out
    }

    fn chomp_left(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            return self.to_string();
        }
        match self.find(prefix) {
            Some(start) if start + prefix.len() >= self.len() => self[..start].to_string(),
            Some(start) => self[start + prefix.len()..].to_string(),
            None => self.to_string(),
        }
    }

    fn chomp_right(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            return self.to_string();
        }
        match self.rfind(suffix) {
            Some(start) if start + suffix.len() >= self.len() => self[..start].to_string(),
            Some(start) => self[start + suffix.len()..].to_string(),
            None => self.to_string(),
        }
    }

    fn collapse_whitespace(&self) -> String {
        self.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn clean(&self, with: &str, all_of: &[&str]) -> String {
        all_of
            .iter()
            .filter(|target| !target.is_empty())
            .fold(self.to_string(), |acc, target| acc.replace(target, with))
    }

    fn count_occurrences(&self, substring: &str) -> usize {
        if substring.is_empty() {
            return 0;
        }
        self.matches(substring).count()
    }

    fn ensure_left(&self, prefix: &str) -> String {
        if self.starts_with(prefix) {
            self.to_string()
        } else {
            format!("{prefix}{self}")
        }
    }

    fn ensure_right(&self, suffix: &str) -> String {
        if self.ends_with(suffix) {
            self.to_string()
        } else {
            format!("{self}{suffix}")
        }
    }

    fn index_of(&self, substring: &str) -> Option<usize> {
        if substring.is_empty() {
            return None;
        }
        let byte = self.find(substring)?;
        Some(self[..byte].graphemes(true).count())
    }

    fn initials(&self) -> String {
        self.split(' ')
            .filter_map(|word| word.graphemes(true).next())
            .collect()
    }

    fn initials_first_and_last(&self) -> String {
        let firsts: Vec<&str> = self
            .split(' ')
            .filter_map(|word| word.graphemes(true).next())
            .collect();
        match firsts.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [first, .., last] => format!("{first}{last}"),
        }
    }

    fn is_alpha(&self) -> bool {
        self.chars().all(|c| c.is_ascii_alphabetic())
    }

    fn is_alphanumeric(&self) -> bool {
        self.chars().all(char::is_alphanumeric)
    }

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn is_numeric(&self) -> bool {
        self.to_double().is_some()
    }

    fn is_email(&self) -> bool {
        let bytes = self.as_bytes();
        bytes.iter().enumerate().any(|(at, &b)| {
            b == b'@'
                && at > 0
                && is_email_local(bytes[at - 1])
                && has_email_domain(&bytes[at + 1..])
        })
    }

    fn latinize(&self) -> String {
        let gc = CodePointMapData::<GeneralCategory>::new();
        DecomposingNormalizerBorrowed::new_nfd()
            .normalize(self)
            .chars()
            .filter(|&c| !GeneralCategoryGroup::Mark.contains(gc.get(c)))
            .collect()
    }

    fn lines_vec(&self) -> Vec<String> {
        self.split(is_newline).map(str::to_string).collect()
    }

    fn pad(&self, n: usize, with: &str) -> String {
        let padding = with.times(n);
        format!("{padding}{self}{padding}")
    }

    fn pad_left(&self, n: usize, with: &str) -> String {
        format!("{}{self}", with.times(n))
    }

    fn pad_right(&self, n: usize, with: &str) -> String {
        format!("{self}{}", with.times(n))
    }

    fn slugify(&self, separator: char) -> String {
        let sep = separator.to_string();
        self.latinize()
            .to_lowercase()
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == separator))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(&sep)
    }

    fn strip_punctuation(&self) -> String {
        let gc = CodePointMapData::<GeneralCategory>::new();
        let stripped: String = self
            .chars()
            .filter(|&c| !GeneralCategoryGroup::Punctuation.contains(gc.get(c)))
            .collect();
        stripped
            .split(' ')
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn times(&self, n: usize) -> String {
        self.repeat(n)
    }

    fn to_bool(&self) -> Option<bool> {
        match self.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_int(&self) -> Option<i64> {
        let value = self.to_double()?.trunc();
        if value < i64::MIN as f64 || value > i64::MAX as f64 {
            return None;
        }
        Some(value as i64)
    }

    fn to_double(&self) -> Option<f64> {
        let trimmed = self.trim();
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn substring(&self, start: usize, len: usize) -> Option<String> {
        grapheme_byte_range(self, start, len).map(|range| self[range].to_string())
    }

    fn grapheme_at(&self, index: usize) -> Option<&str> {
        grapheme_at(self, index)
    }
}

fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_email_local(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_email_domain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

// `[A-Za-z0-9.-]+\.[A-Za-z]{2,}` at the start of `rest`.
fn has_email_domain(rest: &[u8]) -> bool {
    let run = rest.iter().take_while(|&&b| is_email_domain(b)).count();
    let domain = &rest[..run];
    (1..domain.len()).any(|dot| {
        domain[dot] == b'.'
            && domain.len() >= dot + 3
            && domain[dot + 1].is_ascii_alphabetic()
            && domain[dot + 2].is_ascii_alphabetic()
    })
}
