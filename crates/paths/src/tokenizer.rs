use std::path::MAIN_SEPARATOR;

/// Characters that never count as path "content" when looking for the
/// first and last meaningful character of a path string.
const NON_CONTENT_CHARS: &[char] = &[
    '/', '\\', '.', '&', '!', '%', '$', '#', '@', '^', '*', '(', ')', '-', '_', '+', '=', '[',
    '{', ']', '}', '|', '<', '>', ',', '~', '`', ':', ';', '"', '\'', '\n', '\t', '\r',
];

/// Lexical breakdown of a single path string.
///
/// All indices are byte offsets into [`PathTokens::as_str`], which is the
/// input with every `/` and `\` rewritten to the host separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTokens {
    normalized: String,
    volume_len: usize,
    separators: Vec<usize>,
    dots: Vec<usize>,
    first_content: Option<usize>,
    last_content: Option<usize>,
}

impl PathTokens {
    pub fn scan(raw: &str) -> Self {
        let normalized = normalize_separators(raw);
        let volume_len = volume_name(&normalized).len();

        let mut separators = Vec::new();
        let mut dots = Vec::new();
        let mut first_content = None;
        let mut last_content = None;

        for (i, c) in normalized.char_indices() {
            if is_separator(c) {
                separators.push(i);
            } else if c == '.' {
                dots.push(i);
            }

            // The volume prefix never contributes content.
            if i >= volume_len && is_content_char(c) {
                first_content.get_or_insert(i);
                last_content = Some(i);
            }
        }

        Self {
            normalized,
            volume_len,
            separators,
            dots,
            first_content,
            last_content,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Leading drive designator such as `C:`, or `""`.
    #[inline]
    pub fn volume(&self) -> &str {
        &self.normalized[..self.volume_len]
    }

    /// True when the whole string is nothing but its volume prefix.
    #[inline]
    pub fn is_volume_only(&self) -> bool {
        self.volume_len > 0 && self.volume_len == self.normalized.len()
    }

    #[inline]
    pub fn separators(&self) -> &[usize] {
        &self.separators
    }

    #[inline]
    pub fn dots(&self) -> &[usize] {
        &self.dots
    }

    #[inline]
    pub fn first_content(&self) -> Option<usize> {
        self.first_content
    }

    #[inline]
    pub fn last_content(&self) -> Option<usize> {
        self.last_content
    }

    #[inline]
    pub fn last_separator(&self) -> Option<usize> {
        self.separators.last().copied()
    }

    #[inline]
    pub fn last_dot(&self) -> Option<usize> {
        self.dots.last().copied()
    }

    pub fn ends_with_separator(&self) -> bool {
        self.normalized.chars().next_back().is_some_and(is_separator)
    }

    /// Start of the run of content characters that ends at `last_content`.
    pub fn final_content_run_start(&self) -> Option<usize> {
        let last = self.last_content?;
        let start = self.normalized[..last]
            .char_indices()
            .rev()
            .find(|&(_, c)| !is_content_char(c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        Some(start.max(self.volume_len))
    }
}

/// Drive-letter prefix (`X:`) at the start of `s`, matched literally on
/// every platform.
pub fn volume_name(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &s[..2]
    } else {
        ""
    }
}

#[inline]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[inline]
pub fn is_content_char(c: char) -> bool {
    !NON_CONTENT_CHARS.contains(&c)
}

pub(crate) fn normalize_separators(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_separator(c) { MAIN_SEPARATOR } else { c })
        .collect()
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
