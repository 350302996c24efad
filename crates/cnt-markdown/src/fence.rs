//! Code fence detection.
//!
//! Container fences inside fenced code blocks are never interpreted, so the
//! line scan skips fenced code before looking for `:::` lines.

/// Opening code fence: backticks or tildes, three or more.
///
/// The closing fence must use the same character and be at least as long
/// as the opening fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence {
    fence_char: char,
    fence_len: usize,
}

impl Fence {
    /// Detect an opening fence line.
    pub(crate) fn open(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let fence_char = trimmed.chars().next()?;
        if fence_char != '`' && fence_char != '~' {
            return None;
        }

        let fence_len = trimmed.chars().take_while(|&c| c == fence_char).count();
        if fence_len < 3 {
            return None;
        }

        // Backtick fences cannot carry backticks in their info string
        if fence_char == '`' && trimmed[fence_len..].contains('`') {
            return None;
        }

        Some(Self {
            fence_char,
            fence_len,
        })
    }

    /// Check whether a line closes this fence.
    ///
    /// The closing fence must contain only fence characters, optionally
    /// followed by whitespace.
    pub(crate) fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let count = trimmed
            .chars()
            .take_while(|&c| c == self.fence_char)
            .count();
        if count < self.fence_len {
            return false;
        }

        trimmed[count..].chars().all(char::is_whitespace)
    }
}
