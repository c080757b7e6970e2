// SPDX-License-Identifier: Apache-2.0

//! Pure delimiter scanning over a window of units.
//!
//! Nothing here knows about buffers or refills: each function looks at one
//! slice and reports positions relative to its start.

/// How the delimiter units are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterMode {
    /// Every unit is a delimiter on its own.
    MatchAny,
    /// The units form one literal sequence that must match in full.
    MatchExact,
}

/// Delimiter units together with their interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters<'d, U> {
    units: &'d [U],
    mode: DelimiterMode,
}

/// Result of scanning one window for the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A token occupies `start..end`, and a delimiter begins at `end`.
    Complete { start: usize, end: usize },
    /// A token begins at `start` but the window ends before its delimiter.
    Incomplete { start: usize },
    /// The window holds nothing but whole delimiters.
    NoToken,
}

impl<'d, U: PartialEq> Delimiters<'d, U> {
    pub fn new(units: &'d [U], mode: DelimiterMode) -> Self {
        Self { units, mode }
    }

    /// A set of single-unit delimiters.
    pub fn any(units: &'d [U]) -> Self {
        Self::new(units, DelimiterMode::MatchAny)
    }

    /// One literal delimiter sequence.
    pub fn exact(units: &'d [U]) -> Self {
        Self::new(units, DelimiterMode::MatchExact)
    }

    pub fn units(&self) -> &'d [U] {
        self.units
    }

    pub fn mode(&self) -> DelimiterMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Where the next token would start, skipping leading delimiters.
    pub fn token_start(&self, window: &[U]) -> Option<usize> {
        match self.mode {
            DelimiterMode::MatchAny => index_after_any(self.units, window),
            DelimiterMode::MatchExact => index_after(self.units, window),
        }
    }

    /// Find the bounds of the next token in `window`.
    pub fn scan(&self, window: &[U]) -> ScanOutcome {
        let Some(start) = self.token_start(window) else {
            return ScanOutcome::NoToken;
        };
        let rest = window.get(start..).unwrap_or(&[]);
        let found = match self.mode {
            DelimiterMode::MatchAny => index_of_any(self.units, rest),
            DelimiterMode::MatchExact => index_of(self.units, rest),
        };
        match found {
            Some(offset) => ScanOutcome::Complete {
                start,
                end: start + offset,
            },
            None => ScanOutcome::Incomplete { start },
        }
    }
}

/// First position whose unit is not in `delimiters`.
pub fn index_after_any<U: PartialEq>(delimiters: &[U], window: &[U]) -> Option<usize> {
    window.iter().position(|unit| !delimiters.contains(unit))
}

/// First position whose unit is in `delimiters`.
pub fn index_of_any<U: PartialEq>(delimiters: &[U], window: &[U]) -> Option<usize> {
    window.iter().position(|unit| delimiters.contains(unit))
}

/// First position after any run of whole `delimiter` occurrences at the
/// start of `window`. A trailing partial occurrence is not skipped.
pub fn index_after<U: PartialEq>(delimiter: &[U], window: &[U]) -> Option<usize> {
    if delimiter.is_empty() {
        return if window.is_empty() { None } else { Some(0) };
    }
    let mut pos = 0;
    while window
        .get(pos..)
        .is_some_and(|rest| rest.starts_with(delimiter))
    {
        pos += delimiter.len();
    }
    if pos < window.len() {
        Some(pos)
    } else {
        None
    }
}

/// First position where all of `delimiter` occurs in `window`.
pub fn index_of<U: PartialEq>(delimiter: &[U], window: &[U]) -> Option<usize> {
    if delimiter.is_empty() || delimiter.len() > window.len() {
        return None;
    }
    window
        .windows(delimiter.len())
        .position(|candidate| candidate == delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_after_any() {
        assert_eq!(index_after_any(b" ,", b"  , ab"), Some(4));
        assert_eq!(index_after_any(b" ,", b"ab"), Some(0));
        assert_eq!(index_after_any(b" ,", b" , ,"), None);
        assert_eq!(index_after_any(b" ,", b""), None);
    }

    #[test]
    fn test_index_of_any() {
        assert_eq!(index_of_any(b" ,", b"ab,c"), Some(2));
        assert_eq!(index_of_any(b" ,", b"abc"), None);
    }

    #[test]
    fn test_index_after_skips_whole_runs_only() {
        assert_eq!(index_after(b"::", b"::::a"), Some(4));
        assert_eq!(index_after(b"::", b":::a"), Some(2));
        assert_eq!(index_after(b"::", b"a::"), Some(0));
        assert_eq!(index_after(b"::", b"::::"), None);
        // A trailing partial delimiter is a candidate start, not a skip
        assert_eq!(index_after(b"::", b":::"), Some(2));
        assert_eq!(index_after(b"::", b":"), Some(0));
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(b"::", b"a::b"), Some(1));
        assert_eq!(index_of(b"::", b"a:b:"), None);
        assert_eq!(index_of(b"::", b":"), None);
        assert_eq!(index_of(b"abc", b"ababc"), Some(2));
    }

    #[test]
    fn test_scan_match_any() {
        let delimiters = Delimiters::any(&b" \t"[..]);
        assert_eq!(
            delimiters.scan(b"  foo bar"),
            ScanOutcome::Complete { start: 2, end: 5 }
        );
        assert_eq!(
            delimiters.scan(b"\tfoo"),
            ScanOutcome::Incomplete { start: 1 }
        );
        assert_eq!(delimiters.scan(b" \t \t"), ScanOutcome::NoToken);
        assert_eq!(delimiters.scan(b""), ScanOutcome::NoToken);
    }

    #[test]
    fn test_scan_match_exact() {
        let delimiters = Delimiters::exact(&b"::"[..]);
        assert_eq!(
            delimiters.scan(b"a::b::c"),
            ScanOutcome::Complete { start: 0, end: 1 }
        );
        assert_eq!(
            delimiters.scan(b"::b::c"),
            ScanOutcome::Complete { start: 2, end: 3 }
        );
        assert_eq!(delimiters.scan(b"::c"), ScanOutcome::Incomplete { start: 2 });
        assert_eq!(delimiters.scan(b"::::"), ScanOutcome::NoToken);
        // The window may end halfway through a delimiter
        assert_eq!(delimiters.scan(b"ab:"), ScanOutcome::Incomplete { start: 0 });
    }

    #[test]
    fn test_scan_chars() {
        let text: Vec<char> = "α→β→γ".chars().collect();
        let arrow = ['→'];
        let delimiters = Delimiters::any(&arrow[..]);
        assert_eq!(
            delimiters.scan(&text),
            ScanOutcome::Complete { start: 0, end: 1 }
        );
        assert_eq!(delimiters.token_start(&text[1..]), Some(1));
    }
}
