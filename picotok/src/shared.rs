// SPDX-License-Identifier: Apache-2.0

use crate::scan_engine::EngineConfig;
use crate::token::{Positioned, TokenPolicy};

/// Smallest scan buffer a streaming parser accepts.
pub const MIN_BUFFER_CAPACITY: usize = 128;

/// A reasonable buffer size for general text. Nothing reads this value
/// implicitly; pass it when allocating the buffer if it suits.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32 * 1024;

/// Refill as soon as the unconsumed window is empty.
pub const DEFAULT_REFILL_THRESHOLD: usize = 1;

/// Construction-time settings for a [`StreamParser`](crate::StreamParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Minimum unconsumed units before a proactive refill.
    pub refill_threshold: usize,
    pub policy: TokenPolicy,
}

impl ParserConfig {
    pub fn with_policy(policy: TokenPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            refill_threshold: self.refill_threshold,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
            policy: TokenPolicy::default(),
        }
    }
}

/// Handed to a parse callback so it can end the loop.
///
/// A stop request takes effect after the current delivery; no scan is ever
/// interrupted halfway.
#[derive(Debug, Default)]
pub struct ParseControl {
    stopped: bool,
    delivered: usize,
}

impl ParseControl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request that no further tokens be delivered.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Tokens delivered so far, including the current one.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub(crate) fn record_delivery(&mut self) {
        self.delivered = self.delivered.saturating_add(1);
    }
}

/// Trait for tokenizers that can be used in a pull-based manner.
///
/// This trait is implemented by both `Tokenizer` and `StreamParser`.
pub trait PullTokenizer {
    /// The handle a token is delivered in. It may borrow the tokenizer.
    type Token<'a>: Positioned
    where
        Self: 'a;

    type Error;

    /// Returns the next token, or `None` once the input has no more.
    fn next_token(&mut self) -> Result<Option<Self::Token<'_>>, Self::Error>;

    /// Iterator-like method that returns None when tokenizing is complete,
    /// Some(Ok(token)) for tokens and Some(Err(error)) for failures.
    fn next(&mut self) -> Option<Result<Self::Token<'_>, Self::Error>> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.refill_threshold, 1);
        assert_eq!(config.policy, TokenPolicy::Fresh);
        assert_eq!(config.engine_config(), EngineConfig::default());

        let reuse = ParserConfig::with_policy(TokenPolicy::Reuse);
        assert_eq!(reuse.policy, TokenPolicy::Reuse);
        assert_eq!(reuse.refill_threshold, DEFAULT_REFILL_THRESHOLD);
    }

    #[test]
    fn test_parse_control() {
        let mut control = ParseControl::new();
        assert!(!control.is_stopped());
        control.record_delivery();
        control.record_delivery();
        control.stop();
        assert!(control.is_stopped());
        assert_eq!(control.delivered(), 2);
    }
}
