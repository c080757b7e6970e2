// SPDX-License-Identifier: Apache-2.0

//! Token descriptors and the handles they are delivered in.
//!
//! A [`Token`] is an offset and a length into some source, plus an optional
//! type tag. What "source" means is abstracted by [`TokenSource`]:
//!
//! - `&[U]` for fully resident input (origin 0)
//! - [`Window`] for a borrowed view of a streaming buffer, whose origin is the
//!   absolute stream position of the first buffered unit
//! - [`Detached`] for an owned copy of exactly one token's units
//!
//! Because windows and detached copies carry an origin, token indices are
//! always positions in the *logical* input, no matter how it was buffered.

use alloc::vec::Vec;

use crate::parse_error::ArgumentError;

/// Anything that covers a contiguous range of a source.
pub trait Positioned {
    /// Offset of the first unit.
    fn index(&self) -> usize;
    /// Number of units covered.
    fn length(&self) -> usize;
    /// Exclusive end offset.
    fn end(&self) -> usize {
        self.index().saturating_add(self.length())
    }
}

/// Access to the source a token refers to.
pub trait Sourced<S> {
    fn source(&self) -> &S;
}

/// Access to the units a token covers, without copying.
pub trait Valued<U> {
    fn value(&self) -> &[U];
}

/// Storage that tokens index into.
pub trait TokenSource<U> {
    /// Logical position of `units()[0]`.
    fn origin(&self) -> usize {
        0
    }

    /// The units held by this source.
    fn units(&self) -> &[U];

    /// One past the last logical position this source can resolve.
    fn bound(&self) -> usize {
        self.origin().saturating_add(self.units().len())
    }

    /// Resolve a logical range to the units it covers.
    fn span(&self, index: usize, length: usize) -> Option<&[U]> {
        let start = index.checked_sub(self.origin())?;
        let end = start.checked_add(length)?;
        self.units().get(start..end)
    }
}

impl<U> TokenSource<U> for &[U] {
    fn units(&self) -> &[U] {
        self
    }
}

/// A borrowed view of a scan buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a, U> {
    origin: usize,
    units: &'a [U],
}

impl<'a, U> Window<'a, U> {
    pub fn new(origin: usize, units: &'a [U]) -> Self {
        Self { origin, units }
    }
}

impl<U> TokenSource<U> for Window<'_, U> {
    fn origin(&self) -> usize {
        self.origin
    }

    fn units(&self) -> &[U] {
        self.units
    }
}

/// An owned copy of a token's units, detached from the buffer it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Detached<U> {
    origin: usize,
    units: Vec<U>,
}

impl<U> Detached<U> {
    pub fn new(origin: usize, units: Vec<U>) -> Self {
        Self { origin, units }
    }

    /// Take the copied units out.
    pub fn into_units(self) -> Vec<U> {
        self.units
    }
}

impl<U> TokenSource<U> for Detached<U> {
    fn origin(&self) -> usize {
        self.origin
    }

    fn units(&self) -> &[U] {
        &self.units
    }
}

/// A descriptor of a contiguous range within a source.
///
/// Invariant: `source.origin() <= index` and `index + length <= source.bound()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<S, K = ()> {
    kind: Option<K>,
    source: S,
    index: usize,
    length: usize,
}

/// A token over fully resident input.
pub type SliceToken<'s, U, K = ()> = Token<&'s [U], K>;

/// A token over a streaming buffer, valid until the next parse call.
pub type WindowToken<'a, U, K = ()> = Token<Window<'a, U>, K>;

/// A token that owns a copy of its units.
pub type DetachedToken<U, K = ()> = Token<Detached<U>, K>;

impl<S, K> Token<S, K> {
    /// Create an untyped token, checking that the range fits the source.
    pub fn new<U>(source: S, index: usize, length: usize) -> Result<Self, ArgumentError>
    where
        S: TokenSource<U>,
    {
        Self::typed(None, source, index, length)
    }

    /// Create a token with an optional type tag.
    pub fn typed<U>(
        kind: Option<K>,
        source: S,
        index: usize,
        length: usize,
    ) -> Result<Self, ArgumentError>
    where
        S: TokenSource<U>,
    {
        if source.span(index, length).is_none() {
            return Err(ArgumentError::InvalidRange {
                index,
                length,
                bound: source.bound(),
            });
        }
        Ok(Self {
            kind,
            source,
            index,
            length,
        })
    }

    /// Build a token whose range the caller has already checked.
    pub(crate) fn from_raw(source: S, index: usize, length: usize) -> Self {
        Self {
            kind: None,
            source,
            index,
            length,
        }
    }

    /// Overwrite every field in place. Used by the reusable token slot.
    pub(crate) fn overwrite(&mut self, source: S, index: usize, length: usize) {
        self.kind = None;
        self.source = source;
        self.index = index;
        self.length = length;
    }

    /// The type tag, if one was assigned.
    pub fn kind(&self) -> Option<&K> {
        self.kind.as_ref()
    }

    /// Replace the type tag.
    pub fn with_kind<K2>(self, kind: K2) -> Token<S, K2> {
        Token {
            kind: Some(kind),
            source: self.source,
            index: self.index,
            length: self.length,
        }
    }

    /// Copy the covered units out.
    pub fn to_vec<U: Clone>(&self) -> Vec<U>
    where
        S: TokenSource<U>,
    {
        self.value().to_vec()
    }
}

impl<'s, U, K> Token<&'s [U], K> {
    /// The covered units, borrowed for the full lifetime of the source.
    pub fn as_slice(&self) -> &'s [U] {
        self.source
            .get(self.index..self.index.saturating_add(self.length))
            .unwrap_or(&[])
    }
}

impl<'a, U: Clone, K> Token<Window<'a, U>, K> {
    /// Copy the covered units so the token outlives the buffer.
    pub fn detach(&self) -> Token<Detached<U>, K>
    where
        K: Clone,
    {
        let units = self.source.span(self.index, self.length).unwrap_or(&[]);
        Token {
            kind: self.kind.clone(),
            source: Detached::new(self.index, units.to_vec()),
            index: self.index,
            length: self.length,
        }
    }
}

impl<S, K> Positioned for Token<S, K> {
    fn index(&self) -> usize {
        self.index
    }

    fn length(&self) -> usize {
        self.length
    }
}

impl<S, K> Sourced<S> for Token<S, K> {
    fn source(&self) -> &S {
        &self.source
    }
}

impl<U, S: TokenSource<U>, K> Valued<U> for Token<S, K> {
    fn value(&self) -> &[U] {
        self.source.span(self.index, self.length).unwrap_or(&[])
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn index(&self) -> usize {
        (**self).index()
    }

    fn length(&self) -> usize {
        (**self).length()
    }
}

impl<U, T: Valued<U> + ?Sized> Valued<U> for &T {
    fn value(&self) -> &[U] {
        (**self).value()
    }
}

/// How a tokenizer hands out the tokens it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// A new token per match. Safe to keep indefinitely.
    #[default]
    Fresh,
    /// One token slot, overwritten on every match. The handle borrows the
    /// tokenizer, so it cannot be held across the next call.
    Reuse,
}

/// A delivered token: either owned outright, or borrowed from the
/// tokenizer's reusable slot together with the slot's generation.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenHandle<O, B> {
    /// Independent of the producer.
    Owned(O),
    /// Valid until the producer is called again. `generation` increases by
    /// one on every overwrite of the slot.
    Borrowed { token: B, generation: u64 },
}

/// Handle produced by [`Tokenizer`](crate::Tokenizer).
pub type SliceHandle<'a, 's, U> = TokenHandle<SliceToken<'s, U>, &'a SliceToken<'s, U>>;

/// Handle produced by [`StreamParser`](crate::StreamParser).
pub type StreamHandle<'a, U> = TokenHandle<DetachedToken<U>, WindowToken<'a, U>>;

impl<O, B> TokenHandle<O, B> {
    /// True when the token lives in a reusable slot.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, TokenHandle::Borrowed { .. })
    }

    /// Generation of the reusable slot, if borrowed.
    pub fn generation(&self) -> Option<u64> {
        match self {
            TokenHandle::Owned(_) => None,
            TokenHandle::Borrowed { generation, .. } => Some(*generation),
        }
    }
}

impl<'a, S: Clone, K: Clone> TokenHandle<Token<S, K>, &'a Token<S, K>> {
    /// Turn the handle into a token that can be kept.
    pub fn into_owned(self) -> Token<S, K> {
        match self {
            TokenHandle::Owned(token) => token,
            TokenHandle::Borrowed { token, .. } => token.clone(),
        }
    }
}

impl<'a, U: Clone, K: Clone> TokenHandle<Token<Detached<U>, K>, Token<Window<'a, U>, K>> {
    /// Turn the handle into a token that can be kept, copying if borrowed.
    pub fn into_owned(self) -> Token<Detached<U>, K> {
        match self {
            TokenHandle::Owned(token) => token,
            TokenHandle::Borrowed { token, .. } => token.detach(),
        }
    }
}

impl<O: Positioned, B: Positioned> Positioned for TokenHandle<O, B> {
    fn index(&self) -> usize {
        match self {
            TokenHandle::Owned(token) => token.index(),
            TokenHandle::Borrowed { token, .. } => token.index(),
        }
    }

    fn length(&self) -> usize {
        match self {
            TokenHandle::Owned(token) => token.length(),
            TokenHandle::Borrowed { token, .. } => token.length(),
        }
    }
}

impl<U, O: Valued<U>, B: Valued<U>> Valued<U> for TokenHandle<O, B> {
    fn value(&self) -> &[U] {
        match self {
            TokenHandle::Owned(token) => token.value(),
            TokenHandle::Borrowed { token, .. } => token.value(),
        }
    }
}
