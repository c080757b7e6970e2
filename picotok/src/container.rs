// SPDX-License-Identifier: Apache-2.0

//! A token that also holds an ordered list of child tokens.
//!
//! The container's own span follows its [`BoundsMode`]: a fixed span that
//! children must fit inside, or a span that grows to cover every child.
//! `add_token` may be called from several threads at once; the span and the
//! child list sit behind one lock so they never disagree.

use alloc::sync::Arc;
use alloc::vec::Vec;

use parking_lot::Mutex;

use crate::parse_error::{ArgumentError, ParseError};
use crate::token::{Positioned, Sourced, Token, TokenSource, Valued};

/// How a container's span relates to its children. Chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsMode {
    /// The span is fixed and children outside it are rejected.
    Fixed,
    /// The span grows to the union of all children.
    FitToChild,
}

#[derive(Debug)]
struct Children<T> {
    /// `(index, length)`, or `None` while a fit-to-child container is empty.
    span: Option<(usize, usize)>,
    tokens: Vec<Arc<T>>,
}

/// A token over `source` owning an ordered list of children.
///
/// Children are held as `Arc<T>`, so the same child can sit in several
/// containers.
#[derive(Debug)]
pub struct ContainerToken<S, K = (), T = Token<S, K>> {
    kind: Option<K>,
    source: S,
    mode: BoundsMode,
    inner: Mutex<Children<T>>,
}

impl<S, K, T: Positioned> ContainerToken<S, K, T> {
    /// A container with the given span and bounds policy.
    pub fn new(kind: Option<K>, source: S, index: usize, length: usize, mode: BoundsMode) -> Self {
        Self {
            kind,
            source,
            mode,
            inner: Mutex::new(Children {
                span: Some((index, length)),
                tokens: Vec::new(),
            }),
        }
    }

    /// An untyped container that rejects children outside `[index, index + length)`.
    pub fn fixed(source: S, index: usize, length: usize) -> Self {
        Self::new(None, source, index, length, BoundsMode::Fixed)
    }

    /// An untyped container with no span until its first child arrives.
    pub fn fit_to_child(source: S) -> Self {
        Self {
            kind: None,
            source,
            mode: BoundsMode::FitToChild,
            inner: Mutex::new(Children {
                span: None,
                tokens: Vec::new(),
            }),
        }
    }

    /// Append a child.
    ///
    /// A fixed container rejects a child that does not lie within its span
    /// and is left unchanged. A fit-to-child container always accepts and
    /// widens its span to cover the child.
    pub fn add_token(&self, child: impl Into<Arc<T>>) -> Result<(), ParseError> {
        let child = child.into();
        let (child_index, child_end) = (child.index(), child.end());

        let mut inner = self.inner.lock();
        match (self.mode, inner.span) {
            (BoundsMode::Fixed, Some((index, length))) => {
                let end = index.saturating_add(length);
                if child_index < index || child_end > end {
                    return Err(ArgumentError::ChildOutOfBounds {
                        child_index,
                        child_end,
                        index,
                        end,
                    }
                    .into());
                }
            }
            (BoundsMode::Fixed, None) | (BoundsMode::FitToChild, None) => {
                inner.span = Some((child_index, child.length()));
            }
            (BoundsMode::FitToChild, Some((index, length))) => {
                let start = index.min(child_index);
                let end = index.saturating_add(length).max(child_end);
                inner.span = Some((start, end - start));
            }
        }
        inner.tokens.push(child);
        Ok(())
    }

    /// The child at `position`, if any.
    pub fn token(&self, position: usize) -> Option<Arc<T>> {
        self.inner.lock().tokens.get(position).cloned()
    }

    pub fn token_count(&self) -> usize {
        self.inner.lock().tokens.len()
    }

    /// A snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<Arc<T>> {
        self.inner.lock().tokens.clone()
    }

    /// Current `(index, length)`, or `None` for an empty fit-to-child container.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.inner.lock().span
    }

    pub fn bounds_mode(&self) -> BoundsMode {
        self.mode
    }

    pub fn kind(&self) -> Option<&K> {
        self.kind.as_ref()
    }
}

impl<S, K, T: Positioned> Positioned for ContainerToken<S, K, T> {
    /// Zero while unbounded.
    fn index(&self) -> usize {
        self.span().map_or(0, |(index, _)| index)
    }

    fn length(&self) -> usize {
        self.span().map_or(0, |(_, length)| length)
    }
}

impl<S, K, T> Sourced<S> for ContainerToken<S, K, T> {
    fn source(&self) -> &S {
        &self.source
    }
}

impl<U, S: TokenSource<U>, K, T: Positioned> Valued<U> for ContainerToken<S, K, T> {
    fn value(&self) -> &[U] {
        match self.span() {
            Some((index, length)) => self.source.span(index, length).unwrap_or(&[]),
            None => &[],
        }
    }
}
