// SPDX-License-Identifier: Apache-2.0

//! An allocation-conscious delimiter tokenizer.
//!
//! Input is split into tokens described by an offset and a length, without
//! copying anything until a token's value is asked for. Two front ends share
//! the same delimiter matcher:
//!
//! - [`Tokenizer`] for input that is fully in memory
//! - [`StreamParser`] for input pulled from a [`Reader`] into a fixed buffer
//!
//! Both support [`DelimiterMode::MatchAny`] (a set of single-unit
//! delimiters) and [`DelimiterMode::MatchExact`] (one literal sequence), and
//! work over bytes or `char`s.
//!
//! ```rust
//! use picotok::{ChunkReader, Delimiters, StreamParser, Tokenizer, Valued};
//!
//! let text = b"one, two,,three";
//! let delimiters = Delimiters::any(b", ");
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.set_source(text, 0, text.len(), delimiters).unwrap();
//! let mut in_memory = Vec::new();
//! while let Some(token) = tokenizer.next_token().unwrap() {
//!     in_memory.push(token.value().to_vec());
//! }
//!
//! let mut buffer = [0u8; 128];
//! let mut parser = StreamParser::new(&mut buffer).unwrap();
//! parser.set_input(ChunkReader::new(text, 4), delimiters).unwrap();
//! let mut streamed = Vec::new();
//! parser.parse(|token, _| streamed.push(token.value().to_vec())).unwrap();
//!
//! assert_eq!(in_memory, streamed);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod parse_error;
pub use parse_error::{ArgumentError, ParseError, StreamError, UnexpectedState};

mod token;
pub use token::{
    Detached, DetachedToken, Positioned, SliceHandle, SliceToken, Sourced, StreamHandle, Token,
    TokenHandle, TokenPolicy, TokenSource, Valued, Window, WindowToken,
};

mod matcher;
pub use matcher::{
    index_after, index_after_any, index_of, index_of_any, DelimiterMode, Delimiters, ScanOutcome,
};

mod reader;
pub use reader::{ReadStatus, Reader};

mod chunk_reader;
pub use chunk_reader::{ChunkReader, IterReader};

#[cfg(feature = "std")]
mod io_reader;
#[cfg(feature = "std")]
pub use io_reader::IoReader;

mod scan_buffer;

mod scan_engine;
pub use scan_engine::{EngineConfig, EngineState, Match, ScanEngine};

mod shared;
pub use shared::{
    ParseControl, ParserConfig, PullTokenizer, DEFAULT_BUFFER_CAPACITY, DEFAULT_REFILL_THRESHOLD,
    MIN_BUFFER_CAPACITY,
};

mod tokenizer;
pub use tokenizer::Tokenizer;

mod stream_parser;
pub use stream_parser::StreamParser;

#[cfg(feature = "std")]
mod container;
#[cfg(feature = "std")]
pub use container::{BoundsMode, ContainerToken};
