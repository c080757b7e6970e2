// SPDX-License-Identifier: Apache-2.0

// Error handling tests for the public API

use picotok::{
    ArgumentError, ChunkReader, Delimiters, EngineConfig, EngineState, ParseError, ParserConfig,
    ReadStatus, Reader, ScanEngine, StreamError, StreamParser, TokenPolicy, Tokenizer, Valued,
    MIN_BUFFER_CAPACITY,
};

use test_log::test;

/// Optionally fails its first read, then delivers its data in one read.
struct FailOnceReader {
    data: &'static [u8],
    fail_first: bool,
    delivered: bool,
}

impl FailOnceReader {
    fn new(data: &'static [u8], fail_first: bool) -> Self {
        Self {
            data,
            fail_first,
            delivered: false,
        }
    }
}

impl Reader for FailOnceReader {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<ReadStatus, Self::Error> {
        if self.fail_first {
            self.fail_first = false;
            return Err("device unplugged");
        }
        if self.delivered {
            return Ok(ReadStatus::EndOfSource);
        }
        self.delivered = true;
        buf[..self.data.len()].copy_from_slice(self.data);
        Ok(ReadStatus::Read(self.data.len()))
    }
}

#[test]
fn test_tokenizer_rejects_bad_ranges() {
    let text = b"abc def";
    let delimiters = Delimiters::any(b" ");
    let mut tokenizer = Tokenizer::new();

    assert_eq!(
        tokenizer.set_source(text, 0, 0, delimiters),
        Err(ParseError::InvalidArgument(ArgumentError::InvalidRange {
            index: 0,
            length: 0,
            bound: 7
        }))
    );
    assert!(tokenizer.set_source(text, 5, 3, delimiters).is_err());
    assert!(tokenizer.set_source(text, usize::MAX, 2, delimiters).is_err());
    assert_eq!(
        tokenizer.set_source(text, 0, 7, Delimiters::any(b"")),
        Err(ParseError::InvalidArgument(ArgumentError::EmptyDelimiters))
    );
}

#[test]
fn test_rejected_setup_keeps_previous_source() {
    let mut tokenizer = Tokenizer::new();
    tokenizer
        .set_source(b"keep these", 0, 10, Delimiters::any(b" "))
        .unwrap();
    assert!(tokenizer
        .set_source(b"x", 0, 1, Delimiters::exact(b"::"))
        .is_err());

    assert_eq!(tokenizer.source(), b"keep these");
    let token = tokenizer.next_token().unwrap().unwrap();
    assert_eq!(token.value(), b"keep");
}

#[test]
fn test_match_exact_source_shorter_than_delimiter() {
    let mut tokenizer = Tokenizer::new();
    assert_eq!(
        tokenizer.set_source(b"ab", 0, 2, Delimiters::exact(b"abc")),
        Err(ParseError::InvalidArgument(
            ArgumentError::SourceShorterThanDelimiter {
                available: 2,
                delimiter: 3
            }
        ))
    );

    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let mut parser = StreamParser::new(&mut buffer).unwrap();
    assert_eq!(
        parser.set_input(ChunkReader::full_slice(b"ab"), Delimiters::exact(b"abc")),
        Err(StreamError::Parse(ParseError::InvalidArgument(
            ArgumentError::SourceShorterThanDelimiter {
                available: 2,
                delimiter: 3
            }
        )))
    );
    assert_eq!(parser.state(), EngineState::Idle);
}

#[test]
fn test_next_token_before_setup() {
    let mut tokenizer: Tokenizer<'_, u8> = Tokenizer::new();
    assert!(matches!(
        tokenizer.next_token(),
        Err(ParseError::NotReady(_))
    ));

    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let mut parser: StreamParser<'_, ChunkReader<'_>> = StreamParser::new(&mut buffer).unwrap();
    assert!(matches!(
        parser.next_token(),
        Err(StreamError::Parse(ParseError::NotReady(_)))
    ));
    assert!(matches!(
        parser.parse(|_, _| {}),
        Err(StreamError::Parse(ParseError::NotReady(_)))
    ));
}

#[test]
fn test_parser_construction_errors() {
    let mut small = [0u8; MIN_BUFFER_CAPACITY - 1];
    assert!(matches!(
        StreamParser::<ChunkReader<'_>>::new(&mut small),
        Err(ParseError::InvalidArgument(ArgumentError::BufferTooSmall {
            capacity: 127,
            minimum: 128
        }))
    ));

    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let config = ParserConfig {
        refill_threshold: 0,
        policy: TokenPolicy::Fresh,
    };
    assert!(matches!(
        StreamParser::<ChunkReader<'_>>::with_config(&mut buffer, config),
        Err(ParseError::InvalidArgument(
            ArgumentError::InvalidRefillThreshold { threshold: 0, .. }
        ))
    ));

    let config = EngineConfig {
        refill_threshold: MIN_BUFFER_CAPACITY + 1,
    };
    assert!(ScanEngine::<ChunkReader<'_>>::new(&mut buffer, config).is_err());
}

#[test]
fn test_reader_failure_is_recoverable() {
    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let mut parser = StreamParser::new(&mut buffer).unwrap();
    assert_eq!(
        parser.set_input(FailOnceReader::new(b"one two", true), Delimiters::any(b" ")),
        Err(StreamError::Reader("device unplugged"))
    );
    assert_eq!(parser.state(), EngineState::Idle);

    // A failed setup leaves nothing behind, so a new input starts clean
    parser
        .set_input(
            FailOnceReader::new(b"three four", false),
            Delimiters::any(b" "),
        )
        .unwrap();
    let mut values = Vec::new();
    let delivered = parser
        .parse(|token, _| values.push(token.value().to_vec()))
        .unwrap();
    assert_eq!(delivered, 2);
    assert_eq!(values, [&b"three"[..], b"four"]);
    assert_eq!(parser.state(), EngineState::Exhausted);
}

#[test]
fn test_io_reader_error_surfaces() {
    use picotok::IoReader;
    use std::io::{self, Read};

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let mut parser = StreamParser::new(&mut buffer).unwrap();
    match parser.set_input(IoReader::new(BrokenPipe), Delimiters::any(b"\n")) {
        Err(StreamError::Reader(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected a reader error, got: {:?}", other),
    }
}

#[test]
fn test_io_reader_over_cursor() {
    use picotok::IoReader;
    use std::io::Cursor;

    let lines = "first line\nsecond line\n\nthird\n".repeat(20);
    let mut buffer = [0u8; MIN_BUFFER_CAPACITY];
    let mut parser = StreamParser::new(&mut buffer).unwrap();
    parser
        .set_input(
            IoReader::new(Cursor::new(lines.as_bytes())),
            Delimiters::exact(b"\n"),
        )
        .unwrap();

    let mut values = Vec::new();
    parser
        .parse(|token, _| values.push(token.value().to_vec()))
        .unwrap();
    assert_eq!(values.len(), 60);
    assert_eq!(values[0], b"first line");
    assert_eq!(values[1], b"second line");
    assert_eq!(values[2], b"third");
}

#[test]
fn test_error_display() {
    let err = ParseError::from(ArgumentError::BufferTooSmall {
        capacity: 16,
        minimum: 128,
    });
    assert_eq!(
        err.to_string(),
        "Invalid argument: buffer capacity [16] must be >= 128"
    );

    let err: StreamError<&str> = StreamError::Reader("timeout");
    assert_eq!(err.to_string(), "Reader error: \"timeout\"");

    let err: StreamError<()> = ParseError::NotReady("no input configured").into();
    assert_eq!(err.to_string(), "Not ready: no input configured");

    let boxed: Box<dyn std::error::Error> = Box::new(ParseError::Malformed("bad header"));
    assert_eq!(boxed.to_string(), "Malformed input: bad header");
}
