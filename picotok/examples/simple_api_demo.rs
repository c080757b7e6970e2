// SPDX-License-Identifier: Apache-2.0

// Example demonstrating the in-memory Tokenizer

use picotok::{Delimiters, ParseError, Positioned, PullTokenizer, Tokenizer, Valued};

fn main() -> Result<(), ParseError> {
    let text = "GET /index.html HTTP/1.1";
    let mut tokenizer = Tokenizer::new();
    tokenizer.set_source(text.as_bytes(), 0, text.len(), Delimiters::any(b" "))?;
    println!("Using Tokenizer with MATCH_ANY on ' ':");
    println!("Input: {}", text);

    while let Some(token) = tokenizer.next() {
        let token = token?;
        println!(
            "Token at {} (len {}): '{}'",
            token.index(),
            token.length(),
            String::from_utf8_lossy(token.value())
        );
    }

    println!();
    let record = "alpha::beta:::gamma::";
    tokenizer.set_source(record.as_bytes(), 0, record.len(), Delimiters::exact(b"::"))?;
    println!("Using Tokenizer with MATCH_EXACT on '::':");
    println!("Input: {}", record);

    while let Some(token) = tokenizer.next_token()? {
        println!("Token: '{}'", String::from_utf8_lossy(token.value()));
    }

    println!();
    println!("✅ Successfully tokenized with simple API!");
    Ok(())
}
