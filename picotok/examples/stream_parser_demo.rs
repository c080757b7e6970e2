// SPDX-License-Identifier: Apache-2.0

// Example demonstrating StreamParser with a Reader over a fixed-size array

use picotok::{
    ChunkReader, Delimiters, ParserConfig, Positioned, StreamError, StreamParser, TokenPolicy,
    Valued,
};

fn main() -> Result<(), StreamError<()>> {
    println!("🚀 StreamParser Demo with ChunkReader");
    println!("=====================================");

    let log = b"level=info msg=started\nlevel=warn msg=slow_disk\nlevel=info msg=ready\n";

    println!("📄 Input: {:?}", String::from_utf8_lossy(log));
    println!("📏 Total size: {} bytes", log.len());
    println!();

    // Read 8 bytes at a time, like small network packets
    let reader = ChunkReader::new(log, 8);

    let mut buffer = [0u8; 128];
    let buffer_size = buffer.len();
    let config = ParserConfig::with_policy(TokenPolicy::Reuse);
    let mut parser = StreamParser::with_config(&mut buffer, config)?;
    parser.set_input(reader, Delimiters::any(b" \n"))?;

    println!("🔄 Starting StreamParser with streaming ChunkReader:");
    println!("   Buffer size: {} bytes", buffer_size);
    println!("   Chunk size: 8 bytes");
    println!();

    let token_count = parser.parse(|token, control| {
        let value = String::from_utf8_lossy(token.value());
        println!(
            "  🔑 [{:>3}..{:>3}] '{}' (generation {:?})",
            token.index(),
            token.end(),
            value,
            token.generation()
        );
        if value == "msg=slow_disk" {
            println!("  ⏸️  Found the warning, stopping early");
            control.stop();
        }
    })?;
    println!("  Delivered {} tokens before stopping", token_count);

    // The parser resumes where it stopped
    let rest = parser.parse(|token, _| {
        println!("  📝 '{}'", String::from_utf8_lossy(token.value()));
    })?;

    println!();
    println!(
        "✅ Successfully parsed {} tokens with StreamParser!",
        token_count + rest
    );
    Ok(())
}
