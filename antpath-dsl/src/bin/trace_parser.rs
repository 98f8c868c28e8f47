/// Chain Tracer - Shows the flow through Lexer → Parser → Printer
///
/// Usage: cargo run --bin trace_parser '<chain>'

use antpath_dsl::{format_listing, round_trip, Lexer, Parser, TokenKind};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --bin trace_parser '<chain>'");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --bin trace_parser 'T:-90|DL:4|T:90|'");
        std::process::exit(1);
    }

    let source = &args[1];

    println!("╔═══════════════════════════════════════════════════════════════");
    println!("║ CHAIN PARSER TRACER");
    println!("╚═══════════════════════════════════════════════════════════════\n");

    println!("📝 INPUT:");
    println!("{}", source);
    println!();

    // Step 1: Tokens
    println!("🔍 TOKENS:");
    println!("─────────────────────────────────────────────────────────────");
    let tokens = Lexer::new(source).tokenize();
    for token in &tokens {
        let marker = if matches!(token.kind, TokenKind::Error(_)) { "❌" } else { "  " };
        println!(
            "{} {:>4}..{:<4} {}",
            marker, token.span.start, token.span.end, token.kind
        );
    }
    println!();

    // Step 2: Operations
    println!("🌳 OPERATIONS:");
    println!("─────────────────────────────────────────────────────────────");
    match Parser::new(tokens).parse() {
        Ok(sequence) => {
            print!("{}", format_listing(&sequence));
            println!();

            // Step 3: Round-trip
            println!("🔄 ROUND-TRIP TEST:");
            println!("─────────────────────────────────────────────────────────────");
            match round_trip(source) {
                Ok(canonical) => println!("{}", canonical),
                Err(e) => println!("❌ Round-trip failed: {}", e),
            }
            println!();

            println!("✅ Parse succeeded! ({} operations)", sequence.len());
        }
        Err(e) => {
            println!("❌ {}", e);
            let pointer = " ".repeat(e.offset);
            println!("{}", source);
            println!("{}^", pointer);
            std::process::exit(1);
        }
    }
}
