//! Demonstrates scanning Monkey source code

use monkeyscan::lexer::{format_tokens, Grammar, ScanOptions, Scanner};

fn main() {
    let examples = vec![
        ("Let binding", "let five = 5;", Grammar::Extended),
        (
            "Function literal",
            "let add = fn(x, y) {\n  x + y;\n};",
            Grammar::Extended,
        ),
        ("Comparisons", "10 == 10; 10 != 9; a <= b >= c", Grammar::Extended),
        ("Core grammar", "return x;", Grammar::Core),
        ("Illegal input", "let x = @;", Grammar::Extended),
    ];

    for (name, code, grammar) in examples {
        println!("\n=== {} ({:?}) ===", name, grammar);
        println!("Code:\n{}\n", code);

        let tokens = Scanner::with_options(code, ScanOptions::new().grammar(grammar)).collect_tokens();
        println!("{}", format_tokens(&tokens));
    }
}
