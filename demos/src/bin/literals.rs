// SPDX-License-Identifier: Apache-2.0

// Parses a fixed set of literals and prints what came out of each

use jsontree::parse;

const LITERALS: &[&str] = &[
    "-7",
    "3.14",
    "-2.5e2",
    "\"hello\"",
    "\"Hello\nWorld!\"",
    "[1, 2, 3]",
    "[1, [2, 3, 4], 5]",
    r#"[123, 1.23, "hello]world", -5]"#,
    r#"{"hello": 23, "world": 24}"#,
    r#"{"hello": 23, "world": [1, 2, 3]}"#,
    r#"{"hello": 23, "world": {"a": 1, "b": 2}}"#,
    "[1, 2, true]",
    "",
];

fn main() {
    env_logger::init();

    for input in LITERALS {
        println!("Input: {input:?}");
        match parse(input) {
            Ok(parsed) => {
                let consumed = parsed.consumed;
                for diagnostic in &parsed.diagnostics {
                    println!("  partial: {diagnostic}");
                }
                println!("  {} ({consumed} bytes)", parsed.into_value());
            }
            Err(e) => println!("  error: {e}"),
        }
    }
}
