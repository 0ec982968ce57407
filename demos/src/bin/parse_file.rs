// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::fs;

use jsontree::parse_slice;
use log::info;

fn main() {
    env_logger::init();

    let args: Vec<_> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map_or("parse_file", String::as_str);
        println!("Usage: {program} file.json");
        std::process::exit(1);
    }
    let path = &args[1];
    let contents = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: Unable to read file '{}': {}", path, e);
            std::process::exit(1);
        }
    };
    info!("read {} bytes from {}", contents.len(), path);

    let parsed = match parse_slice(&contents) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: JSON parsing failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", parsed.value.pretty());
    for diagnostic in &parsed.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }
    if parsed.consumed < contents.len() {
        eprintln!(
            "Warning: {} trailing byte(s) after the value",
            contents.len() - parsed.consumed
        );
    }
    if parsed.is_partial() {
        std::process::exit(1);
    }
}
