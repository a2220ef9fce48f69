use std::env;

use log::LevelFilter;
use teg_reader::{TegReader, XmlValue};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-export-file> [--json]", args[0]);
        std::process::exit(1);
    }

    let export_path = &args[1];
    let as_json = args.iter().skip(2).any(|arg| arg == "--json");

    println!("Reading TEG export: {}", export_path);
    println!("{}", "=".repeat(60));

    let reader = match TegReader::new(export_path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("\nERROR: Failed to read export file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let fragments = match reader.fragments() {
        Ok(fragments) => fragments,
        Err(e) => {
            eprintln!("\nERROR: Failed to locate XML fragments");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nContainer Information:");
    println!("  Raw size: {} bytes", reader.raw_len());
    println!("  Fragments: {}", fragments.len());

    let mut failures = 0usize;

    for (i, range) in fragments.iter().enumerate() {
        println!(
            "\nFragment {} [{}..{}] ({} bytes)",
            i + 1,
            range.start,
            range.end,
            range.len()
        );

        let document = reader
            .fragment_bytes(range)
            .and_then(teg_reader::parse_document);
        match document {
            Ok(document) => {
                if as_json {
                    match serde_json::to_string_pretty(&document) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("  ERROR: could not serialize document: {}", e);
                            failures += 1;
                        }
                    }
                } else {
                    print_summary(&document);
                }
            }
            Err(e) => {
                eprintln!("  ERROR: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("\n{} fragment(s) could not be processed", failures);
        std::process::exit(1);
    }
}

/// One-line-per-key view of a document's root element.
fn print_summary(document: &XmlValue) {
    let Some(root) = document.as_map() else {
        return;
    };
    for (name, value) in root {
        println!("  Root element: {}", name);
        match value {
            XmlValue::Map(children) => {
                println!("  Keys: {}", children.len());
                for key in children.keys() {
                    println!("    - {}", key);
                }
            }
            XmlValue::Text(text) => println!("  Content: {}", text),
            XmlValue::List(items) => println!("  Repeated root content: {} item(s)", items.len()),
            XmlValue::Null => println!("  (empty element)"),
        }
    }
}
