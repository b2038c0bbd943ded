use std::env;
use std::path::Path;

use chunk_reader::chunk::format::text;
use chunk_reader::chunk::reader;
use chunk_reader::chunk::types::models::{LANGUAGE_SUFFIXES, Language};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-gmd-file> [--lang <SUFFIX>]", args[0]);
        eprintln!("  <SUFFIX> is a language file suffix such as eng, jpn, fre.");
        std::process::exit(1);
    }

    let gmd_path = &args[1];
    let mut language: Option<Language> = None;
    // Parse --lang argument
    if let Some(lang_idx) = args.iter().position(|arg| arg == "--lang") {
        if let Some(suffix) = args.get(lang_idx + 1) {
            language = LANGUAGE_SUFFIXES
                .iter()
                .find(|(s, _)| s == suffix)
                .map(|(_, lang)| *lang);
            if language.is_none() {
                eprintln!("ERROR: Unknown language suffix '{}'.", suffix);
                std::process::exit(1);
            }
        } else {
            eprintln!("ERROR: --lang flag requires an argument.");
            std::process::exit(1);
        }
    }

    // Without an override, deduce the language from the file stem.
    let language = language
        .or_else(|| {
            Path::new(gmd_path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(Language::from_file_stem)
        })
        .unwrap_or(Language::English);

    println!("Reading text table: {}", gmd_path);
    println!("Language: {:?} ({})", language, language.code());
    println!("{}", "=".repeat(60));

    match reader::read_gmd(gmd_path) {
        Ok(gmd) => {
            println!("\nTable Information:");
            println!("  Name: {}", gmd.header.name);
            println!("  Version: {:#x}", gmd.header.version);
            println!("  Language field: {}", gmd.header.language);
            println!("  Keys: {}", gmd.header.key_count);
            println!("  Strings: {}", gmd.header.string_count);

            println!("\nSample Entries (first 10, normalized):");
            for entry in gmd.entries.iter().take(10) {
                let key = entry.key.as_deref().unwrap_or("<no key>");
                let normalized = text::normalize(&entry.text, language);
                println!("  {}. [{}] {}", entry.index, key, normalized);
            }
            if gmd.entries.len() > 10 {
                println!("  ... and {} more", gmd.entries.len() - 10);
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to read text table");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
