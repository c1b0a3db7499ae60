//! Thin CLI caller: reads HTML from stdin, runs the pipeline, prints JSON.
//!
//! With `--debug`, dumps the annotated candidate tree instead of the text,
//! one report record per node.

use std::io::{self, Read};

use serde::Serialize;

use boilersieve::report::tree_report;
use boilersieve::extract_bytes;

#[derive(Serialize)]
struct Output {
    title: Option<String>,
    main_content: String,
}

fn main() {
    let debug = std::env::args().any(|arg| arg == "--debug");

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("failed to read from stdin");
        std::process::exit(1);
    }

    let result = match extract_bytes(&html) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            std::process::exit(2);
        }
    };

    let json = if debug {
        let report = tree_report(&result.tree, result.candidate);
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&Output {
            title: result.title,
            main_content: result.content_text,
        })
    };

    println!("{}", json.unwrap_or_default());
}
