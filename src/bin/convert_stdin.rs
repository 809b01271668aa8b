//! Simple CLI that reads an exported page from stdin and writes the
//! conversion to stdout as JSON.

use std::io::{self, Read};

use gdoc2latex::{convert_bytes, Options};
use serde::Serialize;

#[derive(Serialize)]
struct Output {
    latex: Option<String>,
    bibtex: Option<String>,
    error: Option<String>,
}

fn main() {
    // Read raw bytes so the page's charset declaration is honoured
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let output = match convert_bytes(&html, &Options::default()) {
        Ok(conversion) => Output {
            latex: Some(conversion.latex),
            bibtex: conversion.bibtex,
            error: None,
        },
        Err(e) => Output {
            latex: None,
            bibtex: None,
            error: Some(e.to_string()),
        },
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
