//! Source-embeddable renderings of a compiled dictionary.

use anyhow::Result;
use clap::ValueEnum;
use lx_codec::DictionaryArtifact;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitFormat {
    Rust,
    C,
    Json,
}

pub fn render(artifact: &DictionaryArtifact, format: EmitFormat) -> Result<String> {
    match format {
        EmitFormat::Rust => Ok(render_rust(artifact)),
        EmitFormat::C => Ok(render_c(artifact)),
        EmitFormat::Json => Ok(artifact.to_json()?),
    }
}

fn byte_list(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("    ");
        let row: Vec<String> = chunk.iter().map(|b| format!("0x{b:02x},")).collect();
        out.push_str(&row.join(" "));
    }
    out
}

fn inline_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| format!("b{:?}", b as char)).collect::<Vec<_>>().join(", ")
}

pub fn render_rust(artifact: &DictionaryArtifact) -> String {
    let mut out = String::from("// Generated by lexpack. Do not edit.\n\n");
    for (name, tier) in [("TIER1", &artifact.tier1), ("TIER2", &artifact.tier2), ("TIER3", &artifact.tier3)] {
        let _ = writeln!(out, "pub static {name}: [u8; {}] = [{}];", tier.len(), inline_bytes(tier));
    }
    let _ = writeln!(out, "\npub static SUFFIXES: [Option<&str>; {}] = [", artifact.suffixes.len());
    for slot in &artifact.suffixes {
        match slot {
            Some(literal) => {
                let _ = writeln!(out, "    Some({literal:?}),");
            }
            None => out.push_str("    None,\n"),
        }
    }
    out.push_str("];\n\n");
    let _ = writeln!(out, "pub static STREAM: [u8; {}] = [", artifact.stream.len());
    if !artifact.stream.is_empty() {
        out.push_str(&byte_list(&artifact.stream));
        out.push('\n');
    }
    out.push_str("];\n");
    out
}

pub fn render_c(artifact: &DictionaryArtifact) -> String {
    let mut out = String::from("/* Generated by lexpack. Do not edit. */\n#include <stddef.h>\n\n");
    for (name, tier) in [("lx_tier1", &artifact.tier1), ("lx_tier2", &artifact.tier2), ("lx_tier3", &artifact.tier3)] {
        let _ = writeln!(out, "static const char {name}[] = {:?};", String::from_utf8_lossy(tier));
    }
    let _ = writeln!(out, "\n/* NULL marks a suffix no root uses. */");
    let _ = writeln!(out, "static const char *const lx_suffixes[{}] = {{", artifact.suffixes.len().max(1));
    for slot in &artifact.suffixes {
        match slot {
            Some(literal) => {
                let _ = writeln!(out, "    {literal:?},");
            }
            None => out.push_str("    NULL,\n"),
        }
    }
    out.push_str("};\n\n");
    let _ = writeln!(out, "static const size_t lx_stream_len = {};", artifact.stream.len());
    let _ = writeln!(out, "static const unsigned char lx_stream[{}] = {{", artifact.stream.len().max(1));
    if !artifact.stream.is_empty() {
        out.push_str(&byte_list(&artifact.stream));
        out.push('\n');
    }
    out.push_str("};\n");
    out
}
