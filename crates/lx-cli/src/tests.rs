use crate::commands::{self, CompileArgs, DecodeArgs, StatsArgs};
use crate::emit::{self, EmitFormat};
use crate::{Cli, Command};
use clap::Parser;
use lx_codec::DictionaryCompiler;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn compile_args(inputs: Vec<PathBuf>, output: PathBuf) -> CompileArgs {
    CompileArgs { inputs, output, config: None, emit: None, emit_out: None, no_verify: false }
}

// ========== Argument parsing ==========

#[test]
fn test_parse_compile() {
    let cli = Cli::try_parse_from([
        "lexpack", "-v", "compile", "a.txt", "b.txt", "-o", "out.lxd", "--emit", "rust",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Compile(args) => {
            assert_eq!(args.inputs.len(), 2);
            assert_eq!(args.emit, Some(EmitFormat::Rust));
            assert!(!args.no_verify);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_requires_inputs() {
    assert!(Cli::try_parse_from(["lexpack", "compile", "-o", "out.lxd"]).is_err());
    assert!(Cli::try_parse_from(["lexpack", "compile", "a.txt", "-o", "x", "--emit-out", "y"]).is_err());
}

// ========== Commands ==========

#[test]
fn test_compile_decode_files() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "one.txt", "jump\njumps\njumping\r\nCat\nx\n");
    let second = write(&dir, "two.txt", "cats\njumped\ncat\n");
    let output = dir.path().join("dict.lxd");

    let stats = commands::compile(&compile_args(vec![first, second], output.clone())).unwrap();
    assert_eq!(stats.words, 6);

    let words_out = dir.path().join("words.txt");
    let count = commands::decode(&DecodeArgs { artifact: output, output: Some(words_out.clone()) }).unwrap();
    assert_eq!(count, 6);
    let text = std::fs::read_to_string(words_out).unwrap();
    assert_eq!(text, "cat\ncats\njump\njumped\njumping\njumps\n");
}

#[test]
fn test_compile_with_config() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "words.txt", "walk\nwalked\nwalking\n");
    let config = write(&dir, "config.json", r#"{"suffixes":["ing","ed"]}"#);
    let output = dir.path().join("dict.lxd");
    let mut args = compile_args(vec![input], output.clone());
    args.config = Some(config);
    commands::compile(&args).unwrap();

    let artifact = commands::read_artifact(&output).unwrap();
    assert_eq!(artifact.suffixes, vec![Some("ing".to_string()), Some("ed".to_string())]);
}

#[test]
fn test_compile_bad_config() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "words.txt", "walk\n");
    let config = write(&dir, "config.json", r#"{"suffixes":["ing","ing"]}"#);
    let mut args = compile_args(vec![input], dir.path().join("dict.lxd"));
    args.config = Some(config);
    assert!(commands::compile(&args).is_err());
}

#[test]
fn test_compile_missing_input() {
    let dir = TempDir::new().unwrap();
    let args = compile_args(vec![dir.path().join("nope.txt")], dir.path().join("dict.lxd"));
    let err = commands::compile(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to read word list"));
}

#[test]
fn test_compile_emits_source() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "words.txt", "alpha\nalphas\nbeta\n");
    let emitted = dir.path().join("dict.rs");
    let mut args = compile_args(vec![input], dir.path().join("dict.lxd"));
    args.emit = Some(EmitFormat::Rust);
    args.emit_out = Some(emitted.clone());
    commands::compile(&args).unwrap();
    let source = std::fs::read_to_string(emitted).unwrap();
    assert!(source.contains("pub static TIER1"));
    assert!(source.contains("pub static STREAM"));
}

#[test]
fn test_stats_summary() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "words.txt", "jump\njumps\njumping\nzebra\n");
    let output = dir.path().join("dict.lxd");
    commands::compile(&compile_args(vec![input], output.clone())).unwrap();
    let summary = commands::stats(&StatsArgs { artifact: output }).unwrap();
    assert_eq!(summary.words, 4);
    assert_eq!(summary.tokens, 2);
    assert!(summary.used_suffixes >= 2);
    assert!(summary.container_bytes > summary.stream_bytes);
}

#[test]
fn test_read_corrupt_artifact() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.lxd", "not a dictionary");
    assert!(commands::read_artifact(&path).is_err());
}

// ========== Emitters ==========

#[test]
fn test_emit_formats() {
    let result = DictionaryCompiler::default().compile_lines(["quick", "quickly", "fox"]).unwrap();
    let artifact = &result.artifact;

    let rust = emit::render(artifact, EmitFormat::Rust).unwrap();
    assert!(rust.contains(&format!("pub static STREAM: [u8; {}]", artifact.stream.len())));
    assert!(rust.contains("None,"));

    let c = emit::render(artifact, EmitFormat::C).unwrap();
    assert!(c.contains("static const unsigned char lx_stream"));
    assert!(c.contains("NULL,"));

    let json = emit::render(artifact, EmitFormat::Json).unwrap();
    assert!(json.contains("\"stream\""));
}

#[test]
fn test_emit_empty_dictionary() {
    let result = DictionaryCompiler::default().compile_lines(Vec::<String>::new()).unwrap();
    let rust = emit::render_rust(&result.artifact);
    assert!(rust.contains("pub static TIER1: [u8; 0] = [];"));
    assert!(rust.contains("pub static STREAM: [u8; 0] = [\n];"));
}
