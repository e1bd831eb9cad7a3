use anyhow::{Context, Result};
use clap::Args;
use lx_codec::decoder::TokenReader;
use lx_codec::{CompileStats, DictionaryArtifact, DictionaryCompiler, Lexicon, LoadReport};
use lx_core::CodecConfig;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::emit::{self, EmitFormat};

/// Rejections printed individually before only the total is reported.
const MAX_LISTED_REJECTIONS: usize = 20;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Word list files, one word per line.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Binary dictionary output path.
    #[arg(short, long)]
    pub output: PathBuf,
    /// JSON codec configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also render the dictionary as embeddable source.
    #[arg(long, value_enum)]
    pub emit: Option<EmitFormat>,
    /// Where to write the rendered source (defaults to stdout).
    #[arg(long, requires = "emit")]
    pub emit_out: Option<PathBuf>,
    /// Skip the decode-and-compare check.
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    pub artifact: PathBuf,
    /// Word list output path (defaults to stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    pub artifact: PathBuf,
}

pub fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    CodecConfig::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn load_lexicon(inputs: &[PathBuf], config: &CodecConfig) -> Result<(Lexicon, LoadReport)> {
    let mut lexicon = Lexicon::new();
    let mut report = LoadReport::default();
    for path in inputs {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        lexicon.ingest(&path.display().to_string(), text.lines(), config, &mut report);
    }
    for rejection in report.rejections.iter().take(MAX_LISTED_REJECTIONS) {
        tracing::warn!(
            "{}:{}: skipped {:?} ({})",
            rejection.source,
            rejection.line,
            rejection.text,
            rejection.reason
        );
    }
    tracing::info!(
        accepted = report.accepted,
        duplicates = report.duplicates,
        rejected = report.rejected,
        "loaded word lists"
    );
    Ok((lexicon, report))
}

pub fn read_artifact(path: &Path) -> Result<DictionaryArtifact> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    DictionaryArtifact::from_bytes(&bytes).with_context(|| format!("Invalid dictionary {}", path.display()))
}

fn write_or_stdout(path: Option<&Path>, contents: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

pub fn compile(args: &CompileArgs) -> Result<CompileStats> {
    let config = load_config(args.config.as_deref())?;
    let (lexicon, _) = load_lexicon(&args.inputs, &config)?;
    let compiler = DictionaryCompiler::new(config);
    let result = compiler.compile(&lexicon).context("Compilation failed")?;

    if !args.no_verify {
        compiler.verify(&lexicon, &result.artifact).context("Round trip verification failed")?;
        tracing::info!(words = lexicon.len(), "round trip verified");
    }

    let bytes = result.artifact.to_bytes()?;
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(format) = args.emit {
        let source = emit::render(&result.artifact, format)?;
        write_or_stdout(args.emit_out.as_deref(), source.as_bytes())?;
    }

    let stats = result.stats;
    tracing::debug!("compile stats: {}", serde_json::to_string(&stats)?);
    tracing::info!(
        words = stats.words,
        tokens = stats.tokens(),
        roots = stats.root_entries,
        front_coded = stats.front_coded,
        bytes = bytes.len(),
        "wrote {} ({:.1}% of raw)",
        args.output.display(),
        stats.ratio() * 100.0
    );
    Ok(stats)
}

pub fn decode(args: &DecodeArgs) -> Result<usize> {
    let artifact = read_artifact(&args.artifact)?;
    let words = artifact.decode().context("Decoding failed")?;
    let mut text = String::new();
    for word in &words {
        text.push_str(word);
        text.push('\n');
    }
    write_or_stdout(args.output.as_deref(), text.as_bytes())?;
    tracing::info!(words = words.len(), "decoded dictionary");
    Ok(words.len())
}

/// Summary of a stored dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub tiers: [usize; 3],
    pub suffix_slots: usize,
    pub used_suffixes: usize,
    pub tokens: usize,
    pub words: usize,
    pub stream_bytes: usize,
    pub container_bytes: usize,
}

pub fn summarize(artifact: &DictionaryArtifact) -> Result<ArtifactSummary> {
    let tables = artifact.tables()?;
    let tokens = TokenReader::new(&artifact.stream, &tables).collect_tokens()?.len();
    let words = artifact.decode()?.len();
    Ok(ArtifactSummary {
        tiers: [artifact.tier1.len(), artifact.tier2.len(), artifact.tier3.len()],
        suffix_slots: artifact.suffixes.len(),
        used_suffixes: artifact.used_suffixes(),
        tokens,
        words,
        stream_bytes: artifact.stream.len(),
        container_bytes: artifact.encoded_len(),
    })
}

pub fn stats(args: &StatsArgs) -> Result<ArtifactSummary> {
    let artifact = read_artifact(&args.artifact)?;
    let summary = summarize(&artifact)?;
    println!("tiers:      {} / {} / {}", summary.tiers[0], summary.tiers[1], summary.tiers[2]);
    println!("suffixes:   {} of {} used", summary.used_suffixes, summary.suffix_slots);
    for (i, slot) in artifact.suffixes.iter().enumerate() {
        if let Some(literal) = slot {
            println!("  {} -{}", char::from(lx_core::types::suffix_tag(i)), literal);
        }
    }
    println!("tokens:     {}", summary.tokens);
    println!("words:      {}", summary.words);
    println!("stream:     {} bytes", summary.stream_bytes);
    println!("container:  {} bytes", summary.container_bytes);
    Ok(summary)
}
