//! Compilation pipeline — orchestrates factoring, tokenizing, front coding and nibble encoding.

use crate::alphabet::{Tier, TierTables};
use crate::artifact::DictionaryArtifact;
use crate::front_coding::{self, CodedToken};
use crate::lexicon::Lexicon;
use crate::nibble;
use crate::suffix::{self, Factoring, SuffixTable};
use crate::token;
use lx_core::types::Token;
use lx_core::{CodecConfig, LexError, Result};
use serde::Serialize;

/// Counters gathered during one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    pub words: usize,
    /// Bytes of the word list as newline-separated text.
    pub raw_bytes: usize,
    pub bare_words: usize,
    pub root_entries: usize,
    pub standalone_roots: usize,
    pub bare_tokens: usize,
    pub marked_tokens: usize,
    pub front_coded: usize,
    pub alphabet_size: usize,
    pub nibbles: usize,
    pub stream_bytes: usize,
    pub suffix_occurrences: Vec<usize>,
}

impl CompileStats {
    pub fn tokens(&self) -> usize {
        self.bare_tokens + self.marked_tokens
    }

    /// Stream size relative to the raw word list.
    pub fn ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 1.0;
        }
        self.stream_bytes as f64 / self.raw_bytes as f64
    }
}

/// Compilation result with statistics.
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub artifact: DictionaryArtifact,
    pub stats: CompileStats,
}

/// State owned by a single compilation run.
#[derive(Debug, Clone)]
pub struct CompilationContext {
    pub config: CodecConfig,
    pub table: SuffixTable,
    pub occurrences: Vec<usize>,
    pub tiers: TierTables,
    pub stats: CompileStats,
}

impl CompilationContext {
    pub fn new(config: CodecConfig) -> Result<Self> {
        let table = SuffixTable::from_config(&config)?;
        let occurrences = vec![0; table.len()];
        Ok(Self {
            config,
            table,
            occurrences,
            tiers: TierTables::default(),
            stats: CompileStats::default(),
        })
    }

    pub fn factor(&mut self, lexicon: &Lexicon) -> Factoring {
        self.stats.words = lexicon.len();
        self.stats.raw_bytes = lexicon.iter().map(|w| w.len() + 1).sum();
        let factoring = suffix::factor(lexicon.iter(), &self.table);
        self.occurrences = factoring.occurrences.clone();
        self.stats.bare_words = factoring.bare.len();
        self.stats.root_entries = factoring.roots.len();
        self.stats.standalone_roots = factoring.standalone_roots();
        factoring
    }

    pub fn canonicalize(&mut self, factoring: &Factoring) -> Result<Vec<Token>> {
        let tokens = token::canonicalize(factoring, &self.table, self.config.inline_suffix_max_len)?;
        self.stats.marked_tokens = tokens.iter().filter(|t| t.is_marked()).count();
        self.stats.bare_tokens = tokens.len() - self.stats.marked_tokens;
        Ok(tokens)
    }

    pub fn front_code(&mut self, tokens: &[Token]) -> Vec<CodedToken> {
        let sorted = front_coding::sort_tokens(tokens);
        let coded = front_coding::front_code(&sorted);
        self.stats.front_coded = coded.iter().filter(|t| t.is_shared()).count();
        coded
    }

    pub fn encode(&mut self, coded: &[CodedToken]) -> Result<Vec<u8>> {
        self.tiers = TierTables::build(coded);
        self.stats.alphabet_size = self.tiers.len();
        let nibbles = nibble::encode_stream(coded, &self.tiers)?;
        let stream = nibbles.pack();
        self.stats.nibbles = nibbles.len();
        self.stats.stream_bytes = stream.len();
        Ok(stream)
    }

    /// Literal per rule; rules that claimed no word are left unused.
    pub fn suffix_literals(&self) -> Vec<Option<String>> {
        self.table
            .rules()
            .iter()
            .map(|rule| (self.occurrences[rule.index] > 0).then(|| rule.literal.clone()))
            .collect()
    }

    pub fn run(mut self, lexicon: &Lexicon) -> Result<CompileResult> {
        let factoring = self.factor(lexicon);
        let tokens = self.canonicalize(&factoring)?;
        let coded = self.front_code(&tokens);
        let stream = self.encode(&coded)?;

        let artifact = DictionaryArtifact {
            tier1: self.tiers.tier(Tier::One).to_vec(),
            tier2: self.tiers.tier(Tier::Two).to_vec(),
            tier3: self.tiers.tier(Tier::Three).to_vec(),
            suffixes: self.suffix_literals(),
            stream,
        };
        self.stats.suffix_occurrences = self.occurrences.clone();

        tracing::debug!(
            words = self.stats.words,
            tokens = self.stats.tokens(),
            front_coded = self.stats.front_coded,
            stream_bytes = self.stats.stream_bytes,
            "compiled dictionary"
        );

        Ok(CompileResult { artifact, stats: self.stats })
    }
}

/// The main dictionary compiler.
#[derive(Debug, Clone, Default)]
pub struct DictionaryCompiler {
    pub config: CodecConfig,
}

impl DictionaryCompiler {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, lexicon: &Lexicon) -> Result<CompileResult> {
        CompilationContext::new(self.config.clone())?.run(lexicon)
    }

    /// Compile from raw lines, discarding the load report.
    pub fn compile_lines<I, S>(&self, lines: I) -> Result<CompileResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (lexicon, _) = Lexicon::load(lines, &self.config);
        self.compile(&lexicon)
    }

    /// Decode `artifact` and check it reproduces `lexicon` exactly.
    pub fn verify(&self, lexicon: &Lexicon, artifact: &DictionaryArtifact) -> Result<()> {
        let decoded = artifact.decode()?;
        let expected = lexicon.words();
        let missing: Vec<&String> = expected.difference(&decoded).collect();
        let extra: Vec<&String> = decoded.difference(expected).collect();
        if missing.is_empty() && extra.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            missing = ?missing.iter().take(5).collect::<Vec<_>>(),
            extra = ?extra.iter().take(5).collect::<Vec<_>>(),
            "round trip mismatch"
        );
        Err(LexError::VerifyMismatch { missing: missing.len(), extra: extra.len() })
    }
}
