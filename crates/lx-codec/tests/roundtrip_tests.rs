//! End-to-end round trips over generated word lists.

use lx_codec::front_coding::{self, MAX_SHARED_PREFIX, MIN_SHARED_PREFIX};
use lx_codec::{CompilationContext, DictionaryArtifact, DictionaryCompiler, Lexicon};
use lx_core::config::DEFAULT_SUFFIXES;
use lx_core::CodecConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz'";

fn random_words(seed: u64, count: usize, suffixes: &[&str]) -> BTreeSet<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut words = BTreeSet::new();
    while words.len() < count {
        let stem_len = rng.gen_range(2..=9);
        // Narrow alphabet so stems collide and share prefixes.
        let stem: String = (0..stem_len)
            .map(|_| LETTERS[rng.gen_range(0..8)] as char)
            .collect();
        words.insert(stem.clone());
        for suffix in suffixes {
            if rng.gen_bool(0.3) && stem.len() + suffix.len() <= 32 {
                words.insert(format!("{stem}{suffix}"));
            }
        }
    }
    words
}

fn assert_roundtrip(config: CodecConfig, words: BTreeSet<String>) {
    let lexicon = Lexicon::from(words);
    let compiler = DictionaryCompiler::new(config);
    let result = compiler.compile(&lexicon).unwrap();
    let bytes = result.artifact.to_bytes().unwrap();
    let restored = DictionaryArtifact::from_bytes(&bytes).unwrap();
    assert_eq!(&restored.decode().unwrap(), lexicon.words());
    compiler.verify(&lexicon, &restored).unwrap();
}

// ============================================================
// Round trips
// ============================================================

#[test]
fn test_roundtrip_default_suffixes() {
    for seed in 0..8 {
        assert_roundtrip(CodecConfig::default(), random_words(seed, 1500, DEFAULT_SUFFIXES));
    }
}

#[test]
fn test_roundtrip_small_table() {
    let suffixes = ["ing", "ed", "s"];
    let config = CodecConfig::default().with_suffixes(&suffixes);
    for seed in 100..104 {
        assert_roundtrip(config.clone(), random_words(seed, 800, &suffixes));
    }
}

#[test]
fn test_roundtrip_reversed_table() {
    let suffixes: Vec<&str> = DEFAULT_SUFFIXES.iter().rev().copied().collect();
    let config = CodecConfig::default().with_suffixes(&suffixes);
    assert_roundtrip(config, random_words(7, 1200, DEFAULT_SUFFIXES));
}

#[test]
fn test_roundtrip_apostrophes_and_long_words() {
    let words: BTreeSet<String> = [
        "don't", "won't", "o'clock", "rock'n'roll", "ab",
        "pneumonoultramicroscopicsilicovo", "pneumonoultramicroscopicsilicov",
        "it's", "it", "its",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_roundtrip(CodecConfig::default(), words);
}

#[test]
fn test_roundtrip_inline_threshold_zero() {
    let mut config = CodecConfig::default();
    config.inline_suffix_max_len = 0;
    assert_roundtrip(config, random_words(42, 600, DEFAULT_SUFFIXES));
}

// ============================================================
// Structural properties
// ============================================================

#[test]
fn test_deterministic_bytes() {
    let words = random_words(9, 1000, DEFAULT_SUFFIXES);
    let lexicon = Lexicon::from(words);
    let compiler = DictionaryCompiler::default();
    let a = compiler.compile(&lexicon).unwrap().artifact.to_bytes().unwrap();
    let b = compiler.compile(&lexicon).unwrap().artifact.to_bytes().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_front_coding_bounds() {
    let lexicon = Lexicon::from(random_words(3, 2000, DEFAULT_SUFFIXES));
    let mut ctx = CompilationContext::new(CodecConfig::default()).unwrap();
    let factoring = ctx.factor(&lexicon);
    let tokens = ctx.canonicalize(&factoring).unwrap();
    let sorted = front_coding::sort_tokens(&tokens);
    let coded = front_coding::front_code(&sorted);
    assert!(coded.iter().any(|t| t.is_shared()));
    let mut previous: &[u8] = &[];
    for (token, original) in coded.iter().zip(&sorted) {
        let shared = usize::from(token.shared);
        assert!(shared == 0 || (MIN_SHARED_PREFIX..=MAX_SHARED_PREFIX).contains(&shared));
        assert_eq!(token.restore(previous).unwrap(), *original);
        previous = original.as_slice();
    }
}

#[test]
fn test_factoring_partitions_words() {
    let lexicon = Lexicon::from(random_words(11, 1500, DEFAULT_SUFFIXES));
    let mut ctx = CompilationContext::new(CodecConfig::default()).unwrap();
    let factoring = ctx.factor(&lexicon);

    let mut claimed: Vec<String> = factoring.bare.iter().cloned().collect();
    for entry in factoring.roots.values() {
        if entry.stands_alone {
            claimed.push(entry.root.clone());
        }
        for &i in &entry.suffixes {
            claimed.push(format!("{}{}", entry.root, ctx.table.rules()[i].literal));
        }
    }
    claimed.sort();
    let expected: Vec<String> = lexicon.iter().map(str::to_string).collect();
    assert_eq!(claimed, expected);

    // Anything left bare matched no rule at all.
    for word in &factoring.bare {
        for rule in ctx.table.rules() {
            assert!(word.len() <= rule.len() || !word.ends_with(rule.literal.as_str()), "{word}");
        }
    }
}

#[test]
fn test_compression_shrinks_input() {
    let lexicon = Lexicon::from(random_words(5, 3000, DEFAULT_SUFFIXES));
    let result = DictionaryCompiler::default().compile(&lexicon).unwrap();
    assert!(result.stats.ratio() < 0.8, "ratio {}", result.stats.ratio());
}
