//! Bias compilation against the real o200k table.
//!
//! Run with: cargo test -p nudge-core --test tiktoken_bias

use std::collections::BTreeSet;
use std::sync::Arc;

use nudge_core::{
    BiasCompiler, BiasError, BiasMagnitude, Encoder, TiktokenEncoder, TokenId,
};

fn encoder() -> TiktokenEncoder {
    TiktokenEncoder::for_model("gpt-4o-mini").unwrap()
}

fn ids(encoder: &TiktokenEncoder, text: &str) -> BTreeSet<TokenId> {
    encoder.encode(text).into_iter().collect()
}

#[test]
fn test_model_resolves_to_o200k() {
    assert_eq!(encoder().name(), "o200k_base");
    assert_eq!(TiktokenEncoder::for_model("gpt-4").unwrap().name(), "cl100k_base");
}

#[test]
fn test_unknown_model_is_a_configuration_error() {
    let err = TiktokenEncoder::for_model("definitely-not-a-model").unwrap_err();
    assert!(matches!(err, BiasError::UnknownModel(_)));

    let err = TiktokenEncoder::with_encoding("nope_base").unwrap_err();
    assert!(matches!(err, BiasError::UnknownEncoding(_)));
}

#[test]
fn test_time_covers_both_surface_forms() {
    let encoder = encoder();
    let compiler = BiasCompiler::new(Arc::new(encoder.clone()));

    let mapping = compiler
        .compute(Some("time"), Some(BiasMagnitude::new(-50.0).unwrap()))
        .unwrap();

    let expected: BTreeSet<_> = ids(&encoder, "time")
        .union(&ids(&encoder, " time"))
        .copied()
        .collect();
    assert_eq!(mapping.token_ids().collect::<BTreeSet<_>>(), expected);
    assert!(mapping.iter().all(|(_, v)| v == -50.0));
    // "time" and " time" are distinct single tokens
    assert_eq!(mapping.len(), 2);
}

#[test]
fn test_leading_space_quiet_uses_only_given_form() {
    let encoder = encoder();
    let compiler = BiasCompiler::new(Arc::new(encoder.clone()));

    let mapping = compiler.compute(Some(" quiet"), None).unwrap();

    assert_eq!(
        mapping.token_ids().collect::<BTreeSet<_>>(),
        ids(&encoder, " quiet")
    );
    assert!(mapping.iter().all(|(_, v)| v == -100.0));
}

#[test]
fn test_special_token_text_is_encoded_as_plain_text() {
    let compiler = BiasCompiler::new(Arc::new(encoder()));

    let mapping = compiler.compute(Some("<|endoftext|>"), None).unwrap();
    assert!(!mapping.is_empty());
}

#[test]
fn test_absent_target_with_magnitude_is_none() {
    let compiler = BiasCompiler::new(Arc::new(encoder()));
    assert!(compiler
        .compute(None, Some(BiasMagnitude::new(10.0).unwrap()))
        .is_none());
}

#[test]
fn test_decode_restores_text() {
    let encoder = encoder();
    let tokens = encoder.encode(" what time is it?");
    assert_eq!(encoder.decode(&tokens).as_deref(), Some(" what time is it?"));
}
