//! `nudge bias`: compile a phrase into its `logit_bias` mapping offline.

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Color};
use nudge_core::{BiasCompiler, TiktokenEncoder};
use serde_json::json;

use super::{magnitude, runtime_config};
use crate::output;

pub fn handle(
    text: String,
    value: Option<f64>,
    model: Option<String>,
    encoding: Option<String>,
) -> Result<()> {
    let magnitude = magnitude(value)?;
    let config = runtime_config(model);
    let encoder = match encoding.or(config.encoding) {
        Some(encoding) => TiktokenEncoder::with_encoding(&encoding)?,
        None => TiktokenEncoder::for_model(&config.model)?,
    };
    let compiler = BiasCompiler::new(Arc::new(encoder.clone()));

    let Some(mapping) = compiler.compute(Some(&text), magnitude) else {
        output::dim("Empty phrase: no bias would be sent");
        return Ok(());
    };

    if output::is_json() {
        output::data(
            "bias",
            &json!({
                "text": text,
                "model": config.model,
                "encoding": compiler.encoding(),
                "logit_bias": mapping,
            }),
        );
        return Ok(());
    }

    output::header(&format!("Bias for {text:?}"));
    output::kv("model", &config.model);
    output::kv("encoding", compiler.encoding());
    output::kv("tokens", &mapping.len().to_string());

    let mut table = output::table(&["Token id", "Text", "Bias"]);
    for (id, bias) in mapping.iter() {
        let piece = encoder
            .decode(&[id])
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "<partial utf-8>".to_string());
        table.add_row(vec![
            Cell::new(id).fg(Color::Green),
            Cell::new(piece),
            Cell::new(bias),
        ]);
    }
    println!("{table}");

    Ok(())
}
