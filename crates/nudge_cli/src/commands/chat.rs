//! `nudge chat`: one exchange from the terminal.

use anyhow::Result;
use nudge_core::BiasRequest;
use nudge_runtime::ChatInput;

use super::{build_runner, magnitude, runtime_config};
use crate::output;

pub async fn handle(
    message: String,
    bias_string: Option<String>,
    bias_value: Option<f64>,
    model: Option<String>,
) -> Result<()> {
    let bias = BiasRequest {
        target_text: bias_string,
        magnitude: magnitude(bias_value)?,
    };
    let runner = build_runner(runtime_config(model))?;

    let spinner = output::spinner(&format!("Asking {}...", runner.config().model));
    let outcome = match runner.run(ChatInput::user(message).with_bias(bias)).await {
        Ok(outcome) => {
            output::spinner_done(&spinner);
            outcome
        }
        Err(e) => {
            output::spinner_error(&spinner, "Model call failed");
            return Err(e.into());
        }
    };

    if output::is_json() {
        output::data("chat", &outcome);
        return Ok(());
    }

    println!("{}", outcome.reply.content);
    if let Some(mapping) = &outcome.computed_logit_bias {
        println!();
        output::dim(&format!(
            "biased {} token(s): {}",
            mapping.len(),
            serde_json::to_string(mapping)?
        ));
    }

    Ok(())
}
