use super::{RenderConfig, RenderError};
use crate::Diff;

pub(super) fn render(diff: &Diff, config: &RenderConfig) -> Result<String, RenderError> {
    let text = if config.pretty() {
        serde_json::to_string_pretty(diff)?
    } else {
        serde_json::to_string(diff)?
    };
    Ok(text)
}

pub(super) fn parse(input: &str) -> Result<Diff, RenderError> {
    Ok(serde_json::from_str(input)?)
}
