//! Text and JSON rendering of command results.

use serde::Serialize;

use crate::error::CommandError;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct JsonErr<'a> {
    ok: bool,
    error: &'a CommandError,
}

/// Render a list: one line per item, or a JSON envelope.
pub fn render_list<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> Result<String, CommandError> {
    if json {
        return envelope(data);
    }
    let mut out = String::new();
    for d in data {
        out.push_str(&row(d));
        out.push('\n');
    }
    Ok(out)
}

/// Render a single value as text, or a JSON envelope.
pub fn render_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> Result<String, CommandError> {
    if json {
        envelope(data)
    } else {
        Ok(text(&data))
    }
}

/// Render a command failure for stderr.
pub fn render_error(json: bool, err: &CommandError) -> serde_json::Result<String> {
    if json {
        let body = serde_json::to_string_pretty(&JsonErr {
            ok: false,
            error: err,
        })?;
        return Ok(format!("{body}\n"));
    }

    let mut out = format!("error: {err}\n");
    if let Some(hint) = err.hint() {
        out.push_str(&format!("hint: {hint}\n"));
    }
    Ok(out)
}

fn envelope<T: Serialize>(data: T) -> Result<String, CommandError> {
    let body = serde_json::to_string_pretty(&JsonOut { ok: true, data })?;
    Ok(format!("{body}\n"))
}
