use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use cellsweep_protocol::{Response, handle_json};

/// Serves requests until the input closes, answering each line with exactly one line.
pub(crate) fn run(input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Could not read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match handle_json(&line) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{}", err);
                serde_json::to_string(&Response::Error {
                    message: err.to_string(),
                })?
            }
        };
        writeln!(output, "{}", response)?;
        output.flush()?;
    }
    Ok(())
}
