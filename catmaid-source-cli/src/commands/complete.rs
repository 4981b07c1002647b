//! Complete command - address completion as the viewer's address bar does it.

use catmaid_source::completion::CompletionResult;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the complete command.
pub fn run(server: Option<&str>, input: &str, json: bool) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let address = runner.resolve_address(server, input)?;
    let result = runner.block_on(runner.source().volume_completer(&address))?;

    if json {
        let output =
            serde_json::to_string_pretty(&result).map_err(|e| CliError::Serialize(e.to_string()))?;
        println!("{}", output);
    } else {
        print_completions(&address, &result);
    }
    Ok(())
}

fn print_completions(address: &str, result: &CompletionResult) {
    if result.completions.is_empty() {
        println!("No completions for {}", address);
        return;
    }

    let stem = address.get(..result.offset).unwrap_or(address);
    let width = result
        .completions
        .iter()
        .map(|c| c.value.len())
        .max()
        .unwrap_or(0);

    for completion in &result.completions {
        if completion.description.is_empty() {
            println!("{}{}", stem, completion.value);
        } else {
            println!(
                "{}{:<width$}  {}",
                stem,
                completion.value,
                completion.description,
                width = width
            );
        }
    }
}
