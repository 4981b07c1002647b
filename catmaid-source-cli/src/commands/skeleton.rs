//! Skeleton command - resolve the skeleton source of a project.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the skeleton command.
pub fn run(server: Option<&str>, input: &str) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let address = runner.resolve_address(server, input)?;
    let source = runner.block_on(runner.source().get_skeleton_source(&address))?;

    println!("{}", source.rpc_id());
    println!("  Server:  {}", source.parameters.catmaid_server_url);
    println!("  Project: {}", source.parameters.project_id);
    Ok(())
}
