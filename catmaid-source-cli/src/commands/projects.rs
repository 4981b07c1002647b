//! Projects command - list the projects and stacks a server offers.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the projects command.
pub fn run(server: Option<&str>, input: Option<&str>) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let address = runner.resolve_address(server, input.unwrap_or_default())?;
    let projects = runner.block_on(runner.source().get_projects_list(&address))?;

    for (id, project) in projects.iter() {
        println!("{}  {}", id, project.title);
        for (stack_id, stack) in &project.stacks {
            if stack.comment.is_empty() {
                println!("    {}  {}", stack_id, stack.title);
            } else {
                println!("    {}  {}: {}", stack_id, stack.title, stack.comment);
            }
        }
    }

    Ok(())
}
