//! Volume command - print the tile pyramid of a stack mirror.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the volume command.
pub fn run(server: Option<&str>, input: &str) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let address = runner.resolve_address(server, input)?;

    let volume = runner.block_on(runner.source().get_volume(&address))?;
    let mirror = volume.mirror()?;
    let levels = volume.get_sources(runner.source().chunk_manager())?;
    let info = volume.stack_info();

    println!("Stack {} on {}", info.id, volume.hostname());
    println!("  Mirror:     {} ({})", mirror.id, mirror.title);
    println!("  Tiles:      {}", mirror.url);
    println!(
        "  Dimension:  {} x {} x {}",
        info.dimension[0], info.dimension[1], info.dimension[2]
    );
    println!(
        "  Resolution: {} x {} x {}",
        info.resolution[0], info.resolution[1], info.resolution[2]
    );
    println!("  Data type:  {:?}, {} channel", volume.data_type(), volume.num_channels());
    println!();

    println!("Zoom levels");
    println!("===========");
    for group in &levels {
        for source in group {
            let spec = &source.spec;
            println!(
                "  {:>2}  voxel {:>8.2} x {:>8.2} x {:>6.2}  bound {} x {} x {}  chunk {} x {} x {}",
                source.parameters.zoom_level,
                spec.voxel_size[0],
                spec.voxel_size[1],
                spec.voxel_size[2],
                spec.upper_voxel_bound[0],
                spec.upper_voxel_bound[1],
                spec.upper_voxel_bound[2],
                spec.chunk_data_size[0],
                spec.chunk_data_size[1],
                spec.chunk_data_size[2],
            );
        }
    }

    Ok(())
}
