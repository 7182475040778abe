//! Cloud Atlas CLI
//!
//! Build the 2x2 cloud texture atlas and its `.tex` sidecar.

use clap::Parser;
use cloud_atlas::{build_atlas, AtlasConfig, PrintObserver};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloud-atlas")]
#[command(author, version, about = "Composite four cloud textures into a 2x2 atlas", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the source cloud textures
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory to write the atlas and sidecar into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Atlas file name
    #[arg(long)]
    output_name: Option<String>,

    /// Atlas width and height in pixels (must be even)
    #[arg(long)]
    atlas_size: Option<u32>,

    /// Four source file names: top-left,top-right,bottom-left,bottom-right
    #[arg(long, value_delimiter = ',')]
    cells: Option<Vec<String>>,

    /// Print the resolved config as JSON and exit without building
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn into_config(self) -> Result<AtlasConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => AtlasConfig::from_json_file(path)?,
            None => AtlasConfig::default(),
        };

        if let Some(dir) = self.source_dir {
            config.source_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.output_name {
            config.output_name = name;
        }
        if let Some(size) = self.atlas_size {
            config.atlas_size = size;
        }
        if let Some(cells) = self.cells {
            config.cells = cells.try_into().map_err(|cells: Vec<String>| {
                format!("--cells takes exactly 4 names, got {}", cells.len())
            })?;
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let print_config = cli.print_config;
    let config = cli.into_config()?;
    config.validate()?;

    if print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    log::debug!("using config {:?}", config);

    build_atlas(&config, &mut PrintObserver)?;
    println!("\nDone! Rebuild textures.lvl to include the new atlas.");

    Ok(())
}
