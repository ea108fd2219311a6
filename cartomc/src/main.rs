use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use cartomc_render::{BlockColors, RenderArea, render_world_map};

#[derive(Parser)]
#[command(name = "cartomc", about = "Top-down map renderer for Minecraft region files")]
pub struct Args {
    /// World directory (containing region/r.X.Z.mca)
    #[arg(short, long, env = "WORLD_PATH")]
    pub world: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "map.png")]
    pub output: PathBuf,

    /// Block color table (precomputed from game assets)
    #[arg(short, long, default_value = "block-colors.json")]
    pub colors: PathBuf,

    #[arg(long, default_value_t = -512, allow_hyphen_values = true)]
    pub min_x: i32,
    #[arg(long, default_value_t = 512, allow_hyphen_values = true)]
    pub max_x: i32,
    #[arg(long, default_value_t = -512, allow_hyphen_values = true)]
    pub min_z: i32,
    #[arg(long, default_value_t = 512, allow_hyphen_values = true)]
    pub max_z: i32,

    /// How many block types to list in the summary
    #[arg(long, default_value_t = 20)]
    pub top_blocks: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let area = RenderArea::new(args.min_x, args.max_x, args.min_z, args.max_z)?;
    let colors = BlockColors::load(&args.colors)?;
    let region_dir = args.world.join("region");

    println!("cartomc world mapper");
    println!("World: {:?}", args.world);
    println!(
        "Area: {},{} to {},{} ({}x{} pixels)",
        area.min_x,
        area.min_z,
        area.max_x,
        area.max_z,
        area.width(),
        area.height()
    );

    let stats = render_world_map(&region_dir, &area, &colors, &args.output)?;

    stats.print_summary(args.top_blocks);
    println!("\nDone! Map saved to {:?}", args.output);

    Ok(())
}
