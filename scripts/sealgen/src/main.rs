use std::path::PathBuf;

use clap::Parser;
use sealgen::{ctx, generate, load_params};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate an SG13G2 seal ring and write it as GDS"
)]
pub struct Args {
    /// Seal ring parameters. Defaults are used if the file does not exist.
    #[arg(short, long, default_value = "sealring.toml")]
    config: PathBuf,
    /// Technology parameter overrides.
    #[arg(short, long)]
    tech: Option<PathBuf>,
    /// The output GDS file.
    #[arg(short, long, default_value = "sealring.gds")]
    output: PathBuf,
}

pub fn main() {
    let args = Args::parse();
    let params = load_params(&args.config).expect("failed to read seal ring parameters");
    let ctx = ctx(args.tech.as_deref()).expect("failed to load the SG13G2 PDK");

    println!(
        "sealring: l = {}, w = {}, wfill = {}, label = {}, slits = {}",
        params.l, params.w, params.wfill, params.add_label, params.add_slit
    );
    let cell = generate(&ctx, &params, &args.output).expect("failed to generate seal ring");
    for (layer, count) in ctx.layer_report(&cell) {
        println!("  {layer:<20} {count}");
    }
    println!("wrote {} shapes to {:?}", cell.len(), args.output);
}
