//! This binary appends the speed-up block to every results table within
//! `INPUT_DIR`. Tables that already carry the block are left untouched.

#[macro_use]
extern crate error_chain;
extern crate stereo_bench;
extern crate structopt;

use std::path::PathBuf;
use stereo_bench::errors::*;
use stereo_bench::logger;
use structopt::StructOpt;

quick_main!(run);

fn run() -> Result<()> {
    logger::init();
    let opt = Opt::from_args();

    let summary = stereo_bench::annotate_dir(&opt.input_dir)?;
    if !summary.skipped.is_empty() {
        println!("→ {} file(s) were already annotated", summary.skipped.len());
    }
    println!(
        "→ Speed up calculated successfully!\n→ File path: {}",
        opt.input_dir.display()
    );
    Ok(())
}

#[derive(StructOpt, Debug)]
#[structopt(name = "speed_up")]
#[structopt(about = "Append speed-up ratios to the results tables of a directory.")]
struct Opt {
    /// The folder that contains the results tables.
    #[structopt(help = "Input Directory", parse(from_os_str))]
    input_dir: PathBuf,
}
