//! This binary runs both stages on `INPUT_DIR`: it annotates every results
//! table with its speed-up block, then renders every chart kind.

#[macro_use]
extern crate error_chain;
extern crate stereo_bench;
extern crate structopt;

use std::path::PathBuf;
use stereo_bench::errors::*;
use stereo_bench::{chart, logger, Dataset, Setting};
use structopt::StructOpt;

quick_main!(run);

fn run() -> Result<()> {
    logger::init();
    let opt = Opt::from_args();

    let mut setting = Setting::load(opt.setting.as_ref().map(|p| p.as_path()))?;
    if let Some(out) = opt.output_base {
        setting.output_base = out;
    }
    if opt.keep_existing {
        setting.wipe_output = false;
    }

    let summary = stereo_bench::annotate_dir(&opt.input_dir)?;
    println!(
        "→ Speed up calculated successfully! ({} annotated, {} already annotated)\n→ File path: {}",
        summary.annotated.len(),
        summary.skipped.len(),
        opt.input_dir.display()
    );

    let dataset = Dataset::scan(&opt.input_dir)?;
    for (kind, dir) in chart::render_all(&dataset, &setting)? {
        println!(
            "→ {} calculated successfully!\n→ File path: {}",
            kind.description(),
            dir.display()
        );
    }
    Ok(())
}

#[derive(StructOpt, Debug)]
#[structopt(name = "report")]
#[structopt(about = "Annotate a directory of results tables and render all charts.")]
struct Opt {
    /// The folder that contains the results tables.
    #[structopt(help = "Input Directory", parse(from_os_str))]
    input_dir: PathBuf,

    #[structopt(short = "s", long = "setting", parse(from_os_str))]
    #[structopt(help = "The path to a TOML setting")]
    setting: Option<PathBuf>,

    #[structopt(short = "o", long = "out", parse(from_os_str))]
    #[structopt(help = "Base directory of the charts (overrides the setting)")]
    output_base: Option<PathBuf>,

    #[structopt(long = "keep-existing")]
    #[structopt(help = "Do not wipe chart directories before drawing")]
    keep_existing: bool,
}
