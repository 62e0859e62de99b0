//! This binary aggregates the results tables within `INPUT_DIR` per (kernel,
//! block) group and renders them as PNG charts below
//! `<output_base>/benchmark/charts/<dataset>/`.

#[macro_use]
extern crate error_chain;
extern crate stereo_bench;
extern crate structopt;

use std::path::PathBuf;
use stereo_bench::chart::{self, KindSelection};
use stereo_bench::errors::*;
use stereo_bench::{logger, Dataset, Setting};
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

    let dataset = Dataset::scan(&opt.input_dir)?;
    for kind in opt.kind.unwrap_or_default().kinds() {
        let dir = chart::render(kind, &dataset, &setting)?;
        println!(
            "→ {} calculated successfully!\n→ File path: {}",
            kind.description(),
            dir.display()
        );
    }
    Ok(())
}

#[derive(StructOpt, Debug)]
#[structopt(name = "charts")]
#[structopt(about = "Render benchmark charts from a directory of results tables.")]
struct Opt {
    /// The folder that contains the results tables.
    #[structopt(help = "Input Directory", parse(from_os_str))]
    input_dir: PathBuf,

    /// Chart kind to draw; every kind when absent.
    #[structopt(short = "k", long = "kind")]
    #[structopt(help = "all, time-series, time-series-with-error, speed-up-bar or boxplot")]
    kind: Option<KindSelection>,

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
