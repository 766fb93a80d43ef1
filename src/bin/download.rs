//! Command line tool to download the model

use std::path::PathBuf;

use anyhow::Result;
use ia_cgdf::{
    config::Settings,
    utils::hugging_face::{HubSource, ModelAsset, Provisioned},
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: download [OPTIONS]

Downloads the model from the Hugging Face Hub unless it is already present.

Options:
  -h, --help           Print help
  -r, --root           The project root (defaults to the current directory)
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The project root
    root: Option<PathBuf>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        root: pargs.opt_value_from_str(["-r", "--root"])?,
    };

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let settings = Settings::load(&root)?;
    let asset = ModelAsset::new(settings.model_repo, settings.model_dir);

    match asset.provision(&HubSource::new()?).await? {
        Provisioned::AlreadyPresent => {
            println!("Model already present at: {}", asset.local_dir.display())
        }
        Provisioned::Downloaded(files) => println!(
            "[SUCCESS] Downloaded {} files to {}",
            files,
            asset.local_dir.display()
        ),
    }

    Ok(())
}
