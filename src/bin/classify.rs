//! Command line tool for classification

use std::path::PathBuf;

use anyhow::{Context, Result};
use ia_cgdf::{
    config::Settings,
    models::bert::sequence_classification::{inference::device_name, select_device, Classifier},
    pipelines::{
        text_classification::{classify_file, classify_sheet},
        Pipeline,
    },
    utils::hugging_face::{HubSource, ModelAsset},
};
use log::{error, info};
use pico_args::Arguments;

const HELP: &str = "\
Usage: classify MODE [OPTIONS]

Arguments:
  MODE                 'text' to classify dados/texto.txt, 'batch' to classify dados/textos.xlsx

Options:
  -h, --help           Print help
  -r, --root           The project root (defaults to the current directory)
  -i, --input          Override the input file
  -o, --output         Override the output file
  --cpu                Run on the CPU even when CUDA is available
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The pipeline to run
    mode: Option<String>,

    /// The project root
    root: Option<PathBuf>,

    /// Input override
    input: Option<PathBuf>,

    /// Output override
    output: Option<PathBuf>,

    /// Force the CPU
    cpu: bool,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        root: pargs.opt_value_from_str(["-r", "--root"])?,
        input: pargs.opt_value_from_str(["-i", "--input"])?,
        output: pargs.opt_value_from_str(["-o", "--output"])?,
        cpu: pargs.contains("--cpu"),
        mode: pargs.opt_free_from_str()?,
    };

    Ok(args)
}

#[tokio::main]
async fn main() {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = parse_args()?;

    let Some(mode) = args.mode.filter(|_| !args.help) else {
        println!("{}", HELP);
        return Ok(());
    };

    let pipeline = Pipeline::try_from(mode.as_str())?;

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let mut settings = Settings::load(&root)?;
    settings.force_cpu |= args.cpu;

    // Make sure the model is on disk before anything else
    ModelAsset::new(settings.model_repo.clone(), settings.model_dir.clone())
        .provision(&HubSource::new()?)
        .await?;

    let device = select_device(settings.force_cpu)?;

    info!("Loading the model on: {}...", device_name(&device));

    let classifier = Classifier::load(&settings.model_dir, settings.max_seq_length, device)
        .context("Unable to load the model or tokenizer")?;

    match pipeline {
        Pipeline::Text => {
            let input = args.input.unwrap_or(settings.text_input);
            let output = args.output.unwrap_or(settings.text_output);

            classify_file(&classifier, &input, &output).await?;

            println!("[SUCCESS] Classification written to {}", output.display());
        }
        Pipeline::Batch => {
            let input = args.input.unwrap_or(settings.batch_input);
            let output = args.output.unwrap_or(settings.batch_output);

            let rows = classify_sheet(&classifier, &input, &output, &settings.text_column)?;

            println!("[SUCCESS] {} rows classified: {}", rows, output.display());
        }
    }

    Ok(())
}
