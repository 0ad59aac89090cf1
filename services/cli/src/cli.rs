use crate::import::{run_import, ImportArgs};
use clap::Parser;
use huntflow_uploader::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "huntflow-uploader",
    about = "Upload a candidate roster and its résumés into Huntflow",
    version
)]
struct Cli {
    #[command(flatten)]
    import: ImportArgs,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    run_import(cli.import)
}
