mod cli;
mod import;

use huntflow_uploader::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
