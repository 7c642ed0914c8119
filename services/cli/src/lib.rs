mod cli;
mod demo;
mod infra;

use ctd_ild::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
