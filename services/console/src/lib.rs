mod cli;
mod menu;
mod prompt;
mod render;

use property_manager::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
