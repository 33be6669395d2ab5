mod args;
mod entry;
mod error;
mod logger;
mod probe;
mod shutdown;
mod shutdown_handlers;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
