mod auth;
mod calc;
mod config;
mod dashboard;
mod db;
mod events;
mod logging;
mod models;
mod run;
mod server;
mod ui;

use anyhow::Result;
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = config::data_dir()?;

    if args.len() <= 1 {
        logging::init_file(&data_dir.join("migas.log"))?;
    } else {
        logging::init_stderr()?;
    }

    let config = config::Config::load(&data_dir);
    let db = db::Database::open(&config.db_path)?;
    info!(db = %config.db_path.display(), "Database ready");

    match args.len() {
        0 | 1 => run::as_tui(&db, &config),
        _ => run::as_cli(&args, db, &config),
    }
}
