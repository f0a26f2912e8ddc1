use std::rc::Rc;

use clap::Parser;
use micro_kv_server::{Cli, ServerError};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = cli.load_store()?;
    info!(keys = store.len(), seed = ?cli.seed, "store loaded");

    let server = cli.server_builder(Rc::new(store)).build()?;
    server.start()
}
