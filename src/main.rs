//! Companion function server entry point

use clap::Parser;
use dynaform_lib::server::{run_server, ServerState};

#[derive(Parser, Debug)]
#[command(name = "dynaform-server")]
#[command(about = "Hosts the sentiment scoring and field generation functions")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "DYNAFORM_PORT", default_value_t = 8090)]
    port: u16,

    /// Address to bind to
    #[arg(long, env = "DYNAFORM_BIND", default_value = "127.0.0.1")]
    bind: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();
    let state = ServerState::from_env();

    if let Err(e) = run_server(args.port, &args.bind, state).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
