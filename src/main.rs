use clap::Parser;

use compound::api::{App, Command, run_cli_projection, run_http_server};

#[tokio::main]
async fn main() {
    compound::logging::init();

    match App::parse().command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server stopped");
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Project(cli) => match run_cli_projection(&cli) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}
