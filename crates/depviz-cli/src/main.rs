use clap::Parser;

use depviz::{Cli, SystemViewer, run};
use depviz_dot::GraphvizEngine;

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.into_config()?;
    let engine = GraphvizEngine::new(&config.dot_binary);
    let input = config.input.display();
    let artifact = run(&config, &engine, &SystemViewer).map_err(|err| {
        tracing::error!(error = %err, "execution failed");
        let summary = if err.kind().is_input_error() {
            format!("could not read a dependency tree from {input}")
        } else {
            format!("failed to visualize {input}")
        };
        anyhow::Error::new(err).context(summary)
    })?;

    println!("{}", artifact.display());
    Ok(())
}
