//! epsplot - log-log plots of C(ε), I(ε) and D(ε).

use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use epsplot::{render_all, PlotSpec, Table};

#[derive(Parser)]
#[command(name = "epsplot", version)]
#[command(about = "Plot C(ε), I(ε) and D(ε) against ε on log-log axes \
                   into ces.pdf, ies.pdf and des.pdf")]
struct Cli {
    /// Whitespace-delimited table with columns ε, C, D, I
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let table = Table::from_path(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    info!(rows = table.len(), columns = table.width(), "loaded table");
    if let Some(c) = table.coefficients() {
        info!(gamma = c.gamma, delta = c.delta, kdist = ?c.kdist,
              "fitted coefficients");
    }

    render_all(&table, &PlotSpec::standard(), Path::new("."))
        .with_context(|| format!("plotting {}", cli.input.display()))?;
    Ok(())
}
