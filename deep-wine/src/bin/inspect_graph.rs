//! Prints the backward graph of a small demo computation.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deep_core::autograd::{count_nodes, print_graph, to_dot};
use deep_wine::graph_demo::Demo;
use deep_wine::WineError;

#[derive(Parser, Debug)]
#[command(name = "inspect-graph")]
#[command(about = "Print the backward graph of a demo computation")]
#[command(version)]
struct Args {
    /// Which computation to build
    #[arg(long, value_enum, default_value_t = Demo::Network)]
    demo: Demo,

    /// Also write the graph as Graphviz DOT to this file
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,
}

fn inspect(args: &Args) -> Result<(), WineError> {
    let root = args.demo.build()?;
    print_graph(&root);
    println!("{} nodes", count_nodes(&root));

    if let Some(path) = &args.dot {
        if let Some(dot) = to_dot(&root) {
            fs::write(path, dot)?;
            log::info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match inspect(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
