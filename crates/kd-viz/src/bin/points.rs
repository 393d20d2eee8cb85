use std::process::ExitCode;

use clap::Parser;
use kd_tree::{KdTree, Vector};
use kd_viz::{VizArgs, init_tracing, run_viewer};
use macroquad::Window;
use tracing::{error, info};

/// Point mode: every click inserts the point under the cursor.
fn main() -> ExitCode {
    let args = VizArgs::parse();
    init_tracing(args.verbose);

    let (domain, config) = match args.domain().and_then(|d| Ok((d, args.tree_config()?))) {
        Ok(setup) => setup,
        Err(err) => {
            error!(%err, "invalid arguments");
            return ExitCode::FAILURE;
        }
    };

    info!(?config, size = args.size, "starting point viewer");
    let tree: KdTree<Vector<2>, 2> = KdTree::with_config(domain, config);
    let conf = args.window_conf("Kd Tree Visualization (points)");

    Window::from_config(conf, run_viewer(tree, args, |cursor: Vector<2>| cursor));
    ExitCode::SUCCESS
}
