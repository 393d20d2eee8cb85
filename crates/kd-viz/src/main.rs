use std::process::ExitCode;

use clap::Parser;
use kd_tree::{AaBb, KdTree, Vector};
use kd_viz::{VizArgs, init_tracing, run_viewer};
use macroquad::Window;
use tracing::{error, info};

/// Box mode: every click inserts a square of random radius 1 to 4.
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

    info!(?config, size = args.size, "starting box viewer");
    let tree: KdTree<AaBb<2>, 2> = KdTree::with_config(domain, config);
    let conf = args.window_conf("Kd Tree Visualization");

    Window::from_config(
        conf,
        run_viewer(tree, args, |cursor: Vector<2>| {
            let r = macroquad::rand::gen_range(1, 5) as f32;
            AaBb::new(cursor.add_scalar(-r), cursor.add_scalar(r))
        }),
    );
    ExitCode::SUCCESS
}
