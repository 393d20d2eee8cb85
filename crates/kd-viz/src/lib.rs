//! Shared visualization utilities for the kd tree viewers.

use clap::Parser;
use kd_tree::{AaBb, KdTree, KdTreeError, Ray, SpatialItem, TreeConfig, TreeVisitor, Vector};
use macroquad::prelude::*;
use macroquad::window::Conf;
use tracing::{Level, debug, info};

pub mod navigator;
pub use navigator::TreeNavigator;

/// Command line options shared by every viewer binary.
#[derive(Debug, Clone, Parser)]
#[command(about = "Interactive kd tree viewer")]
pub struct VizArgs {
    /// Side length of the square domain covered by the tree.
    #[arg(long, default_value_t = 100)]
    pub size: u32,

    /// Pixels per domain unit.
    #[arg(long, default_value_t = 5.0)]
    pub scale: f32,

    /// A leaf splits once it holds more than this many items.
    #[arg(long, default_value_t = 2)]
    pub split_threshold: usize,

    /// Nodes at this depth never split.
    #[arg(long, default_value_t = 8)]
    pub max_depth: usize,

    /// Seconds between two random rays.
    #[arg(long, default_value_t = 1.0)]
    pub ray_interval: f64,

    /// Seed for the ray generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every split and query.
    #[arg(short, long)]
    pub verbose: bool,
}

impl VizArgs {
    /// Returns the square domain `[0, size]²`.
    pub fn domain(&self) -> Result<AaBb<2>, KdTreeError> {
        let size = self.size as f32;
        AaBb::try_new(Vector::from([0.0, 0.0]), Vector::from([size, size]))
    }

    /// Returns the validated split parameters.
    pub fn tree_config(&self) -> Result<TreeConfig, KdTreeError> {
        TreeConfig::new(self.split_threshold, self.max_depth)
    }

    /// Returns the domain-to-screen mapping.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scale, 1.0)
    }

    /// Builds the window configuration for the given title.
    pub fn window_conf(&self, title: &str) -> Conf {
        let side = self.viewport().screen_size(self.size as f32) as i32;
        Conf {
            window_title: title.to_string(),
            window_width: side,
            window_height: side,
            window_resizable: false,
            ..Default::default()
        }
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Maps domain coordinates to screen pixels: `screen = domain * scale + border`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub border: f32,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(scale: f32, border: f32) -> Self {
        Self { scale, border }
    }

    /// Converts a domain point to screen coordinates.
    pub fn to_screen(&self, point: &Vector<2>) -> Vec2 {
        vec2(
            point[0] * self.scale + self.border,
            point[1] * self.scale + self.border,
        )
    }

    /// Converts a screen position to the domain cell under it.
    pub fn to_domain(&self, x: f32, y: f32) -> Vector<2> {
        Vector::from([
            ((x - self.border) / self.scale).floor(),
            ((y - self.border) / self.scale).floor(),
        ])
    }

    /// Window side length needed to show a domain of the given size.
    pub fn screen_size(&self, size: f32) -> f32 {
        size * self.scale + self.border * 2.0
    }

    /// Draws a line between two domain points.
    pub fn draw_line(&self, from: &Vector<2>, to: &Vector<2>, color: Color) {
        let (a, b) = (self.to_screen(from), self.to_screen(to));
        draw_line(a.x, a.y, b.x, b.y, 1.0, color);
    }
}

/// Geometry that can be drawn onto a [`Viewport`].
pub trait Drawable {
    fn draw(&self, viewport: &Viewport, color: Color);
}

impl Drawable for AaBb<2> {
    fn draw(&self, viewport: &Viewport, color: Color) {
        let low = viewport.to_screen(self.low());
        let high = viewport.to_screen(self.high());
        draw_rectangle_lines(low.x, low.y, high.x - low.x, high.y - low.y, 1.0, color);
    }
}

impl Drawable for Vector<2> {
    fn draw(&self, viewport: &Viewport, color: Color) {
        let p = viewport.to_screen(self);
        draw_circle_lines(p.x, p.y, viewport.scale, 1.0, color);
    }
}

/// Visitor that draws every node region and every stored item.
pub struct RenderVisitor<'a> {
    viewport: &'a Viewport,
    node_color: Color,
    item_color: Color,
}

impl<'a> RenderVisitor<'a> {
    /// Creates a visitor drawing node boxes in white and items in blue.
    pub fn new(viewport: &'a Viewport) -> Self {
        Self {
            viewport,
            node_color: WHITE,
            item_color: BLUE,
        }
    }
}

impl<I: Drawable> TreeVisitor<I, 2> for RenderVisitor<'_> {
    fn visit(&mut self, items: &[I], bounds: &AaBb<2>) {
        for item in items {
            item.draw(self.viewport, self.item_color);
        }
        bounds.draw(self.viewport, self.node_color);
    }
}

/// Generates a random ray crossing the domain `[0, size]²` from left to right.
///
/// The origin lies in the left half; the direction points at a random height
/// on the right edge.
pub fn random_ray(size: u32) -> Ray<2> {
    let size = size as i32;
    let ox = macroquad::rand::gen_range(0, size / 2 + 1) as f32;
    let oy = macroquad::rand::gen_range(0, size + 1) as f32;
    let target_y = macroquad::rand::gen_range(0, size + 1) as f32;

    Ray::new(
        Vector::from([ox, oy]),
        Vector::from([size as f32 - ox, target_y - oy]),
    )
}

/// Runs an interactive viewer until the window closes.
///
/// Each frame draws the tree, the current ray, the leaves it crosses
/// (yellow) and the candidate items found in them (green). A left click
/// inserts `make_item(cursor)`; space draws a new ray immediately.
pub async fn run_viewer<I, F>(mut tree: KdTree<I, 2>, args: VizArgs, mut make_item: F)
where
    I: SpatialItem<2> + Drawable + std::fmt::Debug,
    F: FnMut(Vector<2>) -> I,
{
    if let Some(seed) = args.seed {
        macroquad::rand::srand(seed);
    }

    let viewport = args.viewport();
    let mut navigator = TreeNavigator::new();
    let mut ray = random_ray(args.size);
    let mut last_ray = get_time();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) || get_time() - last_ray >= args.ray_interval {
            ray = random_ray(args.size);
            last_ray = get_time();
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            let item = make_item(viewport.to_domain(x, y));
            let accepted = tree.insert(item.clone());
            info!(?item, accepted, nodes = tree.node_count(), "insert");
        }
        navigator.update(&tree);

        clear_background(Color::from_rgba(17, 17, 17, 255));

        tree.walk(&mut RenderVisitor::new(&viewport));

        let leaves = tree.ray_intersection(*ray.origin(), *ray.direction());
        for leaf in &leaves {
            leaf.draw(&viewport, YELLOW);
        }
        let candidates = tree.possible_values(*ray.origin(), *ray.direction());
        for item in &candidates {
            item.draw(&viewport, GREEN);
        }
        debug!(leaves = leaves.len(), candidates = candidates.len(), "ray query");

        viewport.draw_line(ray.origin(), &ray.point_at(1.0), RED);

        let (mx, my) = mouse_position();
        if let Some(leaf) = tree.leaf_at(&viewport.to_domain(mx, my)) {
            leaf.bounds().draw(&viewport, SKYBLUE);
        }

        navigator.render(&tree, &viewport);
        navigator.draw_ui(&tree, 20.0);

        next_frame().await
    }
}
