//! ordtree - Binary Entry Point
//!
//! Walks through the basic scenarios on a small tree and prints the shape
//! after each step. Pass `--verbose` to see every rotation and fixup case.

use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use ordtree::{NodeRef, OrderedTree};

fn main() {
    let verbose = std::env::args()
        .skip(1)
        .any(|arg| arg == "--verbose" || arg == "-v");
    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", err);
    }

    println!("===========================================");
    println!("  ordtree - red-black ordered set");
    println!("===========================================");
    println!();

    let mut tree = OrderedTree::with_capacity(16);
    for value in [10, 20, 15, 5, 25] {
        let inserted = tree.insert(value);
        info!("insert {} -> {}", value, inserted);
    }
    info!("insert 15 again -> {}", tree.insert(15));
    report(&tree);

    info!("remove 10 -> {}", tree.remove(&10));
    info!("remove 99 -> {}", tree.remove(&99));
    report(&tree);

    tree.clear();
    for value in 1..=7 {
        tree.insert(value);
    }
    info!("ascending inserts 1..=7");
    report(&tree);

    match tree.validate() {
        Ok(()) => println!("All invariants hold."),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    }
}

fn report(tree: &OrderedTree<i32>) {
    println!("  Elements: {:?}", tree);
    println!(
        "  Size: {}  Height: {}  Black height: {}",
        tree.len(),
        tree.height(),
        tree.black_height()
    );
    if let Some(root) = tree.root_node() {
        let mut lines = Vec::new();
        render(root, 0, &mut lines);
        for line in lines {
            println!("    {}", line);
        }
    }
    println!();
}

/// Sideways rendering: right subtree above, left subtree below.
fn render(node: NodeRef<'_, i32>, depth: usize, lines: &mut Vec<String>) {
    if let Some(right) = node.right() {
        render(right, depth + 1, lines);
    }
    let color = if node.is_red() { 'R' } else { 'B' };
    lines.push(format!("{}{}{}", "    ".repeat(depth), node.value(), color));
    if let Some(left) = node.left() {
        render(left, depth + 1, lines);
    }
}
