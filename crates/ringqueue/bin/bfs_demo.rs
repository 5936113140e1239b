//! Breadth-first traversal of a small directory-like tree using `RingQueue`.
//!
//! Run with: `RUST_LOG=ringqueue_rs=trace cargo run -p ringqueue-rs --features demo --bin bfs_demo`
//!
//! Trace logging shows the ring growing while a level is expanded and
//! shrinking as the frontier drains.

use ringqueue_rs::{Config, RingQueue};
use tracing_subscriber::EnvFilter;

struct Node {
    name: &'static str,
    children: Vec<Node>,
}

impl Node {
    fn leaf(name: &'static str) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    fn dir(name: &'static str, children: Vec<Node>) -> Self {
        Self { name, children }
    }
}

fn sample_tree() -> Node {
    Node::dir(
        "/",
        vec![
            Node::dir(
                "src",
                vec![
                    Node::leaf("lib.rs"),
                    Node::leaf("queue.rs"),
                    Node::leaf("config.rs"),
                    Node::leaf("error.rs"),
                ],
            ),
            Node::dir("tests", vec![Node::leaf("integration_tests.rs")]),
            Node::dir("benches", vec![Node::leaf("throughput.rs")]),
            Node::leaf("Cargo.toml"),
        ],
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== ringqueue BFS Demo ===\n");

    let tree = sample_tree();
    let mut queue = RingQueue::with_config(Config::default().with_metrics(true));
    queue.enqueue((&tree, 0usize));

    let mut visited = 0;
    while !queue.is_empty() {
        // Process one whole level per batch
        let level = queue.dequeue_batch(queue.len());
        for (node, depth) in level {
            println!("{:indent$}{}", "", node.name, indent = depth * 2);
            visited += 1;
            queue.enqueue_batch(node.children.iter().map(|child| (child, depth + 1)));
        }
    }

    let metrics = queue.metrics();
    println!("\nVisited {visited} nodes");
    println!(
        "Ring resizes: {} grows, {} shrinks, peak capacity {}",
        metrics.grows, metrics.shrinks, metrics.peak_capacity
    );

    anyhow::ensure!(
        metrics.enqueued == visited,
        "enqueued {} nodes but visited {visited}",
        metrics.enqueued
    );

    Ok(())
}
