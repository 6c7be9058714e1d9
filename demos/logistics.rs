use logistics_flow::logistics::network::Network;
use logistics_flow::FlowError;

const EDGES: [(&str, &str, i64); 20] = [
    ("Terminal 1", "Warehouse 1", 25),
    ("Terminal 1", "Warehouse 2", 20),
    ("Terminal 1", "Warehouse 3", 15),
    ("Terminal 2", "Warehouse 2", 10),
    ("Terminal 2", "Warehouse 3", 15),
    ("Terminal 2", "Warehouse 4", 30),
    ("Warehouse 1", "Store 1", 15),
    ("Warehouse 1", "Store 2", 10),
    ("Warehouse 1", "Store 3", 20),
    ("Warehouse 2", "Store 4", 15),
    ("Warehouse 2", "Store 5", 10),
    ("Warehouse 2", "Store 6", 25),
    ("Warehouse 3", "Store 7", 20),
    ("Warehouse 3", "Store 8", 15),
    ("Warehouse 3", "Store 9", 10),
    ("Warehouse 4", "Store 10", 20),
    ("Warehouse 4", "Store 11", 10),
    ("Warehouse 4", "Store 12", 15),
    ("Warehouse 4", "Store 13", 5),
    ("Warehouse 4", "Store 14", 10),
];

fn main() -> Result<(), FlowError> {
    env_logger::init();

    let mut network = Network::new();
    for (from, to, capacity) in EDGES {
        network.add_edge(from.to_string(), to.to_string(), capacity)?;
    }
    for terminal in ["Terminal 1", "Terminal 2"] {
        network.add_source(terminal.to_string());
    }
    for i in 1..=14 {
        network.add_sink(format!("Store {i}"));
    }

    let report = network.solve()?;
    println!("maximum flow: {}", report.total());
    println!();
    println!("{:<12} {:<12} {:>5} {:>9}", "from", "to", "flow", "capacity");
    for e in report.iter() {
        println!("{:<12} {:<12} {:>5} {:>9}", e.from, e.to, e.flow, e.capacity);
    }
    println!();
    println!("saturated cut: {}", report.source_side().join(", "));

    Ok(())
}
