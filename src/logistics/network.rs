use crate::error::FlowError;
use crate::logistics::report::{EdgeFlow, FlowReport};
use crate::maximum_flow::edmonds_karp::EdmondsKarp;
use crate::maximum_flow::graph::Graph;
use log::debug;
use num_traits::{CheckedAdd, NumAssign};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Multi-source, multi-sink network over labelled nodes. A terminal without an explicit capacity
/// is joined to the super-source or super-sink with the sum of all finite capacities plus one.
///
/// ```
/// use logistics_flow::logistics::network::Network;
///
/// let mut network = Network::new();
/// network.add_edge("S", "A", 10).unwrap();
/// network.add_edge("A", "T", 4).unwrap();
/// network.add_source("S");
/// network.add_sink("T");
///
/// let report = network.solve().unwrap();
/// assert_eq!(report.total(), 4);
/// assert_eq!(report.flow(&"S", &"A"), 4);
/// ```
pub struct Network<Node, Flow> {
    index: HashMap<Node, usize>,
    labels: Vec<Node>,
    edges: Vec<(usize, usize, Flow)>,
    edge_index: HashMap<(usize, usize), usize>,
    sources: Terminals<Node, Flow>,
    sinks: Terminals<Node, Flow>,
}

impl<Node, Flow> Default for Network<Node, Flow> {
    fn default() -> Self {
        Self { index: HashMap::new(), labels: Vec::new(), edges: Vec::new(), edge_index: HashMap::new(), sources: Terminals::default(), sinks: Terminals::default() }
    }
}

// terminals in insertion order, re-adding a node replaces its capacity
struct Terminals<Node, Flow> {
    index: HashMap<Node, usize>,
    entries: Vec<(Node, Option<Flow>)>,
}

impl<Node, Flow> Default for Terminals<Node, Flow> {
    fn default() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }
}

impl<Node, Flow> Terminals<Node, Flow>
where
    Node: Eq + Hash + Clone,
{
    fn set(&mut self, node: Node, capacity: Option<Flow>) {
        match self.index.get(&node) {
            Some(&k) => self.entries[k].1 = capacity,
            None => {
                self.index.insert(node.clone(), self.entries.len());
                self.entries.push((node, capacity));
            }
        }
    }
}

impl<Node, Flow> Network<Node, Flow>
where
    Node: Eq + Hash + Clone + Display,
    Flow: NumAssign + CheckedAdd + Ord + Copy + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    // a negative capacity is rejected and leaves the network unchanged
    pub fn add_edge(&mut self, from: Node, to: Node, capacity: Flow) -> Result<(), FlowError> {
        if capacity < Flow::zero() {
            return Err(FlowError::InvalidCapacity { from: from.to_string(), to: to.to_string() });
        }

        let (u, v) = (self.intern(from), self.intern(to));
        match self.edge_index.get(&(u, v)) {
            Some(&edge_id) => self.edges[edge_id].2 = capacity,
            None => {
                self.edge_index.insert((u, v), self.edges.len());
                self.edges.push((u, v, capacity));
            }
        }
        Ok(())
    }

    pub fn add_source(&mut self, node: Node) {
        self.sources.set(node, None);
    }

    pub fn add_sink(&mut self, node: Node) {
        self.sinks.set(node, None);
    }

    pub fn add_source_with_capacity(&mut self, node: Node, capacity: Flow) -> Result<(), FlowError> {
        if capacity < Flow::zero() {
            return Err(FlowError::InvalidCapacity { from: "super-source".to_string(), to: node.to_string() });
        }
        self.sources.set(node, Some(capacity));
        Ok(())
    }

    pub fn add_sink_with_capacity(&mut self, node: Node, capacity: Flow) -> Result<(), FlowError> {
        if capacity < Flow::zero() {
            return Err(FlowError::InvalidCapacity { from: node.to_string(), to: "super-sink".to_string() });
        }
        self.sinks.set(node, Some(capacity));
        Ok(())
    }

    pub fn solve(&self) -> Result<FlowReport<Node, Flow>, FlowError> {
        self.solve_with(|_, _| false)
    }

    // see EdmondsKarp::solve_with for `interrupt`
    pub fn solve_with<F>(&self, interrupt: F) -> Result<FlowReport<Node, Flow>, FlowError>
    where
        F: FnMut(usize, Flow) -> bool,
    {
        let sources = self.resolve(&self.sources.entries)?;
        let sinks = self.resolve(&self.sinks.entries)?;
        let mut is_source = vec![false; self.labels.len()];
        for &(u, _) in sources.iter() {
            is_source[u] = true;
        }
        if let Some(&(v, _)) = sinks.iter().find(|&&(v, _)| is_source[v]) {
            return Err(FlowError::SourceIsSink(self.labels[v].to_string()));
        }
        let unbounded = self.unbounded_capacity()?;

        let mut graph = Graph::default();
        graph.add_nodes(self.labels.len() + 2);
        let (super_source, super_sink) = (self.labels.len(), self.labels.len() + 1);

        // original edges first so that edge ids match self.edges
        for &(u, v, capacity) in self.edges.iter() {
            graph.add_directed_edge(u, v, capacity)?;
        }
        for &(u, capacity) in sources.iter() {
            graph.add_directed_edge(super_source, u, capacity.unwrap_or(unbounded))?;
        }
        for &(v, capacity) in sinks.iter() {
            graph.add_directed_edge(v, super_sink, capacity.unwrap_or(unbounded))?;
        }

        let mut solver = EdmondsKarp::default();
        let total = solver.solve_with(super_source, super_sink, &mut graph, interrupt)?;
        debug!("network: {} nodes, {} edges, {} sources, {} sinks", self.labels.len(), self.edges.len(), sources.len(), sinks.len());

        let edges = graph.edges()[..self.edges.len()]
            .iter()
            .map(|e| EdgeFlow { from: self.labels[e.from].clone(), to: self.labels[e.to].clone(), capacity: e.upper, flow: e.flow })
            .collect();
        let source_side = solver.minimum_cut(super_source).into_iter().filter(|&u| u < self.labels.len()).map(|u| self.labels[u].clone()).collect();

        Ok(FlowReport::new(total, edges, source_side, solver.rounds(), self.index.clone(), self.edge_index.clone()))
    }

    // sum of every finite capacity plus one
    fn unbounded_capacity(&self) -> Result<Flow, FlowError> {
        let finite = self.edges.iter().map(|&(_, _, capacity)| capacity).chain(self.sources.entries.iter().chain(self.sinks.entries.iter()).filter_map(|&(_, capacity)| capacity));

        let mut sum = Flow::zero();
        for capacity in finite {
            sum = sum.checked_add(&capacity).ok_or(FlowError::CapacityOverflow)?;
        }
        sum.checked_add(&Flow::one()).ok_or(FlowError::CapacityOverflow)
    }

    fn resolve(&self, terminals: &[(Node, Option<Flow>)]) -> Result<Vec<(usize, Option<Flow>)>, FlowError> {
        terminals.iter().map(|(node, capacity)| self.index.get(node).map(|&u| (u, *capacity)).ok_or_else(|| FlowError::UnknownNode(node.to_string()))).collect()
    }

    fn intern(&mut self, node: Node) -> usize {
        if let Some(&u) = self.index.get(&node) {
            return u;
        }
        self.labels.push(node.clone());
        self.index.insert(node, self.labels.len() - 1);
        self.labels.len() - 1
    }
}
