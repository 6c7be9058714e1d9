use num_traits::Zero;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::Hash;

/// Flow carried by one edge of the input network.
#[derive(PartialEq, Debug, Clone)]
pub struct EdgeFlow<Node, Flow> {
    pub from: Node,
    pub to: Node,
    pub capacity: Flow,
    pub flow: Flow,
}

/// Maximum flow value and the flow on every input edge, in input order.
#[derive(Debug, Clone)]
pub struct FlowReport<Node, Flow> {
    total: Flow,
    edges: Vec<EdgeFlow<Node, Flow>>,
    source_side: Vec<Node>,
    rounds: usize,
    node_index: HashMap<Node, usize>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl<Node, Flow> FlowReport<Node, Flow>
where
    Node: Eq + Hash,
    Flow: Zero + PartialOrd + Copy,
{
    pub(crate) fn new(
        total: Flow,
        edges: Vec<EdgeFlow<Node, Flow>>,
        source_side: Vec<Node>,
        rounds: usize,
        node_index: HashMap<Node, usize>,
        edge_index: HashMap<(usize, usize), usize>,
    ) -> Self {
        Self { total, edges, source_side, rounds, node_index, edge_index }
    }

    #[inline]
    pub fn total(&self) -> Flow {
        self.total
    }

    // zero for edges that carry nothing or do not exist
    pub fn flow(&self, from: &Node, to: &Node) -> Flow {
        let (Some(&u), Some(&v)) = (self.node_index.get(from), self.node_index.get(to)) else {
            return Flow::zero();
        };
        self.edge_index.get(&(u, v)).map_or(Flow::zero(), |&edge_id| self.edges[edge_id].flow)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeFlow<Node, Flow>> {
        self.edges.iter()
    }

    pub fn used_edges(&self) -> impl Iterator<Item = &EdgeFlow<Node, Flow>> {
        self.edges.iter().filter(|e| e.flow > Flow::zero())
    }

    // real nodes on the source side of a minimum cut
    pub fn source_side(&self) -> &[Node] {
        &self.source_side
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl<'a, Node, Flow> IntoIterator for &'a FlowReport<Node, Flow> {
    type Item = &'a EdgeFlow<Node, Flow>;
    type IntoIter = std::slice::Iter<'a, EdgeFlow<Node, Flow>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl<Node, Flow> Display for FlowReport<Node, Flow>
where
    Node: Display,
    Flow: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "maximum flow: {}", self.total)?;
        for e in self.edges.iter() {
            writeln!(f, "{} -> {}: {}/{}", e.from, e.to, e.flow, e.capacity)?;
        }
        Ok(())
    }
}
