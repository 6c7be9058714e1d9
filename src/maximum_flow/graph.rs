use crate::error::FlowError;
use num_traits::NumAssign;
use std::collections::HashMap;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
}

// one edge per ordered pair, re-adding a pair overwrites its capacity
#[derive(Default)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
    pair_index: HashMap<(usize, usize), usize>,
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_directed_edge(&mut self, from: usize, to: usize, upper: Flow) -> Result<usize, FlowError> {
        if from >= self.num_nodes {
            return Err(FlowError::UnknownNode(from.to_string()));
        }
        if to >= self.num_nodes {
            return Err(FlowError::UnknownNode(to.to_string()));
        }
        if upper < Flow::zero() {
            return Err(FlowError::InvalidCapacity { from: from.to_string(), to: to.to_string() });
        }

        if let Some(edge_id) = self.find_edge(from, to) {
            self.edges[edge_id].upper = upper;
            self.edges[edge_id].flow = Flow::zero();
            return Ok(edge_id);
        }

        self.edges.push(Edge { from, to, flow: Flow::zero(), upper });
        self.pair_index.insert((from, to), self.num_edges);

        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    pub fn find_edge(&self, from: usize, to: usize) -> Option<usize> {
        self.pair_index.get(&(from, to)).copied()
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<Flow>] {
        &self.edges
    }

    // net flow leaving source according to the ledger
    pub fn maximum_flow(&self, source: usize) -> Flow {
        self.edges.iter().fold(Flow::zero(), |mut flow, edge| {
            if edge.from == source {
                flow += edge.flow;
            } else if edge.to == source {
                flow -= edge.flow;
            }
            flow
        })
    }

    pub(crate) fn set_flows(&mut self, ledger: &[Flow]) {
        for (edge, &flow) in self.edges.iter_mut().zip(ledger) {
            edge.flow = flow;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_a_pair_overwrites_capacity() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(2);
        let first = graph.add_directed_edge(0, 1, 3).unwrap();
        let second = graph.add_directed_edge(0, 1, 7).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.get_edge(first).unwrap().upper, 7);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(2);
        assert_eq!(graph.add_directed_edge(0, 1, -1), Err(FlowError::InvalidCapacity { from: "0".into(), to: "1".into() }));
        assert_eq!(graph.add_directed_edge(0, 2, 1), Err(FlowError::UnknownNode("2".into())));
        assert_eq!(graph.num_edges(), 0);
    }
}
