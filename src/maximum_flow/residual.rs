use crate::error::FlowError;
use crate::maximum_flow::graph::Graph;
use num_traits::NumAssign;

#[derive(PartialEq, Debug, Clone)]
pub struct ResidualEdge<Flow> {
    pub to: usize,
    pub residual: Flow,
    // index of the paired arc (to -> from) in the adjacency list of `to`
    pub rev: usize,
    // id of the original edge this arc carries forward, if any
    pub origin: Option<usize>,
}

// every node owns its outgoing arcs; an arc (u, v) exists iff its partner (v, u) exists
#[derive(Default)]
pub struct ResidualGraph<Flow> {
    adjacency: Vec<Vec<ResidualEdge<Flow>>>,
}

impl<Flow> ResidualGraph<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    // O(n + m), anti-parallel edges of `graph` share one pair of arcs
    pub fn build(&mut self, graph: &Graph<Flow>) -> Result<(), FlowError> {
        self.adjacency.clear();
        self.adjacency.resize_with(graph.num_nodes(), Vec::new);

        // index of each edge's forward arc in the adjacency list of its tail
        let mut arc_index = vec![usize::MAX; graph.num_edges()];
        for (edge_id, edge) in graph.edges().iter().enumerate() {
            let (u, v) = (edge.from, edge.to);
            if edge.upper < Flow::zero() {
                return Err(FlowError::InvalidCapacity { from: u.to_string(), to: v.to_string() });
            }

            // already created as the backward arc of an earlier anti-parallel edge
            let i = if arc_index[edge_id] == usize::MAX {
                self.adjacency[u].push(ResidualEdge { to: v, residual: edge.upper, rev: usize::MAX, origin: Some(edge_id) });
                self.adjacency[u].len() - 1
            } else {
                let i = arc_index[edge_id];
                self.adjacency[u][i].residual = edge.upper;
                self.adjacency[u][i].origin = Some(edge_id);
                i
            };
            arc_index[edge_id] = i;

            let j = match graph.find_edge(v, u) {
                Some(partner) if partner == edge_id => i,
                Some(partner) if arc_index[partner] != usize::MAX => arc_index[partner],
                partner => {
                    self.adjacency[v].push(ResidualEdge { to: u, residual: Flow::zero(), rev: i, origin: None });
                    let j = self.adjacency[v].len() - 1;
                    if let Some(partner) = partner {
                        arc_index[partner] = j;
                    }
                    j
                }
            };

            self.adjacency[u][i].rev = j;
            self.adjacency[v][j].rev = i;
        }
        Ok(())
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    // an existing v -> u arc keeps its value; returns the index of u -> v in arcs(u)
    pub fn add_edge(&mut self, u: usize, v: usize, capacity: Flow) -> Result<usize, FlowError> {
        if capacity < Flow::zero() {
            return Err(FlowError::InvalidCapacity { from: u.to_string(), to: v.to_string() });
        }
        let n = self.adjacency.len().max(u + 1).max(v + 1);
        self.adjacency.resize_with(n, Vec::new);

        let i = match self.position(u, v) {
            Some(i) => {
                self.adjacency[u][i].residual = capacity;
                i
            }
            None => {
                self.adjacency[u].push(ResidualEdge { to: v, residual: capacity, rev: usize::MAX, origin: None });
                self.adjacency[u].len() - 1
            }
        };
        let j = match self.position(v, u) {
            Some(j) => j,
            None => {
                self.adjacency[v].push(ResidualEdge { to: u, residual: Flow::zero(), rev: i, origin: None });
                self.adjacency[v].len() - 1
            }
        };

        self.adjacency[u][i].rev = j;
        self.adjacency[v][j].rev = i;
        Ok(i)
    }

    // 0 when there is no arc
    pub fn residual_capacity(&self, u: usize, v: usize) -> Flow {
        self.position(u, v).map_or(Flow::zero(), |i| self.adjacency[u][i].residual)
    }

    pub fn decrease(&mut self, u: usize, v: usize, amount: Flow) {
        match self.position(u, v) {
            Some(i) => self.decrease_arc(u, i, amount),
            None => assert!(amount == Flow::zero(), "decrease on missing arc {u} -> {v}"),
        }
    }

    pub fn increase(&mut self, u: usize, v: usize, amount: Flow) {
        assert!(amount >= Flow::zero(), "negative increase on arc {u} -> {v}");
        let i = match self.position(u, v) {
            Some(i) => i,
            None => {
                // implicit backward arc created by augmentation
                let n = self.adjacency.len().max(u + 1).max(v + 1);
                self.adjacency.resize_with(n, Vec::new);
                self.adjacency[u].push(ResidualEdge { to: v, residual: Flow::zero(), rev: usize::MAX, origin: None });
                let i = self.adjacency[u].len() - 1;
                let j = match self.position(v, u) {
                    Some(j) => j,
                    None => {
                        self.adjacency[v].push(ResidualEdge { to: u, residual: Flow::zero(), rev: i, origin: None });
                        self.adjacency[v].len() - 1
                    }
                };
                self.adjacency[u][i].rev = j;
                self.adjacency[v][j].rev = i;
                i
            }
        };
        self.adjacency[u][i].residual += amount;
    }

    pub fn push(&mut self, u: usize, i: usize, amount: Flow) {
        let (v, rev) = (self.adjacency[u][i].to, self.adjacency[u][i].rev);
        self.decrease_arc(u, i, amount);
        self.adjacency[v][rev].residual += amount;
    }

    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.arcs(u).iter().map(|e| e.to)
    }

    #[inline]
    pub fn arcs(&self, u: usize) -> &[ResidualEdge<Flow>] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    fn decrease_arc(&mut self, u: usize, i: usize, amount: Flow) {
        let arc = &mut self.adjacency[u][i];
        assert!(amount >= Flow::zero() && amount <= arc.residual, "residual capacity of {u} -> {} would become negative", arc.to);
        arc.residual -= amount;
    }

    fn position(&self, u: usize, v: usize) -> Option<usize> {
        self.adjacency.get(u)?.iter().position(|e| e.to == v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_creates_backward_arc() {
        let mut residual = ResidualGraph::<i64>::default();
        residual.add_edge(0, 1, 5).unwrap();

        assert_eq!(residual.residual_capacity(0, 1), 5);
        assert_eq!(residual.residual_capacity(1, 0), 0);
        assert_eq!(residual.neighbors(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(residual.residual_capacity(0, 7), 0);
        assert_eq!(residual.residual_capacity(9, 0), 0);
    }

    #[test]
    fn add_edge_keeps_existing_backward_capacity() {
        let mut residual = ResidualGraph::<i64>::default();
        residual.add_edge(0, 1, 5).unwrap();
        residual.decrease(0, 1, 2);
        residual.increase(1, 0, 2);

        residual.add_edge(0, 1, 6).unwrap();
        assert_eq!(residual.residual_capacity(0, 1), 6);
        assert_eq!(residual.residual_capacity(1, 0), 2);
    }

    #[test]
    fn push_preserves_capacity_room() {
        let mut residual = ResidualGraph::<i64>::default();
        let i = residual.add_edge(2, 3, 10).unwrap();
        for amount in [3, 4, 1] {
            residual.push(2, i, amount);
            assert_eq!(residual.residual_capacity(2, 3) + residual.residual_capacity(3, 2), 10);
        }
        assert_eq!(residual.residual_capacity(2, 3), 2);

        let j = residual.arcs(2)[i].rev;
        residual.push(3, j, 8);
        assert_eq!(residual.residual_capacity(2, 3), 10);
        assert_eq!(residual.residual_capacity(3, 2), 0);
    }

    #[test]
    fn build_pairs_anti_parallel_edges() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(3);
        let forward = graph.add_directed_edge(0, 1, 4).unwrap();
        graph.add_directed_edge(1, 2, 6).unwrap();
        let backward = graph.add_directed_edge(1, 0, 3).unwrap();
        graph.add_directed_edge(2, 2, 1).unwrap();

        let mut residual = ResidualGraph::default();
        residual.build(&graph).unwrap();

        assert_eq!(residual.arcs(0).len(), 1);
        assert_eq!(residual.arcs(1).len(), 2);
        assert_eq!(residual.residual_capacity(0, 1), 4);
        assert_eq!(residual.residual_capacity(1, 0), 3);
        assert_eq!(residual.residual_capacity(2, 1), 0);

        let (i, j) = (0, residual.arcs(0)[0].rev);
        assert_eq!(residual.arcs(1)[j].rev, i);
        assert_eq!(residual.arcs(0)[i].origin, Some(forward));
        assert_eq!(residual.arcs(1)[j].origin, Some(backward));

        // self-loop is its own partner
        assert_eq!(residual.arcs(2).iter().filter(|e| e.to == 2).count(), 1);
        assert_eq!(residual.residual_capacity(2, 2), 1);
    }

    #[test]
    fn increase_creates_missing_arc() {
        let mut residual = ResidualGraph::<i64>::default();
        residual.increase(4, 1, 3);
        assert_eq!(residual.residual_capacity(4, 1), 3);
        assert_eq!(residual.residual_capacity(1, 4), 0);
        assert_eq!(residual.num_nodes(), 5);
    }

    #[test]
    fn rejects_negative_capacity() {
        let mut residual = ResidualGraph::<i64>::default();
        assert!(matches!(residual.add_edge(0, 1, -3), Err(FlowError::InvalidCapacity { .. })));
        assert_eq!(residual.num_nodes(), 0);
    }

    #[test]
    #[should_panic(expected = "would become negative")]
    fn decrease_below_zero_panics() {
        let mut residual = ResidualGraph::<i64>::default();
        residual.add_edge(0, 1, 2).unwrap();
        residual.decrease(0, 1, 3);
    }
}
