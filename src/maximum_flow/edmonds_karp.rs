use crate::error::FlowError;
use crate::maximum_flow::graph::Graph;
use crate::maximum_flow::residual::ResidualGraph;
use log::{debug, trace, warn};
use num_traits::{CheckedAdd, NumAssign};
use std::collections::VecDeque;

#[derive(Default)]
pub struct EdmondsKarp<Flow> {
    residual: ResidualGraph<Flow>,
    // (parent, arc index in the parent's adjacency list)
    prev: Vec<Option<(usize, usize)>>,
    visited: Vec<bool>,
    queue: VecDeque<usize>,
    ledger: Vec<Flow>,
    rounds: usize,
}

impl<Flow> EdmondsKarp<Flow>
where
    Flow: NumAssign + CheckedAdd + Ord + Copy,
{
    pub fn solve(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>) -> Result<Flow, FlowError> {
        self.solve_with(source, sink, graph, |_, _| false)
    }

    /// `interrupt(rounds, flow)` is asked before every augmentation whether to give up.
    /// An interrupted solve returns [`FlowError::Interrupted`] and leaves the flows in `graph` as they were.
    pub fn solve_with<F>(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>, mut interrupt: F) -> Result<Flow, FlowError>
    where
        F: FnMut(usize, Flow) -> bool,
    {
        if source >= graph.num_nodes() {
            return Err(FlowError::UnknownNode(source.to_string()));
        }
        if sink >= graph.num_nodes() {
            return Err(FlowError::UnknownNode(sink.to_string()));
        }
        if source == sink {
            return Err(FlowError::SourceIsSink(source.to_string()));
        }

        // residuals and the running total never exceed the sum of all capacities
        graph.edges().iter().try_fold(Flow::zero(), |sum, e| sum.checked_add(&e.upper)).ok_or(FlowError::CapacityOverflow)?;

        self.residual.build(graph)?;
        let n = self.residual.num_nodes();
        self.prev.clear();
        self.prev.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.ledger.clear();
        self.ledger.resize(graph.num_edges(), Flow::zero());
        self.rounds = 0;
        debug!("edmonds-karp: {} nodes, {} edges, source {}, sink {}", n, graph.num_edges(), source, sink);

        let mut flow = Flow::zero();
        while self.bfs(source, sink) {
            if interrupt(self.rounds, flow) {
                warn!("edmonds-karp: interrupted after {} rounds", self.rounds);
                return Err(FlowError::Interrupted { rounds: self.rounds });
            }
            flow += self.augment(sink);
        }

        graph.set_flows(&self.ledger);
        debug!("edmonds-karp: done after {} rounds", self.rounds);
        Ok(flow)
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    #[inline]
    pub fn residual(&self) -> &ResidualGraph<Flow> {
        &self.residual
    }

    // source side of a minimum cut: nodes reachable from source in the final residual network
    pub fn minimum_cut(&self, source: usize) -> Vec<usize> {
        let mut visited = vec![false; self.residual.num_nodes().max(source + 1)];
        let mut cut = Vec::new();
        let mut que = VecDeque::from([source]);
        visited[source] = true;

        while let Some(u) = que.pop_front() {
            cut.push(u);
            for e in self.residual.arcs(u) {
                if !visited[e.to] && e.residual > Flow::zero() {
                    visited[e.to] = true;
                    que.push_back(e.to);
                }
            }
        }

        cut.sort_unstable();
        cut
    }

    // push the bottleneck along the path found by the last bfs
    fn augment(&mut self, sink: usize) -> Flow {
        // calculate delta
        let mut delta: Option<Flow> = None;
        let mut hops = 0;
        let mut v = sink;
        while let Some((u, i)) = self.prev[v] {
            let residual = self.residual.arcs(u)[i].residual;
            delta = Some(delta.map_or(residual, |d| d.min(residual)));
            hops += 1;
            v = u;
        }
        let Some(delta) = delta else {
            return Flow::zero();
        };

        // update flow
        let mut v = sink;
        while let Some((u, i)) = self.prev[v] {
            let arc = &self.residual.arcs(u)[i];
            let (forward, backward) = (arc.origin, self.residual.arcs(v)[arc.rev].origin);
            self.residual.push(u, i, delta);
            self.record(forward, backward, delta);
            v = u;
        }

        self.rounds += 1;
        trace!("edmonds-karp: round {}, {} hops", self.rounds, hops);
        delta
    }

    // bfs, stops as soon as sink is discovered
    fn bfs(&mut self, source: usize, sink: usize) -> bool {
        self.prev.fill(None);
        self.visited.fill(false);
        self.queue.clear();
        self.queue.push_back(source);
        self.visited[source] = true;

        while let Some(u) = self.queue.pop_front() {
            for (i, arc) in self.residual.arcs(u).iter().enumerate() {
                if self.visited[arc.to] || arc.residual <= Flow::zero() {
                    continue;
                }

                self.visited[arc.to] = true;
                self.prev[arc.to] = Some((u, i));
                if arc.to == sink {
                    return true;
                }
                self.queue.push_back(arc.to);
            }
        }
        false
    }

    // pushing along u -> v first cancels flow on the original edge v -> u, the rest goes on u -> v
    fn record(&mut self, forward: Option<usize>, backward: Option<usize>, delta: Flow) {
        let mut rest = delta;
        if let Some(edge_id) = backward {
            let cancelled = rest.min(self.ledger[edge_id]);
            self.ledger[edge_id] -= cancelled;
            rest -= cancelled;
        }
        if let Some(edge_id) = forward {
            self.ledger[edge_id] += rest;
        }
        debug_assert!(forward.is_some() || rest == Flow::zero());
    }
}
