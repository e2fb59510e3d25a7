//! Decoding as shortest path by Dijkstra's algorithm.
//!
//! All transformed weights are non-negative (negated log-probabilities of
//! events with probability at most one), which is exactly the precondition
//! Dijkstra needs. O(N·|S|·log(N·|S|)) with a binary heap.

use crate::decoders::graph::{
    best_terminal, follow_links, prefers, Node, SearchGraph, StepCounter, TotalF64,
};
use crate::error::DecodeError;
use crate::model::Model;
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Priority-queue decoder over the implicit search DAG.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraDecoder {
    step_budget: Option<usize>,
}

impl DijkstraDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`DecodeError::StepBudgetExceeded`] after `steps` queue pops.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }
}

impl Decoder for DijkstraDecoder {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("dijkstra", len = obs.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let graph = SearchGraph::new(obs, model);
        let mut steps = StepCounter::new(self.step_budget);

        let mut dist = vec![f64::INFINITY; graph.num_nodes()];
        let mut pred: Vec<Option<Node>> = vec![None; graph.num_nodes()];
        let mut visited = vec![false; graph.num_nodes()];
        // Cost ties pop in node order (position, then state).
        let mut queue = BinaryHeap::new();

        for (node, cost) in graph.sources() {
            dist[node.index()] = cost;
            queue.push(Reverse((TotalF64(cost), node)));
        }

        while let Some(Reverse((TotalF64(cost), node))) = queue.pop() {
            if visited[node.index()] {
                continue;
            }
            steps.tick()?;
            visited[node.index()] = true;

            for (next, weight) in graph.successors(node) {
                let cand = cost + weight;
                let v = next.index();
                if prefers(cand, node.state, dist[v], pred[v]) {
                    let improved = cand < dist[v];
                    dist[v] = cand;
                    pred[v] = Some(node);
                    if improved {
                        queue.push(Reverse((TotalF64(cand), next)));
                    }
                }
            }
        }

        let end = best_terminal(&graph, &dist)?;
        let cost = dist[end.index()];
        let mut path = follow_links(end, &pred, 0)?;
        path.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(log_prob = -cost, pops = steps.used(), "dijkstra decoded");

        Ok(Decoding::new(path, -cost))
    }
}
