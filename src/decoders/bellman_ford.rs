//! Decoding as single-source shortest path by Bellman-Ford relaxation.
//!
//! Every edge of the search DAG is enumerated once and then relaxed `N - 1`
//! times, without using the DAG's topological order. This costs
//! O(N²·|S|²) relaxations; the decoder exists to show that the shortest-path
//! formulation reaches the same optimum as Viterbi, not to be fast.

use crate::decoders::graph::{
    best_terminal, follow_links, prefers, Edge, Node, SearchGraph, StepCounter,
};
use crate::error::DecodeError;
use crate::model::Model;
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};

/// Bellman-Ford decoder over the implicit search DAG.
#[derive(Clone, Copy, Debug, Default)]
pub struct BellmanFordDecoder {
    step_budget: Option<usize>,
}

impl BellmanFordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`DecodeError::StepBudgetExceeded`] after `steps` edge relaxations.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }
}

impl Decoder for BellmanFordDecoder {
    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("bellman_ford", len = obs.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let graph = SearchGraph::new(obs, model);
        let edges: Vec<Edge> = graph.edges().collect();
        let mut steps = StepCounter::new(self.step_budget);

        let mut dist = vec![f64::INFINITY; graph.num_nodes()];
        let mut pred: Vec<Option<Node>> = vec![None; graph.num_nodes()];
        for (node, cost) in graph.sources() {
            dist[node.index()] = cost;
        }

        for _pass in 1..graph.len() {
            for edge in &edges {
                steps.tick()?;
                let du = dist[edge.from.index()];
                if !du.is_finite() {
                    continue;
                }
                let cand = du + edge.cost;
                let v = edge.to.index();
                if prefers(cand, edge.from.state, dist[v], pred[v]) {
                    dist[v] = cand;
                    pred[v] = Some(edge.from);
                }
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(pass = _pass, "relaxation pass done");
        }

        let end = best_terminal(&graph, &dist)?;
        let cost = dist[end.index()];
        let mut path = follow_links(end, &pred, 0)?;
        path.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(log_prob = -cost, relaxations = steps.used(), "bellman-ford decoded");

        Ok(Decoding::new(path, -cost))
    }
}
