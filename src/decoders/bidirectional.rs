//! Decoding by bidirectional (meet-in-the-middle) Dijkstra.
//!
//! Two searches run in lock-step over the same DAG:
//! - forward, seeded at position 0 with the source costs and following edges
//!   `(s, t) -> (s', t + 1)`;
//! - backward, seeded with cost 0 at position `N - 1` and following the same
//!   edges in reverse, `(s, t) -> (p, t - 1)`, each charged its forward weight.
//!
//! A forward distance includes the emission at its node while a backward
//! distance stops just before it, so `forward[v] + backward[v]` is exactly the
//! cost of the best complete path through `v`. Whenever a node is finalized
//! by one side after already being finalized by the other, that sum is a
//! candidate meeting cost; the smallest one found is the optimum.
//!
//! Every node of this DAG lies on some source-to-sink path, so the two
//! searches do not shrink the asymptotic work; they change the constant
//! factor and the order in which the frontier is explored.

use crate::decoders::graph::{follow_links, prefers, Node, SearchGraph, StepCounter, TotalF64};
use crate::error::DecodeError;
use crate::model::Model;
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Meet-in-the-middle decoder over the implicit search DAG.
#[derive(Clone, Copy, Debug, Default)]
pub struct BidirectionalDijkstraDecoder {
    step_budget: Option<usize>,
}

impl BidirectionalDijkstraDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`DecodeError::StepBudgetExceeded`] after `steps` queue pops,
    /// counted over both directions.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }
}

/// One direction of the search: queue, distances, finalized set and links.
///
/// `links` hold predecessors for the forward side and successors for the
/// backward side.
struct Frontier {
    queue: BinaryHeap<Reverse<(TotalF64, Node)>>,
    dist: Vec<f64>,
    done: Vec<bool>,
    links: Vec<Option<Node>>,
}

impl Frontier {
    fn new(num_nodes: usize) -> Self {
        Self {
            queue: BinaryHeap::new(),
            dist: vec![f64::INFINITY; num_nodes],
            done: vec![false; num_nodes],
            links: vec![None; num_nodes],
        }
    }

    fn seed(&mut self, node: Node, cost: f64) {
        self.dist[node.index()] = cost;
        self.queue.push(Reverse((TotalF64(cost), node)));
    }

    /// Pop the cheapest node not finalized yet and finalize it.
    fn settle_next(&mut self) -> Option<(Node, f64)> {
        while let Some(Reverse((TotalF64(cost), node))) = self.queue.pop() {
            if !self.done[node.index()] {
                self.done[node.index()] = true;
                return Some((node, cost));
            }
        }
        None
    }

    fn relax(&mut self, from: Node, to: Node, cand: f64) {
        let v = to.index();
        if prefers(cand, from.state, self.dist[v], self.links[v]) {
            let improved = cand < self.dist[v];
            self.dist[v] = cand;
            self.links[v] = Some(from);
            if improved {
                self.queue.push(Reverse((TotalF64(cand), to)));
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Best meeting found so far.
struct Meeting {
    node: Option<Node>,
    cost: f64,
}

impl Meeting {
    fn offer(&mut self, node: Node, forward: &Frontier, backward: &Frontier) {
        let total = forward.dist[node.index()] + backward.dist[node.index()];
        if total < self.cost {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                position = node.position,
                state = %node.state,
                total,
                "meeting improved"
            );
            self.cost = total;
            self.node = Some(node);
        }
    }
}

impl Decoder for BidirectionalDijkstraDecoder {
    fn name(&self) -> &'static str {
        "Bidirectional Dijkstra"
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("bidirectional_dijkstra", len = obs.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let graph = SearchGraph::new(obs, model);
        let mut steps = StepCounter::new(self.step_budget);

        let mut forward = Frontier::new(graph.num_nodes());
        let mut backward = Frontier::new(graph.num_nodes());
        for (node, cost) in graph.sources() {
            forward.seed(node, cost);
        }
        for node in graph.terminals() {
            backward.seed(node, 0.0);
        }

        let mut meeting = Meeting {
            node: None,
            cost: f64::INFINITY,
        };

        while !forward.is_exhausted() || !backward.is_exhausted() {
            if let Some((node, cost)) = forward.settle_next() {
                steps.tick()?;
                if backward.done[node.index()] {
                    meeting.offer(node, &forward, &backward);
                }
                for (next, weight) in graph.successors(node) {
                    forward.relax(node, next, cost + weight);
                }
            }

            if let Some((node, cost)) = backward.settle_next() {
                steps.tick()?;
                if forward.done[node.index()] {
                    meeting.offer(node, &forward, &backward);
                }
                for (prev, weight) in graph.predecessors(node) {
                    backward.relax(node, prev, cost + weight);
                }
            }
        }

        let meet = meeting.node.ok_or(DecodeError::NoMeetingNode)?;

        // Start node .. meeting node, then the nodes after it up to the end.
        let mut path = follow_links(meet, &forward.links, 0)?;
        path.reverse();
        let tail = follow_links(meet, &backward.links, graph.last_position())?;
        path.extend_from_slice(&tail[1..]);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            log_prob = -meeting.cost,
            meeting_position = meet.position,
            pops = steps.used(),
            "bidirectional dijkstra decoded"
        );

        Ok(Decoding::new(path, -meeting.cost))
    }
}
