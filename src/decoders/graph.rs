//! The implicit search DAG shared by the shortest-path decoders.
//!
//! Graph structure: layers `0..N` (one per observed position), two nodes per
//! layer (one per hidden state), and edges only from layer `t` to `t + 1`.
//!
//! Weights are negated log-probabilities, so the maximum-likelihood path is
//! the minimum-cost path:
//! - source `(s, 0)` costs `-(initial[s] + emission[s][obs[0]])`,
//! - edge `(s, t) -> (s', t + 1)` costs `-(transition[s][s'] + emission[s'][obs[t + 1]])`.
//!
//! Every model log-probability is finite and at most zero, so every weight is
//! finite and non-negative. The graph is never materialized in
//! full; nodes and edges are generated on demand from the model and sequence.

use crate::error::DecodeError;
use crate::model::{Model, Nucleotide, State};
use crate::sequence::ObservedSequence;
use std::cmp::Ordering;

/// A `(state, position)` vertex.
///
/// Ordered by position, then by state in tie-break order, so heaps that break
/// cost ties on the node pop deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    pub position: usize,
    pub state: State,
}

impl Node {
    #[inline]
    pub fn new(state: State, position: usize) -> Self {
        Self { position, state }
    }

    /// Dense index into per-node tables of length `2 * N`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.position * State::ALL.len() + self.state.index()
    }
}

/// A weighted edge of the search DAG.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: Node,
    pub to: Node,
    pub cost: f64,
}

/// Total-ordering wrapper for f64 to satisfy `Ord` (NaN-safe via `total_cmp`).
#[derive(Clone, Copy, Debug)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}
impl Eq for TotalF64 {}
impl PartialOrd for TotalF64 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for TotalF64 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// On-demand view of the DAG for one `(sequence, model)` pair.
#[derive(Clone, Copy)]
pub struct SearchGraph<'a> {
    model: &'a Model,
    symbols: &'a [Nucleotide],
}

impl<'a> SearchGraph<'a> {
    pub fn new(obs: &'a ObservedSequence, model: &'a Model) -> Self {
        Self {
            model,
            symbols: obs.symbols(),
        }
    }

    /// Number of layers `N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.len() * State::ALL.len()
    }

    #[inline]
    pub fn last_position(&self) -> usize {
        self.len() - 1
    }

    /// Cost of entering the graph at `(state, 0)`.
    #[inline]
    pub fn source_cost(&self, state: State) -> f64 {
        -self.model.start_score(state, self.symbols[0])
    }

    /// Cost of the edge `(from, position - 1) -> (to, position)`.
    #[inline]
    pub fn edge_cost(&self, from: State, to: State, position: usize) -> f64 {
        -self.model.step_score(from, to, self.symbols[position])
    }

    /// Position-0 nodes with their source costs, in tie-break order.
    pub fn sources(&self) -> impl Iterator<Item = (Node, f64)> + '_ {
        State::ALL
            .into_iter()
            .map(move |s| (Node::new(s, 0), self.source_cost(s)))
    }

    /// Nodes at the last position, in tie-break order.
    pub fn terminals(&self) -> impl Iterator<Item = Node> {
        let last = self.last_position();
        State::ALL.into_iter().map(move |s| Node::new(s, last))
    }

    /// Outgoing edges of `node`, in tie-break order of the target state.
    pub fn successors(&self, node: Node) -> impl Iterator<Item = (Node, f64)> + '_ {
        let next = node.position + 1;
        let has_next = next < self.len();
        State::ALL
            .into_iter()
            .filter(move |_| has_next)
            .map(move |to| (Node::new(to, next), self.edge_cost(node.state, to, next)))
    }

    /// Incoming edges of `node`, in tie-break order of the source state.
    pub fn predecessors(&self, node: Node) -> impl Iterator<Item = (Node, f64)> + '_ {
        let position = node.position;
        State::ALL
            .into_iter()
            .filter(move |_| position > 0)
            .map(move |from| {
                (
                    Node::new(from, position - 1),
                    self.edge_cost(from, node.state, position),
                )
            })
    }

    /// Every edge, in topological order: by target position, then source
    /// state, then target state.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (1..self.len()).flat_map(move |t| {
            State::ALL.into_iter().flat_map(move |from| {
                State::ALL.into_iter().map(move |to| Edge {
                    from: Node::new(from, t - 1),
                    to: Node::new(to, t),
                    cost: self.edge_cost(from, to, t),
                })
            })
        })
    }
}

/// Counts search steps against an optional budget.
pub(crate) struct StepCounter {
    budget: Option<usize>,
    used: usize,
}

impl StepCounter {
    pub(crate) fn new(budget: Option<usize>) -> Self {
        Self { budget, used: 0 }
    }

    #[inline]
    pub(crate) fn tick(&mut self) -> Result<(), DecodeError> {
        self.used += 1;
        match self.budget {
            Some(budget) if self.used > budget => Err(DecodeError::StepBudgetExceeded { budget }),
            _ => Ok(()),
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) fn used(&self) -> usize {
        self.used
    }
}

/// Relaxation rule shared by the search decoders.
///
/// A strictly cheaper candidate always wins. On an exact tie the link moves to
/// the candidate whose state comes first in tie-break order, which matches
/// the "first-listed predecessor wins" rule of the Viterbi recurrence.
#[inline]
pub(crate) fn prefers(candidate: f64, via: State, current: f64, link: Option<Node>) -> bool {
    candidate < current || (candidate == current && link.map_or(true, |n| via < n.state))
}

/// Pick the cheapest node at the last position, first-listed state on ties.
pub(crate) fn best_terminal(graph: &SearchGraph<'_>, dist: &[f64]) -> Result<Node, DecodeError> {
    let mut best: Option<(Node, f64)> = None;
    for node in graph.terminals() {
        let d = dist[node.index()];
        if d.is_finite() && best.map_or(true, |(_, b)| d < b) {
            best = Some((node, d));
        }
    }
    best.map(|(node, _)| node)
        .ok_or(DecodeError::Unreachable {
            state: State::ALL[0],
            position: graph.last_position(),
        })
}

/// Follow `links` from `start` until a node at `stop_position` is reached.
///
/// Returns the visited states in walk order, `start` included. A missing link
/// before `stop_position` is reported as [`DecodeError::Unreachable`].
pub(crate) fn follow_links(
    start: Node,
    links: &[Option<Node>],
    stop_position: usize,
) -> Result<Vec<State>, DecodeError> {
    let mut states = Vec::with_capacity(start.position.abs_diff(stop_position) + 1);
    let mut node = start;
    states.push(node.state);
    while node.position != stop_position {
        let next = links[node.index()].ok_or(DecodeError::Unreachable {
            state: node.state,
            position: node.position,
        })?;
        debug_assert_eq!(
            next.position.abs_diff(node.position),
            1,
            "links must join adjacent layers"
        );
        node = next;
        states.push(node.state);
    }
    Ok(states)
}
