//! Viterbi decoding by direct dynamic programming.
//!
//! For each position and state we keep the best cumulative log-probability of
//! any path ending there and a back-pointer to the predecessor state that
//! achieved it. Time O(N·|S|²), space O(N·|S|).

use crate::decoders::graph::StepCounter;
use crate::error::DecodeError;
use crate::model::{Model, State};
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};

/// Table-filling Viterbi decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiDecoder {
    step_budget: Option<usize>,
}

impl ViterbiDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`DecodeError::StepBudgetExceeded`] after `steps` cell updates.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }
}

impl Decoder for ViterbiDecoder {
    fn name(&self) -> &'static str {
        "Viterbi"
    }

    fn decode(&self, obs: &ObservedSequence, model: &Model) -> Result<Decoding, DecodeError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("viterbi", len = obs.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let symbols = obs.symbols();
        let len = symbols.len();
        let mut steps = StepCounter::new(self.step_budget);

        // score[t][s]: best log-probability of a path ending in s at t.
        let mut score = vec![[f64::NEG_INFINITY; 2]; len];
        let mut back = vec![[State::Rich; 2]; len];

        for s in State::ALL {
            score[0][s.index()] = model.start_score(s, symbols[0]);
        }

        for t in 1..len {
            let sym = symbols[t];
            for to in State::ALL {
                steps.tick()?;
                let mut best = f64::NEG_INFINITY;
                let mut arg = State::Rich;
                for from in State::ALL {
                    let cand = score[t - 1][from.index()] + model.step_score(from, to, sym);
                    // Strict: the first-listed predecessor keeps exact ties.
                    if cand > best {
                        best = cand;
                        arg = from;
                    }
                }
                score[t][to.index()] = best;
                back[t][to.index()] = arg;
            }
        }

        let last = &score[len - 1];
        let mut best_state = State::Rich;
        let mut best = f64::NEG_INFINITY;
        for s in State::ALL {
            if last[s.index()] > best {
                best = last[s.index()];
                best_state = s;
            }
        }
        if !best.is_finite() {
            return Err(DecodeError::Unreachable {
                state: best_state,
                position: len - 1,
            });
        }

        let mut path = Vec::with_capacity(len);
        let mut s = best_state;
        path.push(s);
        for t in (1..len).rev() {
            s = back[t][s.index()];
            path.push(s);
        }
        path.reverse();

        #[cfg(feature = "tracing")]
        tracing::debug!(log_prob = best, steps = steps.used(), "viterbi decoded");

        Ok(Decoding::new(path, best))
    }
}
