//! Synthetic data generation.
//!
//! Draws a hidden GC-rich / GC-poor path from the model's initial and
//! transition probabilities, then emits one nucleotide per position from the
//! current state's emission distribution. Used to build test and benchmark
//! inputs whose true segmentation is known.

use crate::error::{DecodeError, ModelError, SimulationError};
use crate::model::{Model, Nucleotide, State};
use crate::sequence::ObservedSequence;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A simulated hidden path and the sequence it emitted.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub hidden: Vec<State>,
    pub observed: ObservedSequence,
}

/// Per-state samplers built once from a model.
pub struct Sampler {
    initial: WeightedIndex<f64>,
    transition: [WeightedIndex<f64>; 2],
    emission: [WeightedIndex<f64>; 2],
}

fn weighted(
    what: &str,
    log_probs: impl IntoIterator<Item = f64>,
) -> Result<WeightedIndex<f64>, ModelError> {
    WeightedIndex::new(log_probs.into_iter().map(f64::exp)).map_err(|e| ModelError::Sampling {
        what: what.to_string(),
        reason: e.to_string(),
    })
}

impl Sampler {
    pub fn new(model: &Model) -> Result<Self, ModelError> {
        let initial = weighted("initial", State::ALL.map(|s| model.initial(s)))?;
        let transition_of = |from: State| {
            weighted(
                &format!("transition from {from}"),
                State::ALL.map(|to| model.transition(from, to)),
            )
        };
        let emission_of = |s: State| {
            weighted(
                &format!("emission of {s}"),
                Nucleotide::ALL.map(|n| model.emission(s, n)),
            )
        };
        Ok(Self {
            initial,
            transition: [transition_of(State::Rich)?, transition_of(State::Poor)?],
            emission: [emission_of(State::Rich)?, emission_of(State::Poor)?],
        })
    }

    /// Simulate `len` positions. `len == 0` is [`DecodeError::EmptySequence`].
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        len: usize,
        rng: &mut R,
    ) -> Result<Simulation, DecodeError> {
        if len == 0 {
            return Err(DecodeError::EmptySequence);
        }
        let mut hidden = Vec::with_capacity(len);
        let mut symbols = Vec::with_capacity(len);
        let mut state = State::ALL[self.initial.sample(rng)];
        for i in 0..len {
            if i > 0 {
                state = State::ALL[self.transition[state.index()].sample(rng)];
            }
            hidden.push(state);
            symbols.push(Nucleotide::ALL[self.emission[state.index()].sample(rng)]);
        }
        Ok(Simulation {
            hidden,
            observed: ObservedSequence::from_symbols(symbols)?,
        })
    }
}

/// Simulate from the GC-content model with switching probability `mu`,
/// reproducibly from `seed`.
pub fn simulate_gc(mu: f64, len: usize, seed: u64) -> Result<Simulation, SimulationError> {
    let model = Model::gc_content(mu)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(Sampler::new(&model)?.simulate(len, &mut rng)?)
}

/// A sequence of `len` independent, uniformly drawn nucleotides.
pub fn uniform_sequence<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
) -> Result<ObservedSequence, DecodeError> {
    let symbols = (0..len)
        .map(|_| Nucleotide::ALL[rng.gen_range(0..Nucleotide::ALL.len())])
        .collect();
    ObservedSequence::from_symbols(symbols)
}
