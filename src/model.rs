//! The two-state GC-content HMM.
//!
//! A [`Model`] holds natural-log initial, transition and emission
//! probabilities for the hidden states [`State::Rich`] and [`State::Poor`]
//! over the DNA alphabet. Probabilities are combined by addition in log
//! space. Once constructed the model is immutable and is shared read-only by
//! every decode call.

use crate::error::ModelError;
use crate::sequence::ObservedSequence;
use std::fmt;

/// Hidden state of the GC-content model.
///
/// The declaration order is also the tie-break order used by every decoder:
/// on an exact tie, `Rich` wins over `Poor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    /// GC-rich region, favouring C/G emissions.
    Rich,
    /// GC-poor region, favouring A/T emissions.
    Poor,
}

impl State {
    /// Both states, in tie-break order.
    pub const ALL: [State; 2] = [State::Rich, State::Poor];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            State::Rich => 0,
            State::Poor => 1,
        }
    }

    #[inline]
    pub fn other(self) -> State {
        match self {
            State::Rich => State::Poor,
            State::Poor => State::Rich,
        }
    }

    /// Label in the simulator's hidden-state alphabet (`h` / `l`).
    pub fn as_char(self) -> char {
        match self {
            State::Rich => 'h',
            State::Poor => 'l',
        }
    }

    pub fn from_char(c: char) -> Option<State> {
        match c {
            'h' => Some(State::Rich),
            'l' => Some(State::Poor),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Rich => f.write_str("rich"),
            State::Poor => f.write_str("poor"),
        }
    }
}

/// Observed symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Nucleotide::A => 0,
            Nucleotide::C => 1,
            Nucleotide::G => 2,
            Nucleotide::T => 3,
        }
    }

    /// Uppercase ASCII only; case folding belongs to the sequence source.
    #[inline]
    pub fn from_byte(b: u8) -> Option<Nucleotide> {
        match b {
            b'A' => Some(Nucleotide::A),
            b'C' => Some(Nucleotide::C),
            b'G' => Some(Nucleotide::G),
            b'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T',
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// Emission probabilities of the GC-rich state, in `A, C, G, T` order.
pub const RICH_EMISSION: [f64; 4] = [0.13, 0.37, 0.37, 0.13];
/// Emission probabilities of the GC-poor state, in `A, C, G, T` order.
pub const POOR_EMISSION: [f64; 4] = [0.32, 0.18, 0.18, 0.32];
/// Initial probabilities, in `Rich, Poor` order.
pub const INITIAL: [f64; 2] = [0.5, 0.5];

/// Immutable two-state HMM in log space.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// log initial probabilities [s]
    initial: [f64; 2],
    /// log transition probabilities [s_from][s_to]
    transition: [[f64; 2]; 2],
    /// log emission probabilities [s][symbol]
    emission: [[f64; 4]; 2],
}

impl Model {
    /// Allowed deviation from 1 when checking that a distribution is normalized.
    pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

    /// Build a model from log-probabilities, validating every distribution.
    pub fn new(
        initial: [f64; 2],
        transition: [[f64; 2]; 2],
        emission: [[f64; 4]; 2],
    ) -> Result<Self, ModelError> {
        check_distribution("initial", &initial)?;
        for s in State::ALL {
            check_distribution(&format!("transition from {s}"), &transition[s.index()])?;
            check_distribution(&format!("emission of {s}"), &emission[s.index()])?;
        }
        Ok(Self {
            initial,
            transition,
            emission,
        })
    }

    /// Build a model from plain probabilities; each entry is converted with `ln`.
    pub fn from_probabilities(
        initial: [f64; 2],
        transition: [[f64; 2]; 2],
        emission: [[f64; 4]; 2],
    ) -> Result<Self, ModelError> {
        Self::new(
            initial.map(f64::ln),
            transition.map(|row| row.map(f64::ln)),
            emission.map(|row| row.map(f64::ln)),
        )
    }

    /// The GC-content model with switching probability `mu`.
    ///
    /// `transition[s][s] = ln(1 - mu)` and `transition[s][s'] = ln(mu)`;
    /// emissions and initial probabilities are the fixed domain constants.
    pub fn gc_content(mu: f64) -> Result<Self, ModelError> {
        if !(mu > 0.0 && mu < 1.0) {
            return Err(ModelError::InvalidSwitchProbability(mu));
        }
        let stay = 1.0 - mu;
        Self::from_probabilities(
            INITIAL,
            [[stay, mu], [mu, stay]],
            [RICH_EMISSION, POOR_EMISSION],
        )
    }

    #[inline]
    pub fn initial(&self, s: State) -> f64 {
        self.initial[s.index()]
    }

    #[inline]
    pub fn transition(&self, from: State, to: State) -> f64 {
        self.transition[from.index()][to.index()]
    }

    #[inline]
    pub fn emission(&self, s: State, symbol: Nucleotide) -> f64 {
        self.emission[s.index()][symbol.index()]
    }

    /// Score of starting in `s` and emitting `symbol`.
    #[inline]
    pub fn start_score(&self, s: State, symbol: Nucleotide) -> f64 {
        self.initial(s) + self.emission(s, symbol)
    }

    /// Score of moving `from -> to` and emitting `symbol` in `to`.
    ///
    /// The search decoders use the exact negation of this value as the edge
    /// weight, so all strategies compare bit-identical quantities.
    #[inline]
    pub fn step_score(&self, from: State, to: State, symbol: Nucleotide) -> f64 {
        self.transition(from, to) + self.emission(to, symbol)
    }

    /// Log-probability of emitting `obs` along the hidden `path`.
    ///
    /// Returns `None` when the lengths differ.
    pub fn path_log_probability(&self, obs: &ObservedSequence, path: &[State]) -> Option<f64> {
        if path.len() != obs.len() {
            return None;
        }
        let symbols = obs.symbols();
        let mut score = self.start_score(path[0], symbols[0]);
        for (t, pair) in path.windows(2).enumerate() {
            score += self.step_score(pair[0], pair[1], symbols[t + 1]);
        }
        Some(score)
    }
}

fn check_distribution(what: &str, log_probs: &[f64]) -> Result<(), ModelError> {
    if let Some(&value) = log_probs.iter().find(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite {
            what: what.to_string(),
            value,
        });
    }
    if let Some(&value) = log_probs.iter().find(|&&v| v > 0.0) {
        return Err(ModelError::AboveOne {
            what: what.to_string(),
            value,
        });
    }
    let sum: f64 = log_probs.iter().map(|v| v.exp()).sum();
    if (sum - 1.0).abs() > Model::NORMALIZATION_TOLERANCE {
        return Err(ModelError::NotNormalized {
            what: what.to_string(),
            sum,
        });
    }
    Ok(())
}
