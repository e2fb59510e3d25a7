//! Decoding many sequences against one shared model.
//!
//! Each decode call owns its own search state and only reads the model, so
//! the calls are independent. With the `parallel` feature they run on the
//! rayon thread pool; otherwise they run in order on the calling thread.
//! Results are returned in input order either way.

use crate::error::DecodeError;
use crate::model::Model;
use crate::sequence::ObservedSequence;
use crate::traits::{Decoder, Decoding};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decode every sequence with `decoder`; one result per input, in order.
#[cfg(feature = "parallel")]
pub fn decode_all<D>(
    decoder: &D,
    model: &Model,
    sequences: &[ObservedSequence],
) -> Vec<Result<Decoding, DecodeError>>
where
    D: Decoder + Sync + ?Sized,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(decoder = decoder.name(), count = sequences.len(), "parallel batch decode");
    sequences
        .par_iter()
        .map(|obs| decoder.decode(obs, model))
        .collect()
}

/// Decode every sequence with `decoder`; one result per input, in order.
#[cfg(not(feature = "parallel"))]
pub fn decode_all<D>(
    decoder: &D,
    model: &Model,
    sequences: &[ObservedSequence],
) -> Vec<Result<Decoding, DecodeError>>
where
    D: Decoder + Sync + ?Sized,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(decoder = decoder.name(), count = sequences.len(), "serial batch decode");
    sequences
        .iter()
        .map(|obs| decoder.decode(obs, model))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::{DijkstraDecoder, Strategy};

    #[test]
    fn keeps_input_order() {
        let model = Model::gc_content(0.01).unwrap();
        let seqs: Vec<_> = [&b"CCCCCC"[..], b"AAAAAA", b"GCGCAT"]
            .iter()
            .map(|s| ObservedSequence::from_bytes(s).unwrap())
            .collect();
        let results = decode_all(&DijkstraDecoder::new(), &model, &seqs);
        assert_eq!(results.len(), 3);
        for (obs, res) in seqs.iter().zip(&results) {
            let single = DijkstraDecoder::new().decode(obs, &model).unwrap();
            assert_eq!(res.as_ref().unwrap(), &single);
        }
    }

    #[test]
    fn works_through_trait_objects() {
        let model = Model::gc_content(0.1).unwrap();
        let seqs = vec![ObservedSequence::from_bytes(b"ACGT").unwrap()];
        let decoder = Strategy::Bidirectional.decoder(None);
        let results = decode_all(decoder.as_ref(), &model, &seqs);
        assert!(results[0].is_ok());
    }
}
