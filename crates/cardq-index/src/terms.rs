//! Term dictionary scans over loaded indexes.

use std::{collections::BTreeSet, str};

use tantivy::{Searcher, schema::Field};
use tantivy_fst::Automaton;

use crate::error::IndexError;

/// Sign bit used by Tantivy's order-preserving numeric encoding.
const HIGHEST_BIT: u64 = 1 << 63;

/// Distinct raw term keys of `field` across all segments, in byte order.
pub fn raw_terms(searcher: &Searcher, field: Field) -> Result<BTreeSet<Vec<u8>>, IndexError> {
    let mut terms = BTreeSet::new();
    for segment_reader in searcher.segment_readers() {
        let inverted_index = segment_reader
            .inverted_index(field)
            .map_err(|e| IndexError::read(&e))?;
        let mut stream = inverted_index.terms().stream()?;
        while stream.advance() {
            terms.insert(stream.key().to_vec());
        }
    }
    Ok(terms)
}

/// Distinct text terms of `field`, sorted.
pub fn text_terms(searcher: &Searcher, field: Field) -> Result<Vec<String>, IndexError> {
    Ok(raw_terms(searcher, field)?
        .into_iter()
        .filter_map(|key| String::from_utf8(key).ok())
        .collect())
}

/// Distinct text terms of `field` accepted by an automaton built per segment.
pub fn matching_terms<A, F>(
    searcher: &Searcher,
    field: Field,
    automaton: F,
) -> Result<BTreeSet<String>, IndexError>
where
    A: Automaton,
    A::State: Clone,
    F: Fn() -> A,
{
    let mut terms = BTreeSet::new();
    for segment_reader in searcher.segment_readers() {
        let inverted_index = segment_reader
            .inverted_index(field)
            .map_err(|e| IndexError::read(&e))?;
        let mut stream = inverted_index.terms().search(automaton()).into_stream()?;
        while stream.advance() {
            if let Ok(term) = str::from_utf8(stream.key()) {
                terms.insert(term.to_string());
            }
        }
    }
    Ok(terms)
}

/// Decodes an 8-byte big-endian term key.
fn decode_u64(key: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = key.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// Inverse of Tantivy's `f64` to `u64` mapping.
fn u64_to_f64(value: u64) -> f64 {
    let bits = if value & HIGHEST_BIT != 0 {
        value ^ HIGHEST_BIT
    } else {
        !value
    };
    f64::from_bits(bits)
}

/// Inverse of Tantivy's `i64` to `u64` mapping.
fn u64_to_i64(value: u64) -> i64 {
    (value ^ HIGHEST_BIT) as i64
}

/// Distinct values of an `f64` field, ascending.
pub fn f64_terms(searcher: &Searcher, field: Field) -> Result<Vec<f64>, IndexError> {
    Ok(raw_terms(searcher, field)?
        .iter()
        .filter_map(|key| decode_u64(key))
        .map(u64_to_f64)
        .collect())
}

/// Distinct values of an `i64` field, ascending.
pub fn i64_terms(searcher: &Searcher, field: Field) -> Result<Vec<i64>, IndexError> {
    Ok(raw_terms(searcher, field)?
        .iter()
        .filter_map(|key| decode_u64(key))
        .map(u64_to_i64)
        .collect())
}
