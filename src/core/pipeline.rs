//! The batched bulk transform pipeline.
//!
//! Converts an ordered unit sequence into a transformed sequence using a
//! remote service that only accepts bounded-size batches per call. Batches
//! are processed strictly sequentially and results are concatenated in batch
//! order, so relative unit order is preserved end to end. Any batch failure
//! aborts the whole operation; prior in-memory results are discarded by the
//! caller and never written.
//!
//! Empty units carry no payload and are never sent to the service. By
//! default they are dropped from the output entirely; [`EmptyUnits::Preserve`]
//! instead keeps an empty output at each empty input position.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;

use crate::core::client::Transit;
use crate::core::types::{Direction, EmptyUnits};
use crate::error::TransformError;

/// Transform `units` through `backend` in batches of at most `batch_limit`.
///
/// `batch_limit` must be at least 1; the config resolver enforces this
/// before a pipeline is ever constructed.
///
/// # Errors
///
/// Returns the first batch failure, wrapped with the unit index range the
/// batch covered. Batches after the failing one are never sent.
pub fn transform_units(
    backend: &impl Transit,
    direction: Direction,
    units: &[String],
    batch_limit: usize,
    empty_units: EmptyUnits,
) -> Result<Vec<String>, TransformError> {
    debug_assert!(batch_limit >= 1);

    let mut output = Vec::with_capacity(units.len());
    for (index, batch) in units.chunks(batch_limit).enumerate() {
        let start = index * batch_limit;
        let end = start + batch.len();
        debug!(batch = index, start, end, "transforming batch");

        let results = transform_batch(backend, direction, batch, empty_units)
            .map_err(|e| e.in_batch(start, end))?;
        output.extend(results);
    }

    Ok(output)
}

/// Transform a single unit via the single-item endpoint, with the same
/// encode/decode semantics as the batched path.
pub fn transform_unit(
    backend: &impl Transit,
    direction: Direction,
    unit: &str,
) -> Result<String, TransformError> {
    let payload = encode_payload(direction, unit);
    let result = backend.transform_single(direction, &payload)?;
    decode_result(direction, result)
}

/// Transform one batch: filter empties, transcode, call the service once,
/// decode, and (in preserve mode) weave empty outputs back in.
fn transform_batch(
    backend: &impl Transit,
    direction: Direction,
    batch: &[String],
    empty_units: EmptyUnits,
) -> Result<Vec<String>, TransformError> {
    let payloads: Vec<String> = batch
        .iter()
        .filter(|u| !u.is_empty())
        .map(|u| encode_payload(direction, u))
        .collect();

    let results = if payloads.is_empty() {
        Vec::new()
    } else {
        backend.transform_batch(direction, &payloads)?
    };

    // The batch call contract is K results for K items. The HTTP client
    // checks this too, but reassembly depends on it, so verify at the seam.
    if results.len() != payloads.len() {
        return Err(TransformError::ResultCountMismatch {
            expected: payloads.len(),
            got: results.len(),
        });
    }

    let decoded = results
        .into_iter()
        .map(|r| decode_result(direction, r))
        .collect::<Result<Vec<_>, _>>()?;

    match empty_units {
        EmptyUnits::Drop => Ok(decoded),
        EmptyUnits::Preserve => {
            let mut remaining = decoded.into_iter();
            batch
                .iter()
                .map(|unit| {
                    if unit.is_empty() {
                        Ok(String::new())
                    } else {
                        remaining.next().ok_or(TransformError::ResultCountMismatch {
                            expected: batch.len(),
                            got: 0,
                        })
                    }
                })
                .collect()
        }
    }
}

/// The encode endpoint expects base64 plaintext; ciphertext is passed
/// through verbatim.
fn encode_payload(direction: Direction, unit: &str) -> String {
    match direction {
        Direction::Encrypt => BASE64.encode(unit.as_bytes()),
        Direction::Decrypt => unit.to_string(),
    }
}

/// Undo the service's encoding convention: decrypted plaintext comes back
/// base64-encoded and must be valid UTF-8 once decoded.
fn decode_result(direction: Direction, result: String) -> Result<String, TransformError> {
    match direction {
        Direction::Encrypt => Ok(result),
        Direction::Decrypt => {
            let bytes = BASE64
                .decode(&result)
                .map_err(|e| TransformError::Decode(e.to_string()))?;
            String::from_utf8(bytes).map_err(|_| TransformError::InvalidUtf8)
        }
    }
}
