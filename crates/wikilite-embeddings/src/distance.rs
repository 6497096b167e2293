//! Distance kernels used by the coarse, fine, and fuzzy stages.

use wikilite_core::errors::{CodecError, WikiliteResult};

/// Number of differing bits between two equal-length byte buffers.
pub fn hamming(a: &[u8], b: &[u8]) -> WikiliteResult<u32> {
    if a.len() != b.len() {
        return Err(CodecError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }
    Ok(a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum())
}

/// L2 distance between two equal-length vectors, accumulated in f64.
pub fn euclidean(a: &[f32], b: &[f32]) -> WikiliteResult<f64> {
    if a.len() != b.len() {
        return Err(CodecError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Unit-cost edit distance over Unicode scalar values. Case-sensitive.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
