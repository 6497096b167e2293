//! Vector codec. Pure transforms, no I/O.
//!
//! Stored embeddings are D little-endian f32 values. Quantized vectors are
//! `ceil(D/8)` bytes, bit `i` at byte `i / 8`, packed low-to-high.

use wikilite_core::constants::{BITS_PER_BYTE, F32_BYTES};
use wikilite_core::errors::{CodecError, EmbeddingError, WikiliteResult};

/// Byte length of a quantized vector with `dims` dimensions.
pub fn quantized_len(dims: usize) -> usize {
    dims.div_ceil(BITS_PER_BYTE)
}

/// Sign-bit quantization: bit `i` is set iff `values[i] >= 0`.
pub fn quantize_binary(values: &[f32]) -> Vec<u8> {
    let mut packed = vec![0u8; quantized_len(values.len())];
    for (i, &value) in values.iter().enumerate() {
        if value >= 0.0 {
            packed[i / BITS_PER_BYTE] |= 1 << (i % BITS_PER_BYTE);
        }
    }
    packed
}

/// Decode little-endian f32 values.
///
/// # Errors
/// `InvalidByteLength` if `bytes.len()` is not a multiple of 4.
pub fn bytes_to_f32(bytes: &[u8]) -> WikiliteResult<Vec<f32>> {
    if bytes.len() % F32_BYTES != 0 {
        return Err(CodecError::InvalidByteLength { len: bytes.len() }.into());
    }
    Ok(bytes
        .chunks_exact(F32_BYTES)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Encode f32 values as little-endian bytes.
pub fn f32_to_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// L2-normalize a single vector. A zero-magnitude vector maps to all zeros.
pub fn normalize_one(vector: &[f32]) -> Vec<f32> {
    if vector.is_empty() {
        return Vec::new();
    }
    let magnitude = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if magnitude == 0.0 {
        return vec![0.0; vector.len()];
    }
    vector.iter().map(|v| v / magnitude).collect()
}

/// L2-normalize each vector independently.
pub fn normalize(vectors: &[Vec<f32>]) -> Vec<Vec<f32>> {
    vectors.iter().map(|v| normalize_one(v)).collect()
}

/// Matryoshka truncation: normalize the full embedding, then serialize its
/// first `size` components. `size == 0` or `size > len` keeps every component.
pub fn extract_prefix(embedding: &[f32], size: usize) -> Vec<u8> {
    let size = if size == 0 || size > embedding.len() {
        embedding.len()
    } else {
        size
    };
    let normalized = normalize_one(embedding);
    f32_to_bytes(&normalized[..size])
}

/// Validate that an embedding has the expected dimensions.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> WikiliteResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_packs_low_bit_first() {
        // Dimensions 0 and 2 non-negative → bits 0 and 2 → 0b0000_0101.
        let q = quantize_binary(&[0.3, -0.1, 0.0, -2.0]);
        assert_eq!(q, vec![0b0000_0101]);
    }

    #[test]
    fn quantize_rounds_length_up() {
        assert_eq!(quantize_binary(&[1.0; 9]).len(), 2);
        assert_eq!(quantize_binary(&[1.0; 9]), vec![0xFF, 0x01]);
        assert_eq!(quantize_binary(&[]).len(), 0);
        assert_eq!(quantized_len(1024), 128);
    }

    #[test]
    fn quantize_nan_is_unset() {
        assert_eq!(quantize_binary(&[f32::NAN]), vec![0]);
    }

    #[test]
    fn f32_bytes_are_little_endian() {
        let bytes = f32_to_bytes(&[1.0]);
        assert_eq!(bytes, vec![0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(bytes_to_f32(&bytes).unwrap(), vec![1.0]);
    }

    #[test]
    fn bytes_to_f32_rejects_ragged_input() {
        assert!(bytes_to_f32(&[0, 0, 0]).is_err());
        assert!(bytes_to_f32(&[]).unwrap().is_empty());
    }

    #[test]
    fn normalize_handles_empty_and_zero() {
        let out = normalize(&[vec![], vec![0.0, 0.0, 0.0], vec![3.0, 4.0]]);
        assert!(out[0].is_empty());
        assert_eq!(out[1], vec![0.0, 0.0, 0.0]);
        assert!((out[2][0] - 0.6).abs() < 1e-6);
        assert!((out[2][1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn extract_prefix_normalizes_full_vector_first() {
        // |(3, 4, 0)| = 5, so the prefix of length 1 is 3/5, not 1.0.
        let bytes = extract_prefix(&[3.0, 4.0, 0.0], 1);
        let prefix = bytes_to_f32(&bytes).unwrap();
        assert_eq!(prefix.len(), 1);
        assert!((prefix[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn extract_prefix_out_of_range_uses_full_length() {
        assert_eq!(extract_prefix(&[1.0, 2.0], 0).len(), 8);
        assert_eq!(extract_prefix(&[1.0, 2.0], 5).len(), 8);
    }

    #[test]
    fn validate_dimensions_mismatch() {
        assert!(validate_dimensions(&[0.0; 384], 384).is_ok());
        assert!(validate_dimensions(&[0.0; 384], 1024).is_err());
    }
}
