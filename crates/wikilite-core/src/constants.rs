/// Bits packed into one byte of a quantized vector.
pub const BITS_PER_BYTE: usize = 8;

/// Bytes per serialized f32 component.
pub const F32_BYTES: usize = 4;

/// Schema version written by the latest migration.
pub const SCHEMA_VERSION: u32 = 3;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "WIKILITE_LOG";
