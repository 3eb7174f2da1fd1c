//! Typed vector <-> raw bytes.
//!
//! The mapping is a closed set resolved once, when a writer, scanner,
//! encoder or decoder is built:
//! - `RawBytes`: `u8` identity
//! - `Float32Le`: `f32` as 4-byte little-endian IEEE-754 groups
//! - `Custom`: caller supplied function pair

use std::any::type_name;
use std::fmt;

use crate::constants::F32_WIDTH;
use crate::types::{Result, WreckError};

pub type EncodeFn<T> = fn(&[T]) -> Vec<u8>;
pub type DecodeFn<T> = fn(&[u8]) -> Vec<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    RawBytes,
    Float32Le,
    Custom,
}

/// Bidirectional element mapping, fixed for the lifetime of its owner.
pub struct ElementCodec<T> {
    kind: ElementKind,
    encode: EncodeFn<T>,
    decode: DecodeFn<T>,
}

// Manual impls: fn pointers are Copy whatever `T` is.
impl<T> Clone for ElementCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementCodec<T> {}

impl<T> fmt::Debug for ElementCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCodec")
            .field("kind", &self.kind)
            .field("element", &type_name::<T>())
            .finish()
    }
}

impl<T> ElementCodec<T> {
    /// Install a custom mapping for any element type.
    pub fn custom(encode: EncodeFn<T>, decode: DecodeFn<T>) -> Self {
        Self { kind: ElementKind::Custom, encode, decode }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn encode(&self, vector: &[T]) -> Vec<u8> {
        (self.encode)(vector)
    }

    pub fn decode(&self, raw: &[u8]) -> Vec<T> {
        (self.decode)(raw)
    }
}

impl<T: Element> ElementCodec<T> {
    /// Resolve the built-in mapping for `T`, failing fast when there is none.
    pub fn resolve() -> Result<Self> {
        T::builtin_codec().ok_or(WreckError::UnsupportedElementType(type_name::<T>()))
    }
}

impl ElementCodec<u8> {
    pub fn raw_bytes() -> Self {
        Self { kind: ElementKind::RawBytes, encode: <[u8]>::to_vec, decode: <[u8]>::to_vec }
    }
}

impl ElementCodec<f32> {
    pub fn float32_le() -> Self {
        Self { kind: ElementKind::Float32Le, encode: f32_to_le, decode: f32_from_le }
    }
}

fn f32_to_le(vector: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vector.len() * F32_WIDTH);
    for v in vector {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

// Trailing bytes short of a full element are dropped.
fn f32_from_le(raw: &[u8]) -> Vec<f32> {
    raw.chunks_exact(F32_WIDTH)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Vector element type known to the crate.
///
/// Types without a built-in mapping still implement this trait; asking them
/// to `resolve` yields `UnsupportedElementType`. Use `ElementCodec::custom`
/// for those.
pub trait Element: Sized + 'static {
    fn builtin_codec() -> Option<ElementCodec<Self>> {
        None
    }
}

impl Element for u8 {
    fn builtin_codec() -> Option<ElementCodec<Self>> {
        Some(ElementCodec::raw_bytes())
    }
}

impl Element for f32 {
    fn builtin_codec() -> Option<ElementCodec<Self>> {
        Some(ElementCodec::float32_le())
    }
}

macro_rules! element_without_codec {
    ($($t:ty),*) => { $(impl Element for $t {})* };
}

element_without_codec!(i8, u16, i16, u32, i32, u64, i64, f64);
