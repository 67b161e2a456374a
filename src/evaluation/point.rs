//! evaluation::point — evaluated coordinates and their content digest.
//!
//! A [`Point`] pairs a coordinate vector with its objective value. Two points
//! with bit-identical coordinates are interchangeable for caching, which is
//! captured by [`PointDigest`]: a SHA-1 digest over the big-endian IEEE-754
//! bit pattern of every coordinate, concatenated in order. The digest is
//! stable across platforms and implementations.
use ndarray::Array1;
use sha1::{Digest, Sha1};

/// Coordinate vector of a point in the search space.
pub type Pos = Array1<f64>;

/// Width in bytes of a [`PointDigest`] (160 bits).
pub const DIGEST_LEN: usize = 20;

/// A coordinate vector together with its objective value.
///
/// `val` is `+inf` for points that have not been evaluated yet or whose
/// evaluation failed; lower values are better.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub pos: Pos,
    pub val: f64,
}

impl Point {
    pub fn new(pos: Pos, val: f64) -> Self {
        Self { pos, val }
    }

    /// A point whose value is still unknown (`+inf`).
    pub fn unevaluated(pos: Pos) -> Self {
        Self { pos, val: f64::INFINITY }
    }

    /// Dimensionality of the coordinate vector.
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Coordinate `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn at(&self, i: usize) -> f64 {
        self.pos[i]
    }

    /// Content digest of the coordinate vector (the value is ignored).
    pub fn digest(&self) -> PointDigest {
        PointDigest::of(&self.pos)
    }
}

/// Fixed-width content digest of a coordinate vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointDigest([u8; DIGEST_LEN]);

impl PointDigest {
    /// Digest the big-endian bit pattern of every coordinate in `pos`.
    pub fn of(pos: &Pos) -> Self {
        let mut hasher = Sha1::new();
        for x in pos.iter() {
            hasher.update(x.to_bits().to_be_bytes());
        }
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}
