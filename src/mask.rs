//! Packed bit-mask grids.
//!
//! An N×N grid of booleans packed into a single unsigned integer `T`.
//! A board surface is built by layering several of these masks (ship
//! occupancy, hits, misses, sunk) and deriving a cell state from the
//! combination.

use core::fmt;
use core::ops::{BitAnd, BitOr, Not};
use num_traits::{PrimInt, Unsigned};

/// Errors returned by mask operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    /// Row or column index is outside [0..N).
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::OutOfBounds { row, col } => {
                write!(f, "mask index out of bounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A fixed-size N×N boolean grid stored in the unsigned integer `T`.
///
/// `T` must carry at least N*N bits; the engine uses `Mask<u128, 10>`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Mask<T, const N: usize>
where
    T: PrimInt + Unsigned,
{
    bits: T,
}

impl<T, const N: usize> Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    const CELLS: usize = N * N;

    /// An empty mask (all cells cleared).
    #[inline]
    pub fn new() -> Self {
        Mask { bits: T::zero() }
    }

    // All usable bits set; keeps `Not` from leaking bits above N*N.
    #[inline]
    fn full_bits() -> T {
        if Self::CELLS == core::mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    #[inline]
    fn index_of(row: usize, col: usize) -> Result<usize, MaskError> {
        if row >= N || col >= N {
            Err(MaskError::OutOfBounds { row, col })
        } else {
            Ok(row * N + col)
        }
    }

    /// Reads the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, MaskError> {
        let idx = Self::index_of(row, col)?;
        Ok((self.bits >> idx) & T::one() != T::zero())
    }

    /// Sets the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = Self::index_of(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the cell at (row, col).
    pub fn unset(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = Self::index_of(row, col)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True when no cell is set.
    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    /// Iterates over the (row, col) positions of all set cells, in
    /// row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> {
        let bits = self.bits;
        (0..Self::CELLS)
            .filter(move |&idx| (bits >> idx) & T::one() != T::zero())
            .map(|idx| (idx / N, idx % N))
    }
}

impl<T, const N: usize> Default for Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitAnd for Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Mask {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Mask {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> Not for Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Mask {
            bits: !self.bits & Self::full_bits(),
        }
    }
}

impl<T, const N: usize> fmt::Debug for Mask<T, N>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mask<{}>:", N)?;
        for r in 0..N {
            for c in 0..N {
                let set = (self.bits >> (r * N + c)) & T::one() != T::zero();
                write!(f, "{} ", if set { '■' } else { '□' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
