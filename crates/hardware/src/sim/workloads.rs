//! Benchmark kernels.
//!
//! Each kernel issues loads, stores, adds and multiplies through an
//! [`Emulator`] exactly as compiled code would, so the resulting counters show
//! how the access pattern interacts with the cache geometry. Matrices are
//! row-major `n x n` arrays laid out back to back: `A` at word 0, `B` at `n^2`,
//! `C` at `2n^2`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::emulator::Emulator;
use crate::common::addr::WordAddr;
use crate::common::error::{SimError, SimResult};

/// Vector length used by the dot product benchmark.
pub const DOT_PRODUCT_LEN: u64 = 10_000;

/// Matrix dimension used by the multiply benchmarks.
pub const MATRIX_DIM: u64 = 100;

/// Tile size used by the blocked multiply.
pub const BLOCK_FACTOR: u64 = 10;

/// The benchmark kernels the analyzer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Workload {
    /// `x . y` over two vectors of [`DOT_PRODUCT_LEN`] words.
    #[serde(rename = "dot", alias = "dot-product")]
    DotProduct,
    /// Naive `i-j-k` matrix multiply.
    #[serde(rename = "mxm", alias = "matmul")]
    Matmul,
    /// Matrix multiply with the `i` and `j` loops interchanged.
    #[serde(rename = "mxm-loop", alias = "matmul-interchanged")]
    MatmulInterchanged,
    /// Matrix multiply tiled by [`BLOCK_FACTOR`].
    #[serde(rename = "mxm-blocking", alias = "matmul-blocked")]
    MatmulBlocked,
}

impl Workload {
    /// Every workload, in report order.
    pub const ALL: [Self; 4] = [
        Self::DotProduct,
        Self::Matmul,
        Self::MatmulInterchanged,
        Self::MatmulBlocked,
    ];

    /// Runs the workload with its default problem size.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] if the backing store is too small
    /// for the workload's arrays.
    pub fn run(self, emu: &mut Emulator) -> SimResult<()> {
        match self {
            Self::DotProduct => dot_product(emu, DOT_PRODUCT_LEN).map(|_| ()),
            Self::Matmul => matmul(emu, MATRIX_DIM),
            Self::MatmulInterchanged => matmul_interchanged(emu, MATRIX_DIM),
            Self::MatmulBlocked => matmul_blocked(emu, MATRIX_DIM, BLOCK_FACTOR),
        }
    }

    /// Short name used on the command line and in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DotProduct => "dot",
            Self::Matmul => "mxm",
            Self::MatmulInterchanged => "mxm-loop",
            Self::MatmulBlocked => "mxm-blocking",
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Workload {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "dot-product" => Ok(Self::DotProduct),
            "mxm" | "matmul" => Ok(Self::Matmul),
            "mxm-loop" | "matmul-interchanged" => Ok(Self::MatmulInterchanged),
            "mxm-blocking" | "matmul-blocked" => Ok(Self::MatmulBlocked),
            _ => Err(SimError::Parse {
                what: "workload",
                input: s.to_owned(),
            }),
        }
    }
}

/// Computes `sum(x[i] * y[i])` with `x` at word 0 and `y` at word `n`, storing
/// the result at word `2n`. Returns the result.
///
/// # Errors
///
/// Propagates [`SimError::OutOfRange`] from the emulator.
pub fn dot_product(emu: &mut Emulator, n: u64) -> SimResult<f64> {
    let mut r = 0.0;
    for i in 0..n {
        let x = emu.load(WordAddr(i))?;
        let y = emu.load(WordAddr(n + i))?;
        let z = emu.multiply(x, y);
        r = emu.add(r, z);
    }
    emu.store(WordAddr(2 * n), r)?;
    Ok(r)
}

/// Inner product of row `i` of `A` with column `j` of `B`, over `ks`.
fn row_col(emu: &mut Emulator, n: u64, i: u64, j: u64, ks: std::ops::Range<u64>) -> SimResult<f64> {
    let mut r = 0.0;
    for k in ks {
        let x = emu.load(WordAddr(i * n + k))?;
        let y = emu.load(WordAddr(n * n + j + k * n))?;
        let z = emu.multiply(x, y);
        r = emu.add(r, z);
    }
    Ok(r)
}

/// `C = A * B` with loops in `i, j, k` order.
///
/// # Errors
///
/// Propagates [`SimError::OutOfRange`] from the emulator.
pub fn matmul(emu: &mut Emulator, n: u64) -> SimResult<()> {
    for i in 0..n {
        for j in 0..n {
            let r = row_col(emu, n, i, j, 0..n)?;
            emu.store(WordAddr(2 * n * n + i * n + j), r)?;
        }
    }
    Ok(())
}

/// `C = A * B` with loops in `j, i, k` order.
///
/// # Errors
///
/// Propagates [`SimError::OutOfRange`] from the emulator.
pub fn matmul_interchanged(emu: &mut Emulator, n: u64) -> SimResult<()> {
    for j in 0..n {
        for i in 0..n {
            let r = row_col(emu, n, i, j, 0..n)?;
            emu.store(WordAddr(2 * n * n + i * n + j), r)?;
        }
    }
    Ok(())
}

/// `C += A * B` tiled into `b x b` blocks of `j` and `k`.
///
/// `C` is zeroed first, then the emulator is reset so the counters only cover
/// the multiply itself.
///
/// # Errors
///
/// Propagates [`SimError::OutOfRange`] from the emulator, and returns
/// [`SimError::Configuration`] if `b` is zero.
pub fn matmul_blocked(emu: &mut Emulator, n: u64, b: u64) -> SimResult<()> {
    if b == 0 {
        return Err(SimError::Configuration("blocking factor must be positive".to_owned()));
    }
    let c = 2 * n * n;
    for addr in c..c + n * n {
        emu.store(WordAddr(addr), 0.0)?;
    }
    emu.reset();

    for jj in (0..n).step_by(b as usize) {
        for kk in (0..n).step_by(b as usize) {
            for i in 0..n {
                for j in jj..(jj + b).min(n) {
                    let r = row_col(emu, n, i, j, kk..(kk + b).min(n))?;
                    let partial = emu.load(WordAddr(c + i * n + j))?;
                    let sum = emu.add(partial, r);
                    emu.store(WordAddr(c + i * n + j), sum)?;
                }
            }
        }
    }
    Ok(())
}
