//! Benchmark configuration keys and the file name grammar they are parsed
//! from.
//!
//! The benchmark writes one result file per configuration and names it after
//! the configuration:
//!
//! ```text
//! name   := "matrix: " dim ",kernel: " dim ",BlockDim: " dim tail
//! dim    := uint "x" uint
//! tail   := "" | text not starting with a digit
//! ```
//!
//! e.g. `matrix: 1344x376,kernel: 3x3,BlockDim: 8x8_values`. The name is the
//! only join key between files and configurations, so every string match in
//! the crate goes through [`parse_name`](fn.parse_name.html).

use crate::errors::*;
use std::fmt;
use std::str::FromStr;

const MATRIX_PREFIX: &str = "matrix: ";
const KERNEL_PREFIX: &str = ",kernel: ";
const BLOCK_PREFIX: &str = ",BlockDim: ";

/// Name tail of a raw sample directory.
pub(crate) const VALUES_SUFFIX: &str = "_values";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// A two dimensional extent, written `XxY`. Ordered by `x` first.
pub struct Dim {
    /// first extent (matrix rows / width)
    pub x: usize,

    /// second extent
    pub y: usize,
}

impl Dim {
    /// Creates a new `Dim`
    pub fn new(x: usize, y: usize) -> Self {
        Dim { x: x, y: y }
    }

    /// Creates a square `Dim`
    pub fn square(n: usize) -> Self {
        Dim::new(n, n)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl FromStr for Dim {
    type Err = Error;

    fn from_str(s: &str) -> Result<Dim> {
        match take_dim(s, "") {
            Some((dim, "")) => Ok(dim),
            _ => bail!(ErrorKind::InvalidFileName(s.to_string())),
        }
    }
}

/// Splits the leading `<digits>x<digits>` of `s` into its two digit runs.
fn split_dim(s: &str) -> Option<(&str, &str)> {
    let x_len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or_else(|| s.len());
    if x_len == 0 || !s[x_len..].starts_with('x') {
        return None;
    }
    let rest = &s[x_len + 1..];
    let y_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| rest.len());
    if y_len == 0 {
        return None;
    }
    Some((&s[..x_len], &rest[..y_len]))
}

/// Parses one `dim` after `prefix` at the start of `s`; returns the dim and
/// the unparsed remainder.
fn take_dim<'a>(s: &'a str, prefix: &str) -> Option<(Dim, &'a str)> {
    let s = s.strip_prefix(prefix)?;
    let (x, y) = split_dim(s)?;
    let dim = Dim::new(x.parse().ok()?, y.parse().ok()?);
    Some((dim, &s[x.len() + 1 + y.len()..]))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// The (kernel, block dimension) pair that one chart is drawn for.
pub struct Group {
    /// convolution kernel extent
    pub kernel: Dim,

    /// CUDA thread block extent
    pub block: Dim,
}

impl Group {
    /// Creates a new `Group`
    pub fn new(kernel: Dim, block: Dim) -> Self {
        Group {
            kernel: kernel,
            block: block,
        }
    }

    /// The label used for chart titles and chart file names, e.g.
    /// `kernel: 3x3 - BlockDim: 8x8`.
    pub fn label(&self) -> String {
        format!("kernel: {} - BlockDim: {}", self.kernel, self.block)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "kernel: {},BlockDim: {}", self.kernel, self.block)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// Benchmark configuration consists of matrix size, kernel size and block
/// dimension.
pub struct ConfigKey {
    /// input matrix size
    pub matrix: Dim,

    /// convolution kernel size
    pub kernel: Dim,

    /// thread block dimension
    pub block: Dim,
}

impl ConfigKey {
    /// Creates a new `ConfigKey`
    pub fn new(matrix: Dim, kernel: Dim, block: Dim) -> Self {
        ConfigKey {
            matrix: matrix,
            kernel: kernel,
            block: block,
        }
    }

    /// The chart group this configuration belongs to.
    pub fn group(&self) -> Group {
        Group::new(self.kernel, self.block)
    }

    /// Gets the file name of the result table for this configuration.
    pub fn derive_result_name(&self) -> String {
        format!("{}.csv", self)
    }

    /// Gets the directory name holding the raw per-run samples.
    pub fn derive_values_name(&self) -> String {
        format!("{}{}", self, VALUES_SUFFIX)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "matrix: {},kernel: {},BlockDim: {}",
            self.matrix,
            self.kernel,
            self.block
        )
    }
}

/// Parses a file or directory name. Returns the key and the tail that follows
/// the block dimension (`""`, `".csv"`, `"_values"`, ...).
pub fn parse_name(name: &str) -> Result<(ConfigKey, &str)> {
    let invalid = || ErrorKind::InvalidFileName(name.to_string());
    let (matrix, rest) = take_dim(name, MATRIX_PREFIX).ok_or_else(invalid)?;
    let (kernel, rest) = take_dim(rest, KERNEL_PREFIX).ok_or_else(invalid)?;
    let (block, tail) = take_dim(rest, BLOCK_PREFIX).ok_or_else(invalid)?;
    Ok((ConfigKey::new(matrix, kernel, block), tail))
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<ConfigKey> {
        parse_name(s).map(|(key, _)| key)
    }
}
