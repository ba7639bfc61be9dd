//! Error definitions for table compression
//! 表压缩错误定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("character map is empty")]
  EmptyMap,

  #[error("partition count {0} outside 1..=26")]
  Partitions(usize),

  #[error("unsupported value width {0}, expected 1, 2, 4, 8 or 16")]
  ValueBits(u32),

  #[error("{sizes} partition sizes for {levels} levels")]
  Levels { sizes: usize, levels: usize },

  #[error("length {len} is not a multiple of 2^{bits}")]
  SizeMismatch { len: usize, bits: u32 },

  #[error("bit widths total {sum}, map needs {bits}")]
  WidthTotal { sum: u32, bits: u32 },

  #[error("final block of 2^{bits} values narrower than a 2^{need} storage unit")]
  BlockTooNarrow { bits: u32, need: u32 },

  #[error("no partition fits the map")]
  NoPartition,

  #[error("{table}: entry {entry} does not fit in {bits} bits")]
  EntryTooBig { table: String, entry: u64, bits: u32 },

  #[error("cmap_pack: {0}")]
  Pack(#[from] cmap_pack::Error),
}
