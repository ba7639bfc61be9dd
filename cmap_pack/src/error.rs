//! Decode errors / 解码错误

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("bad escape at {pos}")]
  Escape { pos: usize },

  #[error("unexpected character outside quotes at {pos}")]
  Quote { pos: usize },

  #[error("unterminated literal")]
  Unterminated,

  #[error("odd number of characters, runs come in (count, value) pairs")]
  Pair,

  #[error("zero-length run at pair {pos}")]
  ZeroRun { pos: usize },

  #[error("runs overflow declared length {len}")]
  Overflow { len: usize },

  #[error("runs decode to {got} values, declared {len}")]
  Short { got: usize, len: usize },
}
