//! Compression job configuration
//! 压缩任务配置

use crate::{DEFAULT_PARTITIONS, DEFAULT_VAR, FINAL_TABLE, ValueBits};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
  /// Upper bound on lookup levels, 1..=26
  pub partitions: usize,
  /// Width of the class ids
  pub bits: ValueBits,
  /// Name of the final table
  pub table: String,
  /// Input variable of the access formula
  pub var: String,
}

impl Default for Conf {
  fn default() -> Self {
    Self {
      partitions: DEFAULT_PARTITIONS,
      bits: ValueBits::default(),
      table: FINAL_TABLE.to_owned(),
      var: DEFAULT_VAR.to_owned(),
    }
  }
}
