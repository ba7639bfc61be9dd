//! # cmap: multi-level character map compression
//! 多级字符映射压缩
//!
//! Splits the bits of an input value into levels, deduplicates equal blocks
//! at every level, picks the split with the fewest stored bytes, and emits
//! run-length packed table literals plus the formula that looks a value up.
//! 将输入值的位划分为多层，在每层对相同块去重，
//! 选出存储字节最少的划分，并输出游程压缩的表字面量以及查找公式。
//!
//! ## Usage / 使用方法
//!
//! ```rust
//! use cmap::{Conf, compress};
//!
//! let map: Vec<u16> = (0..=255u8).map(|c| u16::from(c.is_ascii_digit())).collect();
//! let cmap = compress(&map, &Conf::default()).unwrap();
//! let rt = cmap.runtime().unwrap();
//! for (c, &id) in map.iter().enumerate() {
//!   assert_eq!(rt.get(c as u32), Some(u32::from(id)));
//! }
//! println!("{}", cmap.access);
//! ```

mod access;
mod build;
mod cmap;
mod conf;
mod consts;
mod emit;
pub mod error;
mod search;
mod types;

pub use access::{Expr, gen_access, table_name};
pub use build::{Layout, LevelTable, build_layout, build_level};
pub use cmap::{CMap, Runtime, compress};
pub use conf::Conf;
pub use consts::{
  CHAR_BITS, DEFAULT_PARTITIONS, DEFAULT_VAR, FINAL_TABLE, INFEASIBLE, MAX_PARTITIONS,
  TABLE_PREFIX, UNIT_BITS,
};
pub use emit::{Table, gen_tables};
pub use error::{Error, Result};
pub use search::{Best, cost, find_best_sizes};
pub use types::{Level, ValueBits, bits_total};
