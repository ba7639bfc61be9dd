#![cfg_attr(docsrs, feature(doc_cfg))]

//! Run-length packed string literals for generated lookup tables
//! 生成查找表的游程压缩字符串字面量
//!
//! A table is written as alternating `(count, value)` characters, each one an
//! escape sequence, split into quoted chunks that fit a source line.
//! 表被写成交替的 `(次数, 值)` 字符，每个字符都是转义序列，
//! 并按源码行宽切分为带引号的片段。
//!
//! ```rust
//! use cmap_pack::{Packer, unpack};
//!
//! let mut packer = Packer::new();
//! for v in [7u16, 7, 7, 300] {
//!   packer.push(v);
//! }
//! let packed = packer.finish();
//! assert_eq!(packed.to_string(), "    \"\\3\\7\\1\\u012c\"");
//! assert_eq!(unpack(&packed.to_string(), 4).unwrap(), [7, 7, 7, 300]);
//! ```

mod error;
mod pack;
mod unpack;

pub use error::{Error, Result};
pub use pack::{Packed, Packer, pack};
pub use unpack::{parse, unpack};

/// Longest run a single `(count, value)` pair can hold
/// 单个 `(次数, 值)` 对能表示的最长游程
pub const MAX_RUN: u32 = 0xFFFF;

/// Rendered line width that closes the current chunk
/// 达到该渲染行宽后结束当前片段
pub const LINE_WIDTH: usize = 78;

/// Prefix of every rendered chunk
/// 每个渲染片段的前缀
pub const INDENT: &str = "    \"";

/// Separator between rendered chunks
/// 渲染片段之间的连接符
pub const JOIN: &str = "+\n";
