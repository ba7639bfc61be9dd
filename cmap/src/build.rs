//! Hierarchical block deduplication
//! 分层块去重
//!
//! Each level splits the table beneath it into blocks of `2^bits` entries,
//! keeps one copy of every distinct block and records block ordinals in an
//! index table, which becomes the table of the level above.
//! 每层把下层表切成 `2^bits` 个条目的块，每种不同的块只保留一份，
//! 并在索引表中记录块序号，该索引表即为上一层的表。

use std::collections::HashMap;

use crate::{Error, Level, Result, ValueBits, bits_total};

/// Index table plus deduplicated data table of one level
/// 单层的索引表与去重后的数据表
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelTable {
  pub index: Vec<u32>,
  pub data: Vec<u32>,
}

/// Deduplicate `table` in blocks of `2^bits` entries
/// 以 `2^bits` 个条目为块对 `table` 去重
///
/// # Errors
/// Returns `Error::SizeMismatch` if the length is not a multiple of the block
pub fn build_level(table: &[u32], bits: u32) -> Result<LevelTable> {
  let block = 1usize
    .checked_shl(bits)
    .filter(|block| table.len() % block == 0)
    .ok_or(Error::SizeMismatch {
      len: table.len(),
      bits,
    })?;

  let mut index = Vec::with_capacity(table.len() >> bits);
  let mut data = Vec::new();
  // Stored blocks are pairwise distinct, so a content lookup finds the same
  // block a linear scan would.
  let mut seen: HashMap<&[u32], u32> = HashMap::new();
  for chunk in table.chunks_exact(block) {
    let next = seen.len() as u32;
    let id = *seen.entry(chunk).or_insert_with(|| {
      data.extend_from_slice(chunk);
      next
    });
    index.push(id);
  }
  data.shrink_to_fit();
  Ok(LevelTable { index, data })
}

/// Tables and metadata of one partition
/// 单个划分的表与元数据
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
  pub sizes: Vec<u32>,
  /// `tables[k]` is indexed by level `k`, the last one holds class ids
  /// `tables[k]` 由第 `k` 层索引，最后一个存放类别 id
  pub tables: Vec<Vec<u32>>,
  pub levels: Vec<Level>,
  pub bits: ValueBits,
}

impl Layout {
  /// Stored bytes of all tables
  /// 所有表的存储字节数
  #[must_use]
  pub fn total_bytes(&self) -> usize {
    let Some((last, index)) = self.tables.split_last() else {
      return 0;
    };
    let index: usize = index
      .iter()
      .zip(&self.levels)
      .map(|(t, level)| (t.len() * level.bytes as usize) << 1)
      .sum();
    index + (((last.len() * self.bits.slot_bits() as usize + 15) >> 4) << 1)
  }
}

/// Build every level of `map` for the given bit widths
/// 按给定位宽构建 `map` 的所有层
///
/// # Errors
/// `Error::EmptyMap`, `Error::Partitions`, `Error::WidthTotal`,
/// `Error::SizeMismatch` or `Error::BlockTooNarrow` when `sizes` does not fit.
/// Blocks of a packed final level must fill whole storage units once an index
/// level sits above it.
/// 存在上层索引时，打包最终层的块必须填满整数个存储单元。
pub fn build_layout(map: &[u32], sizes: &[u32], bits: ValueBits) -> Result<Layout> {
  if map.is_empty() {
    return Err(Error::EmptyMap);
  }
  let Some(&last_bits) = sizes.last() else {
    return Err(Error::Partitions(0));
  };
  let sum: u32 = sizes.iter().sum();
  let total = bits_total(map.len());
  if sum != total {
    return Err(Error::WidthTotal { sum, bits: total });
  }
  let offset = bits.bit_offset();
  let last = sizes.len() - 1;
  let narrow = Error::BlockTooNarrow {
    bits: last_bits,
    need: offset,
  };
  if last > 0 && last_bits < offset {
    return Err(narrow);
  }

  let mut tables = vec![Vec::new(); sizes.len()];
  tables[last] = map.to_vec();
  for j in (1..=last).rev() {
    let LevelTable { index, data } = build_level(&tables[j], sizes[j])?;
    tables[j - 1] = index;
    tables[j] = data;
  }
  if last > 0 && tables[last].len() % (1 << offset) != 0 {
    return Err(narrow);
  }

  let mut levels = Vec::with_capacity(sizes.len());
  let mut shift = sum;
  for k in 0..=last {
    shift -= sizes[k];
    levels.push(if k == last {
      Level::last()
    } else if k + 1 == last {
      Level::index(tables[last].len() >> offset, sizes[last] - offset, shift)
    } else {
      Level::index(tables[k + 1].len(), sizes[k + 1], shift)
    });
  }

  Ok(Layout {
    sizes: sizes.to_vec(),
    tables,
    levels,
    bits,
  })
}
