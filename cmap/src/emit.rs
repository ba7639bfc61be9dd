//! Serialize every level as a packed literal
//! 将每一层序列化为打包字面量

use std::fmt;

use cmap_pack::{Packed, Packer};

use crate::{
  CHAR_BITS, Error, Layout, Level, MAX_PARTITIONS, Result, UNIT_BITS, ValueBits, table_name,
};

/// One emitted table
/// 一个输出表
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
  pub name: String,
  /// Characters the literal decodes to
  /// 字面量解码后的字符数
  pub len: usize,
  pub packed: Packed,
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "  /* The {} table has {} entries */", self.name, self.len)?;
    write!(f, "{}", self.packed)
  }
}

/// Serialize all levels of `layout`, the final table named `table`
/// 序列化 `layout` 的所有层，最终表命名为 `table`
///
/// # Errors
/// `Error::EntryTooBig` if an entry exceeds the width its level was given,
/// `Error::Partitions` beyond the 26 nameable levels
pub fn gen_tables(layout: &Layout, table: &str) -> Result<Vec<Table>> {
  if layout.tables.len() > MAX_PARTITIONS {
    return Err(Error::Partitions(layout.tables.len()));
  }
  let Some((last, index)) = layout.tables.split_last() else {
    return Ok(Vec::new());
  };
  let mut out = Vec::with_capacity(layout.tables.len());
  for (k, (entries, level)) in index.iter().zip(&layout.levels).enumerate() {
    out.push(index_table(table_name(k), entries, level)?);
  }
  out.push(final_table(table.to_owned(), last, layout.bits)?);
  Ok(out)
}

fn index_table(name: String, entries: &[u32], level: &Level) -> Result<Table> {
  let shift = if level.preshifted { level.next_bits } else { 0 };
  let bits = level.bytes * 8;
  let wide = bits > CHAR_BITS;
  let mut packer = Packer::new();
  for &e in entries {
    let entry = u64::from(e) << shift;
    if entry >> bits != 0 {
      return Err(Error::EntryTooBig {
        table: name,
        entry,
        bits,
      });
    }
    packer.push(entry as u16);
    if wide {
      packer.push((entry >> CHAR_BITS) as u16);
    }
  }
  Ok(Table {
    name,
    len: entries.len() << usize::from(wide),
    packed: packer.finish(),
  })
}

fn final_table(name: String, values: &[u32], bits: ValueBits) -> Result<Table> {
  if let Some(&v) = values.iter().find(|&&v| v > bits.max()) {
    return Err(Error::EntryTooBig {
      table: name,
      entry: v.into(),
      bits: bits.bits(),
    });
  }
  let mut packer = Packer::new();
  let len = if bits.is_packed() {
    let per = (UNIT_BITS / bits.bits()) as usize;
    for unit in values.chunks(per) {
      let word = unit
        .iter()
        .enumerate()
        .fold(0u32, |w, (i, &v)| w | v << (i as u32 * bits.bits()));
      packer.push(word as u16);
      packer.push((word >> CHAR_BITS) as u16);
    }
    values.len().div_ceil(per) * 2
  } else {
    for &v in values {
      packer.push(v as u16);
    }
    values.len()
  };
  Ok(Table {
    name,
    len,
    packed: packer.finish(),
  })
}
