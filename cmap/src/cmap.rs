//! One compression job: search, build, serialize
//! 一次压缩任务：搜索、构建、序列化

use std::collections::HashMap;

use cmap_pack::unpack;
use log::debug;

use crate::{
  CHAR_BITS, Conf, Expr, Level, Result, Table, ValueBits, build_layout, find_best_sizes, gen_access,
  gen_tables,
};

/// Compressed character map, ready for the code generator
/// 压缩后的字符映射，可交给代码生成器
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CMap {
  pub sizes: Vec<u32>,
  pub levels: Vec<Level>,
  pub bits: ValueBits,
  /// Index tables from coarsest, then the final table
  /// 由粗到细的索引表，最后为最终表
  pub tables: Vec<Table>,
  pub access: Expr,
  /// Stored bytes of the chosen partition
  /// 所选划分的存储字节数
  pub cost: usize,
}

/// Compress `map` into packed tables and an access formula
/// 将 `map` 压缩为打包表与访问公式
///
/// # Errors
/// Any search, build or serialization error; no partial output is returned
pub fn compress(map: &[u16], conf: &Conf) -> Result<CMap> {
  let map: Vec<u32> = map.iter().map(|&v| u32::from(v)).collect();
  let sizes = find_best_sizes(&map, conf.partitions, conf.bits)?;
  let layout = build_layout(&map, &sizes, conf.bits)?;
  let access = gen_access(&conf.table, &conf.var, conf.bits, &sizes, &layout.levels)?;
  let tables = gen_tables(&layout, &conf.table)?;
  let cost = layout.total_bytes();
  debug!("{} values -> {sizes:?}, {cost} bytes: {access}", map.len());
  Ok(CMap {
    sizes,
    levels: layout.levels,
    bits: conf.bits,
    tables,
    access,
    cost,
  })
}

impl CMap {
  /// Decode every table, as the generated scanner does on start-up
  /// 解码所有表，与生成的扫描器启动时的行为一致
  ///
  /// # Errors
  /// `Error::Pack` if a literal does not decode to its declared length
  pub fn runtime(&self) -> Result<Runtime> {
    let last = self.tables.len().saturating_sub(1);
    let mut tables = HashMap::with_capacity(self.tables.len());
    for (k, table) in self.tables.iter().enumerate() {
      let chars = unpack(&table.packed.to_string(), table.len)?;
      let wide = if k == last {
        self.bits.is_packed()
      } else {
        self.levels[k].bytes == 4
      };
      let entries: Vec<u32> = if wide {
        chars
          .chunks_exact(2)
          .map(|p| u32::from(p[0]) | u32::from(p[1]) << CHAR_BITS)
          .collect()
      } else {
        chars.into_iter().map(u32::from).collect()
      };
      tables.insert(table.name.clone(), entries);
    }
    Ok(Runtime {
      tables,
      access: self.access.clone(),
    })
  }
}

/// Decoded tables plus the access formula
/// 解码后的表与访问公式
#[derive(Clone, Debug)]
pub struct Runtime {
  tables: HashMap<String, Vec<u32>>,
  access: Expr,
}

impl Runtime {
  /// Class id of input value `c`, `None` outside the tables
  /// 输入值 `c` 的类别 id，超出表范围时为 `None`
  #[must_use]
  pub fn get(&self, c: u32) -> Option<u32> {
    self
      .access
      .eval(c, &|name: &str, i: usize| self.tables.get(name)?.get(i).copied())
  }

  #[must_use]
  pub fn table(&self, name: &str) -> Option<&[u32]> {
    self.tables.get(name).map(Vec::as_slice)
  }
}
