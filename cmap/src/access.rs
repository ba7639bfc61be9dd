//! Access formula: recompute a class id through nested table lookups
//! 访问公式：通过嵌套查表重新计算类别 id

use std::fmt;

use crate::{Error, Level, MAX_PARTITIONS, Result, TABLE_PREFIX, ValueBits};

/// Target-neutral expression tree
/// 与目标语言无关的表达式树
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
  /// The input value
  Var(String),
  /// Decimal constant (shift amounts)
  Num(u32),
  /// Hex constant (masks)
  Mask(u32),
  Shr(Box<Expr>, Box<Expr>),
  Shl(Box<Expr>, Box<Expr>),
  And(Box<Expr>, Box<Expr>),
  Or(Box<Expr>, Box<Expr>),
  /// `table[index]`
  Index(String, Box<Expr>),
}

impl Expr {
  #[must_use]
  pub fn shr(self, rhs: Self) -> Self {
    Self::Shr(Box::new(self), Box::new(rhs))
  }

  #[must_use]
  pub fn shl(self, rhs: Self) -> Self {
    Self::Shl(Box::new(self), Box::new(rhs))
  }

  #[must_use]
  pub fn and(self, rhs: Self) -> Self {
    Self::And(Box::new(self), Box::new(rhs))
  }

  #[must_use]
  pub fn or(self, rhs: Self) -> Self {
    Self::Or(Box::new(self), Box::new(rhs))
  }

  /// Evaluate for input `var`, reading tables through `fetch`
  /// 以输入 `var` 求值，通过 `fetch` 读取表
  ///
  /// Returns `None` when `fetch` has no such entry or a shift overflows.
  /// 当 `fetch` 找不到条目或位移溢出时返回 `None`。
  pub fn eval<F>(&self, var: u32, fetch: &F) -> Option<u32>
  where
    F: Fn(&str, usize) -> Option<u32>,
  {
    Some(match self {
      Self::Var(_) => var,
      Self::Num(n) | Self::Mask(n) => *n,
      Self::Shr(a, b) => a.eval(var, fetch)?.checked_shr(b.eval(var, fetch)?)?,
      Self::Shl(a, b) => a.eval(var, fetch)?.checked_shl(b.eval(var, fetch)?)?,
      Self::And(a, b) => a.eval(var, fetch)? & b.eval(var, fetch)?,
      Self::Or(a, b) => a.eval(var, fetch)? | b.eval(var, fetch)?,
      Self::Index(table, at) => fetch(table, at.eval(var, fetch)? as usize)?,
    })
  }

  // Binary operators without their outer parentheses
  fn bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Shr(a, b) => write!(f, "{a}>>{b}"),
      Self::Shl(a, b) => write!(f, "{a}<<{b}"),
      Self::And(a, b) => write!(f, "{a}&{b}"),
      Self::Or(a, b) => write!(f, "{a}|{b}"),
      _ => write!(f, "{self}"),
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Var(name) => f.write_str(name),
      Self::Num(n) => write!(f, "{n}"),
      Self::Mask(m) => write!(f, "0x{m:x}"),
      Self::Index(table, at) => {
        write!(f, "{table}[")?;
        at.bare(f)?;
        f.write_str("]")
      }
      _ => {
        f.write_str("(")?;
        self.bare(f)?;
        f.write_str(")")
      }
    }
  }
}

/// Name of index table `k`: `ZZ_CMAP_Z`, `ZZ_CMAP_Y`, ...
/// 第 `k` 个索引表的名称：`ZZ_CMAP_Z`、`ZZ_CMAP_Y`……
///
/// `k` must be below `MAX_PARTITIONS`.
#[must_use]
pub fn table_name(k: usize) -> String {
  format!("{TABLE_PREFIX}{}", char::from(b'Z' - k as u8))
}

#[inline]
fn mask(width: u32) -> u32 {
  1u32.checked_shl(width).map_or(u32::MAX, |v| v - 1)
}

/// Build the lookup formula for a partition
/// 为一个划分构建查找公式
///
/// `table` names the final table, `var` the input value.
/// `table` 为最终表名，`var` 为输入值。
///
/// # Errors
/// `Error::Levels` if `sizes` and `levels` are empty or differ in length,
/// `Error::Partitions` beyond the 26 nameable levels
pub fn gen_access(
  table: &str,
  var: &str,
  bits: ValueBits,
  sizes: &[u32],
  levels: &[Level],
) -> Result<Expr> {
  if sizes.is_empty() || sizes.len() != levels.len() {
    return Err(Error::Levels {
      sizes: sizes.len(),
      levels: levels.len(),
    });
  }
  if sizes.len() > MAX_PARTITIONS {
    return Err(Error::Partitions(sizes.len()));
  }
  let input = || Expr::Var(var.to_owned());
  let last = sizes.len() - 1;
  let offset = bits.bit_offset();

  let mut access: Option<Expr> = None;
  for (k, (&size, level)) in sizes.iter().zip(levels).enumerate() {
    let off = if k == last { offset } else { 0 };
    let shift = level.shift + off;
    let shifted = if shift == 0 {
      input()
    } else {
      input().shr(Expr::Num(shift))
    };
    let width = size.saturating_sub(off);
    let index = match access.take() {
      None => shifted,
      Some(prev) if width == 0 => prev,
      Some(prev) => prev.or(shifted.and(Expr::Mask(mask(width)))),
    };

    let name = if k == last {
      table.to_owned()
    } else {
      table_name(k)
    };
    let mut fetched = Expr::Index(name, Box::new(index));
    if level.zero_extend != 0 {
      fetched = fetched.and(Expr::Mask(level.zero_extend));
    }
    if !level.preshifted && level.next_bits != 0 {
      fetched = fetched.shl(Expr::Num(level.next_bits));
    }
    if k == last && offset != 0 {
      // bit position of the value inside its storage unit
      let mut bit = input().and(Expr::Mask(mask(offset)));
      let scale = bits.bits().trailing_zeros();
      if scale != 0 {
        bit = bit.shl(Expr::Num(scale));
      }
      fetched = fetched.shr(bit).and(Expr::Mask(bits.max()));
    }
    access = Some(fetched);
  }
  access.ok_or(Error::Levels {
    sizes: sizes.len(),
    levels: levels.len(),
  })
}
