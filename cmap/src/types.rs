//! Type definitions for table compression
//! 表压缩类型定义

use crate::{CHAR_BITS, Error, UNIT_BITS};

/// Width of the class ids stored in the final table
/// 最终表中类别 id 的位宽
///
/// Widths below 8 bits are packed several to a 32-bit storage unit.
/// 低于 8 位的宽度会多个打包进一个 32 位存储单元。
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueBits {
  B1 = 1,
  B2 = 2,
  B4 = 4,
  B8 = 8,
  #[default]
  B16 = 16,
}

impl ValueBits {
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    self as u32
  }

  /// log2 of values per storage unit, 0 when unpacked
  /// 每个存储单元容纳值个数的 log2，不打包时为 0
  #[inline]
  #[must_use]
  pub const fn bit_offset(self) -> u32 {
    match self {
      Self::B1 | Self::B2 | Self::B4 => (UNIT_BITS / self.bits()).trailing_zeros(),
      Self::B8 | Self::B16 => 0,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_packed(self) -> bool {
    self.bit_offset() != 0
  }

  /// Bits one value occupies in the serialized table
  /// 单个值在序列化表中占用的位数
  #[inline]
  #[must_use]
  pub const fn slot_bits(self) -> u32 {
    if self.is_packed() {
      self.bits()
    } else {
      CHAR_BITS
    }
  }

  /// Largest storable class id
  /// 可存储的最大类别 id
  #[inline]
  #[must_use]
  pub const fn max(self) -> u32 {
    (1 << self.bits()) - 1
  }
}

impl TryFrom<u32> for ValueBits {
  type Error = Error;

  fn try_from(v: u32) -> Result<Self, Error> {
    Ok(match v {
      1 => Self::B1,
      2 => Self::B2,
      4 => Self::B4,
      8 => Self::B8,
      16 => Self::B16,
      _ => return Err(Error::ValueBits(v)),
    })
  }
}

/// How one level is stored and composed at lookup time
/// 单层的存储方式及查找时的组合方式
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Level {
  /// Bytes per stored entry, 0 for the final table
  /// 每个条目的字节数，最终表为 0
  pub bytes: u32,
  /// Entries already carry the `next_bits` shift
  /// 条目已包含 `next_bits` 位移
  pub preshifted: bool,
  /// Mask applied to a fetched entry, 0 for none
  /// 取出条目后应用的掩码，0 表示不应用
  pub zero_extend: u32,
  /// Right shift of the input selecting this level's bits
  /// 选取本层位段时输入的右移量
  pub shift: u32,
  /// Left shift turning a block ordinal into an offset of the next level
  /// 将块序号转为下一层偏移的左移量
  pub next_bits: u32,
}

impl Level {
  /// Metadata of an index level whose next level stores `len` entries
  /// 下一层存储 `len` 个条目时索引层的元数据
  #[must_use]
  pub fn index(len: usize, next_bits: u32, shift: u32) -> Self {
    let shrunk = len.checked_shr(next_bits).unwrap_or(0);
    let fits_smaller =
      (len > 0x100 && shrunk <= 0x100) || (len > 0x1_0000 && shrunk <= 0x1_0000);
    let (len, preshifted) = if fits_smaller {
      (shrunk, false)
    } else {
      (len, true)
    };
    let zero_extend = if (0x8000..=0xFFFF).contains(&len) {
      0xFFFF
    } else {
      0
    };
    let bytes = if len <= 0x100 {
      1
    } else if len <= 0x1_0000 {
      2
    } else {
      4
    };
    Self {
      bytes,
      preshifted,
      zero_extend,
      shift,
      next_bits,
    }
  }

  /// The final level holds class ids themselves
  /// 最终层直接存放类别 id
  #[must_use]
  pub const fn last() -> Self {
    Self {
      bytes: 0,
      preshifted: true,
      zero_extend: 0,
      shift: 0,
      next_bits: 0,
    }
  }
}

/// Bits needed to address `len` values: ceil(log2(len))
/// 寻址 `len` 个值所需位数：ceil(log2(len))
#[inline]
#[must_use]
pub const fn bits_total(len: usize) -> u32 {
  if len <= 1 {
    0
  } else {
    usize::BITS - (len - 1).leading_zeros()
  }
}
