//! Search for the cheapest partition of the input bits
//! 搜索输入位的最省空间划分

use log::{debug, trace};

use crate::{Error, INFEASIBLE, MAX_PARTITIONS, Result, ValueBits, bits_total, build_layout};

/// Cheapest partition seen so far
/// 目前为止代价最小的划分
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Best {
  pub cost: usize,
  pub sizes: Option<Vec<u32>>,
}

impl Default for Best {
  fn default() -> Self {
    Self {
      cost: INFEASIBLE,
      sizes: None,
    }
  }
}

impl Best {
  /// Keep `sizes` only if strictly cheaper, so earlier candidates win ties
  /// 仅在严格更省时保留 `sizes`，代价相同时先出现者胜出
  #[must_use]
  pub fn offer(self, sizes: &[u32], cost: usize) -> Self {
    if cost < self.cost {
      Self {
        cost,
        sizes: Some(sizes.to_vec()),
      }
    } else {
      self
    }
  }
}

/// Stored bytes for `sizes`, `INFEASIBLE` when its tables cannot be built
/// `sizes` 对应的存储字节数，无法构建表时为 `INFEASIBLE`
#[must_use]
pub fn cost(map: &[u32], sizes: &[u32], bits: ValueBits) -> usize {
  match build_layout(map, sizes, bits) {
    Ok(layout) => layout.total_bytes(),
    Err(e) => {
      trace!("{sizes:?} infeasible: {e}");
      INFEASIBLE
    }
  }
}

/// Find bit widths, at most `partitions` levels, minimizing stored bytes
/// 寻找最多 `partitions` 层、存储字节数最小的位宽划分
///
/// Larger partition counts are tried first, each in lexicographic order.
/// 先尝试更多层数，每种层数按字典序枚举。
///
/// # Errors
/// `Error::EmptyMap`, `Error::Partitions` for a count outside `1..=26`,
/// `Error::NoPartition` if no candidate can be built
pub fn find_best_sizes(map: &[u32], partitions: usize, bits: ValueBits) -> Result<Vec<u32>> {
  if map.is_empty() {
    return Err(Error::EmptyMap);
  }
  if !(1..=MAX_PARTITIONS).contains(&partitions) {
    return Err(Error::Partitions(partitions));
  }
  let total = bits_total(map.len());
  let mut sizes = Vec::with_capacity(partitions);
  let best = (1..=partitions)
    .rev()
    .fold(Best::default(), |best, n| {
      permute(map, &mut sizes, n, total, bits, best)
    });
  match best.sizes {
    Some(sizes) => {
      debug!("best sizes {sizes:?}: {} bytes", best.cost);
      Ok(sizes)
    }
    None => Err(Error::NoPartition),
  }
}

/// Visit, in lexicographic order, every `n`-digit vector whose digits are
/// nonzero except the last and sum to `left`: the candidates an odometer over
/// `0..=total` would accept, without stepping through the rest
/// 按字典序访问所有 `n` 位、除最后一位外均非零且和为 `left` 的向量，
/// 即 `0..=total` 计数器会接受的候选，但不遍历其余状态
fn permute(
  map: &[u32],
  sizes: &mut Vec<u32>,
  n: usize,
  left: u32,
  bits: ValueBits,
  mut best: Best,
) -> Best {
  if sizes.len() + 1 == n {
    sizes.push(left);
    let c = cost(map, sizes, bits);
    trace!("{sizes:?} -> {c}");
    best = best.offer(sizes, c);
    sizes.pop();
    return best;
  }
  for s in 1..=left {
    sizes.push(s);
    best = permute(map, sizes, n, left - s, bits, best);
    sizes.pop();
  }
  best
}
