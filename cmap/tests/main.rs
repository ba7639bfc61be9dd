//! Compression round trips
//! 压缩往返测试

use aok::{OK, Void};
use cmap::{Conf, Error, FINAL_TABLE, ValueBits, compress};
use log::trace;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

/// Class ids shaped like a scanner's: digits, letters, spaces, rest
/// 类似扫描器的类别 id：数字、字母、空白、其他
fn classes(len: usize) -> Vec<u16> {
  (0..len as u32)
    .map(|c| match char::from_u32(c) {
      Some(ch) if ch.is_ascii_digit() => 1,
      Some(ch) if ch.is_alphabetic() => 2,
      Some(ch) if ch.is_whitespace() => 3,
      _ => 0,
    })
    .collect()
}

fn random(rng: &mut fastrand::Rng, len: usize, max: u16) -> Vec<u16> {
  let mut map = Vec::with_capacity(len);
  while map.len() < len {
    let v = rng.u16(0..=max);
    let n = rng.usize(1..64).min(len - map.len());
    map.extend(std::iter::repeat_n(v, n));
  }
  map
}

fn roundtrip(map: &[u16], conf: &Conf) -> Void {
  let cmap = compress(map, conf)?;
  let rt = cmap.runtime()?;
  for (c, &id) in map.iter().enumerate() {
    assert_eq!(
      rt.get(c as u32),
      Some(u32::from(id)),
      "c={c} sizes={:?} access={}",
      cmap.sizes,
      cmap.access
    );
  }
  trace!("{} values -> {:?} {}", map.len(), cmap.sizes, cmap.access);
  OK
}

/// Four repeats each of ids 0..4
/// 类别 id 0..4 各重复四次
#[test]
fn test_scenario() -> Void {
  let map: Vec<u16> = (0..4u16).flat_map(|id| [id; 4]).collect();
  let conf = Conf {
    partitions: 2,
    ..Conf::default()
  };
  let cmap = compress(&map, &conf)?;
  assert_eq!(cmap.sizes, [3, 1]);
  assert_eq!(cmap.cost, 32);
  assert_eq!(cmap.access.to_string(), "ZZ_CMAP_A[ZZ_CMAP_Z[ch>>1]|(ch&0x1)]");

  let names: Vec<&str> = cmap.tables.iter().map(|t| t.name.as_str()).collect();
  assert_eq!(names, ["ZZ_CMAP_Z", FINAL_TABLE]);
  assert_eq!(cmap.tables[0].len, 8);
  assert_eq!(cmap.tables[1].len, 8);

  roundtrip(&map, &conf)?;
  OK
}

/// A map of one value has no bits to split
/// 只有一个值的映射没有可划分的位
#[test]
fn test_single() -> Void {
  let cmap = compress(&[7], &Conf::default())?;
  assert_eq!(cmap.sizes, [0]);
  assert_eq!(cmap.tables.len(), 1);
  assert_eq!(cmap.access.to_string(), "ZZ_CMAP_A[ch]");
  assert_eq!(cmap.runtime()?.get(0), Some(7));
  OK
}

#[test]
fn test_empty() -> Void {
  assert_eq!(compress(&[], &Conf::default()), Err(Error::EmptyMap));
  OK
}

#[test]
fn test_random() -> Void {
  let mut rng = fastrand::Rng::with_seed(42);
  for len in [2, 3, 5, 16, 100, 256, 1000, 4096] {
    for partitions in 1..=4 {
      let map = random(&mut rng, len, 40);
      let conf = Conf {
        partitions,
        ..Conf::default()
      };
      roundtrip(&map, &conf)?;
    }
  }
  OK
}

/// Ids above 255 and a custom final table and variable
/// 大于 255 的 id 以及自定义最终表名和变量名
#[test]
fn test_wide_ids() -> Void {
  let mut rng = fastrand::Rng::with_seed(3);
  let map = random(&mut rng, 2048, u16::MAX);
  let conf = Conf {
    table: "CMAP".into(),
    var: "c".into(),
    ..Conf::default()
  };
  let cmap = compress(&map, &conf)?;
  assert_eq!(cmap.tables.last().map(|t| t.name.as_str()), Some("CMAP"));
  assert!(cmap.access.to_string().starts_with("CMAP["));
  roundtrip(&map, &conf)?;
  OK
}

#[test]
fn test_bmp() -> Void {
  let map = classes(0x10000);
  let cmap = compress(&map, &Conf::default())?;
  assert!(cmap.sizes.len() > 1);
  assert!(cmap.cost < map.len() * 2);
  roundtrip(&map, &Conf::default())?;
  OK
}

/// Full code point range, not a power of two
/// 完整码点范围，长度不是 2 的幂
#[test]
fn test_unicode() -> Void {
  let map = classes(0x110000);
  let conf = Conf {
    partitions: 2,
    ..Conf::default()
  };
  let cmap = compress(&map, &conf)?;
  assert_eq!(cmap.sizes.iter().sum::<u32>(), 21);
  roundtrip(&map, &conf)?;
  OK
}

/// Widths below 8 bits pack several ids per storage unit
/// 低于 8 位的宽度在一个存储单元中打包多个 id
#[test]
fn test_packed() -> Void {
  let mut rng = fastrand::Rng::with_seed(11);
  for bits in [ValueBits::B1, ValueBits::B2, ValueBits::B4, ValueBits::B8] {
    for len in [32, 64, 1000, 4096] {
      let map = random(&mut rng, len, bits.max() as u16);
      for partitions in 1..=3 {
        let conf = Conf {
          partitions,
          bits,
          ..Conf::default()
        };
        roundtrip(&map, &conf)?;
      }
    }
  }
  OK
}

/// Maps shorter than a storage unit, or not a whole number of units, fall
/// back to a single padded final table
/// 短于一个存储单元或非整数个单元的映射退化为单个补齐的最终表
#[test]
fn test_packed_short() -> Void {
  for bits in [ValueBits::B1, ValueBits::B2, ValueBits::B4] {
    let conf = Conf {
      bits,
      ..Conf::default()
    };
    let cmap = compress(&[1], &conf)?;
    assert_eq!(cmap.sizes, [0]);
    assert_eq!(cmap.tables.len(), 1);
    assert_eq!(cmap.tables[0].len, 2);
    roundtrip(&[1], &conf)?;

    roundtrip(&[0; 16], &conf)?;
    let alternating: Vec<u16> = (0..1000).map(|i| i % 2).collect();
    roundtrip(&alternating, &conf)?;
  }
  OK
}

/// An id wider than the configured width aborts the job
/// 超出配置宽度的 id 会使任务失败
#[test]
fn test_value_too_wide() -> Void {
  let mut map = vec![0u16; 64];
  map[10] = 20;
  let conf = Conf {
    bits: ValueBits::B4,
    ..Conf::default()
  };
  assert_eq!(
    compress(&map, &conf),
    Err(Error::EntryTooBig {
      table: FINAL_TABLE.into(),
      entry: 20,
      bits: 4,
    })
  );
  OK
}

#[test]
fn test_value_bits() -> Void {
  assert_eq!(ValueBits::try_from(8)?, ValueBits::B8);
  assert_eq!(ValueBits::try_from(16)?, ValueBits::B16);
  for bad in [0, 3, 5, 12, 32] {
    assert_eq!(ValueBits::try_from(bad), Err(Error::ValueBits(bad)));
  }
  assert_eq!(ValueBits::B1.bit_offset(), 5);
  assert_eq!(ValueBits::B2.bit_offset(), 4);
  assert_eq!(ValueBits::B4.bit_offset(), 3);
  assert_eq!(ValueBits::B8.bit_offset(), 0);
  OK
}
