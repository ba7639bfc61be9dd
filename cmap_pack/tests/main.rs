use aok::{OK, Void};
use cmap_pack::{Error, INDENT, LINE_WIDTH, Packer, pack, parse, unpack};
use log::trace;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

fn roundtrip(values: &[u16]) -> Void {
  let src = pack(values.iter().copied()).to_string();
  let back = unpack(&src, values.len())?;
  assert_eq!(back, values);
  OK
}

/// Escapes: octal up to 255, 4 hex digits above
/// 转义：255 以内用八进制，以上用 4 位十六进制
#[test]
fn test_escape() -> Void {
  let packed = pack([0u16, 8, 255, 256, 0x0abc, 0xffff]);
  assert_eq!(
    packed.to_string(),
    "    \"\\1\\0\\1\\10\\1\\377\\1\\u0100\\1\\u0abc\\1\\uffff\""
  );
  OK
}

/// Equal neighbours share one pair
/// 相邻相同值共享一个对
#[test]
fn test_runs() -> Void {
  let packed = pack([5u16, 5, 5, 5, 1, 1, 5]);
  assert_eq!(parse(&packed.to_string())?, [4, 5, 2, 1, 1, 5]);
  OK
}

#[test]
fn test_empty() -> Void {
  let packed = Packer::new().finish();
  assert!(packed.is_empty());
  assert_eq!(packed.to_string(), "    \"\"");
  assert_eq!(unpack(&packed.to_string(), 0)?, Vec::<u16>::new());
  OK
}

/// A run longer than 65535 splits into several pairs
/// 超过 65535 的游程拆分为多个对
#[test]
fn test_long_run() -> Void {
  let values = vec![9u16; 70_000];
  let src = pack(values.iter().copied()).to_string();
  assert_eq!(parse(&src)?, [0xffff, 9, (70_000u32 - 0xffff) as u16, 9]);
  roundtrip(&values)?;

  let exact = vec![0x1234u16; 0xffff];
  assert_eq!(parse(&pack(exact.iter().copied()).to_string())?, [0xffff, 0x1234]);
  OK
}

/// Chunks stay within the line width and never split an escape
/// 片段不超过行宽且不会拆开转义序列
#[test]
fn test_chunks() -> Void {
  let values: Vec<u16> = (0..400u16).map(|i| i * 163).collect();
  let packed = pack(values.iter().copied());
  assert!(packed.chunks().len() > 1);
  for chunk in packed.chunks() {
    assert!(chunk.starts_with('\\'));
    assert!(INDENT.len() + chunk.len() <= LINE_WIDTH + 6);
  }
  for chunk in &packed.chunks()[..packed.chunks().len() - 1] {
    assert!(INDENT.len() + chunk.len() >= LINE_WIDTH);
  }
  let src = packed.to_string();
  for line in src.lines() {
    assert!(line.starts_with(INDENT));
  }
  trace!("{src}");
  roundtrip(&values)?;
  OK
}

/// Sequences ending on both sides of the first chunk boundary
/// 在第一个片段边界两侧结束的序列
#[test]
fn test_chunk_boundary() -> Void {
  for n in 1..60u16 {
    let values: Vec<u16> = (0..n).map(|i| if i % 2 == 0 { 0x100 + i } else { i }).collect();
    roundtrip(&values)?;
  }
  OK
}

#[test]
fn test_random() -> Void {
  let mut rng = fastrand::Rng::with_seed(7);
  for _ in 0..50 {
    let len = rng.usize(0..2000);
    let mut values = Vec::with_capacity(len);
    while values.len() < len {
      let v = if rng.bool() { rng.u16(..) } else { rng.u16(0..4) };
      let n = rng.usize(1..20).min(len - values.len());
      values.extend(std::iter::repeat_n(v, n));
    }
    roundtrip(&values)?;
  }
  OK
}

#[test]
fn test_decode_errors() -> Void {
  assert_eq!(unpack("\"\\1\"", 1), Err(Error::Pair));
  assert_eq!(unpack("\"\\0\\5\"", 1), Err(Error::ZeroRun { pos: 0 }));
  assert_eq!(unpack("\"\\3\\5\"", 2), Err(Error::Overflow { len: 2 }));
  assert_eq!(unpack("\"\\1\\5\"", 2), Err(Error::Short { got: 1, len: 2 }));
  assert_eq!(parse("\"\\q\""), Err(Error::Escape { pos: 1 }));
  assert_eq!(parse("\"\\u12\""), Err(Error::Escape { pos: 1 }));
  assert_eq!(parse("x"), Err(Error::Quote { pos: 0 }));
  assert_eq!(parse("\"\\1"), Err(Error::Unterminated));
  OK
}

/// Octal escapes stop before exceeding 255, like a Java or C literal
/// 八进制转义在超过 255 前停止，与 Java 或 C 字面量一致
#[test]
fn test_octal_width() -> Void {
  assert_eq!(parse("\"\\477\"")?, [0o47, u16::from(b'7')]);
  assert_eq!(parse("\"\\0a\"")?, [0, u16::from(b'a')]);
  OK
}
