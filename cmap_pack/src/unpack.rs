//! Decoder for rendered literals / 渲染字面量的解码器

use std::{iter::Peekable, str::CharIndices};

use crate::{Error, Result};

/// Read a rendered literal back into its characters
/// 将渲染后的字面量读回字符序列
///
/// Accepts one or more quoted chunks joined by `+` and whitespace.
/// 接受由 `+` 与空白连接的一个或多个带引号片段。
pub fn parse(src: &str) -> Result<Vec<u16>> {
  let mut out = Vec::with_capacity(src.len() / 3);
  let mut it = src.char_indices().peekable();
  while let Some((pos, c)) = it.next() {
    match c {
      '"' => quoted(&mut it, &mut out)?,
      '+' => {}
      c if c.is_whitespace() => {}
      _ => return Err(Error::Quote { pos }),
    }
  }
  Ok(out)
}

fn quoted(it: &mut Peekable<CharIndices<'_>>, out: &mut Vec<u16>) -> Result<()> {
  while let Some((pos, c)) = it.next() {
    match c {
      '"' => return Ok(()),
      '\\' => out.push(escaped(it, pos)?),
      c => {
        let mut buf = [0u16; 2];
        let [unit] = c.encode_utf16(&mut buf) else {
          return Err(Error::Escape { pos });
        };
        out.push(*unit);
      }
    }
  }
  Err(Error::Unterminated)
}

fn escaped(it: &mut Peekable<CharIndices<'_>>, pos: usize) -> Result<u16> {
  match it.peek().map(|&(_, c)| c) {
    Some('u') => {
      it.next();
      let mut v = 0u16;
      for _ in 0..4 {
        let d = it
          .next()
          .and_then(|(_, c)| c.to_digit(16))
          .ok_or(Error::Escape { pos })?;
        v = (v << 4) | d as u16;
      }
      Ok(v)
    }
    Some('0'..='7') => {
      let mut v = 0u16;
      for _ in 0..3 {
        // octal escapes stop before exceeding \377
        match it.peek().and_then(|&(_, c)| c.to_digit(8)) {
          Some(d) if (v << 3) | d as u16 <= 0xFF => {
            v = (v << 3) | d as u16;
            it.next();
          }
          _ => break,
        }
      }
      Ok(v)
    }
    _ => Err(Error::Escape { pos }),
  }
}

/// Expand `(count, value)` pairs into exactly `len` values
/// 将 `(次数, 值)` 对展开为恰好 `len` 个值
pub fn unpack(src: &str, len: usize) -> Result<Vec<u16>> {
  let packed = parse(src)?;
  if packed.len() % 2 != 0 {
    return Err(Error::Pair);
  }
  let mut out = Vec::with_capacity(len);
  for (pos, pair) in packed.chunks_exact(2).enumerate() {
    let (count, value) = (pair[0] as usize, pair[1]);
    if count == 0 {
      return Err(Error::ZeroRun { pos });
    }
    if out.len() + count > len {
      return Err(Error::Overflow { len });
    }
    out.resize(out.len() + count, value);
  }
  if out.len() != len {
    return Err(Error::Short {
      got: out.len(),
      len,
    });
  }
  Ok(out)
}
