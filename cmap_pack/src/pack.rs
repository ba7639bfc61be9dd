//! Run-length encoder / 游程编码器

use std::fmt;

use crate::{INDENT, JOIN, LINE_WIDTH, MAX_RUN};

/// Packed literal: escape-encoded chunks, quotes not included
/// 打包后的字面量：转义编码的片段，不含引号
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Packed {
  chunks: Vec<String>,
}

impl Packed {
  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[String] {
    &self.chunks
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }
}

impl fmt::Display for Packed {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.chunks.is_empty() {
      return write!(f, "{INDENT}\"");
    }
    for (i, chunk) in self.chunks.iter().enumerate() {
      if i > 0 {
        f.write_str(JOIN)?;
      }
      write!(f, "{INDENT}{chunk}\"")?;
    }
    Ok(())
  }
}

/// Streaming `(count, value)` encoder
/// 流式 `(次数, 值)` 编码器
#[derive(Debug, Default)]
pub struct Packer {
  chunks: Vec<String>,
  // (value, count)
  run: Option<(u16, u32)>,
}

impl Packer {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append one value, extending the open run when it repeats
  /// 追加一个值，重复时延长当前游程
  pub fn push(&mut self, v: u16) {
    if let Some((cur, n)) = self.run.as_mut()
      && *cur == v
      && *n < MAX_RUN
    {
      *n += 1;
      return;
    }
    self.flush();
    self.run = Some((v, 1));
  }

  /// Flush the open run and close the literal
  /// 刷出当前游程并结束字面量
  #[must_use]
  pub fn finish(mut self) -> Packed {
    self.flush();
    Packed {
      chunks: self.chunks,
    }
  }

  fn flush(&mut self) {
    if let Some((v, n)) = self.run.take() {
      self.write(n as u16);
      self.write(v);
    }
  }

  fn write(&mut self, c: u16) {
    let full = self
      .chunks
      .last()
      .is_none_or(|s| INDENT.len() + s.len() >= LINE_WIDTH);
    if full {
      self.chunks.push(String::with_capacity(LINE_WIDTH));
    }
    if let Some(s) = self.chunks.last_mut() {
      escape(s, c);
    }
  }
}

/// Pack a whole sequence
/// 打包整个序列
pub fn pack(values: impl IntoIterator<Item = u16>) -> Packed {
  let mut packer = Packer::new();
  for v in values {
    packer.push(v);
  }
  packer.finish()
}

fn escape(out: &mut String, c: u16) {
  out.push_str(&if c > 0xFF {
    format!("\\u{c:04x}")
  } else {
    format!("\\{c:o}")
  });
}
