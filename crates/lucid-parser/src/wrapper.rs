//! Standalone translation-unit wrapping.
//!
//! Decompiler output uses typedef names (`undefined4`, `uint`, `code`) that
//! no header defines. The wrapper prepends stub typedefs so the function can
//! stand on its own as a translation unit. The printer drops them again.

/// Stub typedefs for the type names radare2, Ghidra and IDA emit.
///
/// The fixed-width and `size_t` family are grammar builtins and must not be
/// redeclared here.
pub const PRELUDE: &str = "\
typedef unsigned char undefined;
typedef unsigned char undefined1;
typedef unsigned short undefined2;
typedef unsigned int undefined3;
typedef unsigned int undefined4;
typedef unsigned long long undefined5;
typedef unsigned long long undefined6;
typedef unsigned long long undefined7;
typedef unsigned long long undefined8;
typedef unsigned char byte;
typedef unsigned char uchar;
typedef unsigned short ushort;
typedef unsigned short word;
typedef unsigned int uint;
typedef unsigned int dword;
typedef unsigned long ulong;
typedef unsigned long long ulonglong;
typedef long long longlong;
typedef unsigned long long qword;
typedef void code;
";

/// A function body embedded after the stub prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSource {
    text: String,
    body_offset: usize,
    body_line: usize,
}

impl WrappedSource {
    /// Wrap sanitized source text.
    #[must_use]
    pub fn new(body: &str) -> Self {
        let mut text = String::with_capacity(PRELUDE.len() + body.len() + 1);
        text.push_str(PRELUDE);
        text.push('\n');
        let body_offset = text.len();
        text.push_str(body);
        Self {
            body_line: text[..body_offset].matches('\n').count(),
            text,
            body_offset,
        }
    }

    /// The complete translation unit.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The wrapped body, as passed to [`WrappedSource::new`].
    #[must_use]
    pub fn body(&self) -> &str {
        &self.text[self.body_offset..]
    }

    /// Byte offset of the body inside [`text`](Self::text).
    #[must_use]
    pub const fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Map a byte offset in the wrapped text to a 1-based `(line, column)` in
    /// the body. Offsets inside the prelude clamp to `(1, 1)`.
    #[must_use]
    pub fn body_position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.clamp(self.body_offset, self.text.len());
        let before = &self.text[..offset];
        let line = before.matches('\n').count() - self.body_line + 1;
        let line_start = before.rfind('\n').map_or(0, |n| n + 1).max(self.body_offset);
        (line, offset - line_start + 1)
    }
}
