/*
 * Bounded Formatting
 *
 * Every string this crate renders goes through a fixed-capacity buffer;
 * there is no heap. Formatting that overflows the capacity is silently
 * truncated rather than reported - a cut-off status line beats a failed
 * one during an installation.
 */

use core::fmt;

use heapless::String;

/// A `fmt::Write` sink over a fixed-capacity string that drops whatever
/// does not fit instead of failing.
pub struct TruncateWriter<const N: usize> {
    inner: String<N>,
}

impl<const N: usize> TruncateWriter<N> {
    pub const fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl<const N: usize> Default for TruncateWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for TruncateWriter<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.inner.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}
