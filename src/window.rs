//! The 32 KiB sliding history window.
//!
//! Implements spec.md's "Sliding window" and "Window arithmetic" design
//! notes: `whave` grows monotonically until the window saturates, after
//! which writes wrap at `write`; the "distance too far back" check always
//! uses `whave + (out - left)`, never the raw `wsize`.

pub struct Window {
    buf: Vec<u8>,
    wsize: usize,
    pub whave: usize,
    pub write: usize,
}

impl Window {
    pub fn new(wsize: usize) -> Self {
        Self { buf: vec![0u8; wsize], wsize, whave: 0, write: 0 }
    }

    /// Reinitializes for a fresh stream, reusing the allocation if the
    /// window size hasn't changed.
    pub fn reset(&mut self, wsize: usize) {
        if self.buf.len() != wsize {
            self.buf = vec![0u8; wsize];
            self.wsize = wsize;
        }
        self.whave = 0;
        self.write = 0;
    }

    pub fn wsize(&self) -> usize {
        self.wsize
    }

    /// Folds `recent` (the bytes emitted since the previous call to
    /// `update`) into the window, as `zlib_updatewindow` does.
    pub fn update(&mut self, recent: &[u8]) {
        let copy = recent.len();
        if copy >= self.wsize {
            let tail = &recent[copy - self.wsize..];
            self.buf.copy_from_slice(tail);
            self.write = 0;
            self.whave = self.wsize;
            return;
        }

        let mut dist = self.wsize - self.write;
        if dist > copy {
            dist = copy;
        }
        self.buf[self.write..self.write + dist].copy_from_slice(&recent[..dist]);

        let remaining = copy - dist;
        if remaining > 0 {
            self.buf[..remaining].copy_from_slice(&recent[dist..]);
            self.write = remaining;
            self.whave = self.wsize;
        } else {
            self.write += dist;
            if self.write == self.wsize {
                self.write = 0;
            }
            if self.whave < self.wsize {
                self.whave += dist;
            }
        }
    }

    /// Byte `offset` positions before the write cursor, for a MATCH copy
    /// whose source lies entirely in history (not in this call's output).
    #[inline(always)]
    pub fn byte_at_distance(&self, offset: usize) -> u8 {
        let idx = if offset > self.write {
            self.wsize - (offset - self.write)
        } else {
            self.write - offset
        };
        self.buf[idx]
    }
}
