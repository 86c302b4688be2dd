#![allow(dead_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use enough::StopReason;
use imglib::{Color, Image, Stop};

/// A path under the system temp directory, removed on drop.
pub struct TempPath(PathBuf);

impl TempPath {
    pub fn new(name: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let file = format!("imglib-{}-{n}-{name}", std::process::id());
        Self(std::env::temp_dir().join(file))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

pub fn checkerboard(w: usize, h: usize) -> Image {
    let mut image = Image::new(w, h, Image::BLACK);
    for y in 0..h {
        for (x, px) in image.row_mut(y).iter_mut().enumerate() {
            *px = if (x + y) % 2 == 0 {
                Color::new(200, 220, 240, 255)
            } else {
                Color::new(10, 40, 70, 255)
            };
        }
    }
    image
}

pub fn noise_pattern(w: usize, h: usize) -> Image {
    let mut image = Image::new(w, h, Image::BLACK);
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    for px in image.pixels_mut() {
        *px = Color::new(next(), next(), next(), next());
    }
    image
}

/// `image` with every alpha forced to 255, as any decoder returns it.
pub fn opaque(image: &Image) -> Image {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        px.a = 255;
    }
    out
}

/// A [`Stop`] that lets the first `n` checks pass and cancels every one
/// after that.
pub struct CancelAfter {
    remaining: AtomicUsize,
}

impl CancelAfter {
    pub fn new(n: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(n),
        }
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StopReason::Cancelled)
    }
}

/// A sink that accepts `limit` bytes, then fails every write.
pub struct FailingWriter {
    pub written: Vec<u8>,
    limit: usize,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            limit,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.written.len();
        if room == 0 {
            return Err(io::Error::other("device full"));
        }
        let n = buf.len().min(room);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
