use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::grid::Bounds;
use crate::live_set::LiveSet;

pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
pub const LIVE: [u8; 4] = [255, 255, 255, 255];

/// Render one generation as RGBA8, one pixel per cell. The whole frame is
/// cleared before live cells are painted.
pub fn render_frame(live: &LiveSet, bounds: Bounds) -> Vec<u8> {
    let w = bounds.width();
    let h = bounds.height();
    let mut rgba = vec![0u8; w * h * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND);
        }
        if let Some(cols) = live.row(y) {
            for &x in cols {
                if x < w {
                    row[x * 4..x * 4 + 4].copy_from_slice(&LIVE);
                }
            }
        }
    });

    rgba
}

pub fn encode_png(rgba: &[u8], bounds: Bounds) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        rgba,
        bounds.width() as u32,
        bounds.height() as u32,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Drawing target fed one generation at a time. Implementations must not
/// hold on to or alter the live set they are given.
pub trait Surface {
    /// Paint `live`. Returning `ControlFlow::Break` asks the driver to stop
    /// scheduling further generations.
    fn draw(&mut self, generation: u64, live: &LiveSet, bounds: Bounds) -> Result<ControlFlow<()>>;
}

/// Keeps the most recent frame in memory.
#[derive(Default)]
pub struct RgbaSurface {
    pub rgba: Vec<u8>,
    pub bounds: Option<Bounds>,
    pub frames: u64,
}

impl RgbaSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of (x, y) in the last frame drawn.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let bounds = self.bounds?;
        if !bounds.contains(x, y) {
            return None;
        }
        let i = (y * bounds.width() + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.rgba[i..i + 4]);
        Some(px)
    }
}

impl Surface for RgbaSurface {
    fn draw(&mut self, _generation: u64, live: &LiveSet, bounds: Bounds) -> Result<ControlFlow<()>> {
        self.rgba = render_frame(live, bounds);
        self.bounds = Some(bounds);
        self.frames += 1;
        Ok(ControlFlow::Continue(()))
    }
}

/// Writes each generation to `<dir>/gen_NNNNN.png`.
pub struct PngSequence {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequence {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Surface for PngSequence {
    fn draw(&mut self, generation: u64, live: &LiveSet, bounds: Bounds) -> Result<ControlFlow<()>> {
        let path = self.dir.join(format!("gen_{generation:05}.png"));
        let rgba = render_frame(live, bounds);
        image::save_buffer(
            &path,
            &rgba,
            bounds.width() as u32,
            bounds.height() as u32,
            image::ColorType::Rgba8,
        )?;
        debug!(path = %path.display(), population = live.population(), "saved frame");
        self.written.push(path);
        Ok(ControlFlow::Continue(()))
    }
}
