use std::path::PathBuf;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is included to make this explicit
/// at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied RGBA8 value at pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Settings shared by every rasterizer a session creates.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` fonts on top of the system fonts.
    pub fonts_dir: Option<PathBuf>,
    /// Skip the system font scan (tests and hermetic builds).
    pub skip_system_fonts: bool,
}
