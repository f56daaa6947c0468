//! Raster export backend.
//!
//! The figure's SVG document is parsed with usvg, rendered by resvg into an
//! RGBA pixmap and encoded with the `image` crate. Text is shaped against the
//! system fonts.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::{
    RgbImage, RgbaImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};
use log::{debug, info};
use resvg::{tiny_skia, usvg};

use crate::{
    export::{self, Exporter, ImageFormat},
    figure::Figure,
};

/// Rendered pixels, straight (not premultiplied) RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixel at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.rgba[offset..offset + 4]);
        Some(pixel)
    }

    /// Composites the pixels onto a white background.
    fn to_rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| {
                let alpha = u16::from(px[3]);
                let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
                [blend(px[0]), blend(px[1]), blend(px[2])]
            })
            .collect()
    }
}

/// Rasterizes SVG text at its own pixel size.
///
/// # Errors
///
/// Returns [`export::Error::Render`] if the SVG cannot be parsed or has an
/// empty size.
pub fn rasterize(svg_text: &str) -> Result<Raster, export::Error> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg_text, &options)
        .map_err(|err| export::Error::Render(err.to_string()))?;
    let size = tree.size().to_int_size();

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        export::Error::Render(format!(
            "cannot allocate a {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    debug!(width = size.width(), height = size.height(); "Rasterized SVG document");

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let px = px.demultiply();
            [px.red(), px.green(), px.blue(), px.alpha()]
        })
        .collect();

    Ok(Raster {
        width: size.width(),
        height: size.height(),
        rgba,
    })
}

/// Encoding of a raster file.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Encoding {
    Png,
    Jpeg { quality: u8 },
}

/// Writes figures as PNG or JPEG files.
#[derive(Debug, Clone)]
pub struct RasterExporter {
    path: PathBuf,
    encoding: Encoding,
}

impl RasterExporter {
    pub fn png(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: Encoding::Png,
        }
    }

    /// JPEG output; quality is clamped to `1..=100`.
    pub fn jpeg(path: impl AsRef<Path>, quality: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: Encoding::Jpeg {
                quality: quality.clamp(1, 100),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        match self.encoding {
            Encoding::Png => ImageFormat::Png,
            Encoding::Jpeg { .. } => ImageFormat::Jpeg,
        }
    }

    /// Encodes `raster` to the exporter's path.
    pub fn write_raster(&self, raster: &Raster) -> Result<(), export::Error> {
        info!(path:? = self.path, format:% = self.format(); "Creating raster file");
        let writer = BufWriter::new(File::create(&self.path)?);
        let size_mismatch = || export::Error::Encode("pixel buffer size mismatch".into());

        let result = match self.encoding {
            Encoding::Png => {
                let image = RgbaImage::from_raw(raster.width, raster.height, raster.rgba.clone())
                    .ok_or_else(size_mismatch)?;
                image.write_with_encoder(PngEncoder::new(writer))
            }
            Encoding::Jpeg { quality } => {
                let image = RgbImage::from_raw(raster.width, raster.height, raster.to_rgb())
                    .ok_or_else(size_mismatch)?;
                image.write_with_encoder(JpegEncoder::new_with_quality(writer, quality))
            }
        };

        result.map_err(|err| match err {
            image::ImageError::IoError(err) => export::Error::Io(err),
            err => export::Error::Encode(err.to_string()),
        })
    }
}

impl Exporter for RasterExporter {
    fn export_figure(&mut self, figure: &Figure) -> Result<(), export::Error> {
        let svg_text = figure.to_document().to_string();
        let raster = rasterize(&svg_text)?;
        self.write_raster(&raster)
    }
}
