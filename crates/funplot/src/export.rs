//! Writing figures to image files.
//!
//! This module provides the [`Exporter`] trait implemented by the output
//! backends, the [`ImageFormat`]s they produce and the [`SaveOptions`] a
//! scene is saved with.
//!
//! # Available Backends
//!
//! - [`svg`]: writes the figure's SVG document as is
//! - [`raster`]: rasterizes the SVG document and encodes PNG or JPEG
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering, encoding and I/O
//! failures. [`Error`] converts into [`FunplotError::Export`] at the crate
//! boundary.
//!
//! [`FunplotError::Export`]: crate::FunplotError::Export

pub mod raster;
pub mod svg;

use std::{fmt, path::Path, str::FromStr};

use crate::figure::Figure;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// Abstraction for figure export backends.
pub trait Exporter {
    /// Lays out `figure` and writes it in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] or [`Error::Encode`] if the figure cannot be
    /// converted to the target format, or [`Error::Io`] if writing fails.
    fn export_figure(&mut self, figure: &Figure) -> Result<(), Error>;
}

/// Creates the exporter writing `format` to `path`.
pub fn exporter_for(path: &Path, format: ImageFormat, quality: u8) -> Box<dyn Exporter> {
    match format {
        ImageFormat::Svg => Box::new(svg::SvgExporter::new(path)),
        ImageFormat::Png => Box::new(raster::RasterExporter::png(path)),
        ImageFormat::Jpeg => Box::new(raster::RasterExporter::jpeg(path, quality)),
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Svg,
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Infers the format from the file extension, ignoring case.
    ///
    /// ```
    /// # use std::path::Path;
    /// # use funplot::export::ImageFormat;
    /// assert_eq!(ImageFormat::from_path(Path::new("plot.JPG")).unwrap(), ImageFormat::Jpeg);
    /// assert!(ImageFormat::from_path(Path::new("plot.gif")).is_err());
    /// assert!(ImageFormat::from_path(Path::new("plot")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How a scene is written to disk.
///
/// Unset values fall back to the file extension (format) and the figure
/// configuration (dpi).
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    format: Option<ImageFormat>,
    dpi: Option<f32>,
    quality: u8,
    transparent: bool,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the output format regardless of the file extension.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// JPEG quality, clamped to `1..=100`.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Leaves the background unpainted (SVG and PNG only).
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn dpi(&self) -> Option<f32> {
        self.dpi
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    /// The explicit format, or the one named by `path`'s extension.
    pub fn resolve_format(&self, path: &Path) -> Result<ImageFormat, Error> {
        match self.format {
            Some(format) => Ok(format),
            None => ImageFormat::from_path(path),
        }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: None,
            dpi: None,
            quality: DEFAULT_QUALITY,
            transparent: false,
        }
    }
}

/// Errors that can occur during figure export.
///
/// This type is converted into [`FunplotError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`FunplotError::Export`]: crate::FunplotError::Export
#[derive(Debug)]
pub enum Error {
    /// The SVG document could not be parsed or rasterized.
    Render(String),
    /// The pixel data could not be encoded.
    Encode(String),
    /// The requested format or file extension is not supported.
    UnsupportedFormat(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Encode(msg) => write!(f, "Encode error: {msg}"),
            Self::UnsupportedFormat(format) if format.is_empty() => {
                write!(f, "Missing file extension, expected svg, png, jpg or jpeg")
            }
            Self::UnsupportedFormat(format) => write!(
                f,
                "Unsupported image format `{format}`, expected svg, png, jpg or jpeg"
            ),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_format_from_extension() {
        let cases = [
            ("a.svg", ImageFormat::Svg),
            ("dir/b.PNG", ImageFormat::Png),
            ("c.jpeg", ImageFormat::Jpeg),
            ("d.Jpg", ImageFormat::Jpeg),
        ];
        for (path, expected) in cases {
            assert_eq!(ImageFormat::from_path(Path::new(path)).unwrap(), expected);
        }
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = ImageFormat::from_path(Path::new("plot.bmp")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == "bmp"));
        assert!(err.to_string().contains("`bmp`"));

        let err = ImageFormat::from_path(Path::new("plot")).unwrap_err();
        assert!(err.to_string().contains("Missing file extension"));
    }

    #[test]
    fn test_save_options() {
        let options = SaveOptions::new().with_quality(0).with_dpi(300.0);
        assert_eq!(options.quality(), 1);
        assert_eq!(options.dpi(), Some(300.0));
        assert_eq!(SaveOptions::default().quality(), DEFAULT_QUALITY);

        let path = PathBuf::from("out.svg");
        assert_eq!(options.resolve_format(&path).unwrap(), ImageFormat::Svg);
        let forced = options.with_format(ImageFormat::Png);
        assert_eq!(forced.resolve_format(&path).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = Error::from(std::io::Error::other("disk full"));
        assert!(err.source().is_some());
        assert!(Error::Render("bad".into()).source().is_none());
    }
}
