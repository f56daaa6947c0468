//! SVG export backend.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use ::svg::Document;
use log::{debug, error, info};

use crate::{
    export::{self, Exporter},
    figure::Figure,
};

/// Writes figures as SVG files.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    path: PathBuf,
}

impl SvgExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an SVG document to the exporter's path
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(path:? = self.path; "Creating SVG file");
        let file = match File::create(&self.path) {
            Ok(file) => file,
            Err(err) => {
                error!(path:? = self.path, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        let mut writer = BufWriter::new(file);
        if let Err(err) = write!(writer, "{doc}").and_then(|()| writer.flush()) {
            error!(path:? = self.path, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for SvgExporter {
    fn export_figure(&mut self, figure: &Figure) -> Result<(), export::Error> {
        let doc = figure.to_document();
        debug!("SVG document rendered");
        self.write_document(&doc)
    }
}
