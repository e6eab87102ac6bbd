//! An open raster file
//!
//! `RasterSource` owns the file handle for the duration of one request;
//! dropping it closes the file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use log::{debug, info, trace, warn};

use crate::coordinate::AffineTransform;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::geo_key_parser::{GeoInfo, GeoKeyParser};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::tiff::validation;
use crate::utils::progress::ProgressTracker;

use super::band_reader::BandReader;
use super::metadata::{RasterMetadata, SampleLayout};

pub struct RasterSource {
    path: PathBuf,
    reader: BufReader<File>,
    tiff_reader: TiffReader,
    ifd: IFD,
    width: usize,
    height: usize,
    file_size: u64,
}

impl RasterSource {
    /// Opens a raster and reads the directory of its first image
    ///
    /// Fails when the file is missing, is not a TIFF/BigTIFF container, or
    /// its first image has no dimensions.
    pub fn open(path: &Path) -> TiffResult<Self> {
        debug!("Opening raster {}", path.display());
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut tiff_reader = TiffReader::new();
        let tiff = tiff_reader.read(&mut reader)?;
        let overviews = tiff.overviews().len();
        if overviews > 0 {
            debug!("{} of {} image directories are overviews, reading the first", overviews, tiff.ifd_count());
        }
        let ifd = tiff.ifds.into_iter().next().ok_or(TiffError::NoImageDirectory)?;

        let (width, height) = match ifd.get_dimensions() {
            Some((w, h)) if w > 0 && h > 0 => (w as usize, h as usize),
            _ => return Err(TiffError::MissingDimensions),
        };
        let file_size = validation::get_file_size(&mut reader)?;

        trace!("{}", ifd);
        info!("Opened {}: {}x{}, {} band(s)", path.display(), width, height, ifd.get_samples_per_pixel());
        Ok(RasterSource {
            path: path.to_path_buf(),
            reader,
            tiff_reader,
            ifd,
            width,
            height,
            file_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn band_count(&self) -> usize {
        self.ifd.get_samples_per_pixel() as usize
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn ifd(&self) -> &IFD {
        &self.ifd
    }

    pub fn sample_layout(&mut self) -> TiffResult<SampleLayout> {
        SampleLayout::from_ifd(&self.tiff_reader, &mut self.reader, &self.ifd)
    }

    /// GeoTIFF tags of the image; empty when the file is not georeferenced
    pub fn geo_info(&mut self) -> TiffResult<GeoInfo> {
        GeoKeyParser::extract_geo_info(&self.tiff_reader, &mut self.reader, &self.ifd)
    }

    /// Structural metadata; the transform is `None` if it cannot be built
    pub fn metadata(&mut self) -> TiffResult<RasterMetadata> {
        let sample = self.sample_layout()?;
        let geo_info = self.geo_info().unwrap_or_else(|e| {
            warn!("Ignoring malformed GeoTIFF tags in {}: {}", self.path.display(), e);
            GeoInfo::default()
        });
        let transform = match AffineTransform::from_geo_info(&geo_info) {
            Ok(transform) => Some(transform),
            Err(e) => {
                if self.ifd.has_georeferencing() {
                    debug!("No usable transform in {}: {}", self.path.display(), e);
                } else {
                    debug!("{} carries no georeferencing tags", self.path.display());
                }
                None
            }
        };

        Ok(RasterMetadata {
            band_count: self.band_count(),
            width: self.width,
            height: self.height,
            transform,
            sample,
            epsg: geo_info.epsg_code,
        })
    }

    /// Decodes the given 0-based bands at full resolution
    pub fn read_bands(&mut self, bands: &[usize], progress: Option<&ProgressTracker>) -> TiffResult<Vec<Vec<f64>>> {
        let layout = self.sample_layout()?;
        let band_count = self.band_count();
        let mut band_reader = BandReader {
            reader: &mut self.reader,
            tiff_reader: &self.tiff_reader,
            ifd: &self.ifd,
            layout: &layout,
            width: self.width,
            height: self.height,
            band_count,
            file_size: self.file_size,
        };
        band_reader.read_bands(bands, progress)
    }
}
