//! GeoTIFF metadata and GeoKey parsing
//!
//! Reads the georeferencing tags of an IFD: the GeoKey directory and the
//! three model tags (pixel scale, tiepoint, transformation) from which the
//! pixel-to-world affine transform is derived.

use log::debug;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::tiff::constants::{tags, geo_keys, geo_key_values};

/// One entry of the GeoKey directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    /// 0 when the value is stored in `value_offset`, otherwise the tag holding it
    pub tiff_tag_location: u16,
    pub count: u16,
    pub value_offset: u16,
}

impl GeoKeyEntry {
    /// Create a new GeoKey entry
    pub fn new(key_id: u16, tiff_tag_location: u16, count: u16, value_offset: u16) -> Self {
        GeoKeyEntry {
            key_id,
            tiff_tag_location,
            count,
            value_offset,
        }
    }

    /// The short value of this key, if stored inline
    pub fn inline_value(&self) -> Option<u16> {
        (self.tiff_tag_location == 0).then_some(self.value_offset)
    }

    /// Get the name of this key
    pub fn get_name(&self) -> &'static str {
        get_key_name(self.key_id)
    }
}

/// Name of a GeoKey
pub fn get_key_name(key_id: u16) -> &'static str {
    match key_id {
        geo_keys::MODEL_TYPE => "GTModelTypeGeoKey",
        geo_keys::RASTER_TYPE => "GTRasterTypeGeoKey",
        geo_keys::GEOGRAPHIC_TYPE => "GeographicTypeGeoKey",
        geo_keys::PROJECTED_CS_TYPE => "ProjectedCSTypeGeoKey",
        1026 => "GTCitationGeoKey",
        2049 => "GeogCitationGeoKey",
        3073 => "PCSCitationGeoKey",
        _ => "Unknown",
    }
}

/// Georeferencing information extracted from one IFD
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo {
    /// EPSG code of the CRS (projected CS if present, otherwise geographic)
    pub epsg_code: Option<u32>,
    /// GTModelTypeGeoKey
    pub model_type: Option<u16>,
    /// GTRasterTypeGeoKey
    pub raster_type: Option<u16>,
    /// ModelPixelScale (sx, sy, sz)
    pub pixel_scale: Option<[f64; 3]>,
    /// First ModelTiepoint (i, j, k, x, y, z)
    pub tiepoint: Option<[f64; 6]>,
    /// ModelTransformation, 4x4 row-major
    pub transformation: Option<[f64; 16]>,
}

impl GeoInfo {
    /// Whether the model tags are sufficient to build an affine transform
    pub fn has_transform(&self) -> bool {
        self.transformation.is_some() || (self.pixel_scale.is_some() && self.tiepoint.is_some())
    }
}

/// Parser for GeoTIFF geographic metadata
pub struct GeoKeyParser;

impl GeoKeyParser {
    /// Parse the GeoKey directory from an IFD
    ///
    /// The directory is a SHORT array: a 4-value header (version, revision,
    /// minor revision, key count) followed by 4 values per key. An IFD
    /// without the tag yields an empty list.
    pub fn parse_geo_key_directory(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD
    ) -> TiffResult<Vec<GeoKeyEntry>> {
        if !ifd.has_tag(tags::GEO_KEY_DIRECTORY_TAG) {
            return Ok(Vec::new());
        }

        let values = tiff_reader.read_tag_values(reader, ifd, tags::GEO_KEY_DIRECTORY_TAG)?;
        if values.len() < 4 {
            return Err(TiffError::GenericError("Invalid GeoKey directory header".to_string()));
        }

        let num_keys = values[3] as usize;
        debug!("GeoKey directory: version={}, revision={}.{}, keys={}",
               values[0], values[1], values[2], num_keys);

        let available = (values.len() - 4) / 4;
        if available < num_keys {
            return Err(TiffError::GenericError(format!(
                "GeoKey directory declares {} keys but holds {}", num_keys, available
            )));
        }

        let geo_keys = values[4..4 + num_keys * 4]
            .chunks_exact(4)
            .map(|k| GeoKeyEntry::new(k[0] as u16, k[1] as u16, k[2] as u16, k[3] as u16))
            .inspect(|key| debug!("GeoKey: id={} ({}), location={}, count={}, value={}",
                                  key.key_id, key.get_name(), key.tiff_tag_location,
                                  key.count, key.value_offset))
            .collect();

        Ok(geo_keys)
    }

    /// Read ModelPixelScale values (x_scale, y_scale, z_scale)
    pub fn read_model_pixel_scale_values(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD
    ) -> TiffResult<Vec<f64>> {
        tiff_reader.read_tag_f64s(reader, ifd, tags::MODEL_PIXEL_SCALE_TAG)
    }

    /// Read ModelTiepoint values (i,j,k,x,y,z, repeated per tiepoint)
    pub fn read_model_tiepoint_values(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD
    ) -> TiffResult<Vec<f64>> {
        tiff_reader.read_tag_f64s(reader, ifd, tags::MODEL_TIEPOINT_TAG)
    }

    /// Read the 16 ModelTransformation values
    pub fn read_model_transformation_values(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD
    ) -> TiffResult<Vec<f64>> {
        tiff_reader.read_tag_f64s(reader, ifd, tags::MODEL_TRANSFORMATION_TAG)
    }

    /// Extract georeferencing information from an IFD
    ///
    /// Absent tags leave the matching field empty; malformed ones (too few
    /// values) are reported as errors.
    pub fn extract_geo_info(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD
    ) -> TiffResult<GeoInfo> {
        let mut geo_info = GeoInfo::default();

        let keys = Self::parse_geo_key_directory(tiff_reader, reader, ifd)?;
        let mut projected = None;
        let mut geographic = None;
        for key in &keys {
            let value = match key.inline_value() {
                Some(value) => value,
                None => continue,
            };
            match key.key_id {
                geo_keys::MODEL_TYPE => geo_info.model_type = Some(value),
                geo_keys::RASTER_TYPE => geo_info.raster_type = Some(value),
                geo_keys::PROJECTED_CS_TYPE if value != geo_key_values::USER_DEFINED => projected = Some(value as u32),
                geo_keys::GEOGRAPHIC_TYPE if value != geo_key_values::USER_DEFINED => geographic = Some(value as u32),
                _ => {}
            }
        }
        geo_info.epsg_code = projected.or(geographic);

        if ifd.has_tag(tags::MODEL_PIXEL_SCALE_TAG) {
            let scale = Self::read_model_pixel_scale_values(tiff_reader, reader, ifd)?;
            if scale.len() < 2 {
                return Err(TiffError::GenericError(format!(
                    "ModelPixelScale holds {} values, expected 3", scale.len()
                )));
            }
            geo_info.pixel_scale = Some([scale[0], scale[1], scale.get(2).copied().unwrap_or(0.0)]);
        }

        if ifd.has_tag(tags::MODEL_TIEPOINT_TAG) {
            let tiepoints = Self::read_model_tiepoint_values(tiff_reader, reader, ifd)?;
            if tiepoints.len() < 6 {
                return Err(TiffError::GenericError(format!(
                    "ModelTiepoint holds {} values, expected at least 6", tiepoints.len()
                )));
            }
            let mut tiepoint = [0.0; 6];
            tiepoint.copy_from_slice(&tiepoints[..6]);
            geo_info.tiepoint = Some(tiepoint);
        }

        if ifd.has_tag(tags::MODEL_TRANSFORMATION_TAG) {
            let matrix = Self::read_model_transformation_values(tiff_reader, reader, ifd)?;
            if matrix.len() < 16 {
                return Err(TiffError::GenericError(format!(
                    "ModelTransformation holds {} values, expected 16", matrix.len()
                )));
            }
            let mut transformation = [0.0; 16];
            transformation.copy_from_slice(&matrix[..16]);
            geo_info.transformation = Some(transformation);
        }

        Ok(geo_info)
    }
}
