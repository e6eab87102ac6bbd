//! GeoTIFF tag strategies
//!
//! The model tags and GeoKey directory that place a raster on the map.

use std::collections::HashMap;
use log::info;

use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::builders::writer::TagData;
use crate::tiff::ifd::IFD;
use crate::tiff::constants::{tags, geo_keys, geo_key_values};

/// Handles GeoTIFF tags
pub struct GeoTagsBuilder;

impl GeoTagsBuilder {
    /// Adds ModelPixelScale and a single ModelTiepoint
    ///
    /// `scale` is (sx, sy, sz) with sy positive for north-up rasters;
    /// `tiepoint` is (i, j, k, x, y, z).
    pub fn add_pixel_scale_and_tiepoint(
        ifd: &mut IFD,
        tag_data: &mut HashMap<(usize, u16), TagData>,
        ifd_index: usize,
        scale: [f64; 3],
        tiepoint: [f64; 6]
    ) {
        info!("Adding pixel scale {:?} and tiepoint {:?}", scale, tiepoint);
        BasicTagsBuilder::set_tag(ifd, tag_data, ifd_index, tags::MODEL_PIXEL_SCALE_TAG, TagData::Doubles(scale.to_vec()));
        BasicTagsBuilder::set_tag(ifd, tag_data, ifd_index, tags::MODEL_TIEPOINT_TAG, TagData::Doubles(tiepoint.to_vec()));
    }

    /// Adds a full 4x4 ModelTransformation matrix (row-major)
    pub fn add_model_transformation(
        ifd: &mut IFD,
        tag_data: &mut HashMap<(usize, u16), TagData>,
        ifd_index: usize,
        matrix: [f64; 16]
    ) {
        info!("Adding model transformation");
        BasicTagsBuilder::set_tag(ifd, tag_data, ifd_index, tags::MODEL_TRANSFORMATION_TAG, TagData::Doubles(matrix.to_vec()));
    }

    /// Adds a GeoKey directory declaring the model type and EPSG code
    ///
    /// Geographic codes go to GeographicTypeGeoKey, anything else to
    /// ProjectedCSTypeGeoKey.
    pub fn add_geo_keys(
        ifd: &mut IFD,
        tag_data: &mut HashMap<(usize, u16), TagData>,
        ifd_index: usize,
        epsg: u16,
        geographic: bool
    ) {
        let (model_type, cs_key) = if geographic {
            (geo_key_values::MODEL_TYPE_GEOGRAPHIC, geo_keys::GEOGRAPHIC_TYPE)
        } else {
            (geo_key_values::MODEL_TYPE_PROJECTED, geo_keys::PROJECTED_CS_TYPE)
        };

        let directory = vec![
            1, 1, 0, 3,
            geo_keys::MODEL_TYPE, 0, 1, model_type,
            geo_keys::RASTER_TYPE, 0, 1, geo_key_values::RASTER_PIXEL_IS_AREA,
            cs_key, 0, 1, epsg,
        ];
        BasicTagsBuilder::set_tag(ifd, tag_data, ifd_index, tags::GEO_KEY_DIRECTORY_TAG, TagData::Shorts(directory));
    }
}
