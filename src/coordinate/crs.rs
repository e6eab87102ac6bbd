//! Coordinate Reference System identification

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// WGS 84 / UTM zone (EPSG:326xx north, 327xx south)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, true) => 32600 + *zone as u32,
            CoordinateSystem::UTM(zone, false) => 32700 + *zone as u32,
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Whether coordinates are degrees of latitude/longitude
    ///
    /// Only WGS 84 and the EPSG geographic range 4000-4999 are recognised.
    pub fn is_geographic(&self) -> bool {
        match self {
            CoordinateSystem::WGS84 => true,
            CoordinateSystem::Other(code) => (4000..5000).contains(code),
            _ => false,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                let hemisphere = if *is_northern { 'N' } else { 'S' };
                format!("WGS 84 / UTM zone {}{} (EPSG:{})", zone, hemisphere, self.epsg_code())
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> CoordinateSystem {
        match epsg {
            4326 => CoordinateSystem::WGS84,
            3857 => CoordinateSystem::WebMercator,
            32601..=32660 => CoordinateSystem::UTM((epsg - 32600) as u8, true),
            32701..=32760 => CoordinateSystem::UTM((epsg - 32700) as u8, false),
            _ => CoordinateSystem::Other(epsg),
        }
    }
}
