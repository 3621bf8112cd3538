//! Recognized values for the enumerated dataset fields.
//!
//! Lookups are case-insensitive and tolerate surrounding whitespace. They
//! return the canonical spelling, which is what gets stored, so area searches
//! can use plain equality.

/* --------------------------------------------------------------------------
Coordinate systems
-------------------------------------------------------------------------- */

/// Irish Transverse Mercator (EPSG:2157).
pub const CRS_ITM: &str = "ITM";

/// Irish Grid, TM65 / TM75 datum (EPSG:29903).
pub const CRS_IRISH_GRID: &str = "Irish Grid";

/// WGS 84 geographic (EPSG:4326).
pub const CRS_WGS84: &str = "WGS84";

/// All recognized coordinate systems.
pub const COORDINATE_SYSTEMS: &[&str] = &[CRS_ITM, CRS_IRISH_GRID, CRS_WGS84];

const COORDINATE_SYSTEM_ALIASES: &[(&str, &str)] = &[
    ("EPSG:2157", CRS_ITM),
    ("IRENET95", CRS_ITM),
    ("EPSG:29903", CRS_IRISH_GRID),
    ("EPSG:29902", CRS_IRISH_GRID),
    ("TM65", CRS_IRISH_GRID),
    ("TM75", CRS_IRISH_GRID),
    ("IG", CRS_IRISH_GRID),
    ("EPSG:4326", CRS_WGS84),
    ("WGS 84", CRS_WGS84),
];

/* --------------------------------------------------------------------------
Data formats
-------------------------------------------------------------------------- */

/// All recognized data formats.
pub const FORMATS: &[&str] = &[
    "SHP", "GPKG", "GeoJSON", "KML", "KMZ", "GML", "CSV", "GeoTIFF", "DXF", "DWG", "FGDB", "LAS",
    "WMS", "WFS",
];

const FORMAT_ALIASES: &[(&str, &str)] = &[
    ("shapefile", "SHP"),
    ("geopackage", "GPKG"),
    ("json", "GeoJSON"),
    ("tif", "GeoTIFF"),
    ("tiff", "GeoTIFF"),
    ("gdb", "FGDB"),
    ("file geodatabase", "FGDB"),
    ("laz", "LAS"),
];

/* --------------------------------------------------------------------------
Areas
-------------------------------------------------------------------------- */

/// Whole-island, jurisdiction and province level areas.
pub const REGIONS: &[&str] = &[
    "All Ireland",
    "Republic of Ireland",
    "Northern Ireland",
    "Connacht",
    "Leinster",
    "Munster",
    "Ulster",
];

/// The thirty-two traditional counties.
pub const COUNTIES: &[&str] = &[
    "Antrim",
    "Armagh",
    "Carlow",
    "Cavan",
    "Clare",
    "Cork",
    "Derry",
    "Donegal",
    "Down",
    "Dublin",
    "Fermanagh",
    "Galway",
    "Kerry",
    "Kildare",
    "Kilkenny",
    "Laois",
    "Leitrim",
    "Limerick",
    "Longford",
    "Louth",
    "Mayo",
    "Meath",
    "Monaghan",
    "Offaly",
    "Roscommon",
    "Sligo",
    "Tipperary",
    "Tyrone",
    "Waterford",
    "Westmeath",
    "Wexford",
    "Wicklow",
];

const REGION_ALIASES: &[(&str, &str)] = &[
    ("Ireland", "All Ireland"),
    ("ROI", "Republic of Ireland"),
    ("NI", "Northern Ireland"),
    ("Connaught", "Connacht"),
];

const COUNTY_ALIASES: &[(&str, &str)] = &[("Londonderry", "Derry")];

/// Prefixes stripped from county names before lookup (`County Cork`, `Co. Cork`).
const COUNTY_PREFIXES: &[&str] = &["county ", "co. ", "co "];

/* --------------------------------------------------------------------------
Lookups
-------------------------------------------------------------------------- */

/// Canonical spelling of a coordinate system, or `None` if unrecognized.
pub fn canonical_coordinate_system(value: &str) -> Option<&'static str> {
    lookup(value.trim(), COORDINATE_SYSTEMS, COORDINATE_SYSTEM_ALIASES)
}

/// Canonical spelling of a data format, or `None` if unrecognized.
pub fn canonical_format(value: &str) -> Option<&'static str> {
    lookup(value.trim(), FORMATS, FORMAT_ALIASES)
}

/// Canonical spelling of an area, or `None` if unrecognized.
pub fn canonical_area(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if let Some(found) = lookup(value, REGIONS, REGION_ALIASES) {
        return Some(found);
    }

    let lower = value.to_lowercase();
    let county = COUNTY_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .map(str::trim_start)
        .unwrap_or(&lower);

    // Region aliases never apply after a county prefix.
    lookup(county, COUNTIES, COUNTY_ALIASES)
}

/// All recognized areas, regions first.
pub fn all_areas() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().chain(COUNTIES.iter()).copied()
}

fn lookup(
    value: &str,
    canonical: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
) -> Option<&'static str> {
    canonical
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(value))
        .or_else(|| {
            aliases
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(value))
                .map(|&(_, target)| target)
        })
}
