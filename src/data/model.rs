// ---------------------------------------------------------------------------
// NearEarthObject – one row of the NEO catalog
// ---------------------------------------------------------------------------

/// A single near-Earth object, normalized from one catalog row.
///
/// Every field is always populated: NaN and the empty string are valid
/// states meaning "absent in the source", never an error. Records are
/// built once by the loader and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    /// Primary designation, the join key into the close-approach data.
    /// Empty if the source field was blank.
    pub designation: String,
    /// IAU name; empty string when the object is unnamed.
    pub name: String,
    /// Diameter in kilometres; NaN when the catalog leaves it blank.
    pub diameter: f64,
    /// Whether the catalog flags the object as potentially hazardous.
    pub hazardous: bool,
}

// ---------------------------------------------------------------------------
// CloseApproach – one close approach of a NEO to Earth
// ---------------------------------------------------------------------------

/// A single close approach, normalized from one entry of the
/// close-approach dataset.
///
/// `designation` references a [`NearEarthObject`] but is not required to
/// resolve; referential integrity belongs to the consuming index.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    /// Designation of the approaching object.
    pub designation: String,
    /// Calendar date/time of closest approach, passed through exactly as
    /// the source supplies it (no parsing, no timezone handling).
    pub time: String,
    /// Nominal approach distance in astronomical units; NaN when missing.
    pub distance: f64,
    /// Relative approach velocity in km/s; NaN when missing.
    pub velocity: f64,
}
