use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{CloseApproach, NearEarthObject};
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Field-access strategy
// ---------------------------------------------------------------------------

/// How a loader locates the semantic fields inside a raw source record.
///
/// Two source variants are in circulation, and they disagree on field
/// layout *and* on hazard-flag polarity, so the strategy is an explicit
/// choice rather than a hard-coded assumption:
///
/// * [`FieldAccess::ByName`] resolves fields through the CSV header
///   (`pdes`, `name`, `pha`, `diameter`) or the JSON field manifest
///   (`des`, `cd`, `dist`, `v_rel`) and treats `pha == "Y"` as hazardous.
///   Robust against column reordering; the default.
/// * [`FieldAccess::ByPosition`] uses the fixed column layout of the
///   published SBDB exports, skipping the header / ignoring the manifest,
///   and treats `pha != "N"` as hazardous — the polarity the positional
///   variant was observed with. The two polarities differ on blank flags
///   and are deliberately not unified; pick the one matching your source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldAccess {
    #[default]
    ByName,
    ByPosition,
}

// ---------------------------------------------------------------------------
// NEO loader (CSV)
// ---------------------------------------------------------------------------

/// Resolved column positions of the four semantic NEO fields.
#[derive(Debug)]
struct NeoColumns {
    designation: usize,
    name: usize,
    pha: usize,
    diameter: usize,
}

impl NeoColumns {
    /// Fixed positions in the published SBDB CSV layout.
    const FIXED: NeoColumns = NeoColumns {
        designation: 3,
        name: 4,
        pha: 7,
        diameter: 15,
    };

    fn resolve(headers: &csv::StringRecord) -> Result<NeoColumns> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::structure(format!("CSV missing '{name}' column")))
        };
        Ok(NeoColumns {
            designation: position("pdes")?,
            name: position("name")?,
            pha: position("pha")?,
            diameter: position("diameter")?,
        })
    }
}

/// Load near-Earth objects from a CSV catalog, resolving fields by
/// header name.
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>> {
    load_neos_with(path, FieldAccess::default())
}

/// Load near-Earth objects with an explicit field-access strategy.
///
/// Output order follows source row order and the length equals the row
/// count: a row that cannot be decoded or has the wrong field count aborts
/// the whole load instead of being skipped. A blank diameter becomes NaN
/// and a blank designation or name becomes the empty string; neither is
/// an error.
pub fn load_neos_with(path: &Path, access: FieldAccess) -> Result<Vec<NearEarthObject>> {
    let file = File::open(path).map_err(|e| LoadError::unavailable(path, e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let cols = match access {
        FieldAccess::ByName => {
            let headers = reader
                .headers()
                .map_err(|e| LoadError::structure(format!("cannot read CSV header: {e}")))?;
            NeoColumns::resolve(headers)?
        }
        // Header row is still consumed, only its names are ignored.
        FieldAccess::ByPosition => NeoColumns::FIXED,
    };

    let mut neos = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let record =
            row.map_err(|e| LoadError::record(index, format!("undecodable row: {e}")))?;

        let designation = field(&record, cols.designation, index, "designation")?.to_string();
        let name = field(&record, cols.name, index, "name")?.to_string();
        let pha = field(&record, cols.pha, index, "pha")?;
        let hazardous = match access {
            FieldAccess::ByName => pha == "Y",
            FieldAccess::ByPosition => pha != "N",
        };
        let diameter = float_or_nan(
            field(&record, cols.diameter, index, "diameter")?,
            index,
            "diameter",
        )?;

        neos.push(NearEarthObject {
            designation,
            name,
            diameter,
            hazardous,
        });
    }

    debug!("loaded {} NEOs from {}", neos.len(), path.display());
    Ok(neos)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    column: usize,
    index: usize,
    name: &str,
) -> Result<&'r str> {
    record.get(column).ok_or_else(|| {
        LoadError::record(index, format!("missing '{name}' field (column {column})"))
    })
}

// ---------------------------------------------------------------------------
// Close-approach loader (JSON)
// ---------------------------------------------------------------------------

/// Top-level shape of the close-approach document: a field-name manifest
/// plus a parallel list of positional records. The manifest is optional on
/// the wire so that positional access works on manifest-less documents.
#[derive(Deserialize)]
struct ApproachDocument {
    #[serde(default)]
    fields: Vec<String>,
    data: Vec<Vec<JsonValue>>,
}

/// Resolved value positions of the four semantic approach fields.
#[derive(Debug)]
struct ApproachColumns {
    designation: usize,
    time: usize,
    distance: usize,
    velocity: usize,
}

impl ApproachColumns {
    /// Fixed positions in the published close-approach record layout.
    const FIXED: ApproachColumns = ApproachColumns {
        designation: 0,
        time: 3,
        distance: 4,
        velocity: 7,
    };

    fn resolve(fields: &[String]) -> Result<ApproachColumns> {
        if fields.is_empty() {
            return Err(LoadError::structure("document has no field manifest"));
        }
        let position = |name: &str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| LoadError::structure(format!("manifest missing '{name}' field")))
        };
        Ok(ApproachColumns {
            designation: position("des")?,
            time: position("cd")?,
            distance: position("dist")?,
            velocity: position("v_rel")?,
        })
    }
}

/// Load close approaches from a JSON document, pairing each record with
/// the field manifest.
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>> {
    load_approaches_with(path, FieldAccess::default())
}

/// Load close approaches with an explicit field-access strategy.
///
/// Output order follows source record order. `distance` and `velocity`
/// are coerced to `f64` independently: either may be NaN (blank or null
/// in the source) while the other is a valid number. `time` is passed
/// through untouched.
pub fn load_approaches_with(path: &Path, access: FieldAccess) -> Result<Vec<CloseApproach>> {
    let file = File::open(path).map_err(|e| LoadError::unavailable(path, e))?;
    let doc: ApproachDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LoadError::structure(format!("undecodable document: {e}")))?;

    let cols = match access {
        FieldAccess::ByName => ApproachColumns::resolve(&doc.fields)?,
        FieldAccess::ByPosition => ApproachColumns::FIXED,
    };

    let mut approaches = Vec::with_capacity(doc.data.len());
    for (index, record) in doc.data.iter().enumerate() {
        // Manifest-driven access pairs each record positionally with the
        // manifest, so a length mismatch is a shape violation.
        if access == FieldAccess::ByName && record.len() != doc.fields.len() {
            return Err(LoadError::record(
                index,
                format!(
                    "record has {} values, manifest declares {}",
                    record.len(),
                    doc.fields.len()
                ),
            ));
        }

        let designation = text(value(record, cols.designation, index, "des")?);
        let time = text(value(record, cols.time, index, "cd")?);
        let distance =
            json_float_or_nan(value(record, cols.distance, index, "dist")?, index, "dist")?;
        let velocity =
            json_float_or_nan(value(record, cols.velocity, index, "v_rel")?, index, "v_rel")?;

        approaches.push(CloseApproach {
            designation,
            time,
            distance,
            velocity,
        });
    }

    debug!(
        "loaded {} close approaches from {}",
        approaches.len(),
        path.display()
    );
    Ok(approaches)
}

fn value<'r>(
    record: &'r [JsonValue],
    column: usize,
    index: usize,
    name: &str,
) -> Result<&'r JsonValue> {
    record.get(column).ok_or_else(|| {
        LoadError::record(index, format!("missing '{name}' value (position {column})"))
    })
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Coerce a raw text field to `f64`, mapping blank to the NaN sentinel.
/// Non-empty text that does not parse as a number is a shape violation,
/// not a value anomaly, and fails the load.
fn float_or_nan(raw: &str, index: usize, name: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>()
        .map_err(|_| LoadError::record(index, format!("{name} '{raw}' is not a number")))
}

/// Same coercion for a JSON cell: null and `""` become NaN, numeric text
/// and JSON numbers become their value.
fn json_float_or_nan(val: &JsonValue, index: usize, name: &str) -> Result<f64> {
    match val {
        JsonValue::Null => Ok(f64::NAN),
        JsonValue::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN)),
        JsonValue::String(s) => float_or_nan(s, index, name),
        other => Err(LoadError::record(
            index,
            format!("{name} is not a number or string: {other}"),
        )),
    }
}

/// Pass a JSON cell through as text. Null becomes the empty string; a
/// non-string scalar keeps its JSON rendering.
fn text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_text_coerces_to_nan() {
        assert!(float_or_nan("", 0, "diameter").unwrap().is_nan());
        assert_eq!(float_or_nan("16.84", 0, "diameter").unwrap(), 16.84);
    }

    #[test]
    fn unparseable_text_is_a_malformed_record() {
        let err = float_or_nan("huge", 7, "diameter").unwrap_err();
        match err {
            LoadError::MalformedRecord { index, .. } => assert_eq!(index, Some(7)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_cells_coerce_independently() {
        assert!(json_float_or_nan(&JsonValue::Null, 0, "dist").unwrap().is_nan());
        assert!(json_float_or_nan(&json!(""), 0, "dist").unwrap().is_nan());
        assert_eq!(json_float_or_nan(&json!("12.3"), 0, "v_rel").unwrap(), 12.3);
        assert_eq!(json_float_or_nan(&json!(0.5), 0, "dist").unwrap(), 0.5);
        assert!(json_float_or_nan(&json!([1, 2]), 0, "dist").is_err());
    }

    #[test]
    fn null_text_becomes_empty_string() {
        assert_eq!(text(&JsonValue::Null), "");
        assert_eq!(text(&json!("2029-Apr-13 21:46")), "2029-Apr-13 21:46");
    }

    #[test]
    fn header_resolution_tolerates_reordering() {
        let headers = csv::StringRecord::from(vec!["diameter", "pha", "name", "pdes"]);
        let cols = NeoColumns::resolve(&headers).unwrap();
        assert_eq!(cols.designation, 3);
        assert_eq!(cols.diameter, 0);
    }

    #[test]
    fn missing_header_column_fails_structurally() {
        let headers = csv::StringRecord::from(vec!["pdes", "name", "diameter"]);
        let err = NeoColumns::resolve(&headers).unwrap_err();
        match err {
            LoadError::MalformedRecord { index: None, reason } => {
                assert!(reason.contains("pha"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn manifest_resolution_requires_all_names() {
        let fields: Vec<String> = ["des", "orbit_id", "jd", "cd", "dist", "v_rel"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cols = ApproachColumns::resolve(&fields).unwrap();
        assert_eq!(cols.velocity, 5);
        assert!(ApproachColumns::resolve(&[]).is_err());
    }
}
