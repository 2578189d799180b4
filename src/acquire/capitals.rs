use crate::acquire::grammar::{parse_number, record_lines, split_fields};
use crate::foundation::core::GeoPoint;
use crate::foundation::error::{AtlasError, AtlasResult};
use crate::oracle::{Oracle, prompt};
use std::collections::BTreeMap;

/// One region of the country, represented by its capital.
///
/// `state` is the join key for every metric of the run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CapitalRecord {
    /// Region name, compared exactly (case and whitespace sensitive).
    pub state: String,
    /// Capital city name, used as the map label.
    pub capital: String,
    /// Capital location.
    pub coordinate: GeoPoint,
}

/// Resolve the regions of `country` and their capitals.
///
/// The result has unique `state` keys and is sorted ascending by `state`.
#[tracing::instrument(skip(oracle))]
pub fn resolve_capitals(oracle: &dyn Oracle, country: &str) -> AtlasResult<Vec<CapitalRecord>> {
    let reply = oracle.query(&prompt::capitals_prompt(country))?;
    let capitals = parse_capitals(&reply)?;
    tracing::info!(count = capitals.len(), "capitals resolved");
    Ok(capitals)
}

/// Parse `state:capital:longitude:latitude` lines.
pub fn parse_capitals(reply: &str) -> AtlasResult<Vec<CapitalRecord>> {
    let mut by_state = BTreeMap::<String, CapitalRecord>::new();

    for (line_no, line) in record_lines(reply) {
        let f = split_fields(line_no, line, 4).map_err(|e| AtlasError::parse(e.to_string()))?;
        let lon = parse_number(line_no, f[2]).map_err(|e| AtlasError::parse(e.to_string()))?;
        let lat = parse_number(line_no, f[3]).map_err(|e| AtlasError::parse(e.to_string()))?;

        let rec = CapitalRecord {
            state: f[0].to_string(),
            capital: f[1].to_string(),
            coordinate: GeoPoint::new(lon, lat),
        };
        if by_state.contains_key(&rec.state) {
            tracing::warn!(state = %rec.state, line = line_no, "duplicate state ignored");
            continue;
        }
        by_state.insert(rec.state.clone(), rec);
    }

    if by_state.is_empty() {
        return Err(AtlasError::parse(format!(
            "no capital records in reply '{}'",
            reply.trim()
        )));
    }

    Ok(by_state.into_values().collect())
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/capitals.rs"]
mod tests;
