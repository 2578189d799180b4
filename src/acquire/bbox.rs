use crate::acquire::grammar::{FIELD_SEP, parse_number};
use crate::foundation::core::BoundingBox;
use crate::foundation::error::{AtlasError, AtlasResult};
use crate::oracle::{Oracle, prompt};

/// Resolve the bounding box of `country` from the oracle.
///
/// The raw quadruple is widened by [`crate::BBOX_MARGIN_DEG`] on every side. Any grammar violation
/// is fatal: every frame depends on this box.
#[tracing::instrument(skip(oracle))]
pub fn resolve_bounding_box(oracle: &dyn Oracle, country: &str) -> AtlasResult<BoundingBox> {
    if country.trim().is_empty() {
        return Err(AtlasError::validation("country name must be non-empty"));
    }
    let reply = oracle.query(&prompt::bounding_box_prompt(country))?;
    let bbox = parse_bounding_box(&reply)?;
    tracing::info!(?bbox, "bounding box resolved");
    Ok(bbox)
}

/// Parse `min_lon:min_lat:max_lon:max_lat` and apply the safety margin.
///
/// Tokens past the fourth are ignored.
pub fn parse_bounding_box(reply: &str) -> AtlasResult<BoundingBox> {
    let tokens: Vec<&str> = reply.trim().split(FIELD_SEP).collect();
    if tokens.len() < 4 {
        return Err(AtlasError::parse(format!(
            "bounding box needs 4 ':'-separated values, got {} in '{}'",
            tokens.len(),
            reply.trim()
        )));
    }

    let mut raw = [0.0; 4];
    for (slot, token) in raw.iter_mut().zip(&tokens) {
        *slot = parse_number(1, token).map_err(|e| AtlasError::parse(e.to_string()))?;
    }

    BoundingBox::with_margin(raw).map_err(|e| AtlasError::parse(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/bbox.rs"]
mod tests;
