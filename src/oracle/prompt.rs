use crate::foundation::core::Year;

/// Ask for the country's bounding box as `min_lon:min_lat:max_lon:max_lat`.
pub fn bounding_box_prompt(country: &str) -> String {
    format!(
        "return a list and no other comment, informing the coordinates of the country {country}. \
         In that followed format: min_longitude:min_latitude:max_longitude:max_latitude"
    )
}

/// Ask for every region's capital and its coordinates, one region per line.
pub fn capitals_prompt(country: &str) -> String {
    format!(
        "return a list and no other comment, considering the States of {country}, which are \
         sorted by alphabetical order, the longitudes and latitudes of their capitals. \
         In that followed format: state_name:capital_name:longitude:latitude"
    )
}

/// Ask for one year's per-region GDP, one region per line, in millions of USD.
pub fn yearly_gdp_prompt(country: &str, year: Year) -> String {
    format!(
        "return a list and no other comment, considering the states of {country}, which are \
         sorted by alphabetical order, inform the GDP of these states in {year}, \
         in that followed format: state_name:value_in_million_usd"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/prompt.rs"]
mod tests;
