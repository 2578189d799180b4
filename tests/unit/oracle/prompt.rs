use super::*;

#[test]
fn prompts_name_country_and_format() {
    let p = bounding_box_prompt("Spain");
    assert!(p.contains("Spain"));
    assert!(p.contains("min_longitude:min_latitude:max_longitude:max_latitude"));

    let p = capitals_prompt("Spain");
    assert!(p.contains("alphabetical order"));
    assert!(p.contains("state_name:capital_name:longitude:latitude"));

    let p = yearly_gdp_prompt("Spain", Year(2014));
    assert!(p.contains("in 2014"));
    assert!(p.contains("state_name:value_in_million_usd"));
}
