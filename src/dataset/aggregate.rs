use crate::acquire::capitals::CapitalRecord;
use crate::acquire::metrics::YearFetch;
use crate::foundation::core::Year;
use crate::foundation::error::{AtlasError, AtlasResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A capital plus its sparse per-year GDP column.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    /// The region and its capital.
    pub capital: CapitalRecord,
    /// GDP in millions of USD by year. A missing year means "no data point", never zero.
    pub values: BTreeMap<Year, f64>,
}

/// Capitals joined with every merged year.
///
/// The state domain is fixed at construction; merges only add values for known states.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountryDataset {
    rows: Vec<DatasetRow>,
}

/// What one successful merge did.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    /// Year merged.
    pub year: Year,
    /// Number of values that joined onto a known state.
    pub joined: usize,
    /// Fetched states with no matching capital (or repeated within the reply).
    pub dropped: Vec<String>,
    /// Largest joined value of this year, if any joined.
    pub year_max: Option<f64>,
}

impl CountryDataset {
    /// Seed a dataset from the capital registry, with no values.
    pub fn new(capitals: Vec<CapitalRecord>) -> Self {
        Self {
            rows: capitals
                .into_iter()
                .map(|capital| DatasetRow {
                    capital,
                    values: BTreeMap::new(),
                })
                .collect(),
        }
    }

    /// Rows in capital-registry order.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Value for `(state, year)`, if present.
    pub fn value(&self, state: &str, year: Year) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.capital.state == state)
            .and_then(|r| r.values.get(&year).copied())
    }

    /// Every year that has at least one value.
    pub fn value_years(&self) -> BTreeSet<Year> {
        self.rows
            .iter()
            .flat_map(|r| r.values.keys().copied())
            .collect()
    }

    /// Capitals that have a value for `year`, with that value. Capitals without one are omitted.
    pub fn points_for_year(&self, year: Year) -> Vec<(&CapitalRecord, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(&year).map(|v| (&r.capital, *v)))
            .collect()
    }

    /// Return a new dataset with `pairs` joined in as the `year` column.
    ///
    /// Inner join on exact state-name equality.
    pub fn with_year(&self, year: Year, pairs: &[(&str, f64)]) -> (Self, MergeOutcome) {
        let index: HashMap<&str, usize> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.capital.state.as_str(), i))
            .collect();

        let mut next = self.clone();
        let mut outcome = MergeOutcome {
            year,
            joined: 0,
            dropped: Vec::new(),
            year_max: None,
        };

        for (state, value) in pairs {
            let Some(&i) = index.get(state) else {
                outcome.dropped.push((*state).to_string());
                continue;
            };
            let row = &mut next.rows[i];
            if row.values.contains_key(&year) {
                outcome.dropped.push((*state).to_string());
                continue;
            }
            row.values.insert(year, *value);
            outcome.joined += 1;
            outcome.year_max = Some(outcome.year_max.map_or(*value, |m: f64| m.max(*value)));
        }

        (next, outcome)
    }
}

/// Final state of an aggregation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateSummary {
    /// Joined dataset.
    pub dataset: CountryDataset,
    /// Years whose fetch succeeded, ascending.
    pub years_with_data: Vec<Year>,
    /// Largest merged value over all years; `None` when nothing joined.
    pub global_max: Option<f64>,
}

/// Merges yearly fetches, in strictly ascending year order, into one dataset.
#[derive(Clone, Debug)]
pub struct MetricAggregator {
    dataset: CountryDataset,
    years_with_data: Vec<Year>,
    global_max: Option<f64>,
    last_year: Option<Year>,
}

impl MetricAggregator {
    /// Start from a dataset seeded by the capital registry.
    pub fn new(dataset: CountryDataset) -> Self {
        Self {
            dataset,
            years_with_data: Vec::new(),
            global_max: None,
            last_year: None,
        }
    }

    /// Merge one year's outcome.
    ///
    /// Failed fetches are skipped and return `Ok(None)`. A year not strictly after the previous
    /// one is rejected.
    pub fn merge(&mut self, fetch: &YearFetch) -> AtlasResult<Option<MergeOutcome>> {
        let year = fetch.year();
        if let Some(last) = self.last_year
            && year <= last
        {
            return Err(AtlasError::validation(format!(
                "years must be merged in ascending order: {year} after {last}"
            )));
        }
        self.last_year = Some(year);

        if !fetch.is_success() {
            return Ok(None);
        }

        let (next, outcome) = self.dataset.with_year(year, &fetch.pairs());
        self.dataset = next;
        self.years_with_data.push(year);
        if let Some(m) = outcome.year_max
            && self.global_max.is_none_or(|g| m > g)
        {
            self.global_max = Some(m);
        }

        if !outcome.dropped.is_empty() {
            tracing::warn!(
                year = year.0,
                dropped = ?outcome.dropped,
                "fetched states without a matching capital"
            );
        }
        if outcome.joined == 0 {
            tracing::warn!(year = year.0, "no fetched state matched a capital");
        }
        Ok(Some(outcome))
    }

    /// Current dataset.
    pub fn dataset(&self) -> &CountryDataset {
        &self.dataset
    }

    /// Years merged successfully so far, ascending.
    pub fn years_with_data(&self) -> &[Year] {
        &self.years_with_data
    }

    /// Current global maximum (never decreases).
    pub fn global_max(&self) -> Option<f64> {
        self.global_max
    }

    /// Finish the pass.
    pub fn finish(self) -> AggregateSummary {
        AggregateSummary {
            dataset: self.dataset,
            years_with_data: self.years_with_data,
            global_max: self.global_max,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/aggregate.rs"]
mod tests;
