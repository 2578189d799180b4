use crate::acquire::grammar::{GrammarError, all_lines, parse_number, split_fields};
use crate::foundation::core::Year;
use crate::oracle::{Oracle, prompt};

/// Phrases that mark a reply as the oracle declining to answer (matched case-insensitively).
pub const FAILURE_PHRASES: [&str; 2] = ["unfortunately", "sorry"];

/// Multiplier applied to a value phrased in billions.
pub const BILLION_IN_MILLIONS: f64 = 1000.0;

/// One region's GDP for one year, always in millions of USD.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricRecord {
    /// Region name exactly as the oracle wrote it.
    pub state: String,
    /// Year of the value.
    pub year: Year,
    /// GDP in millions of USD.
    pub value_million_usd: f64,
}

/// Why a year produced no data.
///
/// Never escapes the per-year boundary; the year is simply dropped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// The oracle declined (reply contained a failure phrase).
    #[error("oracle declined: '{excerpt}'")]
    Declined {
        /// Start of the reply, for diagnosis.
        excerpt: String,
    },

    /// The reply did not follow `state:value` lines.
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// The reply parsed but held no records.
    #[error("reply held no records")]
    Empty,

    /// The oracle request itself failed.
    #[error("oracle request failed: {0}")]
    Oracle(String),
}

impl From<GrammarError> for FetchFailure {
    fn from(e: GrammarError) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// Outcome of one year's fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum YearFetch {
    /// Parsed records, in reply order.
    Fetched {
        /// Year queried.
        year: Year,
        /// Parsed values.
        records: Vec<MetricRecord>,
    },
    /// The year is dropped.
    Failed {
        /// Year queried.
        year: Year,
        /// Reason, for reporting.
        failure: FetchFailure,
    },
}

impl YearFetch {
    /// Year this outcome belongs to.
    pub fn year(&self) -> Year {
        match self {
            Self::Fetched { year, .. } | Self::Failed { year, .. } => *year,
        }
    }

    /// `true` when the year produced records.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }

    /// `(state, value_million_usd)` pairs; empty on failure.
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        match self {
            Self::Fetched { records, .. } => records
                .iter()
                .map(|r| (r.state.as_str(), r.value_million_usd))
                .collect(),
            Self::Failed { .. } => Vec::new(),
        }
    }
}

/// Fetch and parse one year of per-region GDP.
///
/// Every problem, including the oracle request failing, becomes [`YearFetch::Failed`].
#[tracing::instrument(skip(oracle, year), fields(year = year.0))]
pub fn fetch_year(oracle: &dyn Oracle, country: &str, year: Year) -> YearFetch {
    let parsed = oracle
        .query(&prompt::yearly_gdp_prompt(country, year))
        .map_err(|e| FetchFailure::Oracle(e.to_string()))
        .and_then(|reply| {
            parse_year_reply(&reply).inspect_err(|_| {
                tracing::debug!(reply = %reply, "unusable reply");
            })
        });

    match parsed {
        Ok(pairs) => YearFetch::Fetched {
            year,
            records: pairs
                .into_iter()
                .map(|(state, value_million_usd)| MetricRecord {
                    state,
                    year,
                    value_million_usd,
                })
                .collect(),
        },
        Err(failure) => {
            tracing::warn!(reason = %failure, "year dropped");
            YearFetch::Failed { year, failure }
        }
    }
}

/// Parse a `state:value` reply into `(state, value_million_usd)` pairs.
///
/// Every line of the trimmed reply is a record, so a blank line inside the reply is malformed.
/// Unit words are stripped from the value field only; a value phrased in billions is scaled to
/// millions.
pub fn parse_year_reply(reply: &str) -> Result<Vec<(String, f64)>, FetchFailure> {
    let reply = reply.trim();
    let lower = reply.to_lowercase();
    if FAILURE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Err(FetchFailure::Declined {
            excerpt: reply.chars().take(80).collect(),
        });
    }
    if reply.is_empty() {
        return Err(FetchFailure::Empty);
    }

    let mut pairs = Vec::new();
    for (line_no, line) in all_lines(reply) {
        let f = split_fields(line_no, line, 2)?;
        if f[0].is_empty() {
            return Err(FetchFailure::Malformed(format!(
                "line {line_no}: empty state name"
            )));
        }

        let (numeric, billion) = strip_units(f[1]);
        let value = parse_number(line_no, &numeric)?;
        if value < 0.0 {
            return Err(FetchFailure::Malformed(format!(
                "line {line_no}: negative value {value}"
            )));
        }
        let scale = if billion { BILLION_IN_MILLIONS } else { 1.0 };
        pairs.push((f[0].to_string(), value * scale));
    }

    Ok(pairs)
}

fn strip_units(field: &str) -> (String, bool) {
    let lower = field.to_lowercase();
    let billion = lower.contains("billion");
    let cleaned = lower
        .replace("billion", "")
        .replace("million", "")
        .replace("usd", "")
        .replace('$', "");
    (cleaned, billion)
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/metrics.rs"]
mod tests;
