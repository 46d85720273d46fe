//! `.ts1` hydrograph file parsing.
//!
//! DRAINS-exported time series: metadata lines, then a header line starting
//! with `Time (min)`, then CSV rows of time plus one flow column per
//! catchment (m³/s). Catchment flows are summed into a single inflow
//! series. Comment lines start with `!` or `#`.

use sf_storm::{StormError, StormSeries};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Ts1Error {
    #[error("No 'Time (min)' header line found")]
    MissingHeader,

    #[error("No data rows after the header")]
    NoData,

    #[error(transparent)]
    Storm(#[from] StormError),
}

pub fn parse_ts1(content: &str) -> Result<StormSeries, Ts1Error> {
    let mut lines = content.lines();
    lines
        .by_ref()
        .find(|line| line.trim_start().to_ascii_lowercase().starts_with("time"))
        .ok_or(Ts1Error::MissingHeader)?;

    let mut pairs = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(',');
        let Some(time) = fields.next().and_then(|f| f.trim().parse::<f64>().ok()) else {
            continue;
        };
        let mut total_flow = 0.0;
        let mut any_flow = false;
        for field in fields {
            if let Ok(flow) = field.trim().parse::<f64>() {
                total_flow += flow;
                any_flow = true;
            }
        }
        if any_flow {
            pairs.push((time, total_flow));
        }
    }

    if pairs.is_empty() {
        return Err(Ts1Error::NoData);
    }
    Ok(StormSeries::from_pairs(pairs)?)
}
