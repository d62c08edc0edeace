use chrono::{DateTime, Utc};

use crate::schema::{ResultDocument, Stats, Summary, YearlyData};

/// Build the result document, stamped with the current time.
pub fn assemble(yearly: YearlyData, overall: Stats) -> ResultDocument {
    assemble_at(yearly, overall, Utc::now())
}

/// Build the result document with an explicit generation time.
pub fn assemble_at(
    yearly: YearlyData,
    overall: Stats,
    generated_at: DateTime<Utc>,
) -> ResultDocument {
    let years = yearly.keys().cloned().collect();
    ResultDocument {
        summary: Summary {
            years,
            overall_stats: overall,
            generated_at,
        },
        yearly_data: yearly,
    }
}
