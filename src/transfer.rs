//! Bulk transfer of week definitions through a versioned JSON envelope
//!
//! Exports drop the lifecycle fields (id, status, progress): an imported week always starts
//! over as an empty draft. Dates travel as plain calendar dates and are re-read literally,
//! without any timezone normalization.

use std::error::Error;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::AuditSource;
use crate::week::{NewWeek, Plan, Week, WeekStatus};

/// The only envelope version this build reads and writes
pub const FORMAT_VERSION: &str = "1.0";

/// The envelope around an exported set of weeks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub weeks: Vec<ExportedWeek>,
}

/// One week definition inside an envelope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedWeek {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

/// How one envelope entry fared during an import
#[derive(Clone, Debug)]
pub enum ImportOutcome {
    Created(Week),
    Failed(String),
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            ImportOutcome::Created(_) => true,
            ImportOutcome::Failed(_) => false,
        }
    }
}

/// Wrap the given weeks into a fresh envelope
pub fn export_structure(weeks: &[Week]) -> ExportEnvelope {
    ExportEnvelope {
        version: FORMAT_VERSION.to_string(),
        exported_at: Utc::now(),
        weeks: weeks.iter()
            .map(|week| ExportedWeek {
                title: week.title().to_string(),
                description: week.description().map(String::from),
                start_date: week.start_date(),
                end_date: week.end_date(),
                plan: week.plan().cloned(),
            })
            .collect(),
    }
}

/// Create one week per envelope entry.
///
/// An unsupported envelope version is a hard error and nothing gets created. A failing
/// entry, on the other hand, does not abort the batch: every entry's outcome is recorded
/// independently, in input order.
pub async fn import_structure<S: AuditSource>(source: &mut S, envelope: &ExportEnvelope) -> Result<Vec<ImportOutcome>, Box<dyn Error>> {
    if envelope.version != FORMAT_VERSION {
        return Err(format!("Неподдерживаемая версия структуры: {}", envelope.version).into());
    }

    let mut outcomes = Vec::new();
    for entry in &envelope.weeks {
        let new_week = NewWeek {
            title: entry.title.clone(),
            description: entry.description.clone(),
            start_date: entry.start_date,
            end_date: entry.end_date,
            status: WeekStatus::Draft,
            progress: 0,
            plan: entry.plan.clone(),
        };

        match source.create_week(new_week).await {
            Ok(week) => outcomes.push(ImportOutcome::Created(week)),
            Err(err) => {
                log::warn!("Unable to import week \"{}\": {}", entry.title, err);
                outcomes.push(ImportOutcome::Failed(err.to_string()));
            },
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wire_format() {
        let json = r#"{
            "version": "1.0",
            "exported_at": "2024-03-10T08:00:00Z",
            "weeks": [
                {"title": "Неделя 1", "description": "Склад", "start_date": "2024-03-04", "end_date": "2024-03-08",
                 "plan": {"2024-03-04": ["инвентаризация"]}}
            ]
        }"#;

        let envelope: ExportEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.version, FORMAT_VERSION);
        assert_eq!(envelope.weeks.len(), 1);
        // dates are read literally, no timezone is applied
        assert_eq!(envelope.weeks[0].start_date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        let reparsed: ExportEnvelope = serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();
        assert_eq!(reparsed.weeks, envelope.weeks);
    }
}
