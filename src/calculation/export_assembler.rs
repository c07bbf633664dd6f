//! Export report assembly.
//!
//! This module turns a set of attendance records into an ordered [`Report`]
//! by filtering them, computing clamped hours per record, joining volunteer
//! identity and attaching tier information where a record names a tier.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceTier, ExportFilter, ExportRow, ExportWarning,
    InvalidRangePolicy, Report, ReportSummary, VolunteerDirectory,
};

use super::hours::{DEFAULT_MAX_HOURS, compute_hours};
use super::tier_table::TierTable;

/// Warning code for records dropped because check-out precedes check-in.
pub const WARNING_INVALID_TIME_RANGE: &str = "INVALID_TIME_RANGE";

/// Warning code for records whose volunteer is missing from the directory.
pub const WARNING_UNKNOWN_VOLUNTEER: &str = "UNKNOWN_VOLUNTEER";

/// Assembles export reports from attendance records.
///
/// # Example
///
/// ```
/// use volunteer_attendance::calculation::{ExportAssembler, reference_table};
/// use volunteer_attendance::models::{ExportFilter, VolunteerDirectory};
///
/// let directory = VolunteerDirectory::new();
/// let assembler = ExportAssembler::new(reference_table(), &directory);
///
/// let report = assembler.build_report(&[], &ExportFilter::default()).unwrap();
/// assert!(report.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ExportAssembler<'a> {
    tiers: &'a TierTable,
    directory: &'a VolunteerDirectory,
    max_hours: Decimal,
    policy: InvalidRangePolicy,
}

impl<'a> ExportAssembler<'a> {
    /// Creates an assembler using [`DEFAULT_MAX_HOURS`] and aborting on
    /// invalid time ranges.
    pub fn new(tiers: &'a TierTable, directory: &'a VolunteerDirectory) -> Self {
        Self {
            tiers,
            directory,
            max_hours: DEFAULT_MAX_HOURS,
            policy: InvalidRangePolicy::default(),
        }
    }

    /// Sets the ceiling applied to each record's hours.
    pub fn with_max_hours(mut self, max_hours: Decimal) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Sets what happens to records whose check-out precedes check-in.
    pub fn with_policy(mut self, policy: InvalidRangePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds a report from `records` selected by `filter`.
    ///
    /// Rows are ordered by date, then volunteer last name, first name and id,
    /// then check-in, check-out, activity and tier number, and numbered from 1
    /// after ordering. No matching records
    /// yields an empty report.
    ///
    /// # Errors
    ///
    /// - `InvalidTimeRange` for the first record whose check-out precedes its
    ///   check-in, under [`InvalidRangePolicy::Abort`]
    /// - `InvalidConfig` if the assembler's maximum hours is negative
    pub fn build_report(
        &self,
        records: &[AttendanceRecord],
        filter: &ExportFilter,
    ) -> EngineResult<Report> {
        let mut rows: Vec<ExportRow> = Vec::new();
        let mut warnings: Vec<ExportWarning> = Vec::new();
        let mut resolved_tiers: HashMap<i64, &AttendanceTier> = HashMap::new();
        let mut unknown_volunteers: HashSet<&str> = HashSet::new();
        let mut matched_records = 0;
        let mut skipped_records = 0;

        for record in records.iter().filter(|r| filter.matches(r)) {
            matched_records += 1;

            let computed = compute_hours(record.check_in, record.check_out, self.max_hours);
            let hours_worked = match computed {
                Ok(hours) => hours,
                Err(err @ EngineError::InvalidTimeRange { .. }) => match self.policy {
                    InvalidRangePolicy::Abort => {
                        warn!(
                            volunteer_id = %record.volunteer_id,
                            date = %record.date,
                            "Aborting export on invalid time range"
                        );
                        return Err(err);
                    }
                    InvalidRangePolicy::Skip => {
                        debug!(
                            volunteer_id = %record.volunteer_id,
                            date = %record.date,
                            "Skipping record with invalid time range"
                        );
                        skipped_records += 1;
                        warnings.push(ExportWarning {
                            code: WARNING_INVALID_TIME_RANGE.to_string(),
                            message: err.to_string(),
                            volunteer_id: Some(record.volunteer_id.clone()),
                            date: Some(record.date),
                        });
                        continue;
                    }
                },
                Err(err) => return Err(err),
            };

            let (first_name, last_name) = match self.directory.get(&record.volunteer_id) {
                Some(volunteer) => (volunteer.first_name.clone(), volunteer.last_name.clone()),
                None => {
                    if unknown_volunteers.insert(record.volunteer_id.as_str()) {
                        warnings.push(ExportWarning {
                            code: WARNING_UNKNOWN_VOLUNTEER.to_string(),
                            message: format!(
                                "Volunteer '{}' is not in the directory",
                                record.volunteer_id
                            ),
                            volunteer_id: Some(record.volunteer_id.clone()),
                            date: None,
                        });
                    }
                    (String::new(), String::new())
                }
            };

            let tier = record.tier.map(|number| {
                let tier = *resolved_tiers
                    .entry(number)
                    .or_insert_with(|| self.tiers.resolve(number));
                tier.clone()
            });
            let tier_met = tier.as_ref().map(|t| t.is_met_by(hours_worked));

            rows.push(ExportRow {
                index: 0,
                volunteer_id: record.volunteer_id.clone(),
                first_name,
                last_name,
                activity: record.activity.clone(),
                date: record.date,
                check_in: record.check_in,
                check_out: record.check_out,
                hours_worked,
                tier,
                tier_met,
            });
        }

        rows.sort_by(compare_rows);
        for (position, row) in rows.iter_mut().enumerate() {
            row.index = position + 1;
        }

        let total_hours: Decimal = rows.iter().map(|r| r.hours_worked).sum();
        let summary = ReportSummary {
            total_records: records.len(),
            matched_records,
            exported_rows: rows.len(),
            skipped_records,
            total_hours,
        };

        info!(
            total_records = summary.total_records,
            matched_records = summary.matched_records,
            exported_rows = summary.exported_rows,
            skipped_records = summary.skipped_records,
            total_hours = %summary.total_hours.normalize(),
            "Export report assembled"
        );

        Ok(Report {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            filter: filter.clone(),
            rows,
            summary,
            warnings,
        })
    }
}

fn compare_rows(a: &ExportRow, b: &ExportRow) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.last_name.cmp(&b.last_name))
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.volunteer_id.cmp(&b.volunteer_id))
        .then_with(|| a.check_in.cmp(&b.check_in))
        .then_with(|| a.check_out.cmp(&b.check_out))
        .then_with(|| a.activity.cmp(&b.activity))
        .then_with(|| tier_number(a).cmp(&tier_number(b)))
}

fn tier_number(row: &ExportRow) -> Option<u32> {
    row.tier.as_ref().map(|t| t.tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::reference_table;
    use crate::models::Volunteer;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_record(
        volunteer_id: &str,
        date: &str,
        check_in: &str,
        check_out: &str,
    ) -> AttendanceRecord {
        AttendanceRecord {
            volunteer_id: volunteer_id.to_string(),
            date: make_date(date),
            check_in: make_datetime(date, check_in),
            check_out: make_datetime(date, check_out),
            tier: None,
            activity: None,
        }
    }

    fn create_test_directory() -> VolunteerDirectory {
        [
            ("vol_001", "Ada", "Lovelace"),
            ("vol_002", "Grace", "Hopper"),
            ("vol_003", "Alan", "Turing"),
            ("vol_004", "Edsger", "Dijkstra"),
        ]
        .into_iter()
        .map(|(id, first, last)| Volunteer {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        })
        .collect()
    }

    #[test]
    fn test_empty_records_give_empty_report() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let filter = ExportFilter {
            start_date: Some(make_date("2026-03-01")),
            end_date: Some(make_date("2026-03-31")),
            volunteer_ids: vec!["vol_001".to_string()],
            activity: Some("Garden".to_string()),
        };

        let report = assembler.build_report(&[], &filter).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.summary.total_records, 0);
        assert_eq!(report.summary.total_hours, Decimal::ZERO);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_no_matches_give_empty_report() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![make_record("vol_001", "2026-02-10", "09:00:00", "12:00:00")];
        let filter = ExportFilter {
            start_date: Some(make_date("2026-03-01")),
            ..ExportFilter::default()
        };

        let report = assembler.build_report(&records, &filter).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.summary.total_records, 1);
        assert_eq!(report.summary.matched_records, 0);
    }

    #[test]
    fn test_rows_ordered_by_date_then_name() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_003", "2026-03-03", "09:00:00", "12:00:00"), // Turing
            make_record("vol_001", "2026-03-03", "09:00:00", "12:00:00"), // Lovelace
            make_record("vol_002", "2026-03-02", "09:00:00", "12:00:00"), // Hopper
            make_record("vol_004", "2026-03-03", "09:00:00", "12:00:00"), // Dijkstra
        ];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        let order: Vec<(&str, usize)> = report
            .rows
            .iter()
            .map(|r| (r.last_name.as_str(), r.index))
            .collect();
        assert_eq!(
            order,
            vec![("Hopper", 1), ("Dijkstra", 2), ("Lovelace", 3), ("Turing", 4)]
        );
    }

    #[test]
    fn test_same_volunteer_same_day_ordered_by_check_in() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_001", "2026-03-02", "14:00:00", "16:00:00"),
            make_record("vol_001", "2026-03-02", "08:00:00", "10:00:00"),
        ];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        assert_eq!(
            report.rows[0].check_in,
            make_datetime("2026-03-02", "08:00:00")
        );
        assert_eq!(
            report.rows[1].check_in,
            make_datetime("2026-03-02", "14:00:00")
        );
    }

    #[test]
    fn test_hours_clamped_and_totalled() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_001", "2026-03-02", "09:00:00", "21:00:00"),
            make_record("vol_002", "2026-03-02", "09:00:00", "11:30:00"),
        ];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        let hopper = &report.rows[0];
        let lovelace = &report.rows[1];
        assert_eq!(hopper.hours_worked, dec("2.5"));
        assert_eq!(lovelace.hours_worked, dec("8"));
        assert_eq!(report.summary.total_hours, dec("10.5"));
    }

    #[test]
    fn test_custom_max_hours() {
        let directory = create_test_directory();
        let assembler =
            ExportAssembler::new(reference_table(), &directory).with_max_hours(dec("4"));
        let records = vec![make_record("vol_001", "2026-03-02", "09:00:00", "17:00:00")];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        assert_eq!(report.rows[0].hours_worked, dec("4"));
    }

    #[test]
    fn test_tier_attached_only_when_record_names_one() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let mut with_tier = make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00");
        with_tier.tier = Some(4);
        let without_tier = make_record("vol_002", "2026-03-02", "09:00:00", "12:00:00");

        let report = assembler
            .build_report(&[with_tier, without_tier], &ExportFilter::default())
            .unwrap();

        let hopper = &report.rows[0];
        assert!(hopper.tier.is_none());
        assert!(hopper.tier_met.is_none());

        let lovelace = &report.rows[1];
        assert_eq!(lovelace.tier.as_ref().unwrap().tier, 4);
        assert_eq!(lovelace.tier_met, Some(false));
    }

    #[test]
    fn test_unknown_tier_falls_back_to_default() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let mut record = make_record("vol_001", "2026-03-02", "09:00:00", "17:00:00");
        record.tier = Some(99);

        let report = assembler
            .build_report(&[record], &ExportFilter::default())
            .unwrap();

        assert_eq!(report.rows[0].tier.as_ref().unwrap().tier, 6);
        assert_eq!(report.rows[0].tier_met, Some(true));
    }

    #[test]
    fn test_invalid_range_aborts_by_default() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00"),
            make_record("vol_002", "2026-03-02", "17:00:00", "09:00:00"),
        ];

        let result = assembler.build_report(&records, &ExportFilter::default());

        assert!(matches!(result, Err(EngineError::InvalidTimeRange { .. })));
    }

    #[test]
    fn test_invalid_range_skipped_with_warning() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory)
            .with_policy(InvalidRangePolicy::Skip);
        let records = vec![
            make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00"),
            make_record("vol_002", "2026-03-02", "17:00:00", "09:00:00"),
        ];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].volunteer_id, "vol_001");
        assert_eq!(report.summary.matched_records, 2);
        assert_eq!(report.summary.skipped_records, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, WARNING_INVALID_TIME_RANGE);
        assert_eq!(report.warnings[0].volunteer_id.as_deref(), Some("vol_002"));
    }

    #[test]
    fn test_invalid_range_outside_filter_is_ignored() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00"),
            make_record("vol_002", "2026-04-02", "17:00:00", "09:00:00"),
        ];
        let filter = ExportFilter {
            end_date: Some(make_date("2026-03-31")),
            ..ExportFilter::default()
        };

        let report = assembler.build_report(&records, &filter).unwrap();

        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn test_unknown_volunteer_warned_once() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_999", "2026-03-02", "09:00:00", "12:00:00"),
            make_record("vol_999", "2026-03-03", "09:00:00", "12:00:00"),
        ];

        let report = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();

        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.last_name.is_empty()));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, WARNING_UNKNOWN_VOLUNTEER);
    }

    #[test]
    fn test_filter_by_volunteer_and_activity() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let mut garden = make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00");
        garden.activity = Some("Garden".to_string());
        let mut kitchen = make_record("vol_001", "2026-03-03", "09:00:00", "12:00:00");
        kitchen.activity = Some("Kitchen".to_string());
        let mut other = make_record("vol_002", "2026-03-02", "09:00:00", "12:00:00");
        other.activity = Some("Garden".to_string());
        let filter = ExportFilter {
            volunteer_ids: vec!["vol_001".to_string()],
            activity: Some("garden".to_string()),
            ..ExportFilter::default()
        };

        let report = assembler
            .build_report(&[garden, kitchen, other], &filter)
            .unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].activity.as_deref(), Some("Garden"));
        assert_eq!(report.rows[0].volunteer_id, "vol_001");
    }

    #[test]
    fn test_rows_are_deterministic_across_input_order() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let records = vec![
            make_record("vol_003", "2026-03-03", "09:00:00", "12:00:00"),
            make_record("vol_001", "2026-03-02", "10:00:00", "12:00:00"),
            make_record("vol_002", "2026-03-03", "09:00:00", "17:00:00"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let first = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();
        let second = assembler
            .build_report(&reversed, &ExportFilter::default())
            .unwrap();

        assert_eq!(first.rows, second.rows);
        assert_ne!(first.report_id, second.report_id);
    }

    #[test]
    fn test_tied_check_ins_order_by_check_out_then_activity() {
        let directory = create_test_directory();
        let assembler = ExportAssembler::new(reference_table(), &directory);
        let mut garden = make_record("vol_001", "2026-03-02", "09:00:00", "12:00:00");
        garden.activity = Some("Garden".to_string());
        let mut kitchen = make_record("vol_001", "2026-03-02", "09:00:00", "10:00:00");
        kitchen.activity = Some("Kitchen".to_string());
        let mut pantry = make_record("vol_001", "2026-03-02", "09:00:00", "10:00:00");
        pantry.activity = Some("Pantry".to_string());
        let mut tiered = make_record("vol_001", "2026-03-02", "09:00:00", "10:00:00");
        tiered.activity = Some("Pantry".to_string());
        tiered.tier = Some(1);

        let records = vec![garden, kitchen, pantry, tiered];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = assembler
            .build_report(&records, &ExportFilter::default())
            .unwrap();
        let backward = assembler
            .build_report(&reversed, &ExportFilter::default())
            .unwrap();

        assert_eq!(forward.rows, backward.rows);
        let order: Vec<(Option<&str>, Option<u32>)> = forward
            .rows
            .iter()
            .map(|r| (r.activity.as_deref(), r.tier.as_ref().map(|t| t.tier)))
            .collect();
        assert_eq!(
            order,
            vec![
                (Some("Kitchen"), None),
                (Some("Pantry"), None),
                (Some("Pantry"), Some(1)),
                (Some("Garden"), None),
            ]
        );
    }
}
