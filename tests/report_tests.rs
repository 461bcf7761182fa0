//! # Report Tests
//!
//! Localized reports built from analysis outcomes.

#[cfg(test)]
mod tests {
    use food_additives::localization::{create_localization_manager, LocalizationManager};
    use food_additives::reference_table::{
        bundled_reference_table, load_reference_table_or_empty, AdditiveRecord, ReferenceTable,
    };
    use food_additives::report::{render_scale, render_table, OutputFormat, Report, ReportStatus};
    use food_additives::text_processing::{analyze, AnalysisOutcome};
    
    fn setup() -> (LocalizationManager, ReferenceTable) {
        let l10n = create_localization_manager().expect("Failed to create localization manager");
        let table = ReferenceTable::from_records(vec![
            AdditiveRecord::new("e621", "monosodium glutamate", "4"),
            AdditiveRecord::new("e300", "ascorbic acid", "1"),
            AdditiveRecord::new("e999", "mystery additive", "9"),
        ]);
        (l10n, table)
    }

    #[test]
    fn test_report_with_matches() {
        let (l10n, table) = setup();
        let outcome = analyze("E 621, ascorbic acid", &table);

        let report = Report::build(&outcome, &table, "en", &l10n);
        assert_eq!(report.status, ReportStatus::Matches);
        assert_eq!(report.message, "Additives found: 2");
        assert_eq!(report.additives.len(), 2);

        let glutamate = &report.additives[0];
        assert_eq!(glutamate.code, "e621");
        assert_eq!(glutamate.color.as_deref(), Some("#FFCC66"));
        assert_eq!(glutamate.gauge_asset, Some("gauges/vertical_gauge_4.svg"));
        assert!(glutamate.description.contains("suspected"));

        let text = report.render_text(&l10n);
        assert!(text.contains("Food additive analysis"));
        assert!(text.contains("monosodium glutamate"));
        assert!(text.contains("ascorbic acid"));
    }

    #[test]
    fn test_unknown_severity_is_reported_not_looked_up() {
        let (l10n, table) = setup();
        let outcome = analyze("mystery additive", &table);

        let report = Report::build(&outcome, &table, "en", &l10n);
        let line = &report.additives[0];
        assert_eq!(line.severity_level, "9");
        assert_eq!(line.description, "Unknown severity level");
        assert!(line.color.is_none());
        assert!(line.gauge_asset.is_none());
    }

    #[test]
    fn test_empty_outcomes() {
        let (l10n, table) = setup();

        let report = Report::build(&AnalysisOutcome::NoInput, &table, "en", &l10n);
        assert_eq!(report.status, ReportStatus::NoInput);
        assert_eq!(report.message, "No ingredients were provided.");

        let report = Report::build(&analyze("sugar", &table), &table, "en", &l10n);
        assert_eq!(report.status, ReportStatus::NoMatches);
        assert!(report.additives.is_empty());
        assert!(!report.render_text(&l10n).contains("Code"));
    }

    #[test]
    fn test_empty_table_reports_no_reference_data() {
        let (l10n, _) = setup();
        let empty = ReferenceTable::default();

        let report = Report::build(&analyze("e621", &empty), &empty, "fr", &l10n);
        assert_eq!(report.status, ReportStatus::NoReferenceData);
        assert!(report.message.starts_with("Aucune donnée de référence"));
    }

    #[test]
    fn test_directory_table_reports_no_reference_data() {
        let (l10n, _) = setup();
        let dir = tempfile::tempdir().unwrap();
        let table = load_reference_table_or_empty(dir.path());

        let report = Report::build(&analyze("E 621", &table), &table, "en", &l10n);
        assert_eq!(report.status, ReportStatus::NoReferenceData);
        assert!(report.additives.is_empty());
    }

    #[test]
    fn test_json_rendering() {
        let (l10n, table) = setup();
        let report = Report::build(&analyze("e300", &table), &table, "en", &l10n);

        let json = report.render(OutputFormat::Json, &l10n).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "matches");
        assert_eq!(value["additives"][0]["code"], "e300");
        assert_eq!(value["additives"][0]["severity_level"], "1");
    }

    #[test]
    fn test_scale_rendering() {
        let (l10n, _) = setup();

        let text = render_scale("en", OutputFormat::Text, &l10n).unwrap();
        assert!(text.starts_with("Harmfulness scale"));
        assert!(text.contains("carcinogenic"));

        let json = render_scale("fr", OutputFormat::Json, &l10n).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 7);
        assert_eq!(value[0]["severity_level"], "0");
        assert_eq!(value[6]["color"], "#FF6666");
    }

    #[test]
    fn test_table_rendering() {
        let (l10n, _) = setup();
        let table = bundled_reference_table();

        let text = render_table(&table, "en", OutputFormat::Text, &l10n).unwrap();
        assert!(text.starts_with(&format!("Reference table ({} additives)", table.len())));
        assert!(text.contains("titanium dioxide"));

        let json = render_table(&table, "en", OutputFormat::Json, &l10n).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), table.len());
    }
}
