#[cfg(test)]
mod tests {
    use crate::utils::{MemorySheets, write_file};
    use dermscan::{ExposureState, FsTableSource, IssueKind, ScanLedger, StudyConfig, StudyError};
    use std::path::Path;

    #[test]
    fn test_exposure_partition() {
        let ledger = ScanLedger::new(&[(101, 50), (102, 51)], &[(201, 52), (202, 53)]);

        for scan in [101, 102] {
            assert_eq!(ledger.classify(scan), ExposureState::Pre);
        }
        for scan in [201, 202] {
            assert_eq!(ledger.classify(scan), ExposureState::Post);
        }
        for scan in [0, 103, 999] {
            assert_eq!(ledger.classify(scan), ExposureState::Unknown);
        }
        assert_eq!(ledger.location_code(202), Some(53));
        assert!(ledger.contradictions().is_empty());
    }

    #[test]
    fn test_contradiction_resolves_to_before() {
        let ledger = ScanLedger::new(&[(101, 50), (102, 51)], &[(102, 51), (201, 52)]);

        assert_eq!(ledger.classify(102), ExposureState::Pre);
        assert_eq!(ledger.contradictions(), &[102]);

        let issues = ledger.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ScanLedgerContradiction);
    }

    #[test]
    fn test_empty_ledger_classifies_unknown() {
        let ledger = ScanLedger::empty();
        assert!(ledger.is_empty());
        assert_eq!(ledger.classify(101), ExposureState::Unknown);
    }

    #[test]
    fn test_from_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Scan_Info_A52.xlsx", "");
        let config = StudyConfig::default();
        let source = MemorySheets::new()
            .with_sheet("Scan_Info_A52.xlsx", &config.before_exposure_sheet, &[(101, 50)])
            .with_sheet("Scan_Info_A52.xlsx", &config.after_exposure_sheet, &[(201, 50)]);

        let ledger = ScanLedger::from_spreadsheet(&source, &path, &config).unwrap();
        assert_eq!(ledger.source(), Some(path.as_path()));
        assert_eq!(ledger.classify(101), ExposureState::Pre);
        assert_eq!(ledger.classify(201), ExposureState::Post);
    }

    #[test]
    fn test_ragged_sheet_keeps_every_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Scan_Info_A52.xlsx", "");
        let config = StudyConfig::default();
        let source = MemorySheets::new()
            .with_ragged_sheet(
                "Scan_Info_A52.xlsx",
                &config.before_exposure_sheet,
                &[(Some(101), Some(50)), (Some(102), None), (None, Some(52)), (Some(103), Some(53))],
            )
            .with_sheet("Scan_Info_A52.xlsx", &config.after_exposure_sheet, &[(201, 51)]);

        let ledger = ScanLedger::from_spreadsheet(&source, &path, &config).unwrap();

        for scan in [101, 102, 103] {
            assert_eq!(ledger.classify(scan), ExposureState::Pre);
        }
        assert_eq!(ledger.classify(201), ExposureState::Post);
        assert_eq!(ledger.location_code(101), Some(50));
        assert_eq!(ledger.location_code(102), None);
        assert_eq!(ledger.location_code(103), Some(53));
        assert_eq!(ledger.before().len(), 3);

        let issues = ledger.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::IncompleteLedgerRow);
        assert_eq!(issues[0].path, path);
        assert!(issues[0].reason.contains("102"));
    }

    #[test]
    fn test_from_workbook_on_disk() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scan_info.xlsx");
        let ledger =
            ScanLedger::from_spreadsheet(&FsTableSource, &path, &StudyConfig::default()).unwrap();

        assert_eq!(ledger.classify(102), ExposureState::Pre);
        assert_eq!(ledger.classify(202), ExposureState::Post);
        assert_eq!(ledger.location_code(201), Some(51));
        assert_eq!(ledger.location_code(102), None);
        assert_eq!(ledger.before().len(), 3);
        assert_eq!(ledger.after().len(), 2);
        assert_eq!(
            ledger.issues().iter().map(|i| i.kind).collect::<Vec<_>>(),
            vec![IssueKind::IncompleteLedgerRow]
        );
    }

    #[test]
    fn test_missing_sheet_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Scan_Info_A52.xlsx", "");
        let config = StudyConfig::default();
        let source =
            MemorySheets::new().with_sheet("Scan_Info_A52.xlsx", &config.before_exposure_sheet, &[]);

        let err = ScanLedger::from_spreadsheet(&source, &path, &config).unwrap_err();
        assert!(matches!(err, StudyError::Spreadsheet { .. }));
        assert_eq!(err.kind(), IssueKind::UnreadableSpreadsheet);
    }
}
