#[cfg(test)]
mod tests {
    use crate::utils::{tag, triangle_curve};
    use dermscan::{
        BoundaryMethod, CurveAnalyzer, Epidermal, Modality, ScanLedger, SkinRoughness, Subject,
        SubjectReport, Visit,
    };
    use std::path::Path;

    fn subject() -> Subject {
        let (depth, intensity) = triangle_curve();
        let mut visit = Visit::new("A52", false, Path::new("A52_1_day1"), ScanLedger::empty());
        visit.add_epidermal(Epidermal::new(tag("A52_1_L50_S101.csv"), depth, intensity).unwrap());
        visit.add_skin_roughness(SkinRoughness::new(tag("A52_1_L50_S101.csv"), 1.0, 2.0, 3.0));
        Subject::new("A52", visit)
    }

    #[test]
    fn test_rows_before_analysis() {
        let report = SubjectReport::from_subject(&subject());

        assert_eq!(report.subject_id, "A52");
        assert!(!report.has_return_visit);
        assert_eq!(report.rows.len(), 2);

        let epidermal: Vec<_> = report.rows_for(Modality::Epidermal).collect();
        assert_eq!(epidermal.len(), 1);
        assert_eq!(epidermal[0].location, Some(1));
        assert!(epidermal[0].sid.is_none());

        let roughness: Vec<_> = report.rows_for(Modality::SkinRoughness).collect();
        assert_eq!(roughness[0].rq, Some(3.0));
    }

    #[test]
    fn test_rows_carry_biomarkers() {
        let mut subject = subject();
        let analyzer = CurveAnalyzer::default();
        for visit in subject.visits_mut() {
            visit.analyze_epidermal(&analyzer, BoundaryMethod::SignChange);
        }

        let report = SubjectReport::from_subject(&subject);
        let row = report.rows_for(Modality::Epidermal).next().unwrap();
        assert!(row.sid.is_some());
        assert!(row.auc.is_some());
        assert_eq!(row.depth_at_max_intensity, Some(0.5));

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["subject_id"], "A52");
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_analysis_failure_becomes_issue() {
        let mut visit = Visit::new("A52", false, Path::new("A52_1_day1"), ScanLedger::empty());
        visit.add_epidermal(
            Epidermal::new(tag("flat.csv"), vec![0.1, 0.2], vec![3.0, 3.0]).unwrap(),
        );
        let (depth, intensity) = triangle_curve();
        visit.add_epidermal(Epidermal::new(tag("ok.csv"), depth, intensity).unwrap());

        let analysed = visit.analyze_epidermal(&CurveAnalyzer::default(), BoundaryMethod::SignChange);
        assert_eq!(analysed, 1);
        assert_eq!(visit.issues.len(), 1);
        assert_eq!(visit.issues[0].kind, dermscan::IssueKind::DegenerateCurve);
    }
}
