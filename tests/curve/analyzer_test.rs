#[cfg(test)]
mod tests {
    use crate::utils::{tag, triangle_curve};
    use dermscan::algorithm::curve::boundary::{max_second_difference, sign_change};
    use dermscan::{BoundaryMethod, CurveAnalyzer, CurveConfig, Epidermal, StudyError};

    fn measurement(depth: Vec<f64>, intensity: Vec<f64>) -> Epidermal {
        Epidermal::new(tag("A52_1_L50_S101.csv"), depth, intensity).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_range() {
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(vec![0.1, 0.2, 0.3, 0.4, 0.5], vec![3.0, 5.0, 9.0, 4.0, 7.0]);

        let normalized = analyzer.normalize(&mut m).unwrap().to_vec();
        assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(normalized.iter().filter(|&&v| v == 0.0).count(), 1);
        assert_eq!(normalized.iter().filter(|&&v| v == 1.0).count(), 1);
        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[2], 1.0);
    }

    #[test]
    fn test_flat_curve_is_degenerate() {
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(vec![0.1, 0.2, 0.3], vec![4.0, 4.0, 4.0]);

        let err = analyzer.normalize(&mut m).unwrap_err();
        assert!(matches!(err, StudyError::DegenerateCurve { .. }));
        assert!(m.normalized().is_none());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = Epidermal::new(tag("x.csv"), vec![0.1, 0.2], vec![1.0]).unwrap_err();
        assert!(matches!(err, StudyError::InvalidCurve { .. }));
    }

    #[test]
    fn test_peak_first_occurrence() {
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(vec![0.1, 0.2, 0.3, 0.4], vec![1.0, 5.0, 5.0, 2.0]);

        analyzer.normalize(&mut m).unwrap();
        let depth = analyzer.locate_peak(&mut m).unwrap();
        assert!(approx(depth, 0.2));
        assert_eq!(m.analysis().peak_index, Some(1));
    }

    #[test]
    fn test_sign_change_detector() {
        let d = [-2.0, -1.0, 0.5, 1.0, -0.3];
        assert_eq!(sign_change(&d, 0, 250), Some(2));
        assert_eq!(sign_change(&d, 2, 250), None);
        assert_eq!(sign_change(&[1.0, 2.0, 3.0], 0, 250), None);
    }

    #[test]
    fn test_max_second_difference_detector() {
        let mut d = vec![0.0; 30];
        d[15] = -1.0;
        d[16] = 2.0;
        // The jump at 3..4 lies inside the head margin
        d[3] = -10.0;
        d[4] = 10.0;

        assert_eq!(max_second_difference(&d, 10, 10), Some(15));
        assert_eq!(max_second_difference(&d, 0, 0), Some(3));
        assert_eq!(max_second_difference(&d[..15], 10, 10), None);
    }

    #[test]
    fn test_attenuation_index_tie_takes_first() {
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(
            vec![0.1, 0.2, 0.3, 0.4, 0.5],
            vec![0.0, 0.2, 1.0, 0.2, 0.0],
        );

        analyzer.analyze(&mut m, BoundaryMethod::SignChange).unwrap();
        assert!(approx(m.sid().unwrap(), 4.0));
    }

    #[test]
    fn test_zero_depth_reference_is_invalid() {
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(vec![0.0, 0.1, 0.2], vec![0.2, 1.0, 0.0]);

        analyzer.normalize(&mut m).unwrap();
        analyzer.locate_peak(&mut m).unwrap();
        analyzer
            .detect_boundary(&mut m, BoundaryMethod::SignChange)
            .unwrap();
        let err = analyzer.attenuation_index(&mut m).unwrap_err();
        assert!(matches!(err, StudyError::InvalidCurve { .. }));
    }

    #[test]
    fn test_area_under_triangle() {
        let (depth, intensity) = triangle_curve();
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(depth, intensity);

        analyzer.analyze(&mut m, BoundaryMethod::SignChange).unwrap();
        assert!(approx(m.analysis().depth_at_max_intensity.unwrap(), 0.5));
        assert!(approx(m.auc().unwrap(), 0.16));
    }

    #[test]
    fn test_area_with_negative_window_stays_positive() {
        let (depth, intensity) = triangle_curve();
        let analyzer = CurveAnalyzer::new(CurveConfig::default().with_auc_window(-0.2));
        let mut m = measurement(depth, intensity);

        analyzer.analyze(&mut m, BoundaryMethod::SignChange).unwrap();
        let auc = m.auc().unwrap();
        assert!(auc >= 0.0);
        assert!(approx(auc, 0.16));
    }

    #[test]
    fn test_triangle_boundary_by_sign_change() {
        let (mut depth, mut intensity) = triangle_curve();
        // A second rise after the valley gives the derivative a sign change
        depth.extend((21..26).map(|i| f64::from(i) / 20.0));
        intensity.extend([0.1, 0.2, 0.3, 0.4, 0.5]);
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(depth, intensity);

        analyzer.analyze(&mut m, BoundaryMethod::SignChange).unwrap();
        let boundary = m.boundary().unwrap();
        assert_eq!(boundary.method, BoundaryMethod::SignChange);
        assert_eq!(boundary.index, Some(20));
        assert!(approx(boundary.depth.unwrap(), 1.0));
    }

    #[test]
    fn test_stage_order_enforced() {
        let analyzer = CurveAnalyzer::default();
        let (depth, intensity) = triangle_curve();
        let mut m = measurement(depth, intensity);

        assert!(matches!(
            analyzer.locate_peak(&mut m),
            Err(StudyError::StageNotReady { .. })
        ));
        analyzer.normalize(&mut m).unwrap();
        assert!(matches!(
            analyzer.detect_boundary(&mut m, BoundaryMethod::SignChange),
            Err(StudyError::StageNotReady { .. })
        ));
        analyzer.locate_peak(&mut m).unwrap();
        assert!(matches!(
            analyzer.area_under_curve(&mut m),
            Err(StudyError::StageNotReady { .. })
        ));
        assert!(matches!(
            analyzer.attenuation_index(&mut m),
            Err(StudyError::StageNotReady { .. })
        ));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let (depth, intensity) = triangle_curve();
        let analyzer = CurveAnalyzer::default();
        let mut m = measurement(depth, intensity);

        analyzer.analyze(&mut m, BoundaryMethod::MaxSecondDifference).unwrap();
        let first = m.analysis().clone();
        analyzer.analyze(&mut m, BoundaryMethod::MaxSecondDifference).unwrap();
        assert_eq!(m.analysis(), &first);
    }
}
