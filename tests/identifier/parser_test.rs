#[cfg(test)]
mod tests {
    use dermscan::{FilenameShape, IdentifierParser, StudyConfig, StudyError};
    use std::path::Path;

    #[test]
    fn test_standard_shape() {
        let parser = IdentifierParser::default();
        let parsed = parser
            .parse(Path::new("/study/A52_1_day1/Epidermal/A52_1_L50_S101.csv"))
            .unwrap();

        assert_eq!(parsed.subject_id, "A52");
        assert_eq!(parsed.data_location, "L50");
        assert_eq!(parsed.scan_id, 101);
        assert_eq!(parsed.arm_id, "1");
        assert_eq!(parsed.raw_location, 50);
        assert_eq!(parsed.shape, FilenameShape::Standard);
    }

    #[test]
    fn test_location_tagged_shape() {
        let parser = IdentifierParser::default();
        let parsed = parser
            .parse(Path::new("A52_2_forearm_L53_S201 repeat.csv"))
            .unwrap();

        assert_eq!(parsed.shape, FilenameShape::LocationTagged);
        assert_eq!(parsed.data_location, "forearm");
        assert_eq!(parsed.scan_id, 201);
        assert_eq!(parsed.raw_location, 53);
        assert_eq!(parsed.arm_id, "2");
    }

    #[test]
    fn test_return_visit_is_closed_classification() {
        let parser = IdentifierParser::default();
        assert!(parser.is_return_visit(Path::new("A52_2_day2")));
        assert!(!parser.is_return_visit(Path::new("A52_1_day1")));
        assert!(!parser.is_return_visit(Path::new("A52_x")));
        assert!(!parser.is_return_visit(Path::new("A52")));
    }

    #[test]
    fn test_custom_return_marker() {
        let config = StudyConfig::default().with_return_visit_marker("R");
        let parser = IdentifierParser::from_config(&config);
        assert!(parser.is_return_visit(Path::new("A52_R_day2")));
        assert!(!parser.is_return_visit(Path::new("A52_2_day2")));
    }

    #[test]
    fn test_arm_id_drops_space_suffix() {
        let parser = IdentifierParser::default();
        let arm = parser.arm_id(Path::new("A52_left arm_L50_S101.csv")).unwrap();
        assert_eq!(arm, "left");
    }

    #[test]
    fn test_location_code_ignores_other_letter_codes() {
        let parser = IdentifierParser::default();
        let code = parser.location_id(Path::new("A52_1_X9_L51_S102.csv")).unwrap();
        assert_eq!(code, 51);
    }

    #[test]
    fn test_malformed_names() {
        let parser = IdentifierParser::default();

        for name in ["A52_1_L50.csv", "A52_1_L50_Sabc.csv", "A52_1_x_S101.csv"] {
            let err = parser.parse(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, StudyError::MalformedIdentifier { .. }),
                "{name}: {err}"
            );
            assert_eq!(err.path(), Path::new(name));
        }
    }
}
