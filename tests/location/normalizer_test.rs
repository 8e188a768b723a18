#[cfg(test)]
mod tests {
    use dermscan::{LocationNormalizer, LocationOverrides, LocationSlot};

    #[test]
    fn test_contiguous_run_maps_to_all_slots() {
        let overrides = LocationOverrides::new();
        for base in [1_i64, 50, 997] {
            let codes: Vec<i64> = (base..base + 4).collect();
            let normalizer = LocationNormalizer::for_visit("A52", codes.clone(), &overrides);

            let slots: Vec<Option<u8>> = codes.iter().map(|&c| normalizer.resolve(c).slot()).collect();
            assert_eq!(slots, vec![Some(1), Some(2), Some(3), Some(4)]);
        }
    }

    #[test]
    fn test_code_below_run_is_unresolved() {
        let overrides = LocationOverrides::new();
        let normalizer = LocationNormalizer::for_visit("A52", [50, 51, 52, 53], &overrides);

        assert_eq!(normalizer.resolve(49), LocationSlot::Unresolved { raw_code: 49 });
        assert_eq!(normalizer.resolve(54), LocationSlot::Unresolved { raw_code: 54 });
    }

    #[test]
    fn test_gap_in_run_leaves_low_code_unresolved() {
        let overrides = LocationOverrides::new();
        // 14 missing: the rule anchors on 16, so 12 falls out of range
        let normalizer = LocationNormalizer::for_visit("A99", [12, 13, 15, 16], &overrides);

        assert!(!normalizer.resolve(12).is_resolved());
        assert_eq!(normalizer.resolve(13), LocationSlot::Canonical(1));
        assert_eq!(normalizer.resolve(16), LocationSlot::Canonical(4));
    }

    #[test]
    fn test_override_subjects_bypass_arithmetic() {
        let overrides = LocationOverrides::study_defaults();
        for subject in overrides.subjects() {
            let codes = overrides.codes_for(subject);
            let normalizer = LocationNormalizer::for_visit(subject, codes.clone(), &overrides);
            assert!(normalizer.is_overridden());

            for code in codes {
                let slot = normalizer.resolve(code).slot().unwrap();
                assert!((1..=4).contains(&slot), "{subject} {code} -> {slot}");
            }
        }
    }

    #[test]
    fn test_override_resolves_gap_subject() {
        let overrides = LocationOverrides::study_defaults();
        let normalizer = LocationNormalizer::for_visit("A27", [12, 13, 15, 16], &overrides);

        assert_eq!(normalizer.resolve(12), LocationSlot::Canonical(1));
        assert_eq!(normalizer.resolve(15), LocationSlot::Canonical(3));
        assert_eq!(normalizer.resolve(14), LocationSlot::Unresolved { raw_code: 14 });
    }

    #[test]
    fn test_custom_override_table() {
        let mut overrides = LocationOverrides::new();
        overrides.insert("B01", 7, 2);
        let normalizer = LocationNormalizer::for_visit("B01", [7, 100], &overrides);

        assert_eq!(normalizer.resolve(7), LocationSlot::Canonical(2));
        assert!(!normalizer.resolve(100).is_resolved());
    }
}
