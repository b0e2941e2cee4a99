//! Ordering and fan-out properties of the router over generated call sequences.

#[cfg(test)]
mod tests {
    use crate::core::LaneSet;
    use crate::errors::LaneError;
    use crate::router::LaneRouter;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const LANES: [&str; 4] = ["a", "b", "c", "d"];

    /// Picks one to three distinct lanes, occasionally including an unknown one.
    fn pick_lanes(rng: &mut StdRng, allow_unknown: bool) -> Vec<&'static str> {
        let count = rng.gen_range(1..=3);
        let mut lanes: Vec<&'static str> = LANES.choose_multiple(rng, count).copied().collect();
        if allow_unknown && rng.gen_bool(0.2) {
            let at = rng.gen_range(0..=lanes.len());
            lanes.insert(at, "zzz");
        }
        lanes
    }

    #[test]
    fn test_lane_order_matches_call_order() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut router = LaneRouter::<u32>::new(LaneSet::new(LANES));
            let mut expected: BTreeMap<String, Vec<u32>> = BTreeMap::new();

            for id in 0..200 {
                let lanes = pick_lanes(&mut rng, false);
                router.add_record(id, lanes.as_slice()).unwrap();
                for lane in lanes {
                    expected.entry(lane.to_string()).or_default().push(id);
                }
            }

            let actual: BTreeMap<String, Vec<u32>> = router
                .into_snapshot()
                .into_iter()
                .map(|(lane, records)| (lane, records.iter().map(|r| **r).collect()))
                .collect();
            assert_eq!(actual, expected, "seed {seed}");
        }
    }

    #[test]
    fn test_rejected_calls_never_partially_apply() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut router = LaneRouter::<u32>::new(LaneSet::new(LANES));
            let mut accepted = 0;
            let mut rejected = 0;

            for id in 0..200 {
                let lanes = pick_lanes(&mut rng, true);
                let before = router.record_count();
                match router.add_record(id, lanes.as_slice()) {
                    Ok(()) => {
                        accepted += 1;
                        assert_eq!(router.record_count(), before + lanes.len());
                    }
                    Err(LaneError::Unknown(err)) => {
                        rejected += 1;
                        assert_eq!(err.lane, "zzz");
                        assert_eq!(router.record_count(), before);
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }

            assert!(accepted > 0 && rejected > 0, "seed {seed}");
            let snapshot = router.snapshot();
            assert!(snapshot.lanes().all(|lane| LANES.contains(&lane)));
            assert!(snapshot.iter().all(|(_, records)| !records.is_empty()));
        }
    }

    #[test]
    fn test_fan_out_shares_one_allocation() {
        let mut router = LaneRouter::<String>::new(LaneSet::new(LANES));
        let record = Arc::new("shared".to_string());

        router.add_record(Arc::clone(&record), &LANES).unwrap();

        let snapshot = router.into_snapshot();
        for lane in LANES {
            assert!(Arc::ptr_eq(&snapshot.get(lane).unwrap()[0], &record));
        }
        assert_eq!(Arc::strong_count(&record), 1 + LANES.len());
    }

    #[test]
    fn test_ambiguous_emit_leaves_lanes_untouched() {
        let mut router = LaneRouter::<u32>::new(LaneSet::new(["a", "b"]));
        router.add_record(1, &["a"]).unwrap();

        assert!(matches!(router.emit(2), Err(LaneError::AmbiguousDefault(_))));
        assert_eq!(router.lane_len("a"), 1);
        assert_eq!(router.record_count(), 1);
    }
}
