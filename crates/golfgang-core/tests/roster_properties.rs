//! Property tests for roster assignment.

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use golfgang_core::{Response, RosterAssigner, RsvpStatus};
use proptest::prelude::*;

prop_compose! {
    fn arb_responses()(entries in prop::collection::vec(
        (0u8..24, any::<bool>(), prop::option::of(0i64..10_000)),
        0..20,
    )) -> BTreeMap<String, Response> {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let mut responses = BTreeMap::new();
        for (index, available, minutes) in entries {
            let status = if available {
                RsvpStatus::Available
            } else {
                RsvpStatus::Unavailable
            };
            responses.insert(
                format!("user-{index:02}"),
                Response {
                    status,
                    preferences: None,
                    responded_at: minutes.map(|m| base + Duration::minutes(m)),
                },
            );
        }
        responses
    }
}

proptest! {
    #[test]
    fn every_responder_lands_in_one_bucket(responses in arb_responses(), capacity in 1usize..10) {
        let roster = RosterAssigner::with_capacity(capacity).unwrap().assign(&responses);

        let mut seen: Vec<&String> = roster
            .confirmed
            .iter()
            .chain(&roster.reserve)
            .chain(&roster.declined)
            .collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), responses.len());
        for user in seen {
            prop_assert!(responses.contains_key(user));
        }
    }

    #[test]
    fn confirmed_never_exceeds_capacity(responses in arb_responses(), capacity in 1usize..10) {
        let roster = RosterAssigner::with_capacity(capacity).unwrap().assign(&responses);
        prop_assert!(roster.confirmed.len() <= capacity);
        if roster.has_reserve() {
            prop_assert!(roster.is_full(), "nobody waits while a spot is open");
        }
    }

    #[test]
    fn assignment_is_a_pure_function(responses in arb_responses()) {
        let assigner = RosterAssigner::new();
        prop_assert_eq!(assigner.assign(&responses), assigner.assign(&responses));
    }

    #[test]
    fn queue_order_respects_response_time(responses in arb_responses(), capacity in 1usize..10) {
        let roster = RosterAssigner::with_capacity(capacity).unwrap().assign(&responses);

        let queue: Vec<&String> = roster.confirmed.iter().chain(&roster.reserve).collect();
        for pair in queue.windows(2) {
            let a = &responses[pair[0]];
            let b = &responses[pair[1]];
            let key_a = (a.responded_at.is_none(), a.responded_at, pair[0]);
            let key_b = (b.responded_at.is_none(), b.responded_at, pair[1]);
            prop_assert!(key_a <= key_b, "queue must order by response time then user id");
        }
    }
}
