//! Progress derivation over checklist state.
//!
//! Pure functions: same inputs, same outputs, no I/O. The session layer
//! calls these after every mutation and stores the results in the
//! snapshot's `progress_data` cache.

use std::collections::BTreeSet;

use hometrack_core::{checklist, steps, ChecklistState, JourneyType};

/// Whether every checklist item of a step is checked.
///
/// A step with no checklist items is vacuously complete. Note the
/// asymmetry with [`overall_progress`], where a zero-item step
/// contributes nothing to the percentage.
pub fn is_step_complete(journey: JourneyType, step_id: usize, state: &ChecklistState) -> bool {
    let items = checklist(journey, step_id);
    if items.is_empty() {
        return true;
    }
    (0..items.len()).all(|index| state.is_checked(step_id, index))
}

/// Step ids whose checklist is fully checked.
pub fn completed_steps(journey: JourneyType, state: &ChecklistState) -> BTreeSet<usize> {
    steps(journey)
        .iter()
        .filter(|step| is_step_complete(journey, step.id, state))
        .map(|step| step.id)
        .collect()
}

/// Weighted overall percentage, rounded to an integer.
///
/// Each step contributes `checked / total * weight`; a step with no items
/// contributes 0. With weights summing to 1 the result lands in 0..=100.
/// Weights that do not sum to 1 are not validated; the percentage is
/// simply uncalibrated.
pub fn overall_progress(journey: JourneyType, state: &ChecklistState) -> u8 {
    let mut total = 0.0_f64;
    for step in steps(journey) {
        let items = checklist(journey, step.id);
        let fraction = if items.is_empty() {
            0.0
        } else {
            state.checked_in_step(step.id, items.len()) as f64 / items.len() as f64
        };
        total += fraction * step.weight;
    }
    (total * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_all(journey: JourneyType, step_id: usize, state: &mut ChecklistState) {
        for index in 0..checklist(journey, step_id).len() {
            state.set(step_id, index, true);
        }
    }

    #[test]
    fn empty_state_has_zero_progress_and_no_completed_steps() {
        for journey in [JourneyType::Buyer, JourneyType::Seller] {
            let state = ChecklistState::new();
            assert_eq!(overall_progress(journey, &state), 0);
            assert!(completed_steps(journey, &state).is_empty());
        }
    }

    #[test]
    fn fully_checked_state_reaches_one_hundred() {
        for journey in [JourneyType::Buyer, JourneyType::Seller] {
            let mut state = ChecklistState::new();
            for step in steps(journey) {
                check_all(journey, step.id, &mut state);
            }
            assert_eq!(overall_progress(journey, &state), 100);
            assert_eq!(completed_steps(journey, &state).len(), 6);
        }
    }

    #[test]
    fn completion_matches_item_by_item_check() {
        let journey = JourneyType::Buyer;
        let mut state = ChecklistState::new();
        check_all(journey, 1, &mut state);
        state.set(3, 0, true);

        let completed = completed_steps(journey, &state);
        for step in steps(journey) {
            let all_checked = (0..checklist(journey, step.id).len())
                .all(|i| state.is_checked(step.id, i));
            assert_eq!(completed.contains(&step.id), all_checked);
        }
        assert!(completed.contains(&1));
        assert!(!completed.contains(&3));
    }

    #[test]
    fn single_step_contribution_is_weighted() {
        // Buyer step 1 weighs 0.15 and has 5 items; checking all of it
        // alone yields round(15) = 15.
        let journey = JourneyType::Buyer;
        let mut state = ChecklistState::new();
        check_all(journey, 1, &mut state);
        assert_eq!(overall_progress(journey, &state), 15);

        // One of five items: round(0.2 * 0.15 * 100) = 3.
        let mut state = ChecklistState::new();
        state.set(1, 0, true);
        assert_eq!(overall_progress(journey, &state), 3);
    }

    #[test]
    fn checking_never_decreases_progress() {
        let journey = JourneyType::Seller;
        let mut state = ChecklistState::new();
        let mut last = overall_progress(journey, &state);
        for step in steps(journey) {
            for index in 0..checklist(journey, step.id).len() {
                state.set(step.id, index, true);
                let now = overall_progress(journey, &state);
                assert!(now >= last, "progress dropped from {last} to {now}");
                last = now;
            }
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn unchecking_never_increases_progress() {
        let journey = JourneyType::Buyer;
        let mut state = ChecklistState::new();
        for step in steps(journey) {
            check_all(journey, step.id, &mut state);
        }
        let mut last = overall_progress(journey, &state);
        for step in steps(journey) {
            for index in 0..checklist(journey, step.id).len() {
                state.set(step.id, index, false);
                let now = overall_progress(journey, &state);
                assert!(now <= last, "progress rose from {last} to {now}");
                last = now;
            }
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn progress_stays_in_bounds() {
        let journey = JourneyType::Buyer;
        let mut state = ChecklistState::new();
        // Sprinkle a mix of checked and unchecked keys, including keys
        // outside any real checklist range.
        state.set(0, 0, true);
        state.set(2, 5, true);
        state.set(4, 1, false);
        state.set(9, 9, true);
        let progress = overall_progress(journey, &state);
        assert!(progress <= 100);
    }

    #[test]
    fn derivation_is_idempotent() {
        let journey = JourneyType::Seller;
        let mut state = ChecklistState::new();
        state.set(0, 0, true);
        state.set(2, 1, true);
        state.set(2, 2, true);

        let first = (completed_steps(journey, &state), overall_progress(journey, &state));
        let second = (completed_steps(journey, &state), overall_progress(journey, &state));
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_step_is_vacuously_complete_but_adds_nothing() {
        // The preserved quirk: a step with no checklist items counts as
        // complete for the set while contributing zero to the percentage.
        let journey = JourneyType::Buyer;
        let state = ChecklistState::new();
        assert!(is_step_complete(journey, 42, &state));
        assert_eq!(overall_progress(journey, &state), 0);
    }

    #[test]
    fn keys_outside_checklists_do_not_affect_progress() {
        let journey = JourneyType::Buyer;
        let mut with_noise = ChecklistState::new();
        let mut clean = ChecklistState::new();
        with_noise.set(0, 0, true);
        clean.set(0, 0, true);
        // Beyond the 5-item checklist of step 0 and beyond any step.
        with_noise.set(0, 17, true);
        with_noise.set(11, 0, true);
        assert_eq!(
            overall_progress(journey, &with_noise),
            overall_progress(journey, &clean)
        );
        assert_eq!(completed_steps(journey, &with_noise), completed_steps(journey, &clean));
    }
}
