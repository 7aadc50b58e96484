use chainset_core::common_tests::ordered_set_stress_tests::*;
use chainset_core::discipline::{Coarse, HandOverHand, LockDiscipline};
use rstest::rstest;
use serial_test::serial;

// Trait for type-level parametrization
trait TestDiscipline {
    type Discipline: LockDiscipline + 'static;
}

struct UseCoarse;
struct UseHandOverHand;

impl TestDiscipline for UseCoarse {
    type Discipline = Coarse;
}

impl TestDiscipline for UseHandOverHand {
    type Discipline = HandOverHand;
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_contains_during_modifications<T: TestDiscipline>(#[case] _type: T) {
    test_contains_during_modifications::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_concurrent_remove_same_value<T: TestDiscipline>(#[case] _type: T) {
    test_concurrent_remove_same_value::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_iteration_during_modifications<T: TestDiscipline>(#[case] _type: T) {
    test_iteration_during_modifications::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_counter_matches_successful_operations<T: TestDiscipline>(#[case] _type: T) {
    test_counter_matches_successful_operations::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_extreme_contention_single_key<T: TestDiscipline>(#[case] _type: T) {
    test_extreme_contention_single_key::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_try_operations_under_contention<T: TestDiscipline>(#[case] _type: T) {
    test_try_operations_under_contention::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_no_lost_links_across_rounds<T: TestDiscipline>(#[case] _type: T) {
    test_no_lost_links_across_rounds::<T::Discipline>();
}

#[rstest]
#[serial(stress_tests)]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn stress_clear_during_adds<T: TestDiscipline>(#[case] _type: T) {
    test_clear_during_adds::<T::Discipline>();
}
