use chainset_core::common_tests::ordered_set_core_tests::*;
use chainset_core::data_structures::ConcurrentOrderedSet;
use chainset_core::discipline::{Coarse, HandOverHand, LockDiscipline};
use rstest::rstest;

// Trait for type-level parametrization
trait TestDiscipline {
    type Discipline: LockDiscipline + 'static;
}

// Marker types for each discipline
struct UseCoarse;
struct UseHandOverHand;

impl TestDiscipline for UseCoarse {
    type Discipline = Coarse;
}

impl TestDiscipline for UseHandOverHand {
    type Discipline = HandOverHand;
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn basic_operations<T: TestDiscipline>(#[case] _type: T) {
    let set: ConcurrentOrderedSet<i32, T::Discipline> = ConcurrentOrderedSet::new();
    test_basic_operations(&set);
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn len_counts_distinct_keys<T: TestDiscipline>(#[case] _type: T) {
    test_len_counts_distinct_keys::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn duplicate_add_is_noop<T: TestDiscipline>(#[case] _type: T) {
    test_duplicate_add_is_noop::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn remove_absent_is_noop<T: TestDiscipline>(#[case] _type: T) {
    test_remove_absent_is_noop::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn add_remove_round_trip<T: TestDiscipline>(#[case] _type: T) {
    test_add_remove_round_trip::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn iteration_is_ascending<T: TestDiscipline>(#[case] _type: T) {
    test_iteration_is_ascending::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn empty_iteration<T: TestDiscipline>(#[case] _type: T) {
    test_empty_iteration::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn iterator_is_a_snapshot<T: TestDiscipline>(#[case] _type: T) {
    test_iterator_is_a_snapshot::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn extreme_keys<T: TestDiscipline>(#[case] _type: T) {
    test_extreme_keys::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn key_collision_is_identity<T: TestDiscipline>(#[case] _type: T) {
    test_key_collision_is_identity::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn take_returns_member<T: TestDiscipline>(#[case] _type: T) {
    test_take_returns_member::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn clear<T: TestDiscipline>(#[case] _type: T) {
    test_clear::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn try_operations_uncontended<T: TestDiscipline>(#[case] _type: T) {
    test_try_operations_uncontended::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn values_dropped_once<T: TestDiscipline>(#[case] _type: T) {
    test_values_dropped_once::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn concurrent_disjoint_adds<T: TestDiscipline>(#[case] _type: T) {
    test_concurrent_disjoint_adds::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn interleaved_odd_even<T: TestDiscipline>(#[case] _type: T) {
    test_interleaved_odd_even::<T::Discipline>();
}

#[rstest]
#[case::coarse(UseCoarse)]
#[case::hand_over_hand(UseHandOverHand)]
fn concurrent_same_key_add<T: TestDiscipline>(#[case] _type: T) {
    test_concurrent_same_key_add::<T::Discipline>();
}
