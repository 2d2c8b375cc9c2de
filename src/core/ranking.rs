use crate::core::TargetingGroup;
use std::cmp::Ordering;

/// Ascending by click-through rate.
pub fn compare_by_click_through_rate(first: &TargetingGroup, second: &TargetingGroup) -> Ordering {
    first.click_through_rate.total_cmp(&second.click_through_rate)
}

/// Sorts in place. The sort is stable, so equal rates keep their input order.
pub fn rank_targeting_groups(groups: &mut [TargetingGroup]) {
    groups.sort_by(compare_by_click_through_rate);
}
