//! Flex length resolution.
//!
//! This module turns a row of [`FlexItem`]s and a container width into one
//! integer width per item, following the "resolve flexible lengths" steps of
//! the CSS flexbox layout algorithm, restricted to a single line, a single
//! axis and whole terminal columns.
//!
//! The resolver never mutates its input. Per-call working state (base size,
//! hypothetical size, target size, frozen flag) lives in a scratch array that
//! is dropped when the call returns.

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};

use crate::error::{FlexError, Result};
use crate::item::FlexItem;

/// Resolved widths for all items, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWidths {
    /// Width for each item in display columns.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific item.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all items (without decorations).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no items.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterate over the widths.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.widths.iter().copied()
    }

    /// Consume into the underlying vector.
    pub fn into_inner(self) -> Vec<usize> {
        self.widths
    }

    fn from_sizes(sizes: impl Iterator<Item = i128>) -> Self {
        ResolvedWidths {
            widths: sizes.map(to_width).collect(),
        }
    }
}

/// Working state for one item during a single resolution.
///
/// Sizes are widened to 128 bits: sums over several `i64` sizes, and the
/// targets derived from them, must not overflow.
#[derive(Clone, Copy, Debug)]
struct ItemState {
    item: FlexItem,
    flex_base_size: i128,
    hypothetical_size: i128,
    target_size: i128,
    frozen: bool,
}

impl ItemState {
    fn new(raw: &FlexItem) -> Self {
        let item = raw.normalized();
        let flex_base_size = i128::from(item.flex_base_size());
        let hypothetical_size = item.clamp(flex_base_size);
        ItemState {
            item,
            flex_base_size,
            hypothetical_size,
            target_size: hypothetical_size,
            frozen: false,
        }
    }

    /// Freeze items that cannot move in the chosen direction at their
    /// hypothetical size.
    fn freeze_if_inflexible(&mut self, growing: bool) {
        let inflexible = if growing {
            self.item.grow == 0 || self.flex_base_size > self.hypothetical_size
        } else {
            self.item.shrink == 0 || self.flex_base_size < self.hypothetical_size
        };
        if inflexible {
            self.target_size = self.hypothetical_size;
            self.frozen = true;
        }
    }

    /// Size counted against the container: the target once frozen, the base
    /// size otherwise.
    fn occupied(&self) -> i128 {
        if self.frozen {
            self.target_size
        } else {
            self.flex_base_size
        }
    }

    /// Clamp the target into the item's bounds and return the signed
    /// violation (clamped minus unclamped).
    fn clamp_target(&mut self) -> i128 {
        let clamped = self.item.clamp(self.target_size);
        let violation = clamped - self.target_size;
        self.target_size = clamped;
        violation
    }
}

/// Resolve the width of each item so that together they fill
/// `container_size` as closely as their constraints allow.
///
/// A negative container size is treated as 0. Every returned width is at
/// least the item's (normalized) minimum, and at most its maximum when one is
/// set. When no bound gets in the way the widths sum to `container_size`.
///
/// # Errors
///
/// Returns [`FlexError::Unconverged`] if the distribution loop runs past its
/// iteration bound. Every pass freezes at least one item, so this cannot
/// happen for any input; it is reported rather than looping forever.
///
/// # Example
///
/// ```rust
/// use standout_flex::{resolve_flex_lengths, FlexItem};
///
/// let items = [
///     FlexItem::new(0).grow(1),
///     FlexItem::new(0).grow(2),
///     FlexItem::new(0).grow(3),
/// ];
/// let resolved = resolve_flex_lengths(&items, 60).unwrap();
/// assert_eq!(resolved.widths, vec![10, 20, 30]);
/// ```
pub fn resolve_flex_lengths(items: &[FlexItem], container_size: i64) -> Result<ResolvedWidths> {
    let container_size = i128::from(container_size.max(0));
    let mut states: Vec<ItemState> = items.iter().map(ItemState::new).collect();

    let sum_hypothetical: i128 = states.iter().map(|s| s.hypothetical_size).sum();
    if sum_hypothetical == container_size {
        debug!(
            "flex: {} items fit {} columns at their hypothetical sizes",
            states.len(),
            container_size
        );
        return Ok(ResolvedWidths::from_sizes(
            states.iter().map(|s| s.hypothetical_size),
        ));
    }

    resolve_free_space(&mut states, container_size, sum_hypothetical < container_size)?;

    Ok(ResolvedWidths::from_sizes(
        states.iter().map(|s| s.target_size),
    ))
}

/// Grow (or shrink) the items until every one of them is frozen.
///
/// On return each state's `target_size` holds its resolved size.
fn resolve_free_space(
    states: &mut [ItemState],
    container_size: i128,
    growing: bool,
) -> Result<()> {
    for state in states.iter_mut() {
        state.freeze_if_inflexible(growing);
    }

    debug!(
        "flex: {} {} items into {} columns (initial free space {})",
        if growing { "growing" } else { "shrinking" },
        states.len(),
        container_size,
        free_space(states, container_size)
    );

    let max_iterations = states.len() + 1;
    let mut violations = vec![0i128; states.len()];
    let mut iterations = 0;
    loop {
        iterations += 1;
        if iterations > max_iterations {
            error!(
                "flex: no solution for {} items after {} iterations",
                states.len(),
                max_iterations
            );
            return Err(FlexError::Unconverged {
                items: states.len(),
                iterations: max_iterations,
            });
        }

        if states.iter().all(|s| s.frozen) {
            return Ok(());
        }

        let remaining = free_space(states, container_size);
        if remaining != 0 {
            if growing {
                distribute(states, remaining, |s| i128::from(s.item.grow));
            } else {
                // Scaled shrink factor: larger items give up more.
                distribute(states, remaining, |s| {
                    i128::from(s.item.shrink) * s.flex_base_size
                });
            }
        }

        let mut total_violation = 0i128;
        for (state, violation) in states.iter_mut().zip(violations.iter_mut()) {
            *violation = if state.frozen { 0 } else { state.clamp_target() };
            total_violation += *violation;
        }

        trace!(
            "flex: iteration {}: free space {}, total violation {}",
            iterations,
            remaining,
            total_violation
        );

        for (state, &violation) in states.iter_mut().zip(&violations) {
            let freeze = match total_violation.signum() {
                0 => true,
                1 => violation > 0,
                _ => violation < 0,
            };
            if freeze {
                state.frozen = true;
            }
        }
    }
}

/// Container size minus the space currently occupied by every item.
fn free_space(states: &[ItemState], container_size: i128) -> i128 {
    container_size - states.iter().map(ItemState::occupied).sum::<i128>()
}

/// Hand out `remaining` among the unfrozen items in proportion to `weight`.
///
/// Each share is taken from what is left of the pool and of the weight sum,
/// in input order, so truncated remainders roll forward and the shares add up
/// to exactly `remaining`.
fn distribute(
    states: &mut [ItemState],
    mut remaining: i128,
    weight: impl Fn(&ItemState) -> i128,
) {
    let weights: Vec<i128> = states
        .iter()
        .map(|s| if s.frozen { 0 } else { weight(s) })
        .collect();
    let (weights, mut weight_sum) = fit_weights(&weights, remaining);

    for (state, &w) in states.iter_mut().zip(&weights) {
        if state.frozen {
            continue;
        }
        // Unfrozen items always have a positive weight in the active
        // direction, so the sum only reaches 0 after the last one.
        debug_assert!(weight_sum > 0, "unfrozen item without weight");
        let share = remaining * w / weight_sum;
        state.target_size = state.flex_base_size + share;
        remaining -= share;
        weight_sum -= w;
    }
}

/// Scale `weights` down until `remaining * weight_sum` fits in an `i128`.
///
/// Weights that are already small enough come back unchanged. Otherwise each
/// is shifted right by the same amount, and a positive weight never drops
/// below 1.
fn fit_weights(weights: &[i128], remaining: i128) -> (Vec<i128>, i128) {
    let magnitude = remaining.checked_abs().unwrap_or(i128::MAX);
    for shift in 0..i128::BITS {
        let scaled: Vec<i128> = weights
            .iter()
            .map(|&w| if w > 0 { (w >> shift).max(1) } else { 0 })
            .collect();
        let sum = scaled.iter().try_fold(0i128, |acc, &w| acc.checked_add(w));
        if let Some(sum) = sum {
            if sum.checked_mul(magnitude).is_some() {
                return (scaled, sum);
            }
        }
    }
    let ones: Vec<i128> = weights.iter().map(|&w| i128::from(w > 0)).collect();
    let sum = ones.iter().sum();
    (ones, sum)
}

fn to_width(size: i128) -> usize {
    usize::try_from(size.max(1)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::AUTO;

    fn resolve(items: &[FlexItem], container: i64) -> Vec<usize> {
        resolve_flex_lengths(items, container).unwrap().widths
    }

    fn grow(g: i64) -> FlexItem {
        FlexItem::new(0).grow(g)
    }

    fn sized(size: i64) -> FlexItem {
        FlexItem::new(AUTO).size(size)
    }

    #[test]
    fn resolve_empty() {
        assert!(resolve(&[], 60).is_empty());
        assert!(resolve(&[], 0).is_empty());
    }

    #[test]
    fn grow_basis_zero() {
        assert_eq!(resolve(&[grow(1)], 60), vec![60]);
        assert_eq!(resolve(&[grow(1), grow(2)], 60), vec![20, 40]);
        assert_eq!(resolve(&[grow(1), grow(2), grow(1)], 60), vec![15, 30, 15]);
        assert_eq!(resolve(&[grow(1), grow(2), grow(3)], 60), vec![10, 20, 30]);
        assert_eq!(resolve(&[grow(3), grow(2), grow(1)], 60), vec![30, 20, 10]);
    }

    #[test]
    fn grow_basis_non_zero() {
        assert_eq!(resolve(&[grow(1).basis(10)], 60), vec![60]);
        assert_eq!(resolve(&[grow(1).basis(10), grow(2)], 60), vec![26, 34]);
        assert_eq!(resolve(&[grow(1), grow(2).basis(10)], 60), vec![16, 44]);
        assert_eq!(
            resolve(&[grow(1), grow(2).basis(AUTO).size(10)], 60),
            vec![16, 44]
        );
        assert_eq!(
            resolve(&[grow(1).basis(10), grow(2).basis(10)], 60),
            vec![23, 37]
        );
        assert_eq!(
            resolve(&[grow(1), grow(2).basis(20), grow(1)], 60),
            vec![10, 40, 10]
        );
    }

    #[test]
    fn inflexible_items_keep_their_size() {
        assert_eq!(resolve(&[FlexItem::new(10)], 60), vec![10]);
        assert_eq!(resolve(&[sized(10)], 60), vec![10]);
        assert_eq!(resolve(&[FlexItem::new(10), sized(20)], 60), vec![10, 20]);
        // Overflowing the container is allowed when nothing can shrink.
        assert_eq!(resolve(&[FlexItem::new(100)], 60), vec![100]);
        assert_eq!(resolve(&[sized(100)], 60), vec![100]);
        assert_eq!(
            resolve(&[FlexItem::new(100), sized(200)], 60),
            vec![100, 200]
        );
    }

    #[test]
    fn shrink_scaled_by_base_size() {
        assert_eq!(resolve(&[sized(80).shrink(1)], 60), vec![60]);
        assert_eq!(
            resolve(&[sized(80).shrink(1), sized(80).shrink(1)], 60),
            vec![30, 30]
        );
        assert_eq!(
            resolve(&[sized(160).shrink(1), sized(80).shrink(1)], 60),
            vec![40, 20]
        );
        assert_eq!(
            resolve(&[sized(60).shrink(2), sized(60).shrink(1)], 60),
            vec![20, 40]
        );
    }

    #[test]
    fn mixed_fixed_and_flexible() {
        assert_eq!(resolve(&[FlexItem::new(30), grow(1)], 60), vec![30, 30]);
        assert_eq!(
            resolve(&[FlexItem::new(40), FlexItem::new(40).shrink(1)], 60),
            vec![40, 20]
        );
        assert_eq!(
            resolve(&[FlexItem::new(30), grow(1), grow(2)], 60),
            vec![30, 10, 20]
        );
        assert_eq!(
            resolve(
                &[
                    FlexItem::new(40),
                    FlexItem::new(40).shrink(1),
                    FlexItem::new(40).shrink(1)
                ],
                60
            ),
            vec![40, 10, 10]
        );
    }

    #[test]
    fn shrinkable_content_columns_fitting_exactly() {
        let items = [
            sized(20).shrink(1).min(20),
            sized(3).shrink(1).min(3),
            sized(10).shrink(1).min(5),
            sized(3).shrink(1).min(3),
            sized(3).shrink(1).min(3),
        ];
        // Sum is 39 < 60 and nothing grows.
        assert_eq!(resolve(&items, 60), vec![20, 3, 10, 3, 3]);
    }

    #[test]
    fn min_violations_freeze_and_redistribute() {
        let col = |g: i64, size: i64, min: i64| {
            FlexItem::new(0).grow(g).shrink(1).size(size).min(min)
        };
        let items = [
            col(1, 20, 20),
            col(1, 3, 3),
            col(1, 10, 5),
            col(1, 3, 3),
            col(1, 3, 3),
        ];
        assert_eq!(resolve(&items, 60), vec![20, 10, 10, 10, 10]);

        let items = [
            col(1, 20, 20),
            col(1, 3, 3),
            col(4, 10, 5),
            col(1, 3, 3),
            col(1, 3, 3),
        ];
        assert_eq!(resolve(&items, 60), vec![20, 5, 23, 6, 6]);
    }

    #[test]
    fn max_violations_freeze_and_redistribute() {
        let items = [grow(1).max(10), grow(1), grow(1)];
        // 20 each, the first is capped at 10 and the rest share 50.
        assert_eq!(resolve(&items, 60), vec![10, 25, 25]);
    }

    #[test]
    fn zero_container() {
        assert_eq!(resolve(&[FlexItem::new(10).shrink(1)], 0), vec![1]);
        assert_eq!(resolve(&[FlexItem::new(AUTO).min(10).shrink(1)], 0), vec![10]);
    }

    #[test]
    fn negative_container_treated_as_zero() {
        assert_eq!(
            resolve(&[FlexItem::new(10).shrink(1)], -20),
            resolve(&[FlexItem::new(10).shrink(1)], 0)
        );
    }

    #[test]
    fn fast_path_returns_hypothetical_sizes() {
        let items = [sized(10).grow(1).shrink(1), FlexItem::new(5).min(20)];
        // Hypothetical sizes are 10 and 20.
        assert_eq!(resolve(&items, 30), vec![10, 20]);
    }

    #[test]
    fn remainder_rolls_forward_in_input_order() {
        let resolved = resolve(&[grow(1), grow(1), grow(1)], 10);
        assert_eq!(resolved, vec![3, 3, 4]);
        assert_eq!(resolved.iter().sum::<usize>(), 10);
    }

    #[test]
    fn input_items_are_not_mutated() {
        let items = [FlexItem::new(AUTO).size(-3).min(0).grow(-1)];
        let copy = items;
        let _ = resolve(&items, 40);
        assert_eq!(items, copy);
    }

    #[test]
    fn large_weights_do_not_overflow() {
        let items = [
            sized(1 << 40).shrink(1 << 30),
            sized(1 << 40).shrink(1 << 30),
        ];
        let resolved = resolve(&items, 100);
        assert_eq!(resolved, vec![50, 50]);
    }

    #[test]
    fn huge_sizes_do_not_overflow() {
        let half = i64::MAX / 2 + 1;
        let items = [sized(half).shrink(1), sized(half).shrink(1)];
        assert_eq!(resolve(&items, 100), vec![50, 50]);

        let items = [sized(i64::MAX).shrink(1), sized(i64::MAX).shrink(1)];
        assert_eq!(resolve(&items, 78), vec![39, 39]);
    }

    #[test]
    fn huge_sizes_and_weights_do_not_overflow() {
        let item = sized(i64::MAX).shrink(i64::MAX);
        assert_eq!(resolve(&[item, item, item], 90), vec![30, 30, 30]);
    }

    #[test]
    fn fit_weights_scales_only_when_needed() {
        assert_eq!(fit_weights(&[1, 0, 3], 60), (vec![1, 0, 3], 4));

        let (weights, sum) = fit_weights(&[i128::MAX / 2, 1, 0], -(1 << 64));
        assert_eq!(weights[1], 1);
        assert_eq!(weights[2], 0);
        assert_eq!(sum, weights.iter().sum::<i128>());
        assert!(sum.checked_mul(1 << 64).is_some());
    }

    #[test]
    fn opposite_violations_cancel_and_freeze_everything() {
        // Both targets are 30: the first is capped to 10, the second raised
        // to 50, and the violations sum to 0.
        let items = [grow(1).max(10), grow(1).min(50)];
        assert_eq!(resolve(&items, 60), vec![10, 50]);
    }

    #[test]
    fn fast_path_agrees_with_distribution_loop() {
        let items = [
            sized(10).grow(1).shrink(1),
            FlexItem::new(5).min(20),
            FlexItem::new(AUTO).size(7).min(3).max(5).grow(2).shrink(2),
        ];
        let states: Vec<ItemState> = items.iter().map(ItemState::new).collect();
        let container: i128 = states.iter().map(|s| s.hypothetical_size).sum();
        assert_eq!(container, 35);

        for growing in [true, false] {
            let mut looped = states.clone();
            resolve_free_space(&mut looped, container, growing).unwrap();
            let sizes: Vec<i128> = looped.iter().map(|s| s.target_size).collect();
            assert_eq!(sizes, vec![10, 20, 5]);
        }
        assert_eq!(resolve(&items, 35), vec![10, 20, 5]);
    }

    #[test]
    fn resolved_widths_accessors() {
        let resolved = ResolvedWidths {
            widths: vec![10, 20, 30],
        };

        assert_eq!(resolved.get(0), Some(10));
        assert_eq!(resolved.get(2), Some(30));
        assert_eq!(resolved.get(3), None);
        assert_eq!(resolved.total(), 60);
        assert_eq!(resolved.len(), 3);
        assert!(!resolved.is_empty());
        assert_eq!(resolved.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(resolved.into_inner(), vec![10, 20, 30]);
    }
}
