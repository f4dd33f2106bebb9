//! Median stage: replace the window centre with the 5th smallest sample.

use super::types::{CENTER_INDEX, GreySample, WINDOW_LEN, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianOutcome {
    pub median: GreySample,
    /// Swaps performed by the sort; each one costs a tick.
    pub swaps: u32,
}

/// Ascending bubble sort that stops after the first pass without a swap.
///
/// Each pass shortens by one since the largest remaining value has bubbled
/// to the end. Returns the number of swaps performed.
pub fn sort_counting_swaps(buf: &mut [GreySample; WINDOW_LEN]) -> u32 {
    let mut swaps = 0;
    let mut pass = 0;
    let mut swapped = true;

    while swapped {
        swapped = false;
        pass += 1;
        for i in 0..WINDOW_LEN - pass {
            if buf[i] > buf[i + 1] {
                buf.swap(i, i + 1);
                swaps += 1;
                swapped = true;
            }
        }
    }

    swaps
}

/// Sorts a snapshot of `window` and writes its median into the centre slot.
/// Every other slot keeps its arrival-order value.
pub fn substitute_median(window: &mut Window) -> MedianOutcome {
    let mut working = *window.samples();
    let swaps = sort_counting_swaps(&mut working);
    let median = working[CENTER_INDEX];
    window.set(CENTER_INDEX, median);
    MedianOutcome { median, swaps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_input_needs_no_swaps() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        assert_eq!(sort_counting_swaps(&mut buf), 0);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_reversed_input_swaps_every_pair() {
        let mut buf = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        // n(n-1)/2 inversions
        assert_eq!(sort_counting_swaps(&mut buf), 36);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_single_outlier_swaps() {
        let mut buf = [200, 1, 1, 1, 1, 1, 1, 1, 1];
        assert_eq!(sort_counting_swaps(&mut buf), 8);
        assert_eq!(buf[8], 200);
    }

    #[test]
    fn test_median_replaces_only_center() {
        let mut window = Window::from_samples([10, 90, 30, 70, 255, 50, 20, 80, 40]);
        let outcome = substitute_median(&mut window);

        assert_eq!(outcome.median, 50);
        assert_eq!(*window.samples(), [10, 90, 30, 70, 50, 50, 20, 80, 40]);
    }

    #[test]
    fn test_median_with_duplicates() {
        let mut window = Window::from_samples([7, 3, 7, 3, 0, 7, 3, 7, 3]);
        let outcome = substitute_median(&mut window);

        // sorted: 0 3 3 3 3 7 7 7 7
        assert_eq!(outcome.median, 3);
        assert_eq!(window.center(), 3);
    }

    #[test]
    fn test_median_of_sorted_window() {
        let mut window = Window::from_samples([11, 12, 13, 14, 15, 16, 17, 18, 19]);
        let outcome = substitute_median(&mut window);

        assert_eq!(outcome, MedianOutcome { median: 15, swaps: 0 });
        assert_eq!(window.center(), 15);
    }
}
