//! Weekly recurring time intervals

use serde::{Deserialize, Serialize};

/// Minutes in a day; `end_min` never exceeds this
pub const MINUTES_PER_DAY: u16 = 1440;

/// A recurring weekly interval on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Day of week, 0 = Monday through 6 = Sunday
    pub day: u8,

    /// Start, in minutes from midnight
    pub start_min: u16,

    /// End (exclusive), in minutes from midnight
    pub end_min: u16,
}

impl TimeBlock {
    /// Create a new block
    pub fn new(day: u8, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            start_min,
            end_min,
        }
    }

    /// One-hour block starting at `hour` on `day`
    pub fn hour(day: u8, hour: u16) -> Self {
        Self::new(day, hour * 60, (hour + 1) * 60)
    }

    /// A block that ends at or before its start covers no time
    pub fn is_empty(&self) -> bool {
        self.end_min <= self.start_min
    }

    /// Non-empty, on a real weekday, and within one day
    pub fn is_valid(&self) -> bool {
        self.day < 7 && !self.is_empty() && self.end_min <= MINUTES_PER_DAY
    }

    /// Whether the two blocks share any minute on the same day
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        if self.day != other.day || self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.end_min <= other.start_min || self.start_min >= other.end_min)
    }

    /// Length of the shared span in minutes, 0 when disjoint
    pub fn overlap_minutes(&self, other: &TimeBlock) -> u16 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start_min.max(other.start_min);
        let end = self.end_min.min(other.end_min);
        end.saturating_sub(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn different_days_never_overlap() {
        let a = TimeBlock::new(0, 600, 720);
        let b = TimeBlock::new(1, 600, 720);
        assert!(!a.overlaps(&b));
        assert_eq!(a.overlap_minutes(&b), 0);
    }

    #[test]
    fn touching_blocks_do_not_overlap() {
        let a = TimeBlock::new(2, 600, 660);
        let b = TimeBlock::new(2, 660, 720);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn partial_overlap_minutes() {
        let a = TimeBlock::new(3, 600, 720);
        let b = TimeBlock::new(3, 690, 800);
        assert_eq!(a.overlap_minutes(&b), 30);
        assert_eq!(b.overlap_minutes(&a), 30);
    }

    #[test]
    fn inverted_block_covers_nothing() {
        let inverted = TimeBlock::new(1, 600, 500);
        let wide = TimeBlock::new(1, 400, 700);
        assert!(inverted.is_empty());
        assert!(!inverted.is_valid());
        assert!(!inverted.overlaps(&wide));
        assert!(!wide.overlaps(&inverted));
        assert_eq!(inverted.overlap_minutes(&wide), 0);
        assert_eq!(wide.overlap_minutes(&inverted), 0);
    }

    #[test]
    fn validity_bounds() {
        assert!(TimeBlock::new(6, 0, MINUTES_PER_DAY).is_valid());
        assert!(!TimeBlock::new(7, 0, 60).is_valid());
        assert!(!TimeBlock::new(0, 60, 60).is_valid());
        assert!(!TimeBlock::new(0, 1400, 1500).is_valid());
    }

    #[test]
    fn hour_block() {
        let slot = TimeBlock::hour(4, 9);
        assert_eq!(slot, TimeBlock::new(4, 540, 600));
    }
}
