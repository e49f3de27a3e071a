use serde::Serialize;

use crate::problem::street::StreetIdx;

/// One slot of an intersection's rotation: `street` is green for `duration`
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleItem {
    pub street: StreetIdx,
    pub duration: u32,
}

impl ScheduleItem {
    pub fn new(street: StreetIdx, duration: u32) -> Self {
        ScheduleItem { street, duration }
    }
}

/// The street currently allowed through and the seconds of green it has left
/// in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreenWindow {
    pub street: StreetIdx,
    pub remaining: u32,
}

/// Round-robin green-light rotation of one intersection.
///
/// Streets get the green light in listed order, each for its duration, and
/// the rotation repeats with a period equal to the summed durations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScheduleEntry {
    items: Vec<ScheduleItem>,
}

impl ScheduleEntry {
    pub fn new(items: Vec<ScheduleItem>) -> Self {
        ScheduleEntry { items }
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [ScheduleItem] {
        &mut self.items
    }

    pub fn push(&mut self, item: ScheduleItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Period of the rotation, saturating at `u32::MAX`.
    pub fn cycle_time(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |cycle, item| cycle.saturating_add(item.duration))
    }

    pub fn duration_of(&self, street: StreetIdx) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.street == street)
            .map(|item| item.duration)
    }

    /// Whether `street` ever gets the green light. Zero-duration slots are
    /// treated as absent, matching what a written submission would contain.
    pub fn schedules(&self, street: StreetIdx) -> bool {
        self.duration_of(street).is_some_and(|duration| duration > 0)
    }

    /// Items with a positive duration, i.e. what ends up in a submission.
    pub fn active_items(&self) -> impl Iterator<Item = &ScheduleItem> {
        self.items.iter().filter(|item| item.duration > 0)
    }

    /// Which street is green at absolute time `time`, if any.
    ///
    /// Returns `None` when the cycle is empty. A lone street is always green
    /// and reports its full duration.
    pub fn green_light(&self, time: u32) -> Option<GreenWindow> {
        let cycle_time = self.items.iter().map(|item| u64::from(item.duration)).sum::<u64>();
        if cycle_time == 0 {
            return None;
        }

        if let [item] = self.items.as_slice() {
            return Some(GreenWindow {
                street: item.street,
                remaining: item.duration,
            });
        }

        let offset = u64::from(time) % cycle_time;
        let mut window_end = 0u64;
        for item in &self.items {
            window_end += u64::from(item.duration);
            if offset < window_end {
                // Never more than `item.duration`.
                let remaining = u32::try_from(window_end - offset).unwrap_or(item.duration);
                return Some(GreenWindow {
                    street: item.street,
                    remaining,
                });
            }
        }

        None
    }

    /// Reverses the slots `start..=end` in place.
    pub fn reverse_range(&mut self, start: usize, end: usize) {
        self.items[start..=end].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(durations: &[u32]) -> ScheduleEntry {
        ScheduleEntry::new(
            durations
                .iter()
                .enumerate()
                .map(|(index, &duration)| ScheduleItem::new(StreetIdx::new(index), duration))
                .collect(),
        )
    }

    #[test]
    fn test_green_light_zero_cycle() {
        let entry = entry(&[0, 0, 0]);
        for time in [0, 1, 17, 1000] {
            assert_eq!(entry.green_light(time), None);
        }

        assert_eq!(ScheduleEntry::default().green_light(5), None);
    }

    #[test]
    fn test_green_light_single_street_always_green() {
        let entry = entry(&[7]);
        for time in [0, 3, 7, 8, 99] {
            assert_eq!(
                entry.green_light(time),
                Some(GreenWindow {
                    street: StreetIdx::new(0),
                    remaining: 7
                })
            );
        }
    }

    #[test]
    fn test_green_light_rotation() {
        // street 0: [0, 2), street 1: never, street 2: [2, 5)
        let entry = entry(&[2, 0, 3]);
        assert_eq!(entry.cycle_time(), 5);

        let expected = [
            (0, 0, 2),
            (1, 0, 1),
            (2, 2, 3),
            (4, 2, 1),
            (5, 0, 2),
            (13, 2, 2),
        ];
        for (time, street, remaining) in expected {
            assert_eq!(
                entry.green_light(time),
                Some(GreenWindow {
                    street: StreetIdx::new(street),
                    remaining
                }),
                "at time {time}"
            );
        }
    }

    #[test]
    fn test_green_light_with_huge_durations() {
        let entry = entry(&[u32::MAX - 1, u32::MAX - 1]);
        assert_eq!(entry.cycle_time(), u32::MAX);

        assert_eq!(
            entry.green_light(u32::MAX),
            Some(GreenWindow {
                street: StreetIdx::new(1),
                remaining: u32::MAX - 2
            })
        );
    }

    #[test]
    fn test_schedules_ignores_zero_duration() {
        let entry = entry(&[2, 0, 3]);
        assert!(entry.schedules(StreetIdx::new(0)));
        assert!(!entry.schedules(StreetIdx::new(1)));
        assert!(!entry.schedules(StreetIdx::new(9)));
        assert_eq!(entry.active_items().count(), 2);
    }

    #[test]
    fn test_reverse_range_twice_restores_order() {
        let original = entry(&[1, 2, 3, 4, 5]);
        let mut entry = original.clone();

        entry.reverse_range(1, 3);
        assert_eq!(
            entry.items().iter().map(|item| item.duration).collect::<Vec<_>>(),
            vec![1, 4, 3, 2, 5]
        );

        entry.reverse_range(1, 3);
        assert_eq!(entry, original);
    }
}
