//! Orientation counter: one quadrant grid to per-orientation counts.

use lgo_core::entities::QuadrantRecord;
use lgo_core::records::{OrientationCounts, QuadrantCount};

/// Count, for each orientation, the squares of `record` where it appears.
///
/// Each square is a presence set, so one square adds at most one to each
/// orientation and a grid holds at most 5 per orientation.
#[must_use]
pub fn count_orientations(record: &QuadrantRecord) -> QuadrantCount {
    let mut counts = OrientationCounts::default();
    for square in &record.squares {
        for orientation in square.iter() {
            counts.record(orientation);
        }
    }
    QuadrantCount {
        quadrant_id: record.id,
        lichen_id: record.lichen_id,
        tree_id: record.tree_id,
        counts,
    }
}

/// Count every record, preserving input order.
#[must_use]
pub fn count_all(records: &[QuadrantRecord]) -> Vec<QuadrantCount> {
    records.iter().map(count_orientations).collect()
}

#[cfg(test)]
mod tests {
    use lgo_core::orientation::{Orientation, OrientationSet};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(squares: [&str; 5]) -> QuadrantRecord {
        QuadrantRecord {
            id: 1,
            lichen_id: Some(10),
            tree_id: Some(100),
            squares: squares.map(|raw| OrientationSet::parse(raw).unwrap()),
        }
    }

    #[test]
    fn grid_with_mixed_squares() {
        let count = count_orientations(&record(["N", "NE", "S", "", ""]));
        assert_eq!(count.counts, OrientationCounts::new(2, 1, 1, 0));
        assert_eq!(count.counts.total(), 4);
        assert_eq!(count.lichen_id, Some(10));
    }

    #[test]
    fn second_grid_of_the_same_observation() {
        let count = count_orientations(&record(["E", "", "", "", ""]));
        assert_eq!(count.counts, OrientationCounts::new(0, 1, 0, 0));
    }

    #[rstest]
    #[case(["", "", "", "", ""], 0)]
    #[case(["NESO", "NESO", "NESO", "NESO", "NESO"], 20)]
    #[case(["{N,E}", "[\"S\"]", "O", "", "NN"], 5)]
    fn total_is_sum_of_orientations(#[case] squares: [&str; 5], #[case] total: u32) {
        let counts = count_orientations(&record(squares)).counts;
        let sum: u32 = Orientation::ALL.iter().map(|o| counts.get(*o)).sum();
        assert_eq!(sum, counts.total());
        assert_eq!(counts.total(), total);
    }

    #[test]
    fn count_all_keeps_order() {
        let mut second = record(["O", "", "", "", ""]);
        second.id = 2;
        let counts = count_all(&[record(["N", "", "", "", ""]), second]);
        assert_eq!(
            counts.iter().map(|c| c.quadrant_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(counts[1].counts.get(Orientation::West), 1);
    }
}
