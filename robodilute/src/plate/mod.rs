//! Destination plate layout and well assignment.
//!
//! Positions are generated column-major, the same order the reshaper walks
//! the source grid:
//!
//! ```text
//!        1    2         12
//!   A    0    8   ...   88
//!   B    1    9   ...   89
//!   ...
//!   H    7   15   ...   95
//! ```

use crate::error::PlateError;
use crate::models::{Well, WellEntry};

/// Row label for a zero-based row index: A..Z, then AA, AB, ...
pub fn row_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// All positions of a `rows` × `cols` plate, columns outer and rows inner.
pub fn generate_plate_positions(rows: usize, cols: usize) -> Vec<Well> {
    let labels: Vec<String> = (0..rows).map(row_label).collect();
    (1..=cols as u32)
        .flat_map(|col| labels.iter().map(move |row| Well::new(row.clone(), col)))
        .collect()
}

/// Pair each source entry with the destination position at the same index.
///
/// Fails before assigning anything when there are more entries than
/// positions.
pub fn assign_positions<'a>(
    entries: &'a [WellEntry],
    positions: &[Well],
) -> Result<Vec<(&'a WellEntry, Well)>, PlateError> {
    if entries.len() > positions.len() {
        return Err(PlateError::Overflow {
            count: entries.len(),
            capacity: positions.len(),
        });
    }

    Ok(entries.iter().zip(positions.iter().cloned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<WellEntry> {
        generate_plate_positions(26, 26)
            .into_iter()
            .take(n)
            .map(|w| WellEntry::new(w, 1.0))
            .collect()
    }

    #[test]
    fn test_row_labels() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(7), "H");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
        assert_eq!(row_label(51), "AZ");
        assert_eq!(row_label(52), "BA");
    }

    #[test]
    fn test_standard_plate() {
        let positions = generate_plate_positions(8, 12);
        let names: Vec<String> = positions.iter().map(|w| w.to_string()).collect();

        assert_eq!(names.len(), 96);
        assert_eq!(&names[..3], &["A1", "B1", "C1"]);
        assert_eq!(names[7], "H1");
        assert_eq!(names[8], "A2");
        assert_eq!(names[95], "H12");
    }

    #[test]
    fn test_assignment_is_prefix_of_canonical_order() {
        let positions = generate_plate_positions(8, 12);
        for n in [0, 1, 9, 95, 96] {
            let source = entries(n);
            let assigned = assign_positions(&source, &positions).unwrap();
            assert_eq!(assigned.len(), n);
            for (i, (entry, new_pos)) in assigned.iter().enumerate() {
                assert_eq!(entry.org_pos, source[i].org_pos);
                assert_eq!(*new_pos, positions[i]);
            }
        }
    }

    #[test]
    fn test_overflow() {
        let positions = generate_plate_positions(8, 12);
        let source = entries(97);
        assert_eq!(
            assign_positions(&source, &positions).unwrap_err(),
            PlateError::Overflow {
                count: 97,
                capacity: 96
            }
        );
    }
}
