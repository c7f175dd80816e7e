use std::collections::HashMap;

// Declared ID range for one generation, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRange {
    pub start: i32,
    pub end: i32,
}

impl GenerationRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RangeError {
    Empty,
    Inverted { generation: i32 },
    BadOrigin { start: i32 },
    Discontinuous { generation: i32 },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::Empty => write!(f, "No ranges provided"),
            RangeError::Inverted { generation } => {
                write!(f, "Generation {} has start > end", generation)
            }
            RangeError::BadOrigin { start } => {
                write!(f, "Ranges must begin at 1, found {}", start)
            }
            RangeError::Discontinuous { generation } => {
                write!(
                    f,
                    "Generation {} is not contiguous with the previous range",
                    generation
                )
            }
        }
    }
}

impl std::error::Error for RangeError {}

// Checks that the declared ranges tile the ID space: sorted by start, the
// first begins at 1 and every subsequent range picks up exactly where the
// previous one ended.
pub fn validate_ranges(ranges: &HashMap<i32, GenerationRange>) -> Result<(), RangeError> {
    if ranges.is_empty() {
        return Err(RangeError::Empty);
    }

    let mut ordered: Vec<(i32, GenerationRange)> =
        ranges.iter().map(|(g, r)| (*g, *r)).collect();
    ordered.sort_by_key(|(_, r)| r.start);

    for (generation, range) in &ordered {
        if range.start > range.end {
            return Err(RangeError::Inverted {
                generation: *generation,
            });
        }
    }

    if ordered[0].1.start != 1 {
        return Err(RangeError::BadOrigin {
            start: ordered[0].1.start,
        });
    }

    for i in 1..ordered.len() {
        let prev = ordered[i - 1].1;
        let (generation, curr) = ordered[i];
        if prev.end + 1 != curr.start {
            return Err(RangeError::Discontinuous { generation });
        }
    }

    Ok(())
}

// Expands a range into the contiguous ID sequence it declares.
pub fn build_sequential_ids(range: &GenerationRange) -> Vec<i32> {
    if range.start > range.end {
        return Vec::new();
    }
    (range.start..=range.end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(entries: &[(i32, i32, i32)]) -> HashMap<i32, GenerationRange> {
        entries
            .iter()
            .map(|(g, s, e)| (*g, GenerationRange::new(*s, *e)))
            .collect()
    }

    #[test]
    fn test_contiguous_ranges_are_valid() {
        let r = ranges(&[(1, 1, 151), (2, 152, 251), (3, 252, 386)]);
        assert!(validate_ranges(&r).is_ok());
    }

    #[test]
    fn test_empty_ranges_are_rejected() {
        assert_eq!(validate_ranges(&HashMap::new()), Err(RangeError::Empty));
    }

    #[test]
    fn test_gap_is_rejected() {
        let r = ranges(&[(1, 1, 151), (2, 153, 251)]);
        assert_eq!(
            validate_ranges(&r),
            Err(RangeError::Discontinuous { generation: 2 })
        );
    }

    #[test]
    fn test_overlap_is_rejected() {
        let r = ranges(&[(1, 1, 151), (2, 100, 251)]);
        assert_eq!(
            validate_ranges(&r),
            Err(RangeError::Discontinuous { generation: 2 })
        );
    }

    #[test]
    fn test_first_range_must_begin_at_one() {
        let r = ranges(&[(2, 2, 151)]);
        assert_eq!(validate_ranges(&r), Err(RangeError::BadOrigin { start: 2 }));
    }

    #[test]
    fn test_inverted_range_names_its_generation() {
        let r = ranges(&[(1, 1, 151), (2, 251, 152)]);
        assert_eq!(
            validate_ranges(&r),
            Err(RangeError::Inverted { generation: 2 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RangeError::Empty.to_string(), "No ranges provided");
        assert_eq!(
            RangeError::Inverted { generation: 3 }.to_string(),
            "Generation 3 has start > end"
        );
    }

    #[test]
    fn test_build_sequential_ids_inclusive() {
        assert_eq!(
            build_sequential_ids(&GenerationRange::new(1, 5)),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_build_sequential_ids_empty_when_inverted() {
        assert!(build_sequential_ids(&GenerationRange::new(5, 1)).is_empty());
    }

    #[test]
    fn test_build_sequential_ids_single_element() {
        assert_eq!(build_sequential_ids(&GenerationRange::new(7, 7)), vec![7]);
    }
}
