/// Out-of-range index policy for neighborhood filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Repeat the edge pixel (`aaa|abcd|ddd`).
    #[default]
    Replicate,
    /// Mirror around the edge pixel without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

/// Maps a possibly out-of-range index into `[0, len)`.
///
/// Returns `None` only for an empty axis.
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match mode {
        BorderMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some(2 * len - 2 - r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn replicate_clamps_both_ends() {
        let mode = BorderMode::Replicate;
        assert_eq!(map_index(-4, 9, mode), Some(0));
        assert_eq!(map_index(0, 9, mode), Some(0));
        assert_eq!(map_index(8, 9, mode), Some(8));
        assert_eq!(map_index(12, 9, mode), Some(8));
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let mode = BorderMode::Reflect101;
        let expected = [(-3, 3), (-1, 1), (0, 0), (4, 4), (5, 3), (7, 1)];
        for (i, want) in expected {
            assert_eq!(map_index(i, 5, mode), Some(want), "index {i}");
        }
        assert_eq!(map_index(-7, 1, mode), Some(0));
    }

    #[test]
    fn empty_axis_has_no_mapping() {
        assert_eq!(map_index(0, 0, BorderMode::Replicate), None);
        assert_eq!(map_index(3, 0, BorderMode::Reflect101), None);
    }
}
