/// Apply a row limit: global flag first, then the configured default.
///
/// A limit of zero means no limit.
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> Option<usize> {
    let limit = flag.unwrap_or(configured);
    (limit > 0).then(|| usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Keep at most `limit` items.
pub fn truncate<T>(items: &mut Vec<T>, limit: Option<usize>) {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::{effective_limit, truncate};

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 20), Some(5));
    }

    #[test]
    fn configured_used_when_flag_missing() {
        assert_eq!(effective_limit(None, 20), Some(20));
    }

    #[test]
    fn zero_disables_limit() {
        assert_eq!(effective_limit(Some(0), 20), None);
        let mut items = vec![1, 2, 3];
        truncate(&mut items, None);
        assert_eq!(items.len(), 3);
        truncate(&mut items, Some(2));
        assert_eq!(items, vec![1, 2]);
    }
}
