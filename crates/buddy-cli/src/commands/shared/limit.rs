/// Compute effective limit with precedence: `--limit` flag -> configured default.
///
/// Zero means "no limit".
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> Option<usize> {
    let limit = flag.unwrap_or(configured);
    (limit > 0).then(|| usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Apply [`effective_limit`] to an already fetched list.
pub fn truncate<T>(items: &mut Vec<T>, flag: Option<u32>, configured: u32) {
    if let Some(limit) = effective_limit(flag, configured) {
        items.truncate(limit);
    }
}
