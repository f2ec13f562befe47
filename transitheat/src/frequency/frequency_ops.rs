use itertools::Itertools;

/// mean gap in seconds between consecutive arrivals, floored. arrivals must
/// be sorted. fewer than two arrivals have no gap and return 0.
pub fn average_gap(sorted_arrivals: &[u32]) -> u32 {
    if sorted_arrivals.len() < 2 {
        return 0;
    }
    let total: u64 = sorted_arrivals
        .iter()
        .tuple_windows()
        .map(|(a, b)| (b - a) as u64)
        .sum();
    (total / (sorted_arrivals.len() as u64 - 1)) as u32
}

/// mean gap between the arrivals that fall inside `[start, end]` (inclusive)
pub fn average_gap_in_window(arrivals: &[u32], start: u32, end: u32) -> u32 {
    let window = arrivals
        .iter()
        .filter(|t| start <= **t && **t <= end)
        .copied()
        .sorted()
        .collect_vec();
    average_gap(&window)
}
