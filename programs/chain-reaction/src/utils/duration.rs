/// Countdown length granted by the next entry.
///
/// The decay grows with every play that will have happened once the current
/// one is recorded, so `player_count` is the count *before* the entry. The
/// result never drops below `min_duration`, and once it reaches the floor it
/// stays there.
pub fn next_duration(
    duration_ms: u64,
    duration_decrease_ms: u64,
    min_duration: u64,
    player_count: u64,
) -> u64 {
    let decay = player_count
        .saturating_add(1)
        .saturating_mul(duration_decrease_ms);

    let candidate = if duration_ms > decay {
        duration_ms - decay
    } else {
        min_duration
    };

    candidate.max(min_duration)
}
