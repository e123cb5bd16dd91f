//! Pure scoring arithmetic shared by the session and its consumers.

/// Words per minute from correct characters over elapsed wall time.
///
/// Uses the standard typing-test convention of 5 characters per word.
/// Returns 0 for non-positive elapsed time.
pub fn wpm(correct_chars: u32, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    ((correct_chars as f64 / 5.0) / (elapsed_secs / 60.0)).round() as u32
}

/// Accuracy percentage in [0, 100].
///
/// Zero attempts counts as 100 so a fresh session does not show a
/// misleading 0%.
pub fn accuracy(correct_chars: u32, total_chars: u32) -> u32 {
    if total_chars == 0 {
        return 100;
    }
    (correct_chars as f64 / total_chars as f64 * 100.0).round() as u32
}
