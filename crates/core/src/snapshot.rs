/// Read-only session summary for front ends.
///
/// This is the only state surface a presentation layer should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameStats {
    pub total_tiles: usize,
    pub remaining_tiles: usize,
    pub completed_matches: usize,
    pub mistakes: u32,
    pub hints_used: u32,
    pub current_score: u32,
    /// 0-100
    pub progress: u8,
    /// 0-3
    pub star_rating: u8,
    pub is_complete: bool,
    /// Virtual milliseconds since the session started
    pub elapsed_ms: u64,
}
