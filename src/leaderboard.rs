//! High score leaderboard
//!
//! Keeps the top five runs. Storage is the embedder's business: the board
//! round-trips through JSON and falls back to empty on unreadable input.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 5;
/// Names are cut to this many characters
pub const MAX_NAME_LEN: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Would `score` earn a place? Any score does while the board has room.
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// 1-indexed rank `score` would take, None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a run. The name is trimmed and cut to [`MAX_NAME_LEN`]
    /// characters; blank names are refused. Returns the rank achieved.
    pub fn submit(&mut self, name: &str, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
        if name.is_empty() || !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name,
            score,
            level,
            timestamp,
        };

        // Sorted descending; ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_ENTRIES);

        log::info!("Leaderboard: {} scored {} (rank {})", self.entries[rank - 1].name, score, rank);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse a stored board. Unreadable input yields an empty board.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Leaderboard>(json) {
            Ok(mut board) => {
                board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                board.entries.truncate(MAX_ENTRIES);
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            Err(err) => {
                log::warn!("Discarding unreadable leaderboard: {err}");
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> Leaderboard {
        let mut board = Leaderboard::new();
        for (i, score) in [500, 400, 300, 200, 100].into_iter().enumerate() {
            board.submit(&format!("p{i}"), score, 1, 0.0);
        }
        board
    }

    #[test]
    fn test_anything_qualifies_with_room() {
        let board = Leaderboard::new();
        assert!(board.qualifies(0));
        assert_eq!(board.potential_rank(0), Some(1));
    }

    #[test]
    fn test_full_board_needs_to_beat_lowest() {
        let board = full_board();
        assert!(!board.qualifies(100));
        assert!(board.qualifies(101));
        assert_eq!(board.potential_rank(450), Some(2));
        assert_eq!(board.potential_rank(50), None);
    }

    #[test]
    fn test_submit_keeps_top_five_sorted() {
        let mut board = full_board();
        assert_eq!(board.submit("newcomer", 350, 4, 1.0), Some(3));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 400, 350, 300, 200]);
    }

    #[test]
    fn test_name_trimmed_and_truncated() {
        let mut board = Leaderboard::new();
        board.submit("  Frosty the Snowman  ", 10, 2, 0.0);
        assert_eq!(board.entries[0].name, "Frosty the");
        assert_eq!(board.submit("   ", 10, 2, 0.0), None);
    }

    #[test]
    fn test_json_round_trip_and_fallback() {
        let board = full_board();
        let json = board.to_json().unwrap();
        assert_eq!(Leaderboard::from_json(&json), board);
        assert!(Leaderboard::from_json("not json").is_empty());
    }
}
