use std::fmt;

use crate::protocol::ScoreEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardRow {
    Ranked { rank: usize, entry: ScoreEntry },
    Ellipsis,
    /// The viewing player's own entry, shown below the top players.
    Own(ScoreEntry),
}

impl fmt::Display for LeaderboardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardRow::Ranked { rank, entry } => {
                write!(f, "{}. {} - {}", rank, entry.name, entry.score)
            }
            LeaderboardRow::Ellipsis => write!(f, "..."),
            LeaderboardRow::Own(entry) => write!(f, "{} - {}", entry.name, entry.score),
        }
    }
}

/// Every entry, ranked in the order the server sent them.
pub fn full(scores: &[ScoreEntry]) -> Vec<LeaderboardRow> {
    scores
        .iter()
        .enumerate()
        .map(|(index, entry)| LeaderboardRow::Ranked {
            rank: index + 1,
            entry: entry.clone(),
        })
        .collect()
}

/// The top `num_top_players` entries. When the list is longer than that, the
/// server has appended the viewer's own entry as the last element; it is shown
/// after an ellipsis.
pub fn for_player(scores: &[ScoreEntry], num_top_players: Option<usize>) -> Vec<LeaderboardRow> {
    let Some(top) = num_top_players else {
        return full(scores);
    };
    if scores.len() <= top {
        return full(scores);
    }

    let mut rows = full(&scores[..top]);
    rows.push(LeaderboardRow::Ellipsis);
    if let Some(own) = scores.last() {
        rows.push(LeaderboardRow::Own(own.clone()));
    }
    rows
}
