//! Match rating model: a 1-10 score derived from counted events, a display
//! transform for the lineup card badge, and batch MVP evaluation.

use serde::{Deserialize, Serialize};

pub const BASELINE_RATING: f64 = 6.0;

const GOAL_WEIGHT: f64 = 1.0;
const ASSIST_WEIGHT: f64 = 0.5;
const INTERCEPTION_WEIGHT: f64 = 0.5;
const YELLOW_PENALTY: f64 = 0.5;
const RED_PENALTY: f64 = 1.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub goals: u32,
    pub assists: u32,
    pub interceptions: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl Stats {
    /// Goals, assists and interceptions count as activity; cards alone do not
    /// qualify a player for MVP.
    pub fn has_activity(self) -> bool {
        self.goals + self.assists + self.interceptions > 0
    }

    fn is_blank(self) -> bool {
        self == Stats::default()
    }
}

/// 6.0 for a blank stat line, otherwise the weighted sum clamped to [1, 10]
/// and rounded to one decimal.
pub fn rating(stats: Stats) -> f64 {
    if stats.is_blank() {
        return BASELINE_RATING;
    }
    let raw = BASELINE_RATING
        + f64::from(stats.goals) * GOAL_WEIGHT
        + f64::from(stats.assists) * ASSIST_WEIGHT
        + f64::from(stats.interceptions) * INTERCEPTION_WEIGHT
        - f64::from(stats.yellow_cards) * YELLOW_PENALTY
        - f64::from(stats.red_cards) * RED_PENALTY;
    (raw.clamp(1.0, 10.0) * 10.0).round() / 10.0
}

/// Maps a 1-10 rating onto the 0-100-ish badge scale used on the lineup
/// cards (62.5..100 band; not a percentage).
pub fn display_rating(rating10: f64) -> u32 {
    (rating10 * 3.75 + 62.5).round() as u32
}

/// One player's editable stat line. Serialized camelCase: the batch-stats
/// endpoint takes these records exactly as the client edits them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub player_id: i64,
    pub player_name: String,
    pub goals: u32,
    pub assists: u32,
    pub interceptions: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub rating: f64,
    #[serde(rename = "isMVP")]
    pub is_mvp: bool,
}

impl PlayerStat {
    pub fn baseline(player_id: i64, player_name: impl Into<String>) -> Self {
        PlayerStat {
            player_id,
            player_name: player_name.into(),
            goals: 0,
            assists: 0,
            interceptions: 0,
            yellow_cards: 0,
            red_cards: 0,
            rating: BASELINE_RATING,
            is_mvp: false,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            goals: self.goals,
            assists: self.assists,
            interceptions: self.interceptions,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Goals,
    Assists,
    Interceptions,
    YellowCards,
    RedCards,
}

impl StatField {
    pub const ALL: [StatField; 5] = [
        StatField::Goals,
        StatField::Assists,
        StatField::Interceptions,
        StatField::YellowCards,
        StatField::RedCards,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatField::Goals => "Goals",
            StatField::Assists => "Assists",
            StatField::Interceptions => "Interceptions",
            StatField::YellowCards => "Yellow",
            StatField::RedCards => "Red",
        }
    }
}

/// Recomputes every rating and re-flags MVPs. All ties at the top rating
/// among players with activity are flagged; card-only or blank stat lines
/// never are.
pub fn evaluate_mvp(stats: &mut [PlayerStat]) {
    for entry in stats.iter_mut() {
        entry.rating = rating(entry.stats());
    }
    let top = stats
        .iter()
        .filter(|entry| entry.stats().has_activity())
        .map(|entry| entry.rating)
        .fold(None::<f64>, |acc, r| Some(acc.map_or(r, |m| m.max(r))));
    for entry in stats.iter_mut() {
        entry.is_mvp = match top {
            Some(max) => entry.stats().has_activity() && entry.rating == max,
            None => false,
        };
    }
}

/// Applies a +/-1 adjustment to one field (floored at zero) and re-evaluates
/// the whole set.
pub fn adjust_stat(stats: &mut [PlayerStat], index: usize, field: StatField, delta: i32) {
    let Some(entry) = stats.get_mut(index) else {
        return;
    };
    let target = match field {
        StatField::Goals => &mut entry.goals,
        StatField::Assists => &mut entry.assists,
        StatField::Interceptions => &mut entry.interceptions,
        StatField::YellowCards => &mut entry.yellow_cards,
        StatField::RedCards => &mut entry.red_cards,
    };
    *target = target.saturating_add_signed(delta);
    evaluate_mvp(stats);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scale_band() {
        assert_eq!(display_rating(1.0), 66);
        assert_eq!(display_rating(6.0), 85);
        assert_eq!(display_rating(10.0), 100);
    }

    #[test]
    fn adjust_floors_at_zero() {
        let mut set = vec![PlayerStat::baseline(1, "A")];
        adjust_stat(&mut set, 0, StatField::Goals, -1);
        assert_eq!(set[0].goals, 0);
        assert_eq!(set[0].rating, BASELINE_RATING);
        adjust_stat(&mut set, 0, StatField::Goals, 1);
        assert_eq!(set[0].goals, 1);
        assert_eq!(set[0].rating, 7.0);
    }
}
