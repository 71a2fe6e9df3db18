// Demo data for a fresh session. Nothing here is persisted.

use chrono::{DateTime, Duration, Utc};

use crate::model::{
    Challenge, ChallengeId, ChallengeKind, GrowthStage, LeaderboardEntry, Species, Tree, TreeId,
    User,
};

pub fn mock_user() -> User {
    User {
        id: "1".to_string(),
        name: "Garden Master".to_string(),
        level: 5,
        total_points: 2450,
        trees_planted: 12,
        challenges_completed: 23,
    }
}

pub fn mock_trees(now: DateTime<Utc>) -> Vec<Tree> {
    let tree = |species, age, health, position, hours_dry, growth_stage| Tree {
        id: TreeId::new(),
        species,
        age,
        health,
        position,
        last_watered: now - Duration::hours(hours_dry),
        growth_stage,
        photo_url: None,
    };
    vec![
        tree(Species::Oak, 15.0, 95.0, [-2.0, 0.0, -2.0], 12, GrowthStage::Young),
        tree(Species::Pine, 8.0, 85.0, [3.0, 0.0, 1.0], 6, GrowthStage::Sapling),
        tree(Species::Cherry, 25.0, 90.0, [0.0, 0.0, 4.0], 8, GrowthStage::Mature),
    ]
}

pub fn mock_challenges(now: DateTime<Utc>) -> Vec<Challenge> {
    let challenge = |id, title: &str, description: &str, kind, reward, completed, hours_left| {
        Challenge {
            id: ChallengeId(id),
            title: title.to_string(),
            description: description.to_string(),
            kind,
            reward,
            completed,
            expires_at: now + Duration::hours(hours_left),
        }
    };
    vec![
        challenge(
            1,
            "Water 3 Trees",
            "Keep your garden hydrated by watering 3 different trees",
            ChallengeKind::Water,
            150,
            false,
            18,
        ),
        challenge(
            2,
            "Plant a New Tree",
            "Expand your garden by planting a new tree",
            ChallengeKind::Plant,
            200,
            false,
            22,
        ),
        challenge(
            3,
            "Visit 5 Gardens",
            "Explore other players' gardens for inspiration",
            ChallengeKind::Social,
            100,
            true,
            12,
        ),
    ]
}

/// Static weekly standings; the player sits at rank 4.
pub fn mock_leaderboard() -> Vec<LeaderboardEntry> {
    let me = mock_user();
    let rival = |id: &str, name: &str, total_points| User {
        id: id.to_string(),
        name: name.to_string(),
        total_points,
        ..mock_user()
    };
    vec![
        LeaderboardEntry { user: rival("2", "TreeMaster Pro", 3200), rank: 1, weekly_points: 850 },
        LeaderboardEntry { user: rival("3", "Garden Sage", 2890), rank: 2, weekly_points: 720 },
        LeaderboardEntry { user: rival("4", "Forest Friend", 2650), rank: 3, weekly_points: 680 },
        LeaderboardEntry { user: me, rank: 4, weekly_points: 540 },
        LeaderboardEntry { user: rival("5", "Nature Lover", 2100), rank: 5, weekly_points: 480 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_leaderboard_ranks_are_sequential() {
        let board = mock_leaderboard();
        for (i, e) in board.iter().enumerate() {
            assert_eq!(e.rank as usize, i + 1);
        }
        let ids: HashSet<&str> = board.iter().map(|e| e.user.id.as_str()).collect();
        assert_eq!(ids.len(), board.len());
    }

    #[test]
    fn test_mock_trees_match_their_age_stage() {
        for t in mock_trees(Utc::now()) {
            assert_eq!(GrowthStage::for_age(t.age), t.growth_stage);
        }
    }
}
