//! Core data models for the virtual garden.
//! Entities, the garden store, and the reducer actions that mutate it.

use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use uuid::Uuid;
use yew::Reducible;

use crate::config::GardenConfig;
use crate::decay;
use crate::error::GardenError;
use crate::mock;

// ---------------- Entities -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeId(pub Uuid);

impl TreeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChallengeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    Oak,
    Pine,
    Cherry,
    Maple,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Oak, Species::Pine, Species::Cherry, Species::Maple];

    pub fn label(self) -> &'static str {
        match self {
            Species::Oak => "oak",
            Species::Pine => "pine",
            Species::Cherry => "cherry",
            Species::Maple => "maple",
        }
    }

    /// Option text in the plant dialog.
    pub fn display_name(self) -> &'static str {
        match self {
            Species::Oak => "Oak Tree 🌳",
            Species::Pine => "Pine Tree 🌲",
            Species::Cherry => "Cherry Tree 🌸",
            Species::Maple => "Maple Tree 🍁",
        }
    }
}

impl FromStr for Species {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oak" => Ok(Species::Oak),
            "pine" => Ok(Species::Pine),
            "cherry" => Ok(Species::Cherry),
            "maple" => Ok(Species::Maple),
            _ => Err(GardenError::UnknownSpecies(s.to_string())),
        }
    }
}

/// Lifecycle bucket of a tree. Ordered from youngest to oldest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrowthStage {
    Seedling,
    Sapling,
    Young,
    Mature,
    Ancient,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seedling,
        GrowthStage::Sapling,
        GrowthStage::Young,
        GrowthStage::Mature,
        GrowthStage::Ancient,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Sapling => "sapling",
            GrowthStage::Young => "young",
            GrowthStage::Mature => "mature",
            GrowthStage::Ancient => "ancient",
        }
    }

    /// Stage implied by age in days.
    pub fn for_age(age_days: f64) -> Self {
        match age_days {
            a if a < 3.0 => GrowthStage::Seedling,
            a if a < 10.0 => GrowthStage::Sapling,
            a if a < 20.0 => GrowthStage::Young,
            a if a < 50.0 => GrowthStage::Mature,
            _ => GrowthStage::Ancient,
        }
    }
}

impl FromStr for GrowthStage {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seedling" => Ok(GrowthStage::Seedling),
            "sapling" => Ok(GrowthStage::Sapling),
            "young" => Ok(GrowthStage::Young),
            "mature" => Ok(GrowthStage::Mature),
            "ancient" => Ok(GrowthStage::Ancient),
            _ => Err(GardenError::UnknownStage(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub id: TreeId,
    pub species: Species,
    /// Age in days; never decreases.
    pub age: f64,
    /// Kept within the configured health band (10..=100 by default).
    pub health: f64,
    pub position: [f64; 3],
    pub last_watered: DateTime<Utc>,
    pub growth_stage: GrowthStage,
    pub photo_url: Option<String>,
}

/// What the plant dialog hands to [`GardenState::add_tree`]: a tree minus the
/// fields the store assigns.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTree {
    pub species: Species,
    pub health: f64,
    pub position: [f64; 3],
    pub growth_stage: GrowthStage,
    pub photo_url: Option<String>,
}

impl NewTree {
    pub fn seedling(species: Species, x: f64, z: f64) -> Self {
        Self {
            species,
            health: 100.0,
            position: [x, 0.0, z],
            growth_stage: GrowthStage::Seedling,
            photo_url: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChallengeKind {
    Water,
    Plant,
    Care,
    Social,
}

impl ChallengeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChallengeKind::Water => "water",
            ChallengeKind::Plant => "plant",
            ChallengeKind::Care => "care",
            ChallengeKind::Social => "social",
        }
    }
}

impl FromStr for ChallengeKind {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "water" => Ok(ChallengeKind::Water),
            "plant" => Ok(ChallengeKind::Plant),
            "care" => Ok(ChallengeKind::Care),
            "social" => Ok(ChallengeKind::Social),
            _ => Err(GardenError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub reward: u32,
    /// Never goes back to false.
    pub completed: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub total_points: u64,
    pub trees_planted: u32,
    pub challenges_completed: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub user: User,
    pub rank: u32,
    pub weekly_points: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Info,
}

/// A transient message for the toast area.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub seq: u64,
    pub tone: NoticeTone,
    pub message: String,
}

// ---------------- Store -----------------

#[derive(Clone, Debug, PartialEq)]
pub struct GardenState {
    pub user: User,
    pub trees: Vec<Tree>,
    pub challenges: Vec<Challenge>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub config: GardenConfig,
    /// Last notice produced by a mutation.
    pub notice: Option<Notice>,
    notice_seq: u64,
}

impl GardenState {
    pub fn empty(config: GardenConfig) -> Self {
        Self {
            user: mock::mock_user(),
            trees: Vec::new(),
            challenges: Vec::new(),
            leaderboard: Vec::new(),
            config,
            notice: None,
            notice_seq: 0,
        }
    }

    /// A fresh session seeded with the demo data.
    pub fn new_demo(config: GardenConfig, now: DateTime<Utc>) -> Self {
        Self {
            trees: mock::mock_trees(now),
            challenges: mock::mock_challenges(now),
            leaderboard: mock::mock_leaderboard(),
            ..Self::empty(config)
        }
    }

    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    pub fn challenge(&self, id: ChallengeId) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    fn fresh_tree_id(&self) -> TreeId {
        loop {
            let id = TreeId::new();
            if self.tree(id).is_none() {
                return id;
            }
        }
    }

    fn push_notice(&mut self, tone: NoticeTone, message: String) {
        self.notice_seq += 1;
        self.notice = Some(Notice { seq: self.notice_seq, tone, message });
    }

    pub fn add_tree(&mut self, planting: NewTree, now: DateTime<Utc>) -> TreeId {
        let id = self.fresh_tree_id();
        self.trees.push(Tree {
            id,
            species: planting.species,
            age: 0.0,
            health: planting.health,
            position: planting.position,
            last_watered: now,
            growth_stage: planting.growth_stage,
            photo_url: planting.photo_url,
        });
        self.user.trees_planted = self.user.trees_planted.saturating_add(1);
        log::info!("planted {} tree {}", planting.species.label(), id);
        self.push_notice(
            NoticeTone::Success,
            "🌱 New tree planted! Watch it grow in your garden.".to_string(),
        );
        id
    }

    /// Returns the new health, or `None` when no tree has this id.
    pub fn water_tree(&mut self, id: TreeId, now: DateTime<Utc>) -> Option<f64> {
        let boost = self.config.water_boost;
        let max = self.config.max_health;
        let tree = self.trees.iter_mut().find(|t| t.id == id)?;
        tree.last_watered = now;
        tree.health = (tree.health + boost).min(max);
        let health = tree.health;
        log::info!("watered tree {} -> health {:.1}", id, health);
        self.push_notice(NoticeTone::Success, "💧 Tree watered! Health restored.".to_string());
        Some(health)
    }

    /// Returns the reward credited, or `None` if the challenge is unknown or
    /// already completed.
    pub fn complete_challenge(&mut self, id: ChallengeId) -> Option<u32> {
        if self.challenge(id)?.completed {
            log::debug!("challenge {} already completed", id.0);
            return None;
        }
        let challenge = self.challenges.iter_mut().find(|c| c.id == id)?;
        challenge.completed = true;
        let reward = challenge.reward;
        self.user.total_points = self.user.total_points.saturating_add(reward as u64);
        self.user.challenges_completed = self.user.challenges_completed.saturating_add(1);
        log::info!("completed challenge {} (+{})", id.0, reward);
        self.push_notice(
            NoticeTone::Success,
            format!("🏆 Challenge completed! +{} points", reward),
        );
        Some(reward)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        for tree in &mut self.trees {
            decay::tick_tree(tree, now, &self.config);
        }
        log::debug!("tick: {} trees", self.trees.len());
    }

    pub fn healthy_tree_count(&self) -> usize {
        self.trees
            .iter()
            .filter(|t| t.health > self.config.healthy_threshold)
            .count()
    }

    pub fn average_age(&self) -> u32 {
        if self.trees.is_empty() {
            return 0;
        }
        let total: f64 = self.trees.iter().map(|t| t.age).sum();
        (total / self.trees.len() as f64).round() as u32
    }
}

// ---------------- Reducer & Actions -----------------

#[derive(Clone, Debug)]
pub enum GardenAction {
    AddTree { planting: NewTree, now: DateTime<Utc> },
    WaterTree { id: TreeId, now: DateTime<Utc> },
    CompleteChallenge { id: ChallengeId },
    Tick { now: DateTime<Utc> },
}

impl Reducible for GardenState {
    type Action = GardenAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GardenAction::*;
        let mut new = (*self).clone();
        match action {
            AddTree { planting, now } => {
                new.add_tree(planting, now);
            }
            WaterTree { id, now } => {
                if new.water_tree(id, now).is_none() {
                    return self;
                }
            }
            CompleteChallenge { id } => {
                if new.complete_challenge(id).is_none() {
                    return self;
                }
            }
            Tick { now } => new.tick(now),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    fn store() -> GardenState {
        GardenState::new_demo(GardenConfig::default(), Utc::now())
    }

    fn tree_with(state: &mut GardenState, health: f64, watered_days_ago: i64, now: DateTime<Utc>) -> TreeId {
        let id = state.add_tree(NewTree { health, ..NewTree::seedling(Species::Oak, 0.0, 0.0) }, now);
        let t = state.trees.iter_mut().find(|t| t.id == id).unwrap();
        t.last_watered = now - Duration::days(watered_days_ago);
        id
    }

    #[test]
    fn test_add_tree_defaults() {
        let mut s = store();
        let now = Utc::now();
        let before = s.trees.len();
        let planted = s.user.trees_planted;
        let id = s.add_tree(NewTree::seedling(Species::Maple, 2.0, -3.0), now);
        assert_eq!(s.trees.len(), before + 1);
        let t = s.tree(id).unwrap();
        assert_eq!(t.age, 0.0);
        assert_eq!(t.last_watered, now);
        assert_eq!(t.position, [2.0, 0.0, -3.0]);
        assert_eq!(t.growth_stage, GrowthStage::Seedling);
        assert_eq!(s.user.trees_planted, planted + 1);
        assert!(s.notice.as_ref().unwrap().message.contains("New tree planted"));
    }

    #[test]
    fn test_add_tree_ids_are_unique() {
        let mut s = store();
        let now = Utc::now();
        for _ in 0..50 {
            s.add_tree(NewTree::seedling(Species::Pine, 0.0, 0.0), now);
        }
        let ids: HashSet<TreeId> = s.trees.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), s.trees.len());
    }

    #[test]
    fn test_water_caps_at_max_and_stamps_time() {
        let mut s = store();
        let now = Utc::now();
        let id = tree_with(&mut s, 90.0, 2, now);
        let later = now + Duration::minutes(5);
        assert_eq!(s.water_tree(id, later), Some(100.0));
        let t = s.tree(id).unwrap();
        assert_eq!(t.health, 100.0);
        assert_eq!(t.last_watered, later);
    }

    #[test]
    fn test_water_adds_twenty() {
        let mut s = store();
        let now = Utc::now();
        let id = tree_with(&mut s, 40.0, 0, now);
        assert_eq!(s.water_tree(id, now), Some(60.0));
    }

    #[test]
    fn test_water_unknown_id_is_silent_noop() {
        let mut s = store();
        let snapshot = s.clone();
        assert_eq!(s.water_tree(TreeId::new(), Utc::now()), None);
        assert_eq!(s, snapshot);
    }

    #[test]
    fn test_plant_then_water_stays_full() {
        let mut s = store();
        let now = Utc::now();
        let id = s.add_tree(NewTree::seedling(Species::Oak, 1.0, 1.0), now);
        let later = now + Duration::seconds(1);
        s.water_tree(id, later);
        let t = s.tree(id).unwrap();
        assert_eq!(t.health, 100.0);
        assert_eq!(t.last_watered, later);
    }

    #[test]
    fn test_complete_challenge_is_idempotent() {
        let mut s = store();
        let id = s.challenges.iter().find(|c| !c.completed).unwrap().id;
        let reward = s.challenge(id).unwrap().reward;
        let points = s.user.total_points;
        assert_eq!(s.complete_challenge(id), Some(reward));
        assert!(s.challenge(id).unwrap().completed);
        assert_eq!(s.user.total_points, points + reward as u64);
        let after_first = s.clone();
        assert_eq!(s.complete_challenge(id), None);
        assert_eq!(s, after_first);
    }

    #[test]
    fn test_complete_skips_seeded_and_unknown_challenges() {
        let mut s = store();
        let before = s.clone();
        assert!(s.challenge(ChallengeId(3)).unwrap().completed);
        assert_eq!(s.complete_challenge(ChallengeId(3)), None);
        assert_eq!(s.complete_challenge(ChallengeId(999)), None);
        assert_eq!(s, before);
    }

    #[test]
    fn test_complete_notice_carries_reward() {
        let mut s = store();
        let id = ChallengeId(2);
        let reward = s.challenge(id).unwrap().reward;
        s.complete_challenge(id);
        let notice = s.notice.clone().unwrap();
        assert_eq!(notice.message, format!("🏆 Challenge completed! +{} points", reward));
        assert_eq!(notice.tone, NoticeTone::Success);
    }

    #[test]
    fn test_tick_three_days_dry() {
        let mut s = GardenState::empty(GardenConfig::default());
        let now = Utc::now();
        let id = tree_with(&mut s, 100.0, 3, now);
        s.tick(now);
        let t = s.tree(id).unwrap();
        assert!((t.health - 85.0).abs() < 1e-6);
        assert!((t.age - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_tick_ten_days_dry_floors() {
        let mut s = GardenState::empty(GardenConfig::default());
        let now = Utc::now();
        let id = tree_with(&mut s, 20.0, 10, now);
        s.tick(now);
        assert_eq!(s.tree(id).unwrap().health, 10.0);
    }

    #[test]
    fn test_health_stays_in_band_over_many_ticks() {
        let mut s = store();
        let mut now = Utc::now();
        for _ in 0..500 {
            now += Duration::hours(7);
            s.tick(now);
            for t in &s.trees {
                assert!(t.health >= 10.0 && t.health <= 100.0);
            }
        }
    }

    #[test]
    fn test_reducer_skips_rebuild_on_noop() {
        let s = Rc::new(store());
        let out = s.clone().reduce(GardenAction::WaterTree { id: TreeId::new(), now: Utc::now() });
        assert!(Rc::ptr_eq(&s, &out));
        let out = s.clone().reduce(GardenAction::CompleteChallenge { id: ChallengeId(3) });
        assert!(Rc::ptr_eq(&s, &out));
    }

    #[test]
    fn test_reducer_serializes_tick_and_water() {
        let now = Utc::now();
        let s = Rc::new(store());
        let id = s.trees[0].id;
        let s = s.reduce(GardenAction::Tick { now });
        let s = s.reduce(GardenAction::WaterTree { id, now });
        let s = s.reduce(GardenAction::Tick { now });
        let t = s.tree(id).unwrap();
        assert_eq!(t.last_watered, now);
        assert!((t.age - 15.2).abs() < 1e-9);
    }

    #[test]
    fn test_labels_parse_back() {
        for sp in Species::ALL {
            assert_eq!(sp.label().parse::<Species>().unwrap(), sp);
        }
        for st in GrowthStage::ALL {
            assert_eq!(st.label().parse::<GrowthStage>().unwrap(), st);
        }
        assert!("baobab".parse::<Species>().is_err());
        assert!("elder".parse::<GrowthStage>().is_err());
        assert_eq!(" Water ".parse::<ChallengeKind>().unwrap(), ChallengeKind::Water);
    }

    #[test]
    fn test_stage_for_age() {
        assert_eq!(GrowthStage::for_age(0.0), GrowthStage::Seedling);
        assert_eq!(GrowthStage::for_age(8.0), GrowthStage::Sapling);
        assert_eq!(GrowthStage::for_age(15.0), GrowthStage::Young);
        assert_eq!(GrowthStage::for_age(25.0), GrowthStage::Mature);
        assert_eq!(GrowthStage::for_age(120.0), GrowthStage::Ancient);
    }

    #[test]
    fn test_stats_helpers() {
        let mut s = GardenState::empty(GardenConfig::default());
        assert_eq!(s.average_age(), 0);
        let now = Utc::now();
        tree_with(&mut s, 95.0, 0, now);
        tree_with(&mut s, 60.0, 0, now);
        s.trees[0].age = 3.0;
        s.trees[1].age = 6.0;
        assert_eq!(s.healthy_tree_count(), 1);
        assert_eq!(s.average_age(), 5);
    }
}
