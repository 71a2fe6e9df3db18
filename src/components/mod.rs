pub mod add_tree_dialog;
pub mod app;
pub mod camera_controls;
pub mod challenge_card;
pub mod garden_stats;
pub mod garden_view;
pub mod leaderboard_card;
pub mod toast;

pub use app::App;
