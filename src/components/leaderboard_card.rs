use yew::prelude::*;

use crate::model::LeaderboardEntry;
use crate::util::format_points;

pub fn rank_icon(rank: u32) -> String {
    match rank {
        1 => "👑".to_string(),
        2 => "🏆".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{}", n),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardCardProps {
    pub entry: LeaderboardEntry,
}

#[function_component(LeaderboardCard)]
pub fn leaderboard_card(props: &LeaderboardCardProps) -> Html {
    let e = &props.entry;
    let card_style = if e.rank <= 3 {
        "background:linear-gradient(90deg, rgba(212,175,55,0.18), rgba(22,27,34,0.9)); border:1px solid #d4af37;"
    } else {
        "background:rgba(22,27,34,0.9); border:1px solid #30363d;"
    };
    let badge = "padding:2px 8px; border-radius:10px; font-size:11px; background:#21262d;";
    html! {
        <div style={format!("{} border-radius:8px; padding:10px 14px; display:flex; align-items:center; gap:12px;", card_style)}>
            <span style="width:36px; text-align:center; font-size:20px; font-weight:700;">{ rank_icon(e.rank) }</span>
            <div style="flex:1; display:flex; flex-direction:column; gap:4px;">
                <span style="font-weight:600;">{ e.user.name.clone() }</span>
                <div style="display:flex; gap:6px;">
                    <span style={badge}>{ format!("🌳 {} trees", e.user.trees_planted) }</span>
                    <span style={badge}>{ format!("🎯 {} challenges", e.user.challenges_completed) }</span>
                </div>
            </div>
            <div style="text-align:right;">
                <div style="color:#3fb950; font-weight:700;">{ format_points(e.weekly_points as u64) }</div>
                <div style="font-size:11px; opacity:0.7;">{"this week"}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_icons() {
        assert_eq!(rank_icon(1), "👑");
        assert_eq!(rank_icon(2), "🏆");
        assert_eq!(rank_icon(3), "🥉");
        assert_eq!(rank_icon(4), "#4");
        assert_eq!(rank_icon(12), "#12");
    }
}
