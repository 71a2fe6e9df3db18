use chrono::Utc;
use yew::prelude::*;

use crate::model::{Challenge, ChallengeId, ChallengeKind};
use crate::util::hours_left;

fn kind_icon(kind: ChallengeKind) -> &'static str {
    match kind {
        ChallengeKind::Water => "💧",
        ChallengeKind::Plant => "🌱",
        ChallengeKind::Care => "🌿",
        ChallengeKind::Social => "👥",
    }
}

/// (background, text) colors of the category badge.
fn kind_badge(kind: ChallengeKind) -> (&'static str, &'static str) {
    match kind {
        ChallengeKind::Water => ("#0c2d6b", "#58a6ff"),
        ChallengeKind::Plant => ("#033a16", "#3fb950"),
        ChallengeKind::Care => ("#3b2300", "#d29922"),
        ChallengeKind::Social => ("#2d1b4e", "#bc8cff"),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ChallengeCardProps {
    pub challenge: Challenge,
    pub on_complete: Callback<ChallengeId>,
}

#[function_component(ChallengeCard)]
pub fn challenge_card(props: &ChallengeCardProps) -> Html {
    let c = &props.challenge;
    let (badge_bg, badge_fg) = kind_badge(c.kind);
    let hours = hours_left(c.expires_at, Utc::now());

    let action = if c.completed {
        html! { <span style="color:#3fb950; font-weight:600;">{"✓ Completed"}</span> }
    } else {
        let onclick = {
            let cb = props.on_complete.clone();
            let id = c.id;
            Callback::from(move |_| cb.emit(id))
        };
        html! { <button {onclick} style="padding:6px 12px; background:#238636; border:1px solid #2ea043; color:#fff; border-radius:6px;">{"Complete"}</button> }
    };
    let border = if c.completed { "#2ea043" } else { "#30363d" };

    html! {
        <div style={format!("background:rgba(22,27,34,0.9); border:1px solid {}; border-radius:8px; padding:12px 16px; display:flex; flex-direction:column; gap:8px;", border)}>
            <div style="display:flex; align-items:center; gap:10px;">
                <span style="font-size:22px;">{ kind_icon(c.kind) }</span>
                <div style="flex:1;">
                    <div style="font-weight:600;">{ c.title.clone() }</div>
                    <div style="font-size:13px; opacity:0.8;">{ c.description.clone() }</div>
                </div>
                <span style={format!("padding:2px 8px; border-radius:10px; font-size:11px; background:{}; color:{};", badge_bg, badge_fg)}>{ c.kind.label() }</span>
            </div>
            <div style="display:flex; align-items:center; justify-content:space-between; font-size:13px;">
                <span style="opacity:0.7;">{ format!("⏰ {}h left", hours) }</span>
                <span style="color:#d4af37; font-weight:600;">{ format!("+{} points", c.reward) }</span>
                { action }
            </div>
        </div>
    }
}
