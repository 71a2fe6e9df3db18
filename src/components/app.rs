use chrono::Utc;
use yew::prelude::*;

use super::{
    add_tree_dialog::AddTreeDialog, challenge_card::ChallengeCard, garden_stats::GardenStats,
    garden_view::GardenView, leaderboard_card::LeaderboardCard, toast::ToastView,
};
use crate::config::GardenConfig;
use crate::model::{ChallengeId, GardenAction, GardenState, NewTree, Notice, NoticeTone};
use crate::ticker::Interval;
use crate::util::format_points;

#[derive(PartialEq, Clone, Copy)]
enum Tab {
    Garden,
    Challenges,
    Leaderboard,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Garden, Tab::Challenges, Tab::Leaderboard];

    fn title(self) -> &'static str {
        match self {
            Tab::Garden => "🌲 Garden",
            Tab::Challenges => "🎯 Challenges",
            Tab::Leaderboard => "🏆 Leaderboard",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let tab = use_state(|| Tab::Garden);
    let garden = use_reducer(|| GardenState::new_demo(GardenConfig::load(), Utc::now()));
    let show_plant = use_state(|| false);
    let toast = use_state(|| None::<Notice>);
    let toast_seq = use_mut_ref(|| 0_u64);

    // Decay/growth ticker; the interval is cleared when the app unmounts.
    {
        let garden = garden.clone();
        let period = garden.config.tick_interval_ms;
        use_effect_with(period, move |_| {
            log::info!("starting garden ticker every {}ms", period);
            let ticker = Interval::start(period, move || {
                garden.dispatch(GardenAction::Tick { now: Utc::now() });
            })
            .map_err(|e| log::warn!("ticker not started: {}", e))
            .ok();
            move || drop(ticker)
        });
    }

    let show_toast: Callback<(NoticeTone, String)> = {
        let toast = toast.clone();
        let toast_seq = toast_seq.clone();
        Callback::from(move |(tone, message): (NoticeTone, String)| {
            let seq = {
                let mut s = toast_seq.borrow_mut();
                *s += 1;
                *s
            };
            toast.set(Some(Notice { seq, tone, message }));
        })
    };

    // Store notices come from the mutation that produced them.
    {
        let show_toast = show_toast.clone();
        let notice = garden.notice.clone();
        use_effect_with(notice.as_ref().map(|n| n.seq), move |_| {
            if let Some(n) = notice {
                show_toast.emit((n.tone, n.message));
            }
            || ()
        });
    }

    let dismiss_toast = {
        let toast = toast.clone();
        Callback::from(move |()| toast.set(None))
    };
    let open_plant = {
        let show_plant = show_plant.clone();
        Callback::from(move |_| show_plant.set(true))
    };
    let close_plant = {
        let show_plant = show_plant.clone();
        Callback::from(move |()| show_plant.set(false))
    };
    let plant = {
        let garden = garden.clone();
        Callback::from(move |planting: NewTree| {
            garden.dispatch(GardenAction::AddTree { planting, now: Utc::now() });
        })
    };
    let complete = {
        let garden = garden.clone();
        Callback::from(move |id: ChallengeId| garden.dispatch(GardenAction::CompleteChallenge { id }))
    };
    let on_info = {
        let show_toast = show_toast.clone();
        Callback::from(move |msg: String| show_toast.emit((NoticeTone::Info, msg)))
    };

    let tab_bar = Tab::ALL
        .iter()
        .map(|t| {
            let active = *tab == *t;
            let onclick = {
                let tab = tab.clone();
                let t = *t;
                Callback::from(move |_| tab.set(t))
            };
            let style = if active {
                "flex:1; padding:8px; background:#238636; border:1px solid #2ea043; color:#fff; border-radius:6px;"
            } else {
                "flex:1; padding:8px; background:#161b22; border:1px solid #30363d; color:#c9d1d9; border-radius:6px;"
            };
            html! { <button {onclick} {style}>{ t.title() }</button> }
        })
        .collect::<Html>();

    let content = match *tab {
        Tab::Garden => html! {
            <GardenView garden={garden.clone()} on_info={on_info} />
        },
        Tab::Challenges => html! {
            <div style="display:flex; flex-direction:column; gap:12px;">
                <h2 style="margin:0; font-size:18px;">{"Daily Challenges"}</h2>
                { for garden.challenges.iter().map(|c| html! {
                    <ChallengeCard key={c.id.0} challenge={c.clone()} on_complete={complete.clone()} />
                }) }
            </div>
        },
        Tab::Leaderboard => html! {
            <div style="display:flex; flex-direction:column; gap:10px;">
                <h2 style="margin:0; font-size:18px;">{"Garden Masters"}</h2>
                { for garden.leaderboard.iter().map(|e| html! {
                    <LeaderboardCard key={e.user.id.clone()} entry={e.clone()} />
                }) }
            </div>
        },
    };

    html! {
        <div id="root" style="min-height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <header id="top-bar" style="display:flex; align-items:center; justify-content:space-between; padding:12px 20px; background:rgba(22,27,34,0.9); border-bottom:1px solid #30363d;">
                <div>
                    <h1 style="margin:0; font-size:22px; color:#3fb950;">{"🌳 Virtual Garden"}</h1>
                    <div style="font-size:12px; opacity:0.7;">{"Grow, nurture, and thrive"}</div>
                </div>
                <div style="display:flex; align-items:center; gap:16px;">
                    <div style="text-align:right;">
                        <div style="font-size:18px; font-weight:700; color:#3fb950;">{ format_points(garden.user.total_points) }</div>
                        <div style="font-size:11px; opacity:0.7;">{"Total Points"}</div>
                    </div>
                    <button onclick={open_plant} style="padding:8px 12px; background:#238636; border:1px solid #2ea043; color:#fff; border-radius:6px;">{"+ Plant New Tree"}</button>
                </div>
            </header>
            <main style="max-width:960px; margin:0 auto; padding:16px 20px; display:flex; flex-direction:column; gap:16px;">
                <GardenStats
                    level={garden.user.level}
                    tree_count={garden.trees.len()}
                    healthy={garden.healthy_tree_count()}
                    average_age={garden.average_age()}
                />
                <div style="display:flex; gap:8px;">{ tab_bar }</div>
                { content }
            </main>
            <AddTreeDialog show={*show_plant} on_close={close_plant} on_plant={plant} />
            <ToastView notice={(*toast).clone()} duration_ms={garden.config.toast_ms} on_dismiss={dismiss_toast} />
        </div>
    }
}
