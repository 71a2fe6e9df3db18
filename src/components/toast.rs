use yew::prelude::*;

use crate::model::{Notice, NoticeTone};
use crate::ticker::Timeout;

#[derive(Properties, PartialEq, Clone)]
pub struct ToastViewProps {
    pub notice: Option<Notice>,
    pub duration_ms: u32,
    pub on_dismiss: Callback<()>,
}

/// Shows the latest notice and dismisses it after `duration_ms`. A newer
/// notice restarts the timer.
#[function_component(ToastView)]
pub fn toast_view(props: &ToastViewProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        let duration = props.duration_ms;
        use_effect_with(props.notice.as_ref().map(|n| n.seq), move |seq| {
            let timer = seq.and_then(|_| {
                Timeout::start(duration, move || on_dismiss.emit(()))
                    .map_err(|e| log::warn!("toast timer not started: {}", e))
                    .ok()
            });
            move || drop(timer)
        });
    }

    let Some(notice) = &props.notice else {
        return html! {};
    };
    let (border, icon) = match notice.tone {
        NoticeTone::Success => ("#2ea043", "✅"),
        NoticeTone::Info => ("#388bfd", "ℹ️"),
    };
    let close = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style={format!("position:fixed; right:20px; bottom:20px; z-index:60; background:#161b22; border:1px solid {}; border-radius:8px; padding:10px 14px; display:flex; align-items:center; gap:10px; max-width:360px; box-shadow:0 4px 12px rgba(0,0,0,0.4);", border)}>
            <span>{ icon }</span>
            <span style="flex:1; font-size:14px;">{ notice.message.clone() }</span>
            <button onclick={close} style="padding:2px 6px;">{"×"}</button>
        </div>
    }
}
