use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_rotate_left: Callback<()>,
    pub on_rotate_right: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let relay = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button title="Zoom out" onclick={relay(&props.on_zoom_out)}> {"-"} </button>
        <button title="Zoom in" onclick={relay(&props.on_zoom_in)}> {"+"} </button>
        <span style="width:8px;"></span>
        <button title="Rotate left" onclick={relay(&props.on_rotate_left)}> {"⟲"} </button>
        <button title="Rotate right" onclick={relay(&props.on_rotate_right)}> {"⟳"} </button>
        <span style="width:8px;"></span>
        <button onclick={relay(&props.on_reset)}> {"Reset"} </button>
    </div>}
}
