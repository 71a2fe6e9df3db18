use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::model::{GardenAction, GardenState, GrowthStage};
use crate::scene::{compose_tree, pick_tree, render, Projector, TreeVisual};
use crate::state::camera::FOV_Y_DEG;
use crate::state::{selection_message, Camera, Selection};
use crate::util::now_secs;

/// Pointer travel (px) below which a press-release counts as a click.
const CLICK_SLOP_PX: f64 = 4.0;

#[derive(Properties, PartialEq, Clone)]
pub struct GardenViewProps {
    pub garden: UseReducerHandle<GardenState>,
    pub on_info: Callback<String>,
}

fn visuals_of(state: &GardenState) -> Vec<TreeVisual> {
    state
        .trees
        .iter()
        .map(|t| compose_tree(t, state.config.warning_health))
        .collect()
}

fn projector_for(camera: &Camera, canvas: &HtmlCanvasElement) -> Projector {
    Projector::new(
        camera.eye(),
        camera.target,
        FOV_Y_DEG,
        canvas.width() as f64,
        canvas.height() as f64,
    )
}

#[function_component(GardenView)]
pub fn garden_view(props: &GardenViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let selection = use_state(|| Selection::None);
    // Mirrors of props/state read from inside the animation loop.
    let garden_ref = use_mut_ref(|| props.garden.clone());
    let selected_ref = use_mut_ref(|| None);
    let press = use_mut_ref(|| None::<(f64, f64)>);

    {
        let garden_ref = garden_ref.clone();
        let handle = props.garden.clone();
        use_effect_with(props.garden.clone(), move |_| {
            *garden_ref.borrow_mut() = handle;
            || ()
        });
    }
    {
        let selected_ref = selected_ref.clone();
        let id = selection.id();
        use_effect_with(id, move |_| {
            *selected_ref.borrow_mut() = id;
            || ()
        });
    }

    // Mount: canvas sizing, wheel zoom, and the animation loop.
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let garden_ref = garden_ref.clone();
        let selected_ref = selected_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let fit_canvas = {
                let canvas = canvas.clone();
                move || {
                    if let Some(c) = &canvas {
                        c.set_width(c.client_width().max(1) as u32);
                        c.set_height(c.client_height().max(1) as u32);
                    }
                }
            };
            fit_canvas();

            let draw: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                Rc::new(move || {
                    let Some(canvas) = &canvas else { return };
                    if !canvas.is_connected() {
                        return;
                    }
                    let Some(ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        return;
                    };
                    let handle = garden_ref.borrow().clone();
                    let visuals = visuals_of(&handle);
                    let projector = projector_for(&camera.borrow(), canvas);
                    render::draw_scene(
                        &ctx,
                        canvas.width() as f64,
                        canvas.height() as f64,
                        &projector,
                        &visuals,
                        *selected_ref.borrow(),
                        now_secs(),
                    );
                })
            };

            let raf_id = Rc::new(RefCell::new(None::<i32>));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            if let Some(window) = &window {
                let frame_cell_loop = frame_cell.clone();
                let raf_id_loop = raf_id.clone();
                let window_loop = window.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    draw();
                    if let Some(cb) = frame_cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_loop.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
                if let Some(cb) = frame_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            let resize_cb = Closure::wrap(Box::new(move || fit_canvas()) as Box<dyn FnMut()>);
            if let Some(window) = &window {
                window
                    .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            let wheel_cb = {
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    camera.borrow_mut().zoom((e.delta_y() * 0.001).exp());
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(c) = &canvas {
                c.add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                    .ok();
            }

            move || {
                if let Some(c) = &canvas {
                    let _ = c.remove_event_listener_with_callback(
                        "wheel",
                        wheel_cb.as_ref().unchecked_ref(),
                    );
                }
                if let Some(window) = &window {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                    if let Some(id) = *raf_id.borrow() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
                // break the self-reference so the frame closure is freed
                frame_cell.borrow_mut().take();
            }
        });
    }

    let on_mouse_down = {
        let camera = camera.clone();
        let press = press.clone();
        Callback::from(move |e: MouseEvent| {
            let (x, y) = (e.offset_x() as f64, e.offset_y() as f64);
            camera.borrow_mut().begin_drag(x, y);
            *press.borrow_mut() = Some((x, y));
        })
    };
    let on_mouse_move = {
        let camera = camera.clone();
        Callback::from(move |e: MouseEvent| {
            camera.borrow_mut().drag_to(e.offset_x() as f64, e.offset_y() as f64);
        })
    };
    let on_mouse_leave = {
        let camera = camera.clone();
        let press = press.clone();
        Callback::from(move |_: MouseEvent| {
            camera.borrow_mut().end_drag();
            press.borrow_mut().take();
        })
    };
    let on_mouse_up = {
        let camera = camera.clone();
        let press = press.clone();
        let canvas_ref = canvas_ref.clone();
        let garden = props.garden.clone();
        let selection = selection.clone();
        let on_info = props.on_info.clone();
        Callback::from(move |e: MouseEvent| {
            camera.borrow_mut().end_drag();
            let (x, y) = (e.offset_x() as f64, e.offset_y() as f64);
            let Some((px, py)) = press.borrow_mut().take() else { return };
            if (x - px).hypot(y - py) > CLICK_SLOP_PX {
                return;
            }
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else { return };
            let projector = projector_for(&camera.borrow(), &canvas);
            let visuals = visuals_of(&garden);
            if let Some(tree) = pick_tree(&visuals, &projector, x, y).and_then(|id| garden.tree(id)) {
                log::debug!("selected tree {}", tree.id);
                selection.set(Selection::Tree(tree.id));
                on_info.emit(selection_message(tree));
            }
        })
    };

    let water_selected = {
        let garden = props.garden.clone();
        let selection = selection.clone();
        Callback::from(move |_| {
            if let Some(id) = selection.id() {
                garden.dispatch(GardenAction::WaterTree { id, now: Utc::now() });
                selection.set(Selection::None);
            }
        })
    };

    let zoom_cb = |factor: f64| {
        let camera = camera.clone();
        Callback::from(move |()| camera.borrow_mut().zoom(factor))
    };
    let orbit_cb = |dx: f64| {
        let camera = camera.clone();
        Callback::from(move |()| camera.borrow_mut().orbit(dx, 0.0))
    };
    let reset_cb = {
        let camera = camera.clone();
        Callback::from(move |()| *camera.borrow_mut() = Camera::default())
    };

    let selected = selection.resolve(&props.garden);
    let water_button = if selected.is_some() {
        html! { <button onclick={water_selected} style="padding:6px 12px; background:#1f6feb; border:1px solid #388bfd; color:#fff; border-radius:6px;">{"💧 Water Selected Tree"}</button> }
    } else {
        html! {}
    };
    let details = match selected {
        Some(tree) => html! {
            <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:12px 16px;">
                <div style="font-weight:600; margin-bottom:8px;">{ format!("Selected Tree: {}", tree.species.label()) }</div>
                <div style="display:grid; grid-template-columns:repeat(3, 1fr); gap:12px; font-size:13px;">
                    <div>{ format!("Age: {} days", tree.age.floor()) }</div>
                    <div>{ format!("Health: {}%", tree.health.floor()) }</div>
                    <div>{ format!("Stage: {}", tree.growth_stage.label()) }</div>
                </div>
                <div style="display:flex; gap:4px; margin-top:8px;">
                    { for GrowthStage::ALL.iter().map(|stage| {
                        let color = if *stage <= tree.growth_stage { "#3fb950" } else { "#30363d" };
                        html! { <span title={stage.label()} style={format!("flex:1; height:4px; border-radius:2px; background:{};", color)}></span> }
                    }) }
                </div>
                { if let Some(url) = &tree.photo_url {
                    html! { <img src={url.clone()} alt="tree photo" style="margin-top:10px; max-width:160px; border-radius:6px;" /> }
                } else { html! {} } }
            </div>
        },
        None => html! {},
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:12px;">
            <div style="display:flex; align-items:center; justify-content:space-between;">
                <h2 style="margin:0; font-size:18px;">{"Your Garden"}</h2>
                { water_button }
            </div>
            <div style="position:relative; width:100%; height:60vh; border-radius:8px; overflow:hidden; border:1px solid #30363d;">
                <canvas
                    ref={canvas_ref}
                    id="garden-canvas"
                    style="display:block; width:100%; height:100%; cursor:pointer;"
                    onmousedown={on_mouse_down}
                    onmousemove={on_mouse_move}
                    onmouseup={on_mouse_up}
                    onmouseleave={on_mouse_leave}
                ></canvas>
                <CameraControls
                    on_zoom_in={zoom_cb(0.85)}
                    on_zoom_out={zoom_cb(1.0 / 0.85)}
                    on_rotate_left={orbit_cb(-60.0)}
                    on_rotate_right={orbit_cb(60.0)}
                    on_reset={reset_cb}
                />
            </div>
            { details }
        </div>
    }
}
