use web_sys::{HtmlInputElement, HtmlSelectElement, Url};
use yew::prelude::*;

use crate::error::{GardenError, Result};
use crate::model::{NewTree, Species};
use crate::scene::composer::palette_for_label;

/// Planting is limited to the inner part of the ground plane.
pub const PLANT_LIMIT: f64 = 8.0;

/// Parses a coordinate field. Blank means 0; values are clamped to
/// `[-PLANT_LIMIT, PLANT_LIMIT]`.
pub fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let v: f64 = raw.parse().map_err(|_| GardenError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if !v.is_finite() {
        return Err(GardenError::InvalidNumber { field, value: raw.to_string() });
    }
    Ok(v.clamp(-PLANT_LIMIT, PLANT_LIMIT))
}

/// Species and clamped position from the raw form fields.
pub fn read_form(species: &str, x_raw: &str, z_raw: &str) -> Result<(Species, f64, f64)> {
    let species = species.parse::<Species>()?;
    let x = parse_coordinate("x", x_raw)?;
    let z = parse_coordinate("z", z_raw)?;
    Ok((species, x, z))
}

#[derive(Properties, PartialEq, Clone)]
pub struct AddTreeDialogProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub on_plant: Callback<NewTree>,
}

#[function_component(AddTreeDialog)]
pub fn add_tree_dialog(props: &AddTreeDialogProps) -> Html {
    // Raw select value; parsed on submit.
    let species = use_state(|| Species::Oak.label().to_string());
    let x_raw = use_state(|| "0".to_string());
    let z_raw = use_state(|| "0".to_string());
    let photo = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

    if !props.show {
        return html! {};
    }

    let on_species = {
        let species = species.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            species.set(select.value());
        })
    };
    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    let on_photo = {
        let photo = photo.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                photo.set(None);
                return;
            };
            match Url::create_object_url_with_blob(&file) {
                Ok(url) => photo.set(Some(url)),
                Err(e) => log::warn!("photo not attached: {}", GardenError::from(e)),
            }
        })
    };
    let close = {
        let cb = props.on_close.clone();
        let error = error.clone();
        Callback::from(move |_| {
            error.set(None);
            cb.emit(());
        })
    };
    let submit = {
        let on_plant = props.on_plant.clone();
        let on_close = props.on_close.clone();
        let species = species.clone();
        let x_raw = x_raw.clone();
        let z_raw = z_raw.clone();
        let photo = photo.clone();
        let error = error.clone();
        Callback::from(move |_| {
            match read_form(&species, &x_raw, &z_raw) {
                Ok((kind, x, z)) => {
                    let planting = NewTree { photo_url: (*photo).clone(), ..NewTree::seedling(kind, x, z) };
                    on_plant.emit(planting);
                    photo.set(None);
                    x_raw.set("0".to_string());
                    z_raw.set("0".to_string());
                    error.set(None);
                    on_close.emit(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    let options = Species::ALL
        .iter()
        .map(|s| html! { <option value={s.label()} selected={s.label() == species.as_str()}>{ s.display_name() }</option> })
        .collect::<Html>();
    let colors = palette_for_label(&species);
    let swatch = |color: &str| html! {
        <span style={format!("width:18px; height:18px; border-radius:50%; border:1px solid #30363d; background:{};", color)}></span>
    };
    let field = "display:flex; flex-direction:column; gap:4px; font-size:13px;";
    let input_style = "padding:6px; background:#0e1116; border:1px solid #30363d; color:#c9d1d9; border-radius:4px;";

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Plant a New Tree"}</h3>
                <button onclick={close.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <label style={field}>
                <span>{"Tree Species"}</span>
                <select onchange={on_species} style={input_style}>{ options }</select>
            </label>
            <div style="display:flex; align-items:center; gap:6px; font-size:12px; opacity:0.8;">
                { swatch(colors.trunk) }
                { swatch(colors.leaves) }
                { swatch(colors.leaves_secondary) }
                <span>{"starts as a seedling"}</span>
            </div>
            <div style="display:flex; gap:10px;">
                <label style={format!("{} flex:1;", field)}>
                    <span>{"X Position"}</span>
                    <input type="number" min="-8" max="8" step="0.5" value={(*x_raw).clone()} oninput={text_input(&x_raw)} style={input_style} />
                </label>
                <label style={format!("{} flex:1;", field)}>
                    <span>{"Z Position"}</span>
                    <input type="number" min="-8" max="8" step="0.5" value={(*z_raw).clone()} oninput={text_input(&z_raw)} style={input_style} />
                </label>
            </div>
            <label style={field}>
                <span>{"Photo (optional)"}</span>
                <input type="file" accept="image/*" onchange={on_photo} />
            </label>
            { if let Some(msg) = &*error {
                html! { <div style="color:#f85149; font-size:12px;">{ msg.clone() }</div> }
            } else { html! {} } }
            <div style="display:flex; gap:8px;">
                <button onclick={submit} style="flex:1; padding:8px; background:#238636; border:1px solid #2ea043; color:#fff; border-radius:6px;">{"🌱 Plant Tree"}</button>
                <button onclick={close} style="flex:0 0 auto; padding:8px;">{"Cancel"}</button>
            </div>
        </div>
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_coordinate_is_origin() {
        assert_eq!(parse_coordinate("x", "").unwrap(), 0.0);
        assert_eq!(parse_coordinate("x", "   ").unwrap(), 0.0);
    }

    #[test]
    fn test_coordinate_is_clamped() {
        assert_eq!(parse_coordinate("x", "3.5").unwrap(), 3.5);
        assert_eq!(parse_coordinate("x", "12").unwrap(), 8.0);
        assert_eq!(parse_coordinate("z", "-40").unwrap(), -8.0);
    }

    #[test]
    fn test_bad_coordinate_names_field() {
        let err = parse_coordinate("z", "abc").unwrap_err();
        assert!(matches!(err, GardenError::InvalidNumber { field: "z", .. }));
        assert!(err.to_string().contains("abc"));
        assert!(parse_coordinate("x", "NaN").is_err());
    }

    #[test]
    fn test_read_form() {
        assert_eq!(read_form("pine", "2", "-12").unwrap(), (Species::Pine, 2.0, -8.0));
        assert!(matches!(read_form("baobab", "0", "0"), Err(GardenError::UnknownSpecies(_))));
        assert!(matches!(read_form("oak", "1", "x"), Err(GardenError::InvalidNumber { field: "z", .. })));
    }
}
