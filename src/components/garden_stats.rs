use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GardenStatsProps {
    pub level: u32,
    pub tree_count: usize,
    pub healthy: usize,
    pub average_age: u32,
}

#[function_component]
pub fn GardenStats(props: &GardenStatsProps) -> Html {
    let cell_style = "flex:1; display:flex; flex-direction:column; align-items:center; gap:2px; padding:10px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px;";
    let value_style = "font-size:20px; font-weight:700; font-variant-numeric:tabular-nums;";
    let label_style = "font-size:11px; opacity:0.7;";
    let cell = |icon: &str, color: &str, value: String, label: &str| {
        html! {
            <div style={cell_style}>
                <span>{ icon.to_string() }</span>
                <span style={format!("{} color:{};", value_style, color)}>{ value }</span>
                <span style={label_style}>{ label.to_string() }</span>
            </div>
        }
    };
    html! {
        <div style="display:flex; gap:10px;">
            { cell("⭐", "#d4af37", props.level.to_string(), "Garden Level") }
            { cell("🌳", "#3fb950", props.tree_count.to_string(), "Trees") }
            { cell("💚", "#56d364", props.healthy.to_string(), "Healthy") }
            { cell("📅", "#58a6ff", format!("{}d", props.average_age), "Avg Age") }
        </div>
    }
}
