mod components;
mod config;
mod decay;
mod error;
mod mock;
mod model;
mod scene;
mod state;
mod ticker;
mod util;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("virtual garden starting");
    yew::Renderer::<App>::new().render();
}
