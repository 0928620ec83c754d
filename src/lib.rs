use leptos::prelude::*;

mod api;
mod components;
mod document;
mod store;
mod types;

use components::users_table::UsersTable;
use store::UsersStore;

#[component]
pub fn App() -> impl IntoView {
    provide_context(UsersStore::new());

    view! {
        <div class="min-h-screen bg-gray-100">
            <UsersTable />
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
