//! Users list: fetch-on-mount, table view, add/edit modal, delete dialog.

use leptos::prelude::*;

use super::user_edit::UserEdit;
use crate::api;
use crate::store::UsersStore;
use crate::types::User;

#[component]
pub fn UsersTable() -> impl IntoView {
    let store = UsersStore::expect();

    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (edit_open, set_edit_open) = signal(false);
    let (selected, set_selected) = signal(Option::<User>::None);
    let (delete_target, set_delete_target) = signal(Option::<User>::None);

    let load_users = move || {
        set_loading.set(true);
        set_load_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_users(10).await {
                Ok(users) => {
                    store.set(users);
                    set_loading.set(false);
                }
                Err(e) => {
                    set_load_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    // Initial fetch.
    Effect::new(move || {
        load_users();
    });

    let open_editor = Callback::new(move |user: Option<User>| {
        set_selected.set(user);
        set_edit_open.set(true);
    });
    let request_delete = Callback::new(move |user: User| {
        set_delete_target.set(Some(user));
    });

    let confirm_delete = move |_| {
        if let Some(user) = delete_target.get() {
            store.delete(&user.id);
        }
        set_delete_target.set(None);
    };

    view! {
        <div class="p-6">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-2xl font-bold">"Users"</h2>
                <button
                    class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded"
                    on:click=move |_| open_editor.run(None)
                >
                    "+ Add User"
                </button>
            </div>

            {move || load_error.get().map(|e| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded flex justify-between items-center">
                    <span>{format!("Failed to load users: {}", e)}</span>
                    <button
                        class="px-3 py-1 text-sm bg-red-200 rounded hover:bg-red-300"
                        on:click=move |_| load_users()
                    >
                        "Retry"
                    </button>
                </div>
            })}

            {move || loading.get().then(|| view! {
                <div class="text-gray-500 py-4">"Loading..."</div>
            })}

            <div class="bg-white rounded-lg shadow overflow-hidden">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"First Name"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Last Name"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Email"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Location"</th>
                            <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        {move || store.list().into_iter().map(|user| view! {
                            <UserRow user=user on_edit=open_editor on_delete=request_delete />
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            // Add/edit modal
            {move || edit_open.get().then(|| {
                let user = selected.get();
                view! {
                    <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                        <div class="bg-white rounded-lg p-8 max-w-md w-full mx-4">
                            <UserEdit
                                user=user
                                on_close=Callback::new(move |_| set_edit_open.set(false))
                            />
                        </div>
                    </div>
                }
            })}

            // Delete confirmation
            {move || delete_target.get().map(|user| view! {
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                    <div class="bg-white rounded-lg p-6 max-w-sm w-full mx-4">
                        <h3 class="text-lg font-semibold mb-4">"Delete User"</h3>
                        <p class="text-gray-600 mb-6">
                            "Are you sure you want to delete "
                            <strong>{format!("{} {}", user.name.first, user.name.last)}</strong>
                            "?"
                        </p>
                        <div class="flex justify-end gap-3">
                            <button
                                class="px-4 py-2 border border-gray-300 text-gray-700 rounded hover:bg-gray-50"
                                on:click=move |_| set_delete_target.set(None)
                            >
                                "Cancel"
                            </button>
                            <button
                                class="px-4 py-2 bg-red-500 text-white rounded hover:bg-red-600"
                                on:click=confirm_delete
                            >
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

#[component]
fn UserRow(
    user: User,
    on_edit: Callback<Option<User>>,
    on_delete: Callback<User>,
) -> impl IntoView {
    let edit_user = user.clone();
    let delete_user = user.clone();

    view! {
        <tr class="hover:bg-gray-50">
            <td class="px-6 py-4 whitespace-nowrap">{user.name.first.clone()}</td>
            <td class="px-6 py-4 whitespace-nowrap">{user.name.last.clone()}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-600">{user.email.clone()}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{user.location.address()}</td>
            <td class="px-6 py-4 whitespace-nowrap text-right text-sm font-medium">
                <button
                    class="text-blue-600 hover:text-blue-900 mr-3"
                    on:click=move |_| on_edit.run(Some(edit_user.clone()))
                >
                    "Edit"
                </button>
                <button
                    class="text-red-600 hover:text-red-900"
                    on:click=move |_| on_delete.run(delete_user.clone())
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
