//! Add/edit form for a single user record.

use leptos::prelude::*;
use serde_json::Value;

use super::dynamic_form::{DynamicForm, FieldKind, FormField, FormValues, SelectOption};
use crate::document;
use crate::store::UsersStore;
use crate::types::User;

/// Ordered field schema for the user record. Built fresh per edited record;
/// the initial values are captured from `user` at construction time.
pub fn user_fields(user: &User) -> Vec<FormField> {
    vec![
        FormField::new("name.title", "Title", FieldKind::Select)
            .required()
            .value(user.name.title.clone())
            .options(vec![
                SelectOption::new("Mr", "Mr"),
                SelectOption::new("Mrs", "Mrs"),
                SelectOption::new("Miss", "Miss"),
                SelectOption::new("Ms", "Ms"),
                SelectOption::new("Dr", "Dr"),
            ]),
        FormField::new("name.first", "First Name", FieldKind::Text)
            .required()
            .value(user.name.first.clone())
            .validator(|value: &Value| {
                let first = value.as_str().unwrap_or_default();
                if first.chars().count() < 3 {
                    Err("First name must be at least 3 characters".to_string())
                } else {
                    Ok(true)
                }
            }),
        FormField::new("name.last", "Last Name", FieldKind::Text)
            .required()
            .value(user.name.last.clone()),
        FormField::new("email", "Email", FieldKind::Email)
            .required()
            .value(user.email.clone()),
        FormField::new("location.street.number", "Street Number", FieldKind::Number)
            .required()
            .value(user.location.street.number),
        FormField::new("location.street.name", "Street Name", FieldKind::Text)
            .required()
            .value(user.location.street.name.clone()),
        FormField::new("location.city", "City", FieldKind::Text)
            .required()
            .value(user.location.city.clone()),
        FormField::new("location.country", "Country", FieldKind::Text)
            .required()
            .value(user.location.country.clone()),
    ]
}

/// A record with no identity yet has never been in the store, so it is
/// created; anything carrying an id is an edit of an existing record.
pub fn is_new_record(user: &User) -> bool {
    user.id.is_empty()
}

/// Applies the submitted values onto a clone of `user` and returns the
/// merged record. `user` itself is never mutated; on any failure the clone
/// is discarded.
pub fn merge_into_user(user: &User, values: &FormValues) -> Result<User, String> {
    let source = serde_json::to_value(user)
        .map_err(|e| format!("Failed to serialize record: {}", e))?;
    let draft = document::deep_clone(&document::from_json(&source));
    document::apply_values(&draft, values).map_err(|e| e.to_string())?;
    serde_json::from_value(document::to_json(&draft))
        .map_err(|e| format!("Merged record is malformed: {}", e))
}

/// Modal body for adding or editing a user. With no `user` prop it opens a
/// blank record and dispatches a store `add` on save; with one it
/// dispatches an `update`.
#[component]
pub fn UserEdit(
    #[prop(optional_no_strip)] user: Option<User>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let user = user.unwrap_or_default();
    let is_new = is_new_record(&user);
    let fields = user_fields(&user);
    let store = UsersStore::expect();

    let avatar = user.picture.medium.clone();
    let avatar_alt = user.name.first.clone();

    let on_submit = Callback::new(move |values: FormValues| {
        match merge_into_user(&user, &values) {
            Ok(saved) => {
                if is_new {
                    store.add(saved);
                } else {
                    store.update(saved);
                }
            }
            Err(message) => {
                log::error!("discarding edit of user `{}`: {}", user.id, message);
            }
        }
    });

    view! {
        <h1 class="text-xl font-semibold mb-4">
            {if is_new { "Add User" } else { "Edit User" }}
        </h1>
        <div class="flex justify-center pb-4">
            {(!avatar.is_empty()).then(|| view! {
                <img src=avatar.clone() alt=avatar_alt.clone() class="h-20 w-20 rounded-full" />
            })}
        </div>
        <DynamicForm fields=fields on_submit=on_submit on_close=on_close />
    }
}
