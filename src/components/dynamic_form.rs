//! Schema-driven form engine.
//!
//! A form is declared as an ordered list of [`FormField`]s; the component
//! renders the matching control per field kind, keeps the live values in a
//! single form-state signal, and on submit validates the fields in schema
//! order, short-circuiting on the first failure. A successful submit hands
//! the caller a flat map of dotted field name -> final value.

use std::collections::HashMap;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::web_sys;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsCast;

/// Flat dotted-path -> value map produced by a validated form.
pub type FormValues = HashMap<String, Value>;

/// Per-field predicate: `Ok(false)` fails with a generic message,
/// `Err(message)` is a descriptive failure surfaced verbatim.
pub type Validator = Arc<dyn Fn(&Value) -> Result<bool, String> + Send + Sync>;

/// The kind of control a field renders as. Closed set; the value type and
/// input coercion are decided by matching this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Tel,
    Url,
    Password,
    Checkbox,
    Select,
}

impl FieldKind {
    /// HTML input type for the text-like kinds.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Url => "url",
            FieldKind::Password => "password",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select => "select",
        }
    }
}

/// One option of a `Select` field.
#[derive(Clone, Debug)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one editable value: dotted path into the
/// target record, display label, control kind, constraints, initial value.
/// Order within a schema is render order; names are unique per schema.
#[derive(Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: Value,
    pub validator: Option<Validator>,
    pub options: Vec<SelectOption>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Checkbox => Value::Bool(false),
            FieldKind::Number => Value::from(0),
            _ => Value::String(String::new()),
        };
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            value,
            validator: None,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn validator(
        mut self,
        validator: impl Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

/// Why a submission was rejected. Only the first failing field is ever
/// reported per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(String),
    #[error("{0} is invalid")]
    Invalid(String),
    #[error("{0}")]
    Validator(String),
}

/// Empty string, zero, false, and null all count as missing for the
/// required-field gate.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Coerces raw text input per field kind. Number fields try integers first
/// so whole numbers stay integers through the JSON layer; unparseable
/// numeric text becomes `Null`, which the required gate rejects.
pub fn coerce_input(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Number => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::from(n)
            } else if let Ok(f) = raw.parse::<f64>() {
                Value::from(f)
            } else {
                Value::Null
            }
        }
        _ => Value::String(raw.to_string()),
    }
}

/// Validates the fields in schema order against the live values and builds
/// the flat value map. Stops at the first failing field.
pub fn validate_and_collect(
    fields: &[FormField],
    values: &HashMap<String, Value>,
) -> Result<FormValues, FormError> {
    for field in fields {
        let current = values.get(&field.name).unwrap_or(&field.value);
        if field.required && is_falsy(current) {
            return Err(FormError::Required(field.label.clone()));
        }
        if let Some(validator) = &field.validator {
            match validator(current) {
                Ok(true) => {}
                Ok(false) => return Err(FormError::Invalid(field.label.clone())),
                Err(message) => return Err(FormError::Validator(message)),
            }
        }
    }

    Ok(fields
        .iter()
        .map(|field| {
            let value = values.get(&field.name).unwrap_or(&field.value).clone();
            (field.name.clone(), value)
        })
        .collect())
}

/// String form of a value used to match `<select>` options.
fn value_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// String form of a value for a text-like input.
fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// Component
// ============================================================================

/// Renders the declared fields and wires submission.
///
/// On a valid submit, `on_submit` receives the flat value map and `on_close`
/// runs afterwards, each exactly once. On a failed submit neither runs; the
/// error shows in a transient banner and the form stays editable. Cancel
/// falls back to `on_close` when no `on_cancel` is given.
#[component]
pub fn DynamicForm(
    fields: Vec<FormField>,
    #[prop(into)] on_submit: Callback<FormValues>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    for field in &fields {
        if field.kind == FieldKind::Select && field.options.is_empty() {
            log::warn!("select field `{}` declared without options", field.name);
        }
    }

    // Single form-state record; controls read and write through it.
    let initial: HashMap<String, Value> = fields
        .iter()
        .map(|field| (field.name.clone(), field.value.clone()))
        .collect();
    let form_values = RwSignal::new(initial);

    let (error_message, set_error_message) = signal(Option::<String>::None);
    let show_error = move |message: String| {
        set_error_message.set(Some(message));
        let handle = gloo_timers::callback::Timeout::new(3000, move || {
            set_error_message.set(None);
        });
        handle.forget();
    };

    let close = move || {
        if let Some(callback) = on_close {
            callback.run(());
        }
    };
    let cancel = move || match on_cancel {
        Some(callback) => callback.run(()),
        None => close(),
    };

    let schema = fields.clone();
    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match validate_and_collect(&schema, &form_values.get()) {
            Ok(values) => {
                on_submit.run(values);
                close();
            }
            Err(err) => show_error(err.to_string()),
        }
    };

    view! {
        <form on:submit=handle_submit>
            {fields
                .into_iter()
                .map(|field| view! { <FieldInput field=field form_values=form_values /> })
                .collect_view()}
            <div class="flex justify-between mt-6">
                <button
                    type="button"
                    class="px-4 py-2 text-red-600 hover:text-red-800"
                    on:click=move |_| cancel()
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600"
                >
                    "Save"
                </button>
            </div>
        </form>

        {move || error_message.get().map(|message| view! {
            <div class="fixed bottom-4 left-4 px-4 py-3 bg-red-100 border border-red-400 text-red-700 rounded shadow z-50">
                {message}
            </div>
        })}
    }
}

/// One rendered control, dispatched on the field kind.
#[component]
fn FieldInput(field: FormField, form_values: RwSignal<HashMap<String, Value>>) -> impl IntoView {
    let name = field.name.clone();
    let label = field.label.clone();

    match field.kind {
        FieldKind::Checkbox => {
            let read_name = name.clone();
            let write_name = name.clone();
            view! {
                <div class="mb-4 flex items-center gap-2">
                    <input
                        type="checkbox"
                        name=name.clone()
                        prop:checked=move || {
                            form_values.get()
                                .get(&read_name)
                                .and_then(Value::as_bool)
                                .unwrap_or(false)
                        }
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            let key = write_name.clone();
                            form_values.update(|values| {
                                values.insert(key, Value::Bool(checked));
                            });
                        }
                    />
                    <label class="text-sm font-medium text-gray-700">{label}</label>
                </div>
            }
            .into_any()
        }
        FieldKind::Select => {
            let read_name = name.clone();
            let write_name = name.clone();
            let options = field.options.clone();
            let change_options = field.options.clone();
            view! {
                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
                    <select
                        name=name.clone()
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        prop:value=move || {
                            form_values.get()
                                .get(&read_name)
                                .map(value_key)
                                .unwrap_or_default()
                        }
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let select: web_sys::HtmlSelectElement = target.dyn_into().unwrap();
                            let raw = select.value();
                            let value = change_options
                                .iter()
                                .find(|option| value_key(&option.value) == raw)
                                .map(|option| option.value.clone())
                                .unwrap_or(Value::String(raw));
                            let key = write_name.clone();
                            form_values.update(|values| {
                                values.insert(key, value);
                            });
                        }
                    >
                        <option value="">"-- Select --"</option>
                        {options.into_iter().map(|option| {
                            let key = value_key(&option.value);
                            view! { <option value=key>{option.label}</option> }
                        }).collect_view()}
                    </select>
                </div>
            }
            .into_any()
        }
        kind => {
            let read_name = name.clone();
            let write_name = name.clone();
            view! {
                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
                    <input
                        type=kind.input_type()
                        name=name.clone()
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        prop:value=move || display_value(form_values.get().get(&read_name))
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            let key = write_name.clone();
                            form_values.update(|values| {
                                values.insert(key, coerce_input(kind, &raw));
                            });
                        }
                    />
                </div>
            }
            .into_any()
        }
    }
}
