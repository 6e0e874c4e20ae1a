use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, SettingsView};

/// Masked display of a stored key, e.g. `sk-a...9f2c`.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[component]
pub fn ApiKeyForm(
    /// Current settings, replaced with the backend's copy after a save
    settings: ReadSignal<SettingsView>,
    set_settings: WriteSignal<SettingsView>,
) -> impl IntoView {
    let (key_value, set_key_value) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal::<Option<String>>(None);

    // An empty key clears the stored credential.
    let store_key = move |key: String| {
        set_is_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match commands::set_api_key(&key).await {
                Ok(updated) => {
                    set_settings.set(updated);
                    set_key_value.set(String::new());
                }
                Err(e) => {
                    set_error_message.set(Some(format!("Failed to save: {}", e)));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="form-group api-key-form">
            <label>"API Key"</label>
            <div class="input-row">
                <input
                    type="password"
                    placeholder="sk-..."
                    class="input input-password"
                    prop:value=move || key_value.get()
                    on:input=move |ev| {
                        set_key_value.set(event_target_value(&ev));
                    }
                    disabled=move || is_loading.get()
                />
                <button
                    class="btn btn-save"
                    on:click=move |_| store_key(key_value.get())
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Saving..." } else { "Save" }}
                </button>
                <Show when=move || !settings.get().api_key.is_empty()>
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| store_key(String::new())
                        disabled=move || is_loading.get()
                    >
                        "Clear"
                    </button>
                </Show>
            </div>
            <div class="key-status-row">
                {move || {
                    let current = settings.get();
                    if let Some(err) = error_message.get() {
                        view! {
                            <span class="status-text status-error">{err}</span>
                        }.into_any()
                    } else if !current.api_key.is_empty() {
                        view! {
                            <span class="status-text status-saved">
                                {format!("Saved for {}: {}", current.selected_name(), mask_key(&current.api_key))}
                            </span>
                        }.into_any()
                    } else {
                        view! {
                            <span class="status-text status-not-set">"Not configured"</span>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
