//! Model endpoint list with select, remove and add actions.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, SettingsView};

#[component]
pub fn ModelList(
    settings: ReadSignal<SettingsView>,
    set_settings: WriteSignal<SettingsView>,
) -> impl IntoView {
    let (new_name, set_new_name) = signal(String::new());
    let (new_url, set_new_url) = signal(String::new());
    let (new_key, set_new_key) = signal(String::new());
    let (status, set_status) = signal::<Option<String>>(None);

    let apply = move |result: Result<SettingsView, String>, ok_msg: Option<String>| match result {
        Ok(updated) => {
            set_settings.set(updated);
            set_status.set(ok_msg);
        }
        Err(e) => set_status.set(Some(e)),
    };

    let on_select = move |name: String| {
        spawn_local(async move {
            apply(commands::select_model(&name).await, None);
        });
    };

    let on_remove = move |name: String| {
        spawn_local(async move {
            let msg = format!("Removed {}", name);
            apply(commands::remove_model(&name).await, Some(msg));
        });
    };

    let on_add = move |_| {
        let name = new_name.get();
        let url = new_url.get();
        let key = new_key.get();
        if name.trim().is_empty() || url.trim().is_empty() {
            set_status.set(Some("Model name and API URL are required".to_string()));
            return;
        }
        spawn_local(async move {
            match commands::add_model(&name, &url, &key).await {
                Ok(updated) => {
                    set_settings.set(updated);
                    set_new_name.set(String::new());
                    set_new_url.set(String::new());
                    set_new_key.set(String::new());
                    set_status.set(Some(format!("Added {}", name)));
                }
                Err(e) => set_status.set(Some(e)),
            }
        });
    };

    view! {
        <div class="model-list">
            <table class="entry-table">
                <thead>
                    <tr>
                        <th>"Model"</th>
                        <th>"API URL"</th>
                        <th>"Key"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let current = settings.get();
                        let selected = current.selected_model.clone();
                        let only_one = current.available_models.len() <= 1;
                        current.available_models.into_iter().map(|model| {
                            let is_selected = selected.as_ref() == Some(&model);
                            let select_name = model.name.clone();
                            let remove_name = model.name.clone();
                            view! {
                                <tr class=if is_selected { "selected-row" } else { "" }>
                                    <td>{model.name.clone()}</td>
                                    <td class="url-cell">{model.api_url.clone()}</td>
                                    <td>{if model.api_key.is_empty() { "-" } else { "set" }}</td>
                                    <td class="row-actions">
                                        <button
                                            class="btn btn-small"
                                            disabled=is_selected
                                            on:click=move |_| on_select(select_name.clone())
                                        >
                                            {if is_selected { "Selected" } else { "Use" }}
                                        </button>
                                        <button
                                            class="btn btn-small btn-delete"
                                            disabled=only_one
                                            on:click=move |_| on_remove(remove_name.clone())
                                        >
                                            "Remove"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect::<Vec<_>>()
                    }}
                </tbody>
            </table>

            <h4>"Add Model"</h4>
            <div class="form-group">
                <input
                    type="text"
                    class="input"
                    placeholder="Model name, e.g. gpt-4o"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    class="input"
                    placeholder="https://api.example.com/v1/chat/completions"
                    prop:value=move || new_url.get()
                    on:input=move |ev| set_new_url.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class="input input-password"
                    placeholder="API key (optional)"
                    prop:value=move || new_key.get()
                    on:input=move |ev| set_new_key.set(event_target_value(&ev))
                />
                <button class="btn btn-save" on:click=on_add>"Add"</button>
            </div>
            <Show when=move || status.get().is_some()>
                <span class="status-text">{move || status.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}
