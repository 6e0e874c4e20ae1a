use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, SettingsView};
use crate::components::api_key_form::ApiKeyForm;
use crate::components::model_list::ModelList;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let (settings, set_settings) = signal(SettingsView::default());
    let (status, set_status) = signal::<Option<String>>(None);

    // Load settings on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_settings().await {
                Ok(loaded) => set_settings.set(loaded),
                Err(e) => set_status.set(Some(format!("Failed to load settings: {}", e))),
            }
        });
    });

    let save_options = move |detailed: bool, charts: bool| {
        spawn_local(async move {
            match commands::set_display_options(detailed, charts).await {
                Ok(updated) => {
                    set_settings.set(updated);
                    set_status.set(None);
                }
                Err(e) => set_status.set(Some(format!("Failed to save: {}", e))),
            }
        });
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"API Key"</h3>
                <p class="section-description">
                    "The key is sent as a bearer token to the selected model endpoint and stored with the app settings."
                </p>
                <ApiKeyForm settings=settings set_settings=set_settings />
            </section>

            <section class="settings-section">
                <h3>"Models"</h3>
                <p class="section-description">
                    "Any endpoint speaking the OpenAI-compatible chat completions protocol can be used."
                </p>
                <ModelList settings=settings set_settings=set_settings />
            </section>

            <section class="settings-section">
                <h3>"Analysis"</h3>
                <div class="form-group checkbox-row">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || settings.get().detailed_analysis
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                save_options(checked, settings.get_untracked().include_charts);
                            }
                        />
                        " Detailed analysis"
                    </label>
                    <p class="input-hint">"Ask for a data-backed analysis instead of a brief one."</p>
                </div>
                <div class="form-group checkbox-row">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || settings.get().include_charts
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                save_options(settings.get_untracked().detailed_analysis, checked);
                            }
                        />
                        " Show impact chart"
                    </label>
                </div>
            </section>

            <Show when=move || status.get().is_some()>
                <span class="status-text status-error">{move || status.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}
