pub mod analysis_results;
pub mod api_key_form;
pub mod impact_chart;
pub mod level_badge;
pub mod model_list;
pub mod sidebar;
