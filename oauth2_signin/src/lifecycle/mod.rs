mod controller;
mod minimal;
mod types;

pub use controller::evaluate_page_load;
pub use minimal::{MinimalOutcome, evaluate_minimal};
pub use types::{LifecycleState, Notice, PageOutcome, PageRequest, PreferenceUpdate};
