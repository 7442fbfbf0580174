mod app_context;
mod project_root;

pub use app_context::AppContext;
pub use project_root::{find_project_root, resolve_in_project};
