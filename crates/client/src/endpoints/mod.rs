//! REST API endpoint implementations.
//!
//! Each function takes the HTTP client, the versioned API root
//! (`https://host:19999/api/4.0`) and an access token, and performs exactly
//! one request.

mod auth;
mod connections;
mod legacy;
mod lookml;
mod path;
mod projects;
mod queries;
mod request;
mod session;

pub use auth::login;
pub use connections::{list_connections, test_connection};
pub use legacy::list_legacy_features;
pub use lookml::{get_lookml_model, get_lookml_model_explore, list_lookml_models};
pub use path::encode_segment;
pub use projects::{
    get_project, list_git_connection_tests, list_project_files, list_projects,
    run_git_connection_test,
};
pub use queries::run_inline_query;
pub use request::send_request;
pub use session::update_session;
