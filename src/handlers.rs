pub mod club;
pub mod contribution_types;
pub mod contributions;
pub mod dashboard;
pub mod members;

use serde::Deserialize;
use utoipa::IntoParams;

// ?search= das listagens (case-insensitive, por substring)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Texto livre; vazio = sem filtro
    pub search: Option<String>,
}
