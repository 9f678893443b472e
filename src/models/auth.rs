// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Identidade vinda do provedor de autenticação externo.
// Não guardamos usuários: só o `sub` do token importa.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,                 // Subject (ID do usuário)
    pub exp: usize,                // Expiration time
    #[serde(default)]
    pub email: Option<String>,
}
