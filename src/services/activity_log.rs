// src/services/activity_log.rs

use std::sync::Arc;

use crate::{db::ActivityStore, models::activity::Activity};

/// Grava o feed de atividades. O feed é só para exibição:
/// se o INSERT falhar, logamos e a operação principal segue.
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn ActivityStore>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, activity: Activity) {
        if let Err(e) = self.store.append(&activity).await {
            tracing::warn!(
                "⚠️ Falha ao registrar atividade {:?} do clube {}: {}",
                activity.kind,
                activity.club_id,
                e
            );
        }
    }
}
