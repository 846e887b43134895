use crate::db::DbPool;
use crate::mailer::Mailer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub mailer: Arc<Mailer>,
}
