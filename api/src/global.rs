use common::context::Context;

use crate::config::AppConfig;

pub struct GlobalState {
    pub config: AppConfig,
    pub ctx: Context,
    pub db: sqlx::PgPool,
}
