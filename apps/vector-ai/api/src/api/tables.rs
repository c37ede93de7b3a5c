use axum::Router;
use database::mysql::DatabaseConnection;
use domain_tables::{MySqlTableRepository, TableService, handlers};

pub fn service(db: &DatabaseConnection) -> TableService<MySqlTableRepository> {
    TableService::new(MySqlTableRepository::new(db.clone()))
}

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(service(&state.db))
}
