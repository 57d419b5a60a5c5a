// src/exemples/exemple_router.rs

use actix_web::{get, web, HttpResponse};

use crate::shared::erro::AppError;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para listar os exemplos. Montada sob `/api/exemple`, restrita a ADMIN.
#[get("")]
pub async fn listar_exemples(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let exemples = data.exemple_service.listar().await?;
    Ok(HttpResponse::Ok().json(exemples))
}
