// src/shared/erro.rs

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

use super::shared_structs::{ErroCampo, GenericResponse};

/// Erros tipados da aplicação. Cada variante sabe o status HTTP que gera.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro de validação")]
    Validacao(Vec<ErroCampo>),
    #[error("{0}")]
    NaoAutenticado(String),
    #[error("Token é válido porém sem permissão")]
    SemPermissao,
    #[error("{0}")]
    NaoEncontrado(String),
    #[error("{0}")]
    Conflito(String),
    #[error("banco de dados: {0}")]
    Banco(#[from] sqlx::Error),
    #[error("migração: {0}")]
    Migracao(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    Interno(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validacao(_) => StatusCode::BAD_REQUEST,
            AppError::NaoAutenticado(_) => StatusCode::UNAUTHORIZED,
            AppError::SemPermissao => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::Conflito(_) => StatusCode::CONFLICT,
            AppError::Banco(_) | AppError::Migracao(_) | AppError::Interno(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Validacao(erros) => HttpResponse::build(status)
                .json(GenericResponse::erro(self.to_string(), Some(erros))),
            AppError::Banco(_) | AppError::Migracao(_) | AppError::Interno(_) => {
                // O detalhe fica só no log; o cliente recebe o código de correlação.
                let correlacao = Uuid::new_v4().to_string();
                tracing::error!(%correlacao, erro = %self, "Erro interno ao processar requisição");
                HttpResponse::build(status).json(GenericResponse::erro(
                    "Erro interno do servidor.",
                    Some(serde_json::json!({ "correlacao": correlacao })),
                ))
            }
            _ => HttpResponse::build(status).json(GenericResponse::<()>::erro(self.to_string(), None)),
        }
    }
}

/// Converte corpos JSON malformados em erro de validação no envelope padrão.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(erro = %err, "Corpo JSON inválido");
    AppError::Validacao(vec![ErroCampo::new("body", "Corpo da requisição inválido")]).into()
}
