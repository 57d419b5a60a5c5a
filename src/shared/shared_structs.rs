// src/shared/shared_structs.rs

use serde::Serialize;

/// Estrutura genérica para padronizar as respostas da API.
/// 'T' é o tipo do corpo da resposta, que pode ser opcional.
#[derive(Debug, Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // Não serializa 'body' se for None
    pub body: Option<T>,
}

impl<T> GenericResponse<T> {
    pub fn erro(message: impl Into<String>, body: Option<T>) -> Self {
        GenericResponse {
            status: "error".to_string(),
            message: message.into(),
            body,
        }
    }
}

/// Falha de validação de um único campo da requisição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErroCampo {
    pub campo: String,
    pub mensagem: String,
}

impl ErroCampo {
    pub fn new(campo: &str, mensagem: &str) -> Self {
        ErroCampo {
            campo: campo.to_string(),
            mensagem: mensagem.to_string(),
        }
    }
}
