// src/exemples/exemple_service.rs

use std::sync::Arc;

use super::exemple_structs::Exemple;
use crate::repositorios::repositorio::Repositorio;
use crate::shared::erro::AppError;

#[derive(Clone)]
pub struct ExempleService {
    repositorio: Arc<dyn Repositorio<Exemple>>,
}

impl ExempleService {
    pub fn new(repositorio: Arc<dyn Repositorio<Exemple>>) -> Self {
        ExempleService { repositorio }
    }

    /// Todos os exemplos, apenas `id` e `descricao`. Sem paginação.
    pub async fn listar(&self) -> Result<Vec<Exemple>, AppError> {
        self.repositorio.find().await
    }
}
