// src/exemples/exemple_structs.rs

use serde::Serialize;
use sqlx::FromRow;

use crate::repositorios::repositorio::Entidade;

/// Item da lista de exemplos, projetado em `id` e `descricao`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Exemple {
    pub id: Option<i32>,
    pub descricao: String,
}

impl Entidade for Exemple {
    const MENSAGEM_CONFLITO: &'static str = "Já existe um exemplo com esta descrição.";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn chave_unica(&self) -> Option<&str> {
        Some(&self.descricao)
    }

    fn definir_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}
