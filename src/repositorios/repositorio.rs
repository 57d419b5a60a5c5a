// src/repositorios/repositorio.rs

use async_trait::async_trait;

use crate::shared::erro::AppError;
use crate::usuarios::usuario_structs::{Credenciais, Usuario};

/// Struct mapeada para uma linha de tabela.
/// Os ganchos rodam dentro de `save`, antes da escrita.
pub trait Entidade: Clone + Send + Sync + 'static {
    /// Mensagem devolvida quando a chave única já existe.
    const MENSAGEM_CONFLITO: &'static str;

    fn id(&self) -> Option<i32>;

    /// Valor da coluna `UNIQUE` da tabela, se houver.
    fn chave_unica(&self) -> Option<&str> {
        None
    }

    fn definir_id(&mut self, id: i32);

    fn antes_de_inserir(&mut self) -> Result<(), AppError> {
        Ok(())
    }

    fn antes_de_atualizar(&mut self) {}

    /// Remove e devolve o campo que só pode ser escrito, nunca lido de volta.
    fn retirar_campo_sigiloso(&mut self) -> Option<String> {
        None
    }
}

/// Acesso CRUD a uma única entidade.
/// `save` insere quando a entidade não tem id e atualiza quando tem.
#[async_trait]
pub trait Repositorio<E: Entidade>: Send + Sync {
    async fn find(&self) -> Result<Vec<E>, AppError>;

    async fn find_one(&self, id: i32) -> Result<Option<E>, AppError>;

    async fn save(&self, entidade: E) -> Result<E, AppError>;
}

#[async_trait]
pub trait UsuarioRepositorio: Repositorio<Usuario> {
    /// Busca incluindo o hash da senha.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credenciais>, AppError>;
}

/// Violação de unicidade (23505) vira conflito; o resto segue como erro de banco.
pub fn mapear_erro_banco(erro: sqlx::Error, conflito: &str) -> AppError {
    if let sqlx::Error::Database(db) = &erro {
        if db.code().as_deref() == Some("23505") {
            return AppError::Conflito(conflito.to_string());
        }
    }
    AppError::Banco(erro)
}
