// src/repositorios/pg_repositorio.rs

use async_trait::async_trait;
use sqlx::{query_as, FromRow, PgPool};
use std::marker::PhantomData;

use super::repositorio::{mapear_erro_banco, Entidade, Repositorio, UsuarioRepositorio};
use crate::exemples::exemple_structs::Exemple;
use crate::shared::erro::AppError;
use crate::usuarios::usuario_structs::{Credenciais, Usuario};

/// Repositório sobre o pool compartilhado, ligado a uma entidade.
pub struct PgRepositorio<E> {
    pool: PgPool,
    _entidade: PhantomData<fn() -> E>,
}

impl<E> PgRepositorio<E> {
    pub fn new(pool: PgPool) -> Self {
        PgRepositorio {
            pool,
            _entidade: PhantomData,
        }
    }
}

/// Devolve o repositório da entidade `E` sobre o pool informado.
pub fn get_repository<E>(pool: &PgPool) -> PgRepositorio<E> {
    PgRepositorio::new(pool.clone())
}

#[async_trait]
impl Repositorio<Exemple> for PgRepositorio<Exemple> {
    async fn find(&self) -> Result<Vec<Exemple>, AppError> {
        let exemples = query_as::<_, Exemple>("SELECT id, descricao FROM exemple ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(exemples)
    }

    async fn find_one(&self, id: i32) -> Result<Option<Exemple>, AppError> {
        let exemple = query_as::<_, Exemple>("SELECT id, descricao FROM exemple WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exemple)
    }

    async fn save(&self, mut exemple: Exemple) -> Result<Exemple, AppError> {
        match exemple.id() {
            None => {
                exemple.antes_de_inserir()?;
                query_as::<_, Exemple>(
                    "INSERT INTO exemple (descricao) VALUES ($1) RETURNING id, descricao",
                )
                .bind(&exemple.descricao)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| mapear_erro_banco(e, Exemple::MENSAGEM_CONFLITO))
            }
            Some(id) => {
                exemple.antes_de_atualizar();
                query_as::<_, Exemple>(
                    "UPDATE exemple SET descricao = $1, atualizado_em = now() \
                     WHERE id = $2 RETURNING id, descricao",
                )
                .bind(&exemple.descricao)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| mapear_erro_banco(e, Exemple::MENSAGEM_CONFLITO))?
                .ok_or_else(|| AppError::NaoEncontrado(format!("Exemplo com ID {} não encontrado.", id)))
            }
        }
    }
}

#[async_trait]
impl Repositorio<Usuario> for PgRepositorio<Usuario> {
    async fn find(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = query_as::<_, Usuario>(
            "SELECT id, nome, email, ativo, role FROM usuario ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(usuarios)
    }

    async fn find_one(&self, id: i32) -> Result<Option<Usuario>, AppError> {
        let usuario = query_as::<_, Usuario>(
            "SELECT id, nome, email, ativo, role FROM usuario WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usuario)
    }

    async fn save(&self, mut usuario: Usuario) -> Result<Usuario, AppError> {
        match usuario.id() {
            None => {
                usuario.antes_de_inserir()?;
                let senha = usuario.retirar_campo_sigiloso();
                query_as::<_, Usuario>(
                    "INSERT INTO usuario (nome, senha, email, ativo, role) \
                     VALUES ($1, $2, $3, $4, $5) \
                     RETURNING id, nome, email, ativo, role",
                )
                .bind(&usuario.nome)
                .bind(senha)
                .bind(&usuario.email)
                .bind(usuario.ativo)
                .bind(&usuario.role)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| mapear_erro_banco(e, Usuario::MENSAGEM_CONFLITO))
            }
            Some(id) => {
                usuario.antes_de_atualizar();
                // Sem senha nova, a coluna mantém o hash atual.
                let senha = usuario.retirar_campo_sigiloso();
                query_as::<_, Usuario>(
                    "UPDATE usuario SET nome = $1, email = $2, ativo = $3, role = $4, \
                     senha = COALESCE($5, senha), atualizado_em = now() \
                     WHERE id = $6 RETURNING id, nome, email, ativo, role",
                )
                .bind(&usuario.nome)
                .bind(&usuario.email)
                .bind(usuario.ativo)
                .bind(&usuario.role)
                .bind(senha)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| mapear_erro_banco(e, Usuario::MENSAGEM_CONFLITO))?
                .ok_or_else(|| AppError::NaoEncontrado(format!("Usuário com ID {} não encontrado.", id)))
            }
        }
    }
}

#[derive(FromRow)]
struct LinhaCredenciais {
    id: i32,
    nome: String,
    email: String,
    ativo: bool,
    role: String,
    senha: String,
}

#[async_trait]
impl UsuarioRepositorio for PgRepositorio<Usuario> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credenciais>, AppError> {
        let linha = query_as::<_, LinhaCredenciais>(
            "SELECT id, nome, email, ativo, role, senha FROM usuario WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(linha.map(|l| Credenciais {
            usuario: Usuario {
                id: Some(l.id),
                nome: l.nome,
                senha: None,
                email: l.email,
                ativo: l.ativo,
                role: l.role,
            },
            senha_hash: l.senha,
        }))
    }
}
