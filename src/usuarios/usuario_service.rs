// src/usuarios/usuario_service.rs

use std::sync::Arc;

use super::usuario_structs::{Role, Usuario};
use crate::config::configuracao::ConfigAdmin;
use crate::repositorios::repositorio::UsuarioRepositorio;
use crate::shared::erro::AppError;

const CREDENCIAIS_INVALIDAS: &str = "Credenciais inválidas.";

#[derive(Clone)]
pub struct UsuarioService {
    repositorio: Arc<dyn UsuarioRepositorio>,
}

impl UsuarioService {
    pub fn new(repositorio: Arc<dyn UsuarioRepositorio>) -> Self {
        UsuarioService { repositorio }
    }

    pub async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        self.repositorio.find().await
    }

    pub async fn salvar(&self, usuario: Usuario) -> Result<Usuario, AppError> {
        self.repositorio.save(usuario).await
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Option<Usuario>, AppError> {
        self.repositorio.find_one(id).await
    }

    /// Só grava quando o valor pedido difere do atual.
    pub async fn alterar_ativo(&self, id: i32, ativo: bool) -> Result<(), AppError> {
        let mut usuario = self
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado(format!("Usuário com ID {} não encontrado.", id)))?;

        if usuario.ativo == ativo {
            return Ok(());
        }

        usuario.ativo = ativo;
        self.salvar(usuario).await?;
        Ok(())
    }

    /// Usuário desconhecido, senha errada e usuário inativo recebem a mesma resposta.
    pub async fn autenticar(&self, email: &str, senha: &str) -> Result<Usuario, AppError> {
        let credenciais = self
            .repositorio
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NaoAutenticado(CREDENCIAIS_INVALIDAS.to_string()))?;

        if !credenciais.confere(senha) || !credenciais.usuario.ativo {
            return Err(AppError::NaoAutenticado(CREDENCIAIS_INVALIDAS.to_string()));
        }

        Ok(credenciais.usuario)
    }

    /// Cria o administrador inicial caso o e-mail ainda não exista.
    /// Retorna `true` quando um usuário novo foi criado.
    pub async fn garantir_admin(&self, admin: &ConfigAdmin) -> Result<bool, AppError> {
        if self.repositorio.find_by_email(&admin.email).await?.is_some() {
            return Ok(false);
        }

        let usuario = self
            .salvar(Usuario {
                id: None,
                nome: admin.nome.clone(),
                senha: Some(admin.senha.clone()),
                email: admin.email.clone(),
                ativo: true,
                role: Role::Admin.as_str().to_string(),
            })
            .await?;
        tracing::info!(id = ?usuario.id, email = %usuario.email, "Administrador inicial criado");
        Ok(true)
    }
}
