// src/container.rs

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::configuracao::ConfigAuth;
use crate::exemples::exemple_service::ExempleService;
use crate::exemples::exemple_structs::Exemple;
use crate::repositorios::get_repository;
use crate::repositorios::repositorio::{Repositorio, UsuarioRepositorio};
use crate::usuarios::usuario_service::UsuarioService;
use crate::usuarios::usuario_structs::Usuario;
use crate::AppState;

/// Liga repositórios e serviços ao pool compartilhado.
pub fn montar_estado(pool: &PgPool, auth: ConfigAuth) -> AppState {
    montar_estado_com(
        Arc::new(get_repository::<Exemple>(pool)),
        Arc::new(get_repository::<Usuario>(pool)),
        auth,
    )
}

pub fn montar_estado_com(
    exemple_repositorio: Arc<dyn Repositorio<Exemple>>,
    usuario_repositorio: Arc<dyn UsuarioRepositorio>,
    auth: ConfigAuth,
) -> AppState {
    AppState {
        exemple_service: ExempleService::new(exemple_repositorio),
        usuario_service: UsuarioService::new(usuario_repositorio),
        auth,
    }
}
