// src/testes.rs

use actix_web::web;
use std::sync::Arc;

use crate::config::configuracao::ConfigAuth;
use crate::container::montar_estado_com;
use crate::exemples::exemple_structs::Exemple;
use crate::repositorios::memoria::MemoriaRepositorio;
use crate::usuarios::auth_middleware::gerar_token;
use crate::usuarios::usuario_structs::{Role, Usuario};
use crate::AppState;

/// Estado da aplicação sobre repositórios em memória.
pub struct Ambiente {
    pub estado: web::Data<AppState>,
    pub usuarios: Arc<MemoriaRepositorio<Usuario>>,
    pub exemples: Arc<MemoriaRepositorio<Exemple>>,
}

pub fn config_auth() -> ConfigAuth {
    ConfigAuth {
        jwt_secret: "chave_de_teste".to_string(),
        expiracao_horas: 1,
    }
}

pub fn ambiente() -> Ambiente {
    let usuarios = Arc::new(MemoriaRepositorio::<Usuario>::new());
    let exemples = Arc::new(MemoriaRepositorio::<Exemple>::new());
    let estado = montar_estado_com(exemples.clone(), usuarios.clone(), config_auth());
    Ambiente {
        estado: web::Data::new(estado),
        usuarios,
        exemples,
    }
}

pub fn usuario_com_role(role: Role) -> Usuario {
    Usuario {
        id: Some(1),
        nome: "Admin".to_string(),
        senha: None,
        email: "admin@exemplo.com".to_string(),
        ativo: true,
        role: role.as_str().to_string(),
    }
}

/// Cabeçalho Authorization com um token válido para o papel informado.
pub fn bearer(role: Role) -> (&'static str, String) {
    let token = gerar_token(&usuario_com_role(role), &config_auth()).unwrap();
    ("Authorization", format!("Bearer {}", token))
}
