// src/main.rs

use actix_web::{
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use tracing_subscriber::EnvFilter;

// Importa os módulos
mod config;       // Variáveis de ambiente e conexão com o banco
mod container;    // Montagem de repositórios e serviços
mod exemples;     // Módulo de exemplos
mod repositorios; // Acesso a dados
mod shared;       // Módulo shared
mod usuarios;     // Módulo de usuários e autenticação
#[cfg(test)]
mod testes;

use config::configuracao::{ConfigAuth, Configuracao};
use exemples::exemple_service::ExempleService;
use shared::erro::json_error_handler;
use usuarios::auth_middleware::AuthMiddleware;
use usuarios::usuario_service::UsuarioService;
use usuarios::usuario_structs::Role;

// Estado compartilhado com os serviços e a configuração dos tokens JWT.
pub struct AppState {
    pub exemple_service: ExempleService,
    pub usuario_service: UsuarioService,
    pub auth: ConfigAuth,
}

/// Registra as rotas da API. Tudo sob `/api/exemple` e `/api/usuario` exige ADMIN.
pub fn configurar_rotas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Login (rota pública)
        .service(usuarios::usuario_router::login_usuario)
        // Módulo de Exemplos
        .service(
            web::scope("/api/exemple")
                .wrap(AuthMiddleware::roles(&[Role::Admin]))
                .service(exemples::exemple_router::listar_exemples),
        )
        // Módulo de Usuários
        .service(
            web::scope("/api/usuario")
                .wrap(AuthMiddleware::roles(&[Role::Admin]))
                .service(usuarios::usuario_router::listar_usuarios)
                .service(usuarios::usuario_router::cadastrar_usuario)
                .service(usuarios::usuario_router::alterar_ativo_usuario),
        );
}

/// `/api/usuario/` e `/api/usuario` chegam à mesma rota.
pub fn normalizar_caminho() -> NormalizePath {
    NormalizePath::trim()
}

/// Filtro usado quando RUST_LOG não está definida.
fn filtro_padrao(producao: bool) -> &'static str {
    if producao {
        "exemple_api=info,actix_web=info,sqlx=warn"
    } else {
        "exemple_api=info,actix_web=info,sqlx=info"
    }
}

fn iniciar_logs(producao: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filtro_padrao(producao))),
        )
        .init();
}

// Função principal da aplicação Actix Web.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let configuracao = Configuracao::from_env()?;
    iniciar_logs(configuracao.producao);

    if configuracao.jwt_secret_padrao {
        tracing::warn!("JWT_SECRET não definida; usando a chave de desenvolvimento");
    }

    // Conecta ao PostgreSQL e aplica as migrações. Falha aqui encerra o processo.
    let pool = config::db::conectar(&configuracao.banco).await?;

    let app_state = web::Data::new(container::montar_estado(&pool, configuracao.auth.clone()));

    if let Some(admin) = &configuracao.admin {
        app_state.usuario_service.garantir_admin(admin).await?;
    }

    tracing::info!(endereco = %configuracao.endereco, "Iniciando API");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(normalizar_caminho())
            .wrap(Logger::default())
            .configure(configurar_rotas)
    })
    .bind(&configuracao.endereco)?
    .run()
    .await?;

    // Encerra o pool depois que o servidor para.
    pool.close().await;
    tracing::info!("Servidor encerrado");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::filtro_padrao;

    #[test]
    fn test_filtro_padrao() {
        assert_eq!(filtro_padrao(true), "exemple_api=info,actix_web=info,sqlx=warn");
        assert_eq!(filtro_padrao(false), "exemple_api=info,actix_web=info,sqlx=info");
    }
}
