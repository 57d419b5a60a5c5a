// src/config/db.rs

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use super::configuracao::ConfigBanco;
use crate::shared::erro::AppError;

/// Abre o pool de conexões com o PostgreSQL e aplica as migrações pendentes.
/// Falhas aqui interrompem a inicialização; não há nova tentativa.
pub async fn conectar(config: &ConfigBanco) -> Result<PgPool, AppError> {
    let mut opcoes = PgConnectOptions::new()
        .host(&config.host)
        .port(config.porta)
        .username(&config.usuario)
        .password(&config.senha)
        .database(&config.nome);

    if !config.log_consultas {
        opcoes.disable_statement_logging();
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(opcoes)
        .await?;

    tracing::info!(host = %config.host, banco = %config.nome, "Conectado ao PostgreSQL");

    executar_migracoes(&pool).await?;
    Ok(pool)
}

pub async fn executar_migracoes(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrações aplicadas");
    Ok(())
}
