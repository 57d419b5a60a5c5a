// src/config/configuracao.rs

use thiserror::Error;

/// Porta fixa do PostgreSQL; não é lida do ambiente.
pub const DATABASE_PORT: u16 = 5432;
/// Nome fixo do banco de dados.
pub const DATABASE_DB: &str = "database_name";

const JWT_SECRET_PADRAO: &str = "minha_chave_secreta_para_testes_123";
const JWT_EXPIRACAO_HORAS_PADRAO: i64 = 8;
const ENDERECO_PADRAO: &str = "127.0.0.1:8080";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("variável {variavel} inválida: '{valor}'")]
    Invalida { variavel: &'static str, valor: String },
    #[error("ADMIN_EMAIL e ADMIN_SENHA precisam ser definidas juntas")]
    AdminIncompleto,
}

/// Credenciais e opções da conexão com o banco.
#[derive(Clone)]
pub struct ConfigBanco {
    pub host: String,
    pub usuario: String,
    pub porta: u16,
    pub senha: String,
    pub nome: String,
    pub log_consultas: bool,
}

/// Chave e validade dos tokens JWT.
#[derive(Clone)]
pub struct ConfigAuth {
    pub jwt_secret: String,
    pub expiracao_horas: i64,
}

/// Administrador criado na inicialização, se configurado.
#[derive(Clone)]
pub struct ConfigAdmin {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

pub struct Configuracao {
    pub banco: ConfigBanco,
    pub auth: ConfigAuth,
    pub endereco: String,
    pub admin: Option<ConfigAdmin>,
    pub producao: bool,
    /// Verdadeiro quando JWT_SECRET não foi definida e o padrão de desenvolvimento está em uso.
    pub jwt_secret_padrao: bool,
}

impl Configuracao {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|chave| std::env::var(chave).ok())
    }

    pub fn from_lookup<F>(ler: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ler_ou = |chave: &str, padrao: &str| {
            ler(chave)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| padrao.to_string())
        };

        // NODE_ENV é aceita para manter os arquivos de implantação existentes.
        let producao = ler("APP_ENV").or_else(|| ler("NODE_ENV")).as_deref() == Some("PRODUCTION");

        let banco = ConfigBanco {
            host: ler_ou("DATABASE_HOST", "localhost"),
            usuario: ler_ou("DATABASE_USER", "postgres"),
            porta: DATABASE_PORT,
            senha: ler_ou("DATABASE_PASSWORD", "password"),
            nome: DATABASE_DB.to_string(),
            log_consultas: !producao,
        };

        let jwt_secret = ler("JWT_SECRET").filter(|v| !v.is_empty());
        let jwt_secret_padrao = jwt_secret.is_none();
        let expiracao_horas = match ler("JWT_EXPIRACAO_HORAS") {
            Some(valor) => match valor.parse::<i64>() {
                Ok(horas) if horas > 0 => horas,
                _ => {
                    return Err(ConfigError::Invalida {
                        variavel: "JWT_EXPIRACAO_HORAS",
                        valor,
                    })
                }
            },
            None => JWT_EXPIRACAO_HORAS_PADRAO,
        };
        let auth = ConfigAuth {
            jwt_secret: jwt_secret.unwrap_or_else(|| JWT_SECRET_PADRAO.to_string()),
            expiracao_horas,
        };

        let admin = match (ler("ADMIN_EMAIL"), ler("ADMIN_SENHA")) {
            (Some(email), Some(senha)) => Some(ConfigAdmin {
                nome: ler_ou("ADMIN_NOME", "Administrador"),
                email,
                senha,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::AdminIncompleto),
        };

        Ok(Configuracao {
            banco,
            auth,
            endereco: ler_ou("SERVIDOR_ENDERECO", ENDERECO_PADRAO),
            admin,
            producao,
            jwt_secret_padrao,
        })
    }
}
