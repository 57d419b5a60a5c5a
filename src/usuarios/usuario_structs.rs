// src/usuarios/usuario_structs.rs

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::FromRow;
use std::str::FromStr;

use crate::repositorios::repositorio::Entidade;
use crate::shared::erro::AppError;
use crate::shared::shared_structs::ErroCampo;
use crate::shared::validacao::texto_leniente;

/// Papéis reconhecidos pelo middleware de autenticação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Usuario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Usuario => "USUARIO",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USUARIO" => Ok(Role::Usuario),
            _ => Err(()),
        }
    }
}

/// Estrutura que representa um usuário no banco de dados.
/// `senha` só carrega a senha em texto claro a ser gravada; consultas de leitura
/// nunca a selecionam e ela nunca é serializada.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id: Option<i32>,
    pub nome: String,
    #[serde(skip_serializing)]
    #[sqlx(default)]
    pub senha: Option<String>,
    pub email: String,
    pub ativo: bool,
    pub role: String,
}

impl Entidade for Usuario {
    const MENSAGEM_CONFLITO: &'static str = "E-mail já cadastrado.";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn chave_unica(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn definir_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn antes_de_inserir(&mut self) -> Result<(), AppError> {
        match self.senha.take() {
            Some(texto) => {
                self.senha = Some(criptografar_senha(&texto));
                Ok(())
            }
            None => Err(AppError::Validacao(vec![ErroCampo::new(
                "senha",
                "Senha é obrigatória",
            )])),
        }
    }

    fn antes_de_atualizar(&mut self) {
        if let Some(texto) = self.senha.take() {
            self.senha = Some(criptografar_senha(&texto));
        }
    }

    fn retirar_campo_sigiloso(&mut self) -> Option<String> {
        self.senha.take()
    }
}

/// Hash SHA-256 da senha, em hexadecimal minúsculo.
pub fn criptografar_senha(senha: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(senha.as_bytes());
    hex::encode(hasher.finalize())
}

/// Usuário junto com o hash gravado, usado apenas para conferir credenciais.
#[derive(Debug, Clone)]
pub struct Credenciais {
    pub usuario: Usuario,
    pub senha_hash: String,
}

impl Credenciais {
    pub fn confere(&self, senha: &str) -> bool {
        criptografar_senha(senha) == self.senha_hash
    }
}

/// Estrutura para receber dados de um novo usuário na requisição de cadastro.
/// Campos ausentes ou de outro tipo viram texto para que a validação informe cada um.
#[derive(Debug, Deserialize)]
pub struct NovoUsuario {
    #[serde(default, deserialize_with = "texto_leniente")]
    pub nome: String,
    #[serde(default, deserialize_with = "texto_leniente")]
    pub email: String,
    #[serde(default, deserialize_with = "texto_leniente")]
    pub senha: String, // Senha em texto claro (será hashed antes de salvar)
    pub role: Option<String>,
    pub ativo: Option<bool>,
}

impl From<NovoUsuario> for Usuario {
    fn from(novo: NovoUsuario) -> Self {
        Usuario {
            id: None,
            nome: novo.nome,
            senha: Some(novo.senha),
            email: novo.email,
            ativo: novo.ativo.unwrap_or(true),
            role: novo.role.unwrap_or_else(|| Role::Usuario.as_str().to_string()),
        }
    }
}

/// Estrutura para receber dados de login do usuário.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String, // Senha em texto claro
}

/// Estrutura para o payload do JWT (Claims).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // Subject (ID do usuário)
    pub nome: String,
    pub email: String,
    pub role: String,
    pub exp: i64, // Expiration Time (timestamp Unix)
}

/// Estrutura para a resposta de sucesso do login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub usuario: Usuario,
}
