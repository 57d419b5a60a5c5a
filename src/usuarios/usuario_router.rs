// src/usuarios/usuario_router.rs

use actix_web::{get, patch, post, web, HttpResponse};

use super::auth_middleware::{gerar_token, UsuarioAutenticado};
// Importa as structs do módulo de usuários
use super::usuario_structs::{AuthResponse, LoginRequest, NovoUsuario, Role, Usuario};
use crate::shared::erro::AppError;
use crate::shared::validacao::{parse_booleano, parse_inteiro_nao_negativo, Validador};
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

fn validar_novo_usuario(novo: &NovoUsuario) -> Result<(), AppError> {
    let mut v = Validador::new();
    v.nao_vazio("nome", &novo.nome, "Nome é obrigatório")
        .tamanho_minimo("nome", &novo.nome, 3, "Nome precisa ter pelo menos 3 caracteres")
        .nao_vazio("email", &novo.email, "E-mail é obrigatório")
        .email("email", &novo.email, "E-mail precisa ser um e-mail válido")
        .nao_vazio("senha", &novo.senha, "Senha é obrigatória")
        .tamanho_minimo("senha", &novo.senha, 6, "Senha precisa ter pelo menos 6 caracteres");

    if let Some(role) = &novo.role {
        if role.parse::<Role>().is_err() {
            v.adicionar("role", "Role inválida");
        }
    }

    v.finalizar()
}

/// Cada parâmetro para na primeira regra que falhar.
fn validar_parametros_ativo(id: &str, ativo: &str) -> Result<(i32, bool), AppError> {
    let mut v = Validador::new();

    let id = if id.is_empty() {
        v.adicionar("id", "Id do usuário é obrigatório");
        None
    } else {
        let id = parse_inteiro_nao_negativo(id);
        if id.is_none() {
            v.adicionar("id", "Id do usuário precisa ser um inteiro maior ou igual a 0");
        }
        id
    };

    let ativo = if ativo.is_empty() {
        v.adicionar("ativo", "Ativo é obrigatório");
        None
    } else {
        let ativo = parse_booleano(ativo);
        if ativo.is_none() {
            v.adicionar("ativo", "Ativo inválido");
        }
        ativo
    };

    v.finalizar()?;
    Ok((id.unwrap_or_default(), ativo.unwrap_or_default()))
}

/// Rota para listar todos os usuários (sem a senha).
#[get("")]
pub async fn listar_usuarios(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let usuarios = data.usuario_service.listar().await?;
    Ok(HttpResponse::Ok().json(usuarios))
}

/// Rota para cadastrar um novo usuário.
#[post("")]
pub async fn cadastrar_usuario(
    data: web::Data<AppState>,
    autenticado: UsuarioAutenticado,
    novo_usuario: web::Json<NovoUsuario>,
) -> Result<HttpResponse, AppError> {
    // 1. Validar o corpo
    let novo_usuario = novo_usuario.into_inner();
    validar_novo_usuario(&novo_usuario)?;

    // 2. Salvar; o hash da senha é feito antes da inserção
    let usuario = data.usuario_service.salvar(Usuario::from(novo_usuario)).await?;

    tracing::info!(id = ?usuario.id, email = %usuario.email, por = %autenticado.email, "Usuário cadastrado");
    Ok(HttpResponse::Ok().json(usuario))
}

/// Rota para ativar ou desativar um usuário. Responde 200 com corpo vazio.
#[patch("/{id}/ativo/{ativo}")]
pub async fn alterar_ativo_usuario(
    data: web::Data<AppState>,
    autenticado: UsuarioAutenticado,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, ativo) = path.into_inner();
    let (id, ativo) = validar_parametros_ativo(&id, &ativo)?;

    data.usuario_service.alterar_ativo(id, ativo).await?;

    tracing::info!(id, ativo, por = %autenticado.email, "Status ativo do usuário alterado");
    Ok(HttpResponse::Ok().finish())
}

/// Rota para login de usuário. Devolve o token usado nas rotas protegidas.
#[post("/api/auth/login")]
pub async fn login_usuario(
    data: web::Data<AppState>,
    login_request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 1. Conferir as credenciais
    let usuario = data
        .usuario_service
        .autenticar(&login_request.email, &login_request.senha)
        .await
        .map_err(|e| {
            if let AppError::NaoAutenticado(_) = e {
                tracing::warn!(email = %login_request.email, "Tentativa de login recusada");
            }
            e
        })?;

    // 2. Gerar o token
    let token = gerar_token(&usuario, &data.auth)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        status: "success".to_string(),
        message: "Login bem-sucedido!".to_string(),
        token,
        usuario,
    }))
}
