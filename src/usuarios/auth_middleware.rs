// src/usuarios/auth_middleware.rs

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use chrono::{Duration, Utc};
use futures::future::{ready, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::rc::Rc;

// Importa as Claims e os papéis do módulo de structs de usuário
use super::usuario_structs::{Claims, Role, Usuario};
use crate::config::configuracao::ConfigAuth;
use crate::shared::erro::AppError;
// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Usuário autenticado, montado a partir das claims do JWT.
/// O middleware o guarda nas extensões da requisição.
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub role: String,
}

/// Emite um token HS256 para o usuário, válido por `expiracao_horas`.
pub fn gerar_token(usuario: &Usuario, auth: &ConfigAuth) -> Result<String, AppError> {
    let id = usuario
        .id
        .ok_or_else(|| AppError::Interno("usuário sem id não pode receber token".to_string()))?;

    let claims = Claims {
        sub: id,
        nome: usuario.nome.clone(),
        email: usuario.email.clone(),
        role: usuario.role.clone(),
        exp: (Utc::now() + Duration::hours(auth.expiracao_horas)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Interno(format!("falha ao gerar token: {}", e)))
}

/// Decodifica e valida o token (assinatura e expiração).
pub fn validar_token(token: &str, auth: &ConfigAuth) -> Result<UsuarioAutenticado, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(erro = ?e, "Erro ao decodificar/validar JWT");
        let mensagem = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expirado.",
            jsonwebtoken::errors::ErrorKind::InvalidSignature => "Assinatura do token inválida.",
            jsonwebtoken::errors::ErrorKind::InvalidToken => "Token malformado.",
            _ => "Token de autenticação inválido.",
        };
        AppError::NaoAutenticado(mensagem.to_string())
    })?;

    Ok(UsuarioAutenticado {
        id: token_data.claims.sub,
        nome: token_data.claims.nome,
        email: token_data.claims.email,
        role: token_data.claims.role,
    })
}

fn extrair_token(req: &HttpRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::NaoAutenticado("Token de autenticação ausente.".to_string()))?;

    let header_str = header
        .to_str()
        .map_err(|_| AppError::NaoAutenticado("Token de autenticação inválido.".to_string()))?;

    header_str
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::NaoAutenticado(
                "Formato de token inválido. Esperado 'Bearer <token>'.".to_string(),
            )
        })
}

/// Valida o token da requisição e confere se o papel está entre os permitidos.
/// Lista vazia de papéis aceita qualquer usuário autenticado.
pub fn autorizar(req: &HttpRequest, roles: &[Role]) -> Result<UsuarioAutenticado, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        AppError::Interno("AppState não disponível no middleware de autenticação".to_string())
    })?;

    let token = extrair_token(req)?;
    let usuario = validar_token(&token, &state.auth)?;

    if !roles.is_empty() && !roles.iter().any(|r| r.as_str() == usuario.role) {
        return Err(AppError::SemPermissao);
    }

    Ok(usuario)
}

/// Middleware que protege um escopo de rotas, liberando apenas os papéis informados.
/// Token inválido gera 401; papel não permitido gera 405.
pub struct AuthMiddleware {
    roles: Rc<Vec<Role>>,
}

impl AuthMiddleware {
    pub fn roles(roles: &[Role]) -> Self {
        AuthMiddleware {
            roles: Rc::new(roles.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            roles: self.roles.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    roles: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match autorizar(req.request(), &self.roles) {
            Ok(usuario) => {
                tracing::debug!(usuario = usuario.id, nome = %usuario.nome, caminho = %req.path(), "Requisição autenticada");
                req.extensions_mut().insert(usuario);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(erro) => {
                tracing::warn!(caminho = %req.path(), erro = %erro, "Requisição recusada pela autenticação");
                let resposta = erro.error_response();
                let resposta = req.into_response(resposta).map_into_right_body();
                Box::pin(async move { Ok(resposta) })
            }
        }
    }
}

/// Extrator do usuário autenticado para as rotas protegidas.
/// Reaproveita o que o middleware já validou; sem ele, valida o token na hora.
impl FromRequest for UsuarioAutenticado {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let existente = req.extensions().get::<UsuarioAutenticado>().cloned();
        if let Some(usuario) = existente {
            return ready(Ok(usuario));
        }

        ready(autorizar(req, &[]).map_err(Error::from))
    }
}
