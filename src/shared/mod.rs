// src/shared/mod.rs

// Envelope padrão das respostas da API
pub mod shared_structs;
// Erros da aplicação e seu mapeamento para HTTP
pub mod erro;
// Validadores reutilizados pelas rotas
pub mod validacao;
