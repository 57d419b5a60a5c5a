// src/repositorios/mod.rs

// Contratos genéricos de acesso a dados
pub mod repositorio;
// Implementação sobre o PostgreSQL
pub mod pg_repositorio;
// Implementação em memória usada pelos testes
#[cfg(test)]
pub mod memoria;

pub use pg_repositorio::get_repository;
