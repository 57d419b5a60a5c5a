// src/config/mod.rs

// Leitura das variáveis de ambiente
pub mod configuracao;
// Conexão com o PostgreSQL e migrações
pub mod db;
