// src/repositorios/memoria.rs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::repositorio::{Entidade, Repositorio, UsuarioRepositorio};
use crate::shared::erro::AppError;
use crate::usuarios::usuario_structs::{Credenciais, Usuario};

/// Repositório em memória com a mesma semântica de `save` do PostgreSQL.
/// Conta as escritas para que os testes verifiquem quando nada foi gravado.
pub struct MemoriaRepositorio<E> {
    linhas: Mutex<Vec<E>>,
    sigilos: Mutex<HashMap<i32, String>>,
    proximo_id: AtomicI32,
    gravacoes: AtomicUsize,
}

impl<E: Entidade> MemoriaRepositorio<E> {
    pub fn new() -> Self {
        MemoriaRepositorio {
            linhas: Mutex::new(Vec::new()),
            sigilos: Mutex::new(HashMap::new()),
            proximo_id: AtomicI32::new(1),
            gravacoes: AtomicUsize::new(0),
        }
    }

    pub fn gravacoes(&self) -> usize {
        self.gravacoes.load(Ordering::SeqCst)
    }

    /// Valor gravado do campo sigiloso (o hash, no caso de usuários).
    pub fn sigilo(&self, id: i32) -> Option<String> {
        self.sigilos.lock().unwrap().get(&id).cloned()
    }

    pub fn quantidade(&self) -> usize {
        self.linhas.lock().unwrap().len()
    }

    /// Mesma checagem da restrição `UNIQUE` da tabela, ignorando a própria linha.
    fn verificar_unicidade(&self, entidade: &E) -> Result<(), AppError> {
        let Some(chave) = entidade.chave_unica() else {
            return Ok(());
        };
        let duplicada = self
            .linhas
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.id() != entidade.id() && e.chave_unica() == Some(chave));
        if duplicada {
            return Err(AppError::Conflito(E::MENSAGEM_CONFLITO.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entidade> Repositorio<E> for MemoriaRepositorio<E> {
    async fn find(&self) -> Result<Vec<E>, AppError> {
        Ok(self.linhas.lock().unwrap().clone())
    }

    async fn find_one(&self, id: i32) -> Result<Option<E>, AppError> {
        Ok(self
            .linhas
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned())
    }

    async fn save(&self, mut entidade: E) -> Result<E, AppError> {
        self.verificar_unicidade(&entidade)?;
        match entidade.id() {
            None => {
                entidade.antes_de_inserir()?;
                let sigilo = entidade.retirar_campo_sigiloso();
                let id = self.proximo_id.fetch_add(1, Ordering::SeqCst);
                entidade.definir_id(id);
                if let Some(valor) = sigilo {
                    self.sigilos.lock().unwrap().insert(id, valor);
                }
                self.linhas.lock().unwrap().push(entidade.clone());
            }
            Some(id) => {
                entidade.antes_de_atualizar();
                let sigilo = entidade.retirar_campo_sigiloso();
                let mut linhas = self.linhas.lock().unwrap();
                let linha = linhas
                    .iter_mut()
                    .find(|e| e.id() == Some(id))
                    .ok_or_else(|| AppError::NaoEncontrado(format!("ID {} não encontrado.", id)))?;
                *linha = entidade.clone();
                if let Some(valor) = sigilo {
                    self.sigilos.lock().unwrap().insert(id, valor);
                }
            }
        }
        self.gravacoes.fetch_add(1, Ordering::SeqCst);
        Ok(entidade)
    }
}

#[async_trait]
impl UsuarioRepositorio for MemoriaRepositorio<Usuario> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credenciais>, AppError> {
        let usuario = self
            .linhas
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned();

        Ok(usuario.and_then(|usuario| {
            let senha_hash = self.sigilo(usuario.id?)?;
            Some(Credenciais { usuario, senha_hash })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exemples::exemple_structs::Exemple;

    fn exemple(descricao: &str) -> Exemple {
        Exemple {
            id: None,
            descricao: descricao.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_save_respeita_chave_unica() {
        let repo = MemoriaRepositorio::<Exemple>::new();
        let primeiro = repo.save(exemple("Primeiro")).await.unwrap();
        repo.save(exemple("Segundo")).await.unwrap();

        match repo.save(exemple("Primeiro")).await {
            Err(AppError::Conflito(msg)) => assert_eq!(msg, Exemple::MENSAGEM_CONFLITO),
            outro => panic!("esperava conflito, veio {:?}", outro),
        }

        // Regravar a própria linha não conflita; trocar para a chave de outra, sim.
        assert!(repo.save(primeiro.clone()).await.is_ok());
        let mut renomeado = primeiro;
        renomeado.descricao = "Segundo".to_string();
        assert!(matches!(repo.save(renomeado).await, Err(AppError::Conflito(_))));

        assert_eq!(repo.quantidade(), 2);
        assert_eq!(repo.gravacoes(), 3);
    }
}
