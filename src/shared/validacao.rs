// src/shared/validacao.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::erro::AppError;
use super::shared_structs::ErroCampo;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("regex de e-mail inválida")
});

/// Acumula as falhas de validação de uma requisição.
/// Todas as regras são avaliadas; nenhuma interrompe as seguintes.
#[derive(Debug, Default)]
pub struct Validador {
    erros: Vec<ErroCampo>,
}

impl Validador {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adicionar(&mut self, campo: &str, mensagem: &str) -> &mut Self {
        self.erros.push(ErroCampo::new(campo, mensagem));
        self
    }

    pub fn nao_vazio(&mut self, campo: &str, valor: &str, mensagem: &str) -> &mut Self {
        if valor.is_empty() {
            self.adicionar(campo, mensagem);
        }
        self
    }

    /// Conta caracteres, não bytes.
    pub fn tamanho_minimo(&mut self, campo: &str, valor: &str, minimo: usize, mensagem: &str) -> &mut Self {
        if valor.chars().count() < minimo {
            self.adicionar(campo, mensagem);
        }
        self
    }

    pub fn email(&mut self, campo: &str, valor: &str, mensagem: &str) -> &mut Self {
        if !email_valido(valor) {
            self.adicionar(campo, mensagem);
        }
        self
    }

    pub fn finalizar(self) -> Result<(), AppError> {
        if self.erros.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validacao(self.erros))
        }
    }
}

/// Aceita qualquer valor JSON como texto, para que cada campo seja validado
/// pelas suas próprias regras em vez de falhar a desserialização do corpo.
pub fn texto_leniente<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(texto) => texto,
        Value::Null => String::new(),
        Value::Number(numero) => numero.to_string(),
        Value::Bool(valor) => valor.to_string(),
        outro => outro.to_string(),
    })
}

pub fn email_valido(valor: &str) -> bool {
    valor.len() <= 254 && EMAIL_RE.is_match(valor)
}

/// Inteiro com sinal opcional, aceito apenas se estiver entre 0 e i32::MAX.
pub fn parse_inteiro_nao_negativo(valor: &str) -> Option<i32> {
    let numero: i64 = valor.parse().ok()?;
    if (0..=i32::MAX as i64).contains(&numero) {
        Some(numero as i32)
    } else {
        None
    }
}

pub fn parse_booleano(valor: &str) -> Option<bool> {
    match valor {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valido() {
        assert!(email_valido("a@b.com"));
        assert!(email_valido("joana.silva+teste@empresa.com.br"));
        assert!(!email_valido("bad"));
        assert!(!email_valido("a@b"));
        assert!(!email_valido("a b@c.com"));
        assert!(!email_valido(""));
    }

    #[test]
    fn test_parse_inteiro_nao_negativo() {
        assert_eq!(parse_inteiro_nao_negativo("0"), Some(0));
        assert_eq!(parse_inteiro_nao_negativo("42"), Some(42));
        assert_eq!(parse_inteiro_nao_negativo("+7"), Some(7));
        assert_eq!(parse_inteiro_nao_negativo("-1"), None);
        assert_eq!(parse_inteiro_nao_negativo("abc"), None);
        assert_eq!(parse_inteiro_nao_negativo("1.5"), None);
        assert_eq!(parse_inteiro_nao_negativo("99999999999"), None);
    }

    #[derive(Deserialize)]
    struct Corpo {
        #[serde(default, deserialize_with = "texto_leniente")]
        nome: String,
    }

    #[test]
    fn test_texto_leniente() {
        let corpo: Corpo = serde_json::from_str(r#"{"nome":12}"#).unwrap();
        assert_eq!(corpo.nome, "12");
        let corpo: Corpo = serde_json::from_str(r#"{"nome":null}"#).unwrap();
        assert_eq!(corpo.nome, "");
        let corpo: Corpo = serde_json::from_str(r#"{"nome":true}"#).unwrap();
        assert_eq!(corpo.nome, "true");
        let corpo: Corpo = serde_json::from_str("{}").unwrap();
        assert_eq!(corpo.nome, "");
    }

    #[test]
    fn test_parse_booleano() {
        assert_eq!(parse_booleano("true"), Some(true));
        assert_eq!(parse_booleano("1"), Some(true));
        assert_eq!(parse_booleano("false"), Some(false));
        assert_eq!(parse_booleano("0"), Some(false));
        assert_eq!(parse_booleano("talvez"), None);
        assert_eq!(parse_booleano("TRUE"), None);
    }

    #[test]
    fn test_validador_acumula_todas_as_regras() {
        let mut v = Validador::new();
        v.nao_vazio("nome", "", "Nome é obrigatório")
            .tamanho_minimo("nome", "", 3, "Nome precisa ter pelo menos 3 caracteres")
            .email("email", "a@b.com", "E-mail inválido");
        match v.finalizar() {
            Err(AppError::Validacao(erros)) => {
                assert_eq!(erros.len(), 2);
                assert!(erros.iter().all(|e| e.campo == "nome"));
            }
            outro => panic!("esperava erro de validação, veio {:?}", outro),
        }
    }

    #[test]
    fn test_tamanho_minimo_conta_caracteres() {
        let mut v = Validador::new();
        v.tamanho_minimo("nome", "Zé", 3, "curto");
        assert!(v.finalizar().is_err());

        let mut v = Validador::new();
        v.tamanho_minimo("nome", "Joã", 3, "curto");
        assert!(v.finalizar().is_ok());
    }
}
