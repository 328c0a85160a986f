//! User-facing (pt-BR) messages for auth failures.
//!
//! Each operation has an enumerated mapping from the provider's structured
//! error codes plus a generic fallback for anything unmapped.

use crate::features::auth::clients::ProviderErrorCode;

/// Local validation message for passwords shorter than the minimum
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 6 caracteres";

pub const SIGN_IN_FALLBACK: &str = "Erro ao fazer login";
pub const SIGN_UP_FALLBACK: &str = "Erro ao criar conta";
#[allow(dead_code)]
pub const OAUTH_FALLBACK: &str = "Erro ao fazer login com Google";
pub const SIGN_OUT_FALLBACK: &str = "Erro ao fazer logout";

pub fn sign_in_message(code: &ProviderErrorCode) -> &'static str {
    match code {
        ProviderErrorCode::InvalidCredentials => "Email ou senha incorretos",
        ProviderErrorCode::EmailNotConfirmed => {
            "Por favor, confirme seu email antes de fazer login"
        }
        ProviderErrorCode::OverRateLimit => "Muitas tentativas. Tente novamente em alguns minutos",
        _ => SIGN_IN_FALLBACK,
    }
}

pub fn sign_up_message(code: &ProviderErrorCode) -> &'static str {
    match code {
        ProviderErrorCode::UserAlreadyExists => "Este email já está cadastrado",
        ProviderErrorCode::WeakPassword => PASSWORD_TOO_SHORT,
        ProviderErrorCode::InvalidEmail => "Email inválido",
        _ => SIGN_UP_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_mapping() {
        assert_eq!(
            sign_in_message(&ProviderErrorCode::InvalidCredentials),
            "Email ou senha incorretos"
        );
        assert_eq!(
            sign_in_message(&ProviderErrorCode::EmailNotConfirmed),
            "Por favor, confirme seu email antes de fazer login"
        );
        assert_eq!(
            sign_in_message(&ProviderErrorCode::OverRateLimit),
            "Muitas tentativas. Tente novamente em alguns minutos"
        );
    }

    #[test]
    fn test_unmapped_codes_fall_back() {
        let unknown = ProviderErrorCode::Other("http_500".to_string());
        assert_eq!(sign_in_message(&unknown), SIGN_IN_FALLBACK);
        assert_eq!(sign_up_message(&unknown), SIGN_UP_FALLBACK);
    }

    #[test]
    fn test_sign_up_mapping() {
        assert_eq!(
            sign_up_message(&ProviderErrorCode::UserAlreadyExists),
            "Este email já está cadastrado"
        );
        assert_eq!(
            sign_up_message(&ProviderErrorCode::WeakPassword),
            PASSWORD_TOO_SHORT
        );
        assert_eq!(sign_up_message(&ProviderErrorCode::InvalidEmail), "Email inválido");
    }
}
