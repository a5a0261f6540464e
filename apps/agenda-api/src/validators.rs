//! Validadores puros dos campos aceitos pela API
//!
//! Cada função devolve a mensagem fixa que o frontend exibe quando o
//! campo é rejeitado. As mensagens fazem parte do contrato da API e não
//! devem mudar de texto.

use chrono::NaiveDateTime;

use agenda_db::models::{parse_appointment_time, AppointmentStatus};

/// Comprimento mínimo aceito para senhas
const MIN_PASSWORD_LEN: usize = 6;
/// Comprimento máximo das observações de uma consulta
const MAX_NOTES_LEN: usize = 500;

/// Email em formato válido, no mínimo `usuario@dominio.tld`
///
/// O crate validator segue a regra HTML5, que aceita domínio sem ponto;
/// aqui o ponto é obrigatório.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let dotted_domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.contains('.'))
        .unwrap_or(false);

    if dotted_domain && validator::validate_email(email) {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Senha com o comprimento mínimo exigido
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err("Password must be at least 6 characters long")
    }
}

/// Telefone com exatamente 10 dígitos
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Invalid phone number format. Must be 10 digits.")
    }
}

/// Nome contendo apenas letras e espaços
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err("Invalid name format. Must contain only letters and spaces.")
    }
}

/// Horário no formato `YYYY-MM-DD HH:MM`, devolvido já interpretado
pub fn validate_appointment_time(raw: &str) -> Result<NaiveDateTime, &'static str> {
    parse_appointment_time(raw)
        .map_err(|_| "Invalid appointment time format. Use YYYY-MM-DD HH:MM.")
}

/// Status textual conhecido, devolvido já interpretado
pub fn validate_appointment_status(raw: &str) -> Result<AppointmentStatus, &'static str> {
    AppointmentStatus::parse(raw).ok_or(
        "Invalid appointment status. Must be 'scheduled', 'canceled', 'completed', or 'rescheduled'.",
    )
}

/// Observações dentro do limite de tamanho
pub fn validate_notes(notes: &str) -> Result<(), &'static str> {
    if notes.chars().count() <= MAX_NOTES_LEN {
        Ok(())
    } else {
        Err("Notes must be at most 500 characters.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert_eq!(validate_email("john@example"), Err("Invalid email format"));
        assert_eq!(validate_email("john.example.com"), Err("Invalid email format"));
        assert_eq!(validate_email(""), Err("Invalid email format"));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            validate_password("12345"),
            Err("Password must be at least 6 characters long")
        );
        // Contagem por caracteres, não por bytes
        assert!(validate_password("çãéíõú").is_ok());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("12345678901").is_err());
        assert!(validate_phone("12345678ab").is_err());
        assert_eq!(
            validate_phone("(11) 9876-5432"),
            Err("Invalid phone number format. Must be 10 digits.")
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("John Doe").is_ok());
        assert!(validate_name("Ana").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("John3").is_err());
        assert_eq!(
            validate_name("John_Doe"),
            Err("Invalid name format. Must contain only letters and spaces.")
        );
    }

    #[test]
    fn test_validate_appointment_time() {
        let time = validate_appointment_time("2099-01-01 10:00").unwrap();
        assert_eq!(time.format("%Y-%m-%d %H:%M").to_string(), "2099-01-01 10:00");

        let expected = Err("Invalid appointment time format. Use YYYY-MM-DD HH:MM.");
        assert_eq!(validate_appointment_time("2099-01-01"), expected);
        assert_eq!(validate_appointment_time("2099-01-01 10:00:00"), expected);
        assert_eq!(validate_appointment_time("01/01/2099 10:00"), expected);
        assert_eq!(validate_appointment_time("2099-13-01 10:00"), expected);
    }

    #[test]
    fn test_validate_appointment_status() {
        assert_eq!(
            validate_appointment_status("scheduled"),
            Ok(AppointmentStatus::Scheduled)
        );
        assert_eq!(
            validate_appointment_status("rescheduled"),
            Ok(AppointmentStatus::Rescheduled)
        );
        assert!(validate_appointment_status("pending").is_err());
        assert!(validate_appointment_status("SCHEDULED").is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes(&"x".repeat(500)).is_ok());
        assert_eq!(
            validate_notes(&"x".repeat(501)),
            Err("Notes must be at most 500 characters.")
        );
    }
}
