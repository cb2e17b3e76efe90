//! Register Use Case
//!
//! Runs every field rule independently, collecting all failures, then
//! forwards the normalized payload to the auth service. The HTTP layer
//! reports only the first failure; the full list is for callers that
//! want per-field feedback.

use std::sync::Arc;

use crate::domain::upstream::{AuthBackend, RegisterPayload, RegisterReply};
use crate::domain::value_object::{
    BirthDate, Dni, Email, FieldError, Password, PersonName, Phone, Sex,
};
use crate::error::{GatewayError, GatewayResult};

/// Register input, straight off the wire
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<String>,
    pub mobile: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<String>,
}

/// Validate every register field, collecting all failures.
///
/// Field order matches the endpoint's reporting order: email, password,
/// first name, last name, dni, mobile, then the optional fields. `sex`
/// and `birthDate` are only checked when the client sent them.
pub fn validate_register(input: &RegisterInput) -> Result<RegisterPayload, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = collect(&mut errors, "email", {
        Email::new(input.email.clone().unwrap_or_default())
    });
    let password = collect(&mut errors, "password", {
        Password::new(input.password.clone().unwrap_or_default())
    });
    let first_name = collect(&mut errors, "firstName", {
        PersonName::new(input.first_name.clone().unwrap_or_default(), "Nombre")
    });
    let last_name = collect(&mut errors, "lastName", {
        PersonName::new(input.last_name.clone().unwrap_or_default(), "Apellido")
    });
    let dni = collect(&mut errors, "dni", {
        Dni::new(input.dni.clone().unwrap_or_default())
    });
    let mobile = collect(&mut errors, "mobile", {
        Phone::new(input.mobile.clone().unwrap_or_default())
    });

    let sex = match input.sex.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => collect(&mut errors, "sex", Sex::new(raw)).map(Sex::into_inner),
        None => None,
    };
    let birth_date = match input.birth_date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            collect(&mut errors, "birthDate", BirthDate::new(raw)).map(|d| d.as_str().to_string())
        }
        None => None,
    };

    match (email, password, first_name, last_name, dni, mobile) {
        (Some(email), Some(password), Some(first_name), Some(last_name), Some(dni), Some(mobile))
            if errors.is_empty() =>
        {
            Ok(RegisterPayload {
                first_name: first_name.capitalized(),
                last_name: last_name.capitalized(),
                dni: dni.into_inner(),
                email: email.into_inner(),
                password: password.into_inner(),
                sex,
                birth_date,
                mobile: mobile.into_inner(),
            })
        }
        _ => Err(errors),
    }
}

fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    result: kernel::error::app_error::AppResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(FieldError {
                field,
                message: err.message().to_string(),
            });
            None
        }
    }
}

/// Register use case
pub struct RegisterUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> RegisterUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, input: RegisterInput) -> GatewayResult<RegisterReply> {
        let payload = validate_register(&input).map_err(|errors| {
            // The HTTP contract reports the first failing field only.
            let message = errors
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_else(|| "Solicitud inválida".to_string());
            GatewayError::Validation(message)
        })?;

        self.backend.register(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RegisterInput {
        RegisterInput {
            email: Some("user@example.com".to_string()),
            password: Some("secret1".to_string()),
            first_name: Some("maría".to_string()),
            last_name: Some("GARCÍA".to_string()),
            dni: Some("12.345.678".to_string()),
            mobile: Some("11-4444-5555".to_string()),
            sex: Some("F".to_string()),
            birth_date: Some("1990-05-20".to_string()),
        }
    }

    #[test]
    fn test_validate_register_normalizes() {
        let payload = validate_register(&valid_input()).unwrap();

        assert_eq!(payload.email, "user@example.com");
        assert_eq!(payload.dni, "12345678");
        assert_eq!(payload.mobile, "1144445555");
        assert_eq!(payload.first_name, "María");
        assert_eq!(payload.last_name, "García");
        assert_eq!(payload.sex.as_deref(), Some("F"));
        assert_eq!(payload.birth_date.as_deref(), Some("1990-05-20"));
    }

    #[test]
    fn test_validate_register_collects_all_failures() {
        let input = RegisterInput {
            email: Some("bad".to_string()),
            password: Some("123".to_string()),
            first_name: Some("x".to_string()),
            last_name: None,
            dni: Some("12".to_string()),
            mobile: Some("123".to_string()),
            sex: Some("?".to_string()),
            birth_date: Some("nunca".to_string()),
        };

        let errors = validate_register(&input).unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "email",
                "password",
                "firstName",
                "lastName",
                "dni",
                "mobile",
                "sex",
                "birthDate"
            ]
        );
        // First reported failure matches the endpoint's 400 message.
        assert_eq!(errors[0].message, "Formato de email inválido");
    }

    #[test]
    fn test_validate_register_optional_fields_skipped_when_absent() {
        let mut input = valid_input();
        input.sex = None;
        input.birth_date = None;

        let payload = validate_register(&input).unwrap();
        assert_eq!(payload.sex, None);
        assert_eq!(payload.birth_date, None);
    }

    #[test]
    fn test_validate_register_single_failure() {
        let mut input = valid_input();
        input.dni = Some("123".to_string());

        let errors = validate_register(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "dni");
        assert_eq!(errors[0].message, "DNI debe tener entre 7 y 8 dígitos");
    }
}
