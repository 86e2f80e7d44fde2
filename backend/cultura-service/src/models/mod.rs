/// Data models for cultura-service
///
/// - `Cultura`: a stored row, convertible into the wire [`ContentPost`]
/// - `NewCultura` / `CulturaChanges`: validated inputs for create and update
/// - `CulturaRecord` / `CulturaPatch`: what a repository writes
use api_envelope::ContentPost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Stored cultura post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cultura {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Filename relative to the upload root
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cultura> for ContentPost {
    fn from(row: Cultura) -> Self {
        ContentPost {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Default, Validate)]
pub struct NewCultura {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

/// Input for updating a post; `None` keeps the stored value
#[derive(Debug, Clone, Default, Validate)]
pub struct CulturaChanges {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
}

/// Row values handed to a repository on insert
#[derive(Debug, Clone)]
pub struct CulturaRecord {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Column updates handed to a repository; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct CulturaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// File part received in a multipart form, not yet written to disk
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, unsanitized
    pub original_name: String,
    pub bytes: Vec<u8>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Wire name of an input field, used in validation messages
fn wire_field_name(field: &str) -> &str {
    match field {
        "title" => api_envelope::post::fields::TITLE,
        "description" => api_envelope::post::fields::DESCRIPTION,
        other => other,
    }
}

/// Render validation failures as the app-facing message
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| wire_field_name(field.as_ref()).to_string())
        .collect();
    fields.sort_unstable();
    format!("Campos obrigatórios ausentes: {}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fail_validation() {
        let input = NewCultura {
            title: "   ".into(),
            description: "Descrição".into(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            describe_validation_errors(&errors),
            "Campos obrigatórios ausentes: titulo"
        );
    }

    #[test]
    fn both_fields_reported() {
        let errors = NewCultura::default().validate().unwrap_err();
        assert_eq!(
            describe_validation_errors(&errors),
            "Campos obrigatórios ausentes: descricao, titulo"
        );
    }

    #[test]
    fn changes_only_validate_provided_fields() {
        let changes = CulturaChanges {
            title: None,
            description: Some("nova".into()),
        };
        assert!(changes.validate().is_ok());

        let changes = CulturaChanges {
            title: Some("\t".into()),
            description: None,
        };
        assert!(changes.validate().is_err());
    }
}
