use axum::{
    body::Bytes,
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};

use crate::{
    error::AppError::{self, MalformedPayload, MissingField, PayloadTooLarge},
    models::RecipeUpdate,
};

pub enum ImagePart {
    Missing,
    Empty,
    File { file_name: String, bytes: Bytes },
}

pub struct RecipeForm {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub image: ImagePart,
}

/// Path ids that are not integers behave like unknown ids.
pub fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

pub fn parse_recipe(body: &[u8]) -> Result<RecipeUpdate, AppError> {
    serde_json::from_slice(body).map_err(|_| MalformedPayload)
}

/// Body limit hits keep their 413; anything else is a malformed form.
pub fn multipart_status(status: StatusCode) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        PayloadTooLarge
    } else {
        MalformedPayload
    }
}

fn form_error(e: MultipartError) -> AppError {
    multipart_status(e.status())
}

pub async fn read_form(mut multipart: Multipart) -> Result<RecipeForm, AppError> {
    let mut title = None;
    let mut ingredients = None;
    let mut instructions = None;
    let mut category = None;
    let mut image = ImagePart::Missing;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        // a plain text part named `image` is not an upload
        if name == "image" {
            if let Some(file_name) = field.file_name().map(str::to_owned) {
                image = if file_name.is_empty() {
                    ImagePart::Empty
                } else {
                    let bytes = field.bytes().await.map_err(form_error)?;
                    ImagePart::File { file_name, bytes }
                };
            }
            continue;
        }

        let slot = match name.as_str() {
            "title" => &mut title,
            "ingredients" => &mut ingredients,
            "instructions" => &mut instructions,
            "category" => &mut category,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(form_error)?);
    }

    Ok(RecipeForm {
        title: title.ok_or(MissingField("title"))?,
        ingredients: ingredients.ok_or(MissingField("ingredients"))?,
        instructions: instructions.ok_or(MissingField("instructions"))?,
        category: category.ok_or(MissingField("category"))?,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(AppError::NotFound)));
    }

    #[test]
    fn test_parse_recipe() {
        let recipe = parse_recipe(br#"{"id": "7", "title": "Pie"}"#).unwrap();
        assert_eq!(recipe.title, "Pie");
        assert!(matches!(parse_recipe(b"[1, 2"), Err(AppError::MalformedPayload)));
    }

    #[test]
    fn test_multipart_status() {
        assert!(matches!(multipart_status(StatusCode::PAYLOAD_TOO_LARGE), AppError::PayloadTooLarge));
        assert!(matches!(multipart_status(StatusCode::BAD_REQUEST), AppError::MalformedPayload));
    }
}
