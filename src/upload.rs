use axum::extract::multipart::{Field, Multipart};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{image_too_large_error, invalid_image_error, invalid_input_error, Error};

pub const MAX_IMAGE_BYTES: usize = 500_000; // 500kb
pub const MAX_TEXT_BYTES: usize = 1_000_000; // 1mb

const MIME_TYPE_MAP: [(&str, &str); 3] = [
    ("image/png", "png"),
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
];

pub fn image_dir() -> PathBuf {
    env::var("UPLOAD_DIR")
        .unwrap_or_else(|_| "uploads/images".into())
        .into()
}

fn extension(content_type: &str) -> Option<&'static str> {
    MIME_TYPE_MAP
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

// delete a stored file, best effort
pub async fn remove_stored(path: impl AsRef<Path>) {
    let path = path.as_ref();

    if let Err(err) = fs::remove_file(path).await {
        tracing::warn!("failed to remove stored image {}: {:?}", path.display(), err);
    }
}

#[derive(Debug)]
pub struct StoredImage {
    pub path: String,
}

impl StoredImage {
    pub async fn discard(self) {
        remove_stored(&self.path).await;
    }
}

pub struct FormData {
    fields: HashMap<String, String>,
    image: Option<StoredImage>,
}

impl FormData {
    pub fn field(&self, name: &str) -> Result<&str, Error> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| invalid_input_error())
    }

    pub fn image_path(&self) -> Result<&str, Error> {
        self.image
            .as_ref()
            .map(|image| image.path.as_str())
            .ok_or_else(|| invalid_input_error())
    }

    pub async fn discard_image(self) {
        if let Some(image) = self.image {
            image.discard().await;
        }
    }
}

// consumes the whole form; on failure nothing is left behind on disk
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, Error> {
    let mut fields = HashMap::new();
    let mut image: Option<StoredImage> = None;

    let result = loop {
        match multipart.next_field().await {
            Ok(Some(mut field)) => {
                let name = match field.name() {
                    Some(name) => name.to_string(),
                    None => continue,
                };

                if name == "image" {
                    if image.is_some() {
                        break Err(invalid_input_error());
                    }

                    match store_image(&mut field).await {
                        Ok(stored) => image = Some(stored),
                        Err(err) => break Err(err),
                    }
                } else {
                    match read_text(&mut field).await {
                        Ok(value) => {
                            fields.insert(name, value);
                        }
                        Err(err) => break Err(err),
                    }
                }
            }
            Ok(None) => break Ok(()),
            Err(_) => break Err(invalid_input_error()),
        }
    };

    if let Err(err) = result {
        if let Some(stored) = image {
            stored.discard().await;
        }

        return Err(err);
    }

    Ok(FormData { fields, image })
}

// text parts are bounded the same way the image stream is
async fn read_text(field: &mut Field<'_>) -> Result<String, Error> {
    let mut buffer = Vec::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|_| invalid_input_error())?
    {
        if buffer.len() + chunk.len() > MAX_TEXT_BYTES {
            return Err(invalid_input_error());
        }

        buffer.extend_from_slice(&chunk);
    }

    String::from_utf8(buffer).map_err(|_| invalid_input_error())
}

async fn store_image(field: &mut Field<'_>) -> Result<StoredImage, Error> {
    let ext = field
        .content_type()
        .and_then(extension)
        .ok_or_else(|| invalid_image_error())?;

    let dir = image_dir();
    fs::create_dir_all(&dir).await?;

    let path = dir.join(format!("{}.{}", Uuid::new_v4(), ext));

    if let Err(err) = write_to_disk(field, &path).await {
        remove_stored(&path).await;
        return Err(err);
    }

    Ok(StoredImage {
        path: path.to_string_lossy().into_owned(),
    })
}

async fn write_to_disk(field: &mut Field<'_>, path: &Path) -> Result<(), Error> {
    let mut file = fs::File::create(path).await?;
    let mut written = 0;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|_| invalid_input_error())?
    {
        written += chunk.len();

        if written > MAX_IMAGE_BYTES {
            return Err(image_too_large_error());
        }

        file.write_all(&chunk).await?;
    }

    file.flush().await?;

    Ok(())
}

#[test]
fn mime_type_map_test() {
    assert_eq!(extension("image/png"), Some("png"));
    assert_eq!(extension("image/jpeg"), Some("jpeg"));
    assert_eq!(extension("image/jpg"), Some("jpg"));
    assert_eq!(extension("image/gif"), None);
    assert_eq!(extension("text/plain"), None);
}

#[test]
fn form_data_accessors_test() {
    use axum::http::StatusCode;

    let mut fields = HashMap::new();
    fields.insert("title".to_string(), "Empire State Building".to_string());

    let form = FormData {
        fields,
        image: Some(StoredImage {
            path: "uploads/images/test.png".into(),
        }),
    };

    assert_eq!(form.field("title").unwrap(), "Empire State Building");
    assert_eq!(form.image_path().unwrap(), "uploads/images/test.png");

    let err = form.field("description").unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

    let form = FormData {
        fields: HashMap::new(),
        image: None,
    };

    let err = form.image_path().unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}
