//! Object-storage persistence for uploaded résumé files.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;

/// Builds the object key for an uploaded résumé:
/// `{user_id}/{uuid}-{sanitized_file_name}`. The UUID makes repeated uploads
/// of the same file name collision-free.
pub fn object_key(user_id: Uuid, file_name: &str) -> String {
    format!("{user_id}/{}-{}", Uuid::new_v4(), sanitize_file_name(file_name))
}

/// Reduces a client-supplied file name to a safe key segment: path components
/// are dropped and anything outside [A-Za-z0-9._-] becomes '_'.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

pub async fn put_resume(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    data: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from(data))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("put {key}: {e}")))?;
    Ok(())
}

pub async fn delete_resume(s3: &S3Client, bucket: &str, key: &str) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("delete {key}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_file_name("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_file_name("cv-2026_final.docx"), "cv-2026_final.docx");
    }

    #[test]
    fn test_sanitize_replaces_spaces_and_punctuation() {
        assert_eq!(
            sanitize_file_name("My Resume (v2).pdf"),
            "My_Resume__v2_.pdf"
        );
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\jane\\cv.pdf"), "cv.pdf");
    }

    #[test]
    fn test_sanitize_falls_back_on_degenerate_names() {
        assert_eq!(sanitize_file_name("...."), "resume");
        assert_eq!(sanitize_file_name(""), "resume");
    }

    #[test]
    fn test_object_key_is_scoped_to_user() {
        let user_id = Uuid::new_v4();
        let key = object_key(user_id, "resume.pdf");
        assert!(key.starts_with(&format!("{user_id}/")));
        assert!(key.ends_with("-resume.pdf"));
    }

    #[test]
    fn test_object_keys_are_unique_per_upload() {
        let user_id = Uuid::new_v4();
        assert_ne!(object_key(user_id, "a.pdf"), object_key(user_id, "a.pdf"));
    }
}
