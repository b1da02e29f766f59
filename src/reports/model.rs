//! Report, bank and submission types for the Reports API.

use crate::de::{blank_as_none, string_or_number};
use crate::http::{FilePart, MultipartPayload};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A submitted fraud report as returned by the backend.
///
/// Reporter contact details are submitted with [`NewReport`] but are never
/// read back into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "scammers_name", default)]
    pub scammer_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub business_name: Option<String>,
    #[serde(rename = "scammers_bank", default)]
    pub bank: String,
    #[serde(rename = "scammers_account", default)]
    pub account_number: String,
    #[serde(rename = "scammers_phone", default)]
    pub phone: String,
    #[serde(rename = "scammers_instagram", default, deserialize_with = "blank_as_none")]
    pub instagram: Option<String>,
    #[serde(rename = "scammers_twitter", default, deserialize_with = "blank_as_none")]
    pub twitter: Option<String>,
    #[serde(default)]
    pub date_occurred: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "scammers_image", default, deserialize_with = "blank_as_none")]
    pub image: Option<String>,
    #[serde(rename = "other_documents", default, deserialize_with = "blank_as_none")]
    pub document: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Reference entry for a financial institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    pub name: String,
}

/// An evidence file attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: mime::Mime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = guess_mime(&file_name);
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    fn into_part(self, field: &str) -> FilePart {
        FilePart {
            field: field.to_string(),
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

/// Get MIME type from filename extension.
fn guess_mime(file_name: &str) -> mime::Mime {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return mime::APPLICATION_OCTET_STREAM,
    };
    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "pdf" => mime::APPLICATION_PDF,
        "txt" => mime::TEXT_PLAIN,
        "doc" => "application/msword"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// A report as entered by the reporter, ready to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReport {
    pub reporter_name: String,
    pub reporter_email: String,
    pub reporter_phone: String,

    pub scammer_name: String,
    pub business_name: String,
    pub account_number: String,
    pub bank: String,
    pub phone: String,
    pub instagram: Option<String>,
    pub twitter: Option<String>,

    pub date_occurred: String,
    pub description: String,

    pub image: Option<Attachment>,
    pub document: Option<Attachment>,
}

impl NewReport {
    pub fn with_image(mut self, image: Attachment) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_document(mut self, document: Attachment) -> Self {
        self.document = Some(document);
        self
    }

    /// Build the multipart body using the backend's field names.
    pub fn into_multipart(self) -> MultipartPayload {
        let mut payload = MultipartPayload::new()
            .text("reporters_name", self.reporter_name)
            .text("reporters_email", self.reporter_email)
            .text("reporters_phone", self.reporter_phone)
            .text("scammers_name", self.scammer_name)
            .text("business_name", self.business_name)
            .text("scammers_account", self.account_number)
            .text("scammers_bank", self.bank)
            .text("scammers_phone", self.phone);

        if let Some(instagram) = self.instagram.filter(|h| !h.trim().is_empty()) {
            payload = payload.text("scammers_instagram", instagram);
        }
        if let Some(twitter) = self.twitter.filter(|h| !h.trim().is_empty()) {
            payload = payload.text("scammers_twitter", twitter);
        }

        payload = payload
            .text("date_occurred", self.date_occurred)
            .text("description", self.description);

        if let Some(image) = self.image {
            payload = payload.file(image.into_part("scammers_image"));
        }
        if let Some(document) = self.document {
            payload = payload.file(document.into_part("other_documents"));
        }

        payload
    }
}
