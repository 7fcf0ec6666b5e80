//! The contact page singleton.

use serde::{Deserialize, Serialize};

use super::LocalizedText;
use super::record::lenient;

/// Address locales the contact form edits.
pub const CONTACT_LOCALES: [&str; 3] = ["ru", "en", "ky"];

/// Editorial office contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub phone: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,

    #[serde(default)]
    pub address: LocalizedText,

    /// Stored image file names, served under `/uploads/contact/`
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub images: Vec<String>,
}

impl ContactInfo {
    /// Public URL of each image.
    pub fn image_urls(&self, base_url: &str) -> Vec<String> {
        let base = base_url.trim_end_matches('/');
        self.images
            .iter()
            .map(|img| format!("{base}/uploads/contact/{img}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_urls() {
        let info = ContactInfo {
            images: vec!["a.jpg".into(), "b.png".into()],
            ..ContactInfo::default()
        };
        assert_eq!(
            info.image_urls("https://example.kg/"),
            vec![
                "https://example.kg/uploads/contact/a.jpg",
                "https://example.kg/uploads/contact/b.png"
            ]
        );
    }

    #[test]
    fn test_null_images() {
        let info: ContactInfo =
            serde_json::from_str(r#"{"phone":"+996","images":null,"address":{"ky":"Бишкек"}}"#)
                .unwrap();
        assert!(info.images.is_empty());
        assert_eq!(info.address.raw("ky"), Some("Бишкек"));
    }
}
