//! Catalog product record.
//!
//! Products are created once when the bundled dataset is loaded and never
//! mutated afterwards. The serialized field names follow the dataset export
//! (`Código`, `Clave`, `Nombre`, ...), which is also the shape persisted
//! inside saved carts.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::code::ProductCode;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier across the catalog and the cart.
    #[serde(rename = "Código")]
    pub code: ProductCode,
    /// Secondary short identifier, not guaranteed unique.
    #[serde(rename = "Clave", default)]
    pub key: String,
    #[serde(rename = "Nombre", default)]
    pub name: String,
    #[serde(rename = "Descripción", default)]
    pub description: String,
    #[serde(rename = "Especificaciones", default)]
    pub specifications: String,
    /// Single fallback image, used when `images` is absent or empty.
    #[serde(rename = "URL_Imagen", default)]
    pub image_url: String,
    #[serde(
        rename = "Ficha_Técnica",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub technical_sheet_url: Option<String>,
    #[serde(
        rename = "URL_Catálogo",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub catalog_url: Option<String>,
    /// Bullet highlights.
    #[serde(
        rename = "Caracteristicas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub features: Option<Vec<String>>,
    /// Ordered image gallery.
    #[serde(rename = "Imagenes", default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Technical specification table (label to value).
    #[serde(
        rename = "Especificaciones_Tecnicas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub technical_specs: Option<BTreeMap<String, String>>,
}

/// Deserialize empty strings as None for optional link fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

impl Product {
    /// Create a product with the identifying fields set and everything else empty.
    #[must_use]
    pub fn new(
        code: ProductCode,
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            key: key.into(),
            name: name.into(),
            description: description.into(),
            specifications: String::new(),
            image_url: String::new(),
            technical_sheet_url: None,
            catalog_url: None,
            features: None,
            images: None,
            technical_specs: None,
        }
    }

    /// Returns the images to show for this product, in gallery order.
    ///
    /// Falls back to `image_url` alone when the gallery is absent or empty.
    /// Returns an empty list only when the product has no image at all.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        match self.images.as_deref() {
            Some(images) if !images.is_empty() => images.iter().map(String::as_str).collect(),
            _ if self.image_url.is_empty() => Vec::new(),
            _ => vec![self.image_url.as_str()],
        }
    }

    /// Returns the feature bullets, or an empty slice.
    #[must_use]
    pub fn features(&self) -> &[String] {
        self.features.as_deref().unwrap_or_default()
    }

    /// Returns the technical specification table, if the record has one.
    #[must_use]
    pub const fn technical_specs(&self) -> Option<&BTreeMap<String, String>> {
        self.technical_specs.as_ref()
    }
}
