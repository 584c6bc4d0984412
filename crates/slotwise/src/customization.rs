//! Landing-page customization schema with legacy migration.
//!
//! Businesses customize their public booking page (colors, text blocks,
//! social links, gallery). Historically this was a loosely-typed nested
//! blob read with optional-chaining all over the render path; here it is a
//! versioned document with a discriminated union per block type, and one
//! explicit migration from the legacy flat shape, run once at load time.
//!
//! Legacy documents have no `version` field and flat camelCase keys
//! (`primaryColor`, `aboutText`, `instagram`, ...). Anything the migration
//! does not recognize is dropped, never fatal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SlotError};

/// Schema version written by the current dashboard.
pub const CURRENT_VERSION: u32 = 2;

/// Color palette for the public booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_primary")]
    pub primary_color: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: default_primary(),
            accent_color: default_accent(),
        }
    }
}

fn default_primary() -> String {
    "#0f172a".to_string()
}

fn default_accent() -> String {
    "#38bdf8".to_string()
}

/// One renderable block on the landing page, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Hero {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    Text {
        body: String,
    },
    Services {
        items: Vec<ServiceItem>,
    },
    Gallery {
        image_urls: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// The full customization document for one business's public page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCustomization {
    pub version: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Default for PageCustomization {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: Theme::default(),
            blocks: Vec::new(),
            social_links: Vec::new(),
        }
    }
}

/// Load a customization document, migrating legacy shapes.
///
/// Documents carrying a `version` field deserialize against the current
/// schema; versionless documents are assumed legacy and migrated field by
/// field. A version newer than [`CURRENT_VERSION`] is refused -- that
/// document was written by a newer dashboard than this build understands.
pub fn load(value: Value) -> Result<PageCustomization> {
    match value.get("version").and_then(Value::as_u64) {
        Some(v) if v > CURRENT_VERSION as u64 => Err(SlotError::Customization(format!(
            "unsupported customization version {} (this build supports <= {})",
            v, CURRENT_VERSION
        ))),
        Some(_) => {
            let mut doc: PageCustomization = serde_json::from_value(value)?;
            doc.version = CURRENT_VERSION;
            Ok(doc)
        }
        None => migrate_legacy(&value),
    }
}

/// Convert the legacy flat blob into the current schema. Every field is
/// optional; absent fields take schema defaults.
fn migrate_legacy(value: &Value) -> Result<PageCustomization> {
    let obj = value
        .as_object()
        .ok_or_else(|| SlotError::Customization("legacy document is not an object".to_string()))?;

    let str_field = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    let mut doc = PageCustomization::default();

    if let Some(c) = str_field("primaryColor") {
        doc.theme.primary_color = c;
    }
    if let Some(c) = str_field("accentColor") {
        doc.theme.accent_color = c;
    }

    if let Some(title) = str_field("heroTitle").or_else(|| str_field("businessName")) {
        doc.blocks.push(ContentBlock::Hero {
            title,
            subtitle: str_field("heroSubtitle"),
            image_url: str_field("heroImage"),
        });
    }
    if let Some(body) = str_field("aboutText") {
        doc.blocks.push(ContentBlock::Text { body });
    }
    if let Some(Value::Array(images)) = obj.get("galleryImages") {
        let image_urls: Vec<String> = images
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        if !image_urls.is_empty() {
            doc.blocks.push(ContentBlock::Gallery { image_urls });
        }
    }

    for platform in ["instagram", "facebook", "tiktok", "website"] {
        if let Some(url) = str_field(platform) {
            doc.social_links.push(SocialLink {
                platform: platform.to_string(),
                url,
            });
        }
    }

    Ok(doc)
}
