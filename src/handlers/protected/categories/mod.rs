// handlers/protected/categories/mod.rs - category mutations
//
// POST /api/categories creates, PUT /api/categories/:id replaces.

use serde::{Deserialize, Deserializer};

use crate::database::{Category, CategoryFields};

pub mod create;
pub mod update;

pub use create::create;
pub use update::update;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub item_count: Option<i32>,
    pub image_url: Option<String>,
}

impl CreateCategoryRequest {
    /// Column values for a new row: count defaults to 0, image to NULL
    pub fn into_fields(self, name: String) -> CategoryFields {
        CategoryFields {
            name,
            item_count: self.item_count.unwrap_or(0),
            image_url: self.image_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Body of PUT /api/categories/:id.
///
/// `itemCount`: absent or `null` keeps the stored count, any number (0 included)
/// replaces it. `imageUrl`: absent keeps the stored URL, `null` or `""` clears
/// it, a string replaces it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub item_count: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

impl UpdateCategoryRequest {
    /// Merge the request over the stored row
    pub fn into_fields(self, name: String, current: &Category) -> CategoryFields {
        let image_url = match self.image_url {
            None => current.image_url.clone(),
            Some(url) => url.filter(|url| !url.is_empty()),
        };

        CategoryFields {
            name,
            item_count: self.item_count.unwrap_or(current.item_count),
            image_url,
        }
    }
}

/// Marks a field that appeared in the body, even as `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
