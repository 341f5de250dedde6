//! Wire shapes for the project-options endpoint.
//!
//! The category endpoint has shipped several slightly different response
//! shapes over time (`options` vs `category_options`, `name` vs
//! `option_name`). All of them are decoded here and normalized into the
//! single [`Catalog`](super::Catalog) shape so that downstream logic
//! never branches on wire variants.

use serde::Deserialize;

use super::{Catalog, Category, CategoryOption};

/// Top-level response from `GET /api/categories/project-options`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectOptionsResponse {
    /// Categories as sent by the endpoint, unnormalized.
    #[serde(default)]
    pub categories: Vec<WireCategory>,
}

/// A category as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCategory {
    /// Unique category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Display position; endpoints omit it for legacy rows.
    #[serde(default)]
    pub sort_order: i64,
    /// Soft-delete flag; absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Options under either historical key.
    #[serde(default, alias = "category_options")]
    pub options: Vec<WireOption>,
}

/// An option as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireOption {
    /// Unique option identifier.
    pub id: String,
    /// Display name under either historical key.
    #[serde(alias = "name")]
    pub option_name: String,
    /// Optional machine value.
    #[serde(default)]
    pub option_value: Option<String>,
    /// Display position; endpoints omit it for legacy rows.
    #[serde(default)]
    pub sort_order: i64,
    /// Soft-delete flag; absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Returns `true` unless the flag is explicitly `false`.
///
/// Soft-deleted rows are filtered server-side; this is the client-side
/// fallback for endpoints that still return them.
fn active(flag: Option<bool>) -> bool {
    flag != Some(false)
}

/// Normalizes wire categories into the canonical catalog shape.
///
/// Inactive categories and options are dropped, both levels are sorted
/// by `sort_order` ascending, and every option is stamped with its
/// owning category id.
#[must_use]
pub fn normalize(categories: Vec<WireCategory>) -> Catalog {
    let mut normalized: Vec<Category> = categories
        .into_iter()
        .filter(|c| active(c.is_active))
        .map(|c| {
            let mut options: Vec<CategoryOption> = c
                .options
                .into_iter()
                .filter(|o| active(o.is_active))
                .map(|o| CategoryOption {
                    id: o.id,
                    category_id: c.id.clone(),
                    name: o.option_name,
                    value: o.option_value,
                    sort_order: o.sort_order,
                })
                .collect();
            options.sort_by_key(|o| o.sort_order);
            Category {
                id: c.id,
                name: c.name,
                description: c.description,
                sort_order: c.sort_order,
                options,
            }
        })
        .collect();
    normalized.sort_by_key(|c| c.sort_order);
    Catalog { categories: normalized }
}
