//! Category-based result filter.
//!
//! Looks up each hit's categories one request at a time and removes hits
//! whose categories contain an excluded term. This is a moderation
//! heuristic: substring matching gives false positives and negatives.

use crate::client::WikiApi;
use crate::config::{ApiConfig, CategoryFailurePolicy};
use crate::error::Result;
use crate::types::SearchResult;

/// Returns `true` if no category title contains any of `terms`,
/// compared case-insensitively.
///
/// `terms` are expected in any case; they are lowercased here.
pub fn is_allowed<S: AsRef<str>>(categories: &[String], terms: &[S]) -> bool {
    let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();
    !categories.iter().any(|category| {
        let category = category.to_lowercase();
        terms.iter().any(|term| category.contains(term.as_str()))
    })
}

/// Remove results whose categories match `config.excluded_category_terms`.
///
/// Lookups are issued strictly in order, each awaited before the next is
/// started. Kept results retain their relative order.
///
/// # Errors
///
/// With [`CategoryFailurePolicy::Propagate`], the first failed lookup
/// aborts the stage and its error is returned. The other policies never
/// fail.
pub async fn filter_results<A: WikiApi>(
    api: &A,
    results: Vec<SearchResult>,
    config: &ApiConfig,
) -> Result<Vec<SearchResult>> {
    let terms = &config.excluded_category_terms;
    if terms.is_empty() {
        return Ok(results);
    }

    let total = results.len();
    let mut kept = Vec::with_capacity(total);

    for result in results {
        let allowed = match api.categories(result.page_id).await {
            Ok(categories) => is_allowed(&categories, terms),
            Err(err) => match config.category_failure_policy {
                CategoryFailurePolicy::Propagate => return Err(err),
                CategoryFailurePolicy::Keep => {
                    tracing::warn!(page_id = result.page_id, error = %err, "category lookup failed, keeping result");
                    true
                }
                CategoryFailurePolicy::Drop => {
                    tracing::warn!(page_id = result.page_id, error = %err, "category lookup failed, dropping result");
                    false
                }
            },
        };

        if allowed {
            kept.push(result);
        } else {
            tracing::trace!(page_id = result.page_id, "result removed by category filter");
        }
    }

    tracing::debug!(total, kept = kept.len(), "category filter applied");
    Ok(kept)
}
