//! Paginated list envelope returned by list and search endpoints.
//!
//! Shopline wraps collections as
//! `{"items": [...], "page": 1, "page_size": 20, "total_count": 42, "has_more": true}`.
//! [`ListResponse<T>`] mirrors that shape and implements `Deref<Target = [T]>`,
//! so it can be iterated and indexed like a slice:
//!
//! ```rust,ignore
//! let page = Order::all(&client, &OrderListOptions::default()).await?;
//!
//! for order in page.iter() {
//!     println!("{}", order.order_number);
//! }
//!
//! if let Some(next) = page.next_page() {
//!     let options = OrderListOptions { page: next, ..Default::default() };
//!     let more = Order::all(&client, &options).await?;
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// One page of a list or search result.
///
/// # Example
///
/// ```rust
/// use shopline_api::rest::ListResponse;
///
/// let page: ListResponse<String> = serde_json::from_str(
///     r#"{"items": ["a", "b"], "page": 1, "page_size": 2, "total_count": 5, "has_more": true}"#,
/// ).unwrap();
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page[0], "a");
/// assert_eq!(page.next_page(), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// The 1-based page number.
    #[serde(default)]
    pub page: u32,
    /// The number of items requested per page.
    #[serde(default)]
    pub page_size: u32,
    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total_count: u64,
    /// Whether another page follows this one.
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            page_size: 0,
            total_count: 0,
            has_more: false,
        }
    }
}

impl<T> ListResponse<T> {
    /// Returns the number of the following page, if there is one.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_more {
            Some(self.page.saturating_add(1))
        } else {
            None
        }
    }

    /// Consumes the response and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for ListResponse<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for ListResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
