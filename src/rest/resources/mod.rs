//! Typed wrappers for Shopline REST resources.
//!
//! Each resource is a plain serde struct plus an implementation of
//! [`RestResource`](crate::rest::RestResource), which supplies `all()` and
//! `find()`. Resources the API lets you delete also implement
//! [`Deletable`](crate::rest::Deletable). Everything else is an inherent
//! function on the resource type.
//!
//! | Resource | Operations |
//! |----------|------------|
//! | [`Order`] | all, find, search, archived, create, update, cancel, update_status, tags, update_tags |
//! | [`Customer`] | all, find, search, create, update, delete, set_tags, modify_tags |
//! | [`Product`] | all, find, search, create, update, delete |
//! | [`Collection`] | all, find, create, update, delete, add_products, remove_product |
//! | [`Promotion`] | all, find, search, create, update, delete, activate, deactivate |
//! | [`Dispute`] | all, find, update_evidence, submit, accept |
//! | [`Theme`] | all, find, create, update, delete |
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::{EnrichResultExt, RestResource};
//! use shopline_api::rest::resources::{Product, ProductListOptions};
//!
//! let options = ProductListOptions {
//!     status: "active".to_string(),
//!     ..Default::default()
//! };
//! let page = Product::all(&client, &options)
//!     .await
//!     .enrich(Product::PLURAL, "")?;
//! ```

mod collection;
mod common;
mod customer;
mod dispute;
mod order;
mod product;
mod promotion;
mod theme;

pub use collection::{
    Collection, CollectionCreateRequest, CollectionListOptions, CollectionUpdateRequest,
};
pub use common::{Address, Price};
pub use customer::{
    Customer, CustomerCreateRequest, CustomerListOptions, CustomerSearchOptions,
    CustomerTagsUpdate, CustomerUpdateRequest,
};
pub use dispute::{Dispute, DisputeEvidence, DisputeListOptions};
pub use order::{
    ArchivedOrderListOptions, Order, OrderCreateRequest, OrderItem, OrderLineItem,
    OrderListOptions, OrderSearchOptions, OrderUpdateRequest,
};
pub use product::{
    Product, ProductCreateRequest, ProductListOptions, ProductSearchOptions, ProductUpdateRequest,
};
pub use promotion::{
    Promotion, PromotionCreateRequest, PromotionListOptions, PromotionSearchOptions,
    PromotionUpdateRequest,
};
pub use theme::{Theme, ThemeCreateRequest, ThemeListOptions, ThemeUpdateRequest};
