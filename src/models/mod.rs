//! Domain models: the content catalog and its built-in finance data.

mod catalog;
mod finance;

pub use catalog::{
    CatalogData, ContentCatalog, LayerEntry, LayerId, OverviewEntry, Rgb, SubItem, SubItemId,
    Topic,
};
