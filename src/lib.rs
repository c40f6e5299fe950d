mod client;
mod dataset;
mod error;
pub mod i18n;
pub mod listing;
mod model;
pub mod normalize;

pub use client::ShowcaseClient;
pub use dataset::Dataset;
pub use error::{Result, ShowcaseError};
pub use i18n::{resolve_locale, Dictionary, Translator};
pub use model::*;
