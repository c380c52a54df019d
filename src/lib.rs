//! Browser-side behavior of the LeafCare dashboard, independent of any DOM.
//!
//! The controllers work against the [`dom::Document`] trait: the
//! [`localizer::LocalizationEngine`] relabels `data-i18n` elements and tells
//! the server about locale switches, the [`gallery::GalleryController`]
//! drives the "all images" panel and [`upload::UploadPreview`] previews picked
//! files. [`page::Page`] wires all three to one document.
//!
//! With the `web` feature the crate also builds as a WebAssembly module whose
//! start function mounts the page over the browser DOM.

pub mod binding;
pub mod config;
pub mod dom;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod localizer;
pub mod notify;
pub mod page;
#[cfg(not(target_arch = "wasm32"))]
pub mod retry;
pub mod upload;
#[cfg(feature = "web")]
pub mod web;
