//! Read-only data model of a slide deck as handed over by the document-fetch layer.

pub mod colors;
pub mod common;
pub mod elements;
pub mod group;
pub mod image;
pub mod image_data;
pub mod line;
pub mod presentation;
pub mod shape;
pub mod slide;
pub mod table;
pub mod text;
