// Folio: storage and segmentation backend for interactive e-books.
//
// This is the library root. Each module corresponds to a major subsystem:
// the content segmenter, the SQLite storage layer, the image generation
// proxy, and the HTTP API.

pub mod config;
pub mod db;
pub mod imagegen;
pub mod output;
pub mod segmenter;
pub mod web;
