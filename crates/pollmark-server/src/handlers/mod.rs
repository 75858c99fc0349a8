//! HTTP request handlers.

pub(crate) mod documents;
pub(crate) mod export;
pub(crate) mod render;
pub(crate) mod responses;
pub(crate) mod shortcodes;
