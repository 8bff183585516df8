//! Host bindings for the MyNote core.

pub mod api;
