//! The optimizer drivers are agnostic to how (or whether) a layout gets
//! visualized. This trait is the seam an interactive viewer plugs into.

use crate::model::Layout;

/// An external sink notified whenever a driver improves its best-so-far
/// layout. Implementations are free to do nothing; [`NoopSink`] is the
/// default used when a caller passes `None`.
pub trait DisplaySink {
    fn show(&self, layout: &Layout, title: &str);
}

/// A [`DisplaySink`] that drops every call.
pub struct NoopSink;

impl DisplaySink for NoopSink {
    fn show(&self, _layout: &Layout, _title: &str) {}
}
