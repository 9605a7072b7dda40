pub mod admin_ops;

pub use admin_ops::{WidgetAdmin, WidgetSummary};
