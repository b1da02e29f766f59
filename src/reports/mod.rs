//! Scam reports and the bank reference list.

mod model;
mod store;

pub use model::{Attachment, Bank, NewReport, Report};
pub use store::{ReportEndpoints, ReportResource, ReportStore};
