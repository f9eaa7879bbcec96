// Printable documents: the work certificate and the landscape table reports.

pub mod certificate;
pub mod personnel_listing;
pub mod spanish;
pub mod table;
pub mod visit_report;

use thiserror::Error;

use crate::layout::JustifyError;

pub use certificate::{build_work_certificate, certificate_file_name, Letterhead};
pub use personnel_listing::{build_department_listing, listing_file_name};
pub use visit_report::{build_visit_report, visit_report_file_name};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("layout failed: {0}")]
    Layout(#[from] JustifyError),

    #[error("no visits registered today")]
    NoVisits,

    #[error("department '{0}' has no personnel")]
    EmptyDepartment(String),
}
