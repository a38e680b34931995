//! Enquiries Data

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
