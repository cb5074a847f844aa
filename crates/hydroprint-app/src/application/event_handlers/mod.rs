mod submission_audit_handler;

pub use submission_audit_handler::SubmissionAuditHandler;
