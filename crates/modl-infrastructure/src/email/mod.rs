//! Email module (SMTP adapter and templates)

pub mod smtp_sender;
pub mod templates;

pub use smtp_sender::SmtpEmailSender;
pub use templates::EmailTemplates;
