//! Handlebars templates for transactional email

use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

use modl_core::domain::VerificationEmail;

const VERIFICATION_HTML: &str = "verification_html";
const VERIFICATION_TEXT: &str = "verification_text";

const VERIFICATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; background: #0b0f19; color: #e5e7eb; padding: 24px;">
    <h1 style="color: #a78bfa;">Welcome to modl</h1>
    <p>Thanks for registering <strong>{{server_name}}</strong>.</p>
    <p>Please confirm your email address to activate your moderation panel at
       <code>{{subdomain}}</code>:</p>
    <p><a href="{{{link}}}" style="color: #a78bfa;">Verify email address</a></p>
    <p>If the button does not work, paste this link into your browser:<br>{{{link}}}</p>
    <p style="color: #6b7280;">If you did not register, you can ignore this email.</p>
  </body>
</html>
"#;

const VERIFICATION_TEXT_TEMPLATE: &str = "Welcome to modl!

Thanks for registering {{{server_name}}}.
Confirm your email address to activate your moderation panel:

{{{link}}}

If you did not register, you can ignore this email.
";

/// Pre-registered templates; build once and share.
pub struct EmailTemplates {
    registry: Handlebars<'static>,
}

/// Rendered bodies of one message
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

impl EmailTemplates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(VERIFICATION_HTML, VERIFICATION_HTML_TEMPLATE)?;
        registry.register_template_string(VERIFICATION_TEXT, VERIFICATION_TEXT_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render_verification(&self, email: &VerificationEmail) -> Result<RenderedEmail, RenderError> {
        let data = json!({
            "server_name": email.server_name,
            "subdomain": email.subdomain,
            "link": email.link,
        });
        Ok(RenderedEmail {
            html: self.registry.render(VERIFICATION_HTML, &data)?,
            text: self.registry.render(VERIFICATION_TEXT, &data)?,
        })
    }
}
