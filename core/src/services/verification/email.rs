//! Verification email composition

/// Subject line of every verification email
pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// A composed verification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub html_body: String,
}

impl VerificationEmail {
    /// Build the message greeting `first_name` and pointing at `link`
    pub fn compose(first_name: &str, link: &str) -> Self {
        let name = escape_html(first_name);
        let link = escape_html(link);

        let html_body = format!(
            "<html><body>\
             <h2>Verify your email address to complete registration</h2>\
             <p>Hi {name}!</p>\
             <p>Thanks for your interest in joining Green City! \
             To finish your registration, please confirm this email address.</p>\
             <p><a href=\"{link}\">Verify email</a></p>\
             <p>If the button does not work, copy this link into your browser:<br>{link}</p>\
             <p>If you did not create an account, you can ignore this message.</p>\
             </body></html>"
        );

        Self {
            subject: VERIFICATION_SUBJECT.to_string(),
            html_body,
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
