use tracing::debug;

use crate::users::dto::{RawUserInput, UserInput};

/// Cleans free text before it is displayed or stored.
pub trait TextSanitizer {
    fn sanitize_for_display(&self, s: &str) -> String;
    fn normalize_email_text(&self, s: &str) -> String;
}

/// Trims and HTML-escapes display text; strips characters that cannot
/// appear in an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl TextSanitizer for HtmlSanitizer {
    fn sanitize_for_display(&self, s: &str) -> String {
        let trimmed = s.trim();
        let mut out = String::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#039;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn normalize_email_text(&self, s: &str) -> String {
        s.trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
            .collect()
    }
}

pub fn process_user_input(raw: RawUserInput, sanitizer: &dyn TextSanitizer) -> UserInput {
    let input = UserInput {
        name: sanitizer.sanitize_for_display(raw.name.as_deref().unwrap_or("")),
        email: sanitizer.normalize_email_text(raw.email.as_deref().unwrap_or("")),
        role: sanitizer.sanitize_for_display(raw.role.as_deref().unwrap_or("customer")),
    };
    debug!(email = %input.email, role = %input.role, "user input processed");
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_trims_email() {
        let raw = RawUserInput {
            name: Some(r#"  <script>alert("xss")</script>  "#.into()),
            email: Some(" test@example.com ".into()),
            role: None,
        };
        let input = process_user_input(raw, &HtmlSanitizer);
        assert_eq!(
            input.name,
            "&lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
        assert_eq!(input.email, "test@example.com");
        assert_eq!(input.role, "customer");
    }

    #[test]
    fn missing_fields_become_empty() {
        let input = process_user_input(RawUserInput::default(), &HtmlSanitizer);
        assert_eq!(input.name, "");
        assert_eq!(input.email, "");
        assert_eq!(input.role, "customer");
    }

    #[test]
    fn email_loses_illegal_characters() {
        assert_eq!(
            HtmlSanitizer.normalize_email_text("jo hn(doe)@exa mple.com\n"),
            "johndoe@example.com"
        );
    }

    #[test]
    fn role_is_escaped_too() {
        let raw = RawUserInput {
            name: Some("Tom & Jerry".into()),
            email: None,
            role: Some(" 'admin' ".into()),
        };
        let input = process_user_input(raw, &HtmlSanitizer);
        assert_eq!(input.name, "Tom &amp; Jerry");
        assert_eq!(input.role, "&#039;admin&#039;");
    }
}
