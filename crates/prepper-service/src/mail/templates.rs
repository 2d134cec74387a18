//! HTML e-mail templates in Danish and English.

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::language::Language;

const BASE_STYLES: &str = "\
body { font-family: 'Space Grotesk', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background-color: #FAFAF8; color: #000000; margin: 0; padding: 0; }
.container { max-width: 600px; margin: 0 auto; padding: 40px 20px; }
.card { background-color: #FAFAF8; padding: 32px; border: 3px solid #000000; box-shadow: 6px 6px 0px 0px #000000; }
.logo { text-align: center; margin-bottom: 24px; }
.logo img { width: 64px; height: 64px; border: 2px solid #000000; box-shadow: 4px 4px 0px 0px #000000; }
.logo-text { font-size: 24px; font-weight: bold; margin-top: 12px; }
h1 { font-size: 24px; margin: 0 0 16px 0; text-align: center; font-weight: bold; }
p { font-size: 16px; line-height: 1.6; margin: 0 0 16px 0; }
.highlight { color: #F97316; font-weight: 700; }
.button { display: inline-block; background-color: #F97316; color: #000000 !important; text-decoration: none; padding: 14px 28px; font-weight: 700; font-size: 16px; margin: 24px 0; border: 3px solid #000000; box-shadow: 4px 4px 0px 0px #000000; }
.button-container { text-align: center; }
.footer { text-align: center; margin-top: 32px; padding-top: 24px; border-top: 2px solid #000000; }
.footer p { color: #666666; font-size: 14px; margin: 0; }
.link { color: #F97316; text-decoration: none; font-weight: 600; }
.expiry-note { background-color: #FEF3C7; border: 2px solid #000000; border-left: 6px solid #F97316; padding: 12px 16px; margin: 16px 0; }
.expiry-note p { font-size: 14px; margin: 0; }
.muted { font-size: 14px; color: #666666; }
";

const DANISH_MONTHS: [&str; 12] = [
    "januar", "februar", "marts", "april", "maj", "juni", "juli", "august", "september",
    "oktober", "november", "december",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Subject and body of a rendered e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    /// Subject line.
    pub subject: String,
    /// Complete HTML document.
    pub html: String,
}

/// Data for a stash invitation e-mail.
#[derive(Debug, Clone)]
pub struct InvitationEmail<'a> {
    pub stash_name: &'a str,
    pub inviter_name: &'a str,
    pub inviter_email: &'a str,
    pub invitation_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub language: Language,
}

/// Data for a password reset e-mail.
#[derive(Debug, Clone)]
pub struct PasswordResetEmail<'a> {
    pub user_name: &'a str,
    pub reset_token: &'a str,
    pub expires_at: DateTime<Utc>,
    pub language: Language,
}

impl InvitationEmail<'_> {
    /// Render the invitation with an accept link under `app_url`.
    pub fn render(&self, app_url: &str) -> EmailContent {
        let app_name = self.language.app_name();
        let accept_url = format!("{app_url}/accept-invitation?id={}", self.invitation_id);
        let expiry = format_date(self.expires_at, self.language);
        let stash = escape_html(self.stash_name);
        let inviter = escape_html(self.inviter_name);
        let inviter_email = escape_html(self.inviter_email);

        let (subject, content) = match self.language {
            Language::Da => (
                format!("Du er blevet inviteret til \"{}\" på {app_name}", self.stash_name),
                format!(
                    "<h1>Du er inviteret!</h1>\
                     <p><span class=\"highlight\">{inviter}</span> ({inviter_email}) har inviteret dig til at deltage i deres forråd <span class=\"highlight\">\"{stash}\"</span> på {app_name}.</p>\
                     <p>Som medlem kan du se, tilføje og administrere varer i dette delte forråd.</p>\
                     <div class=\"button-container\"><a href=\"{accept_url}\" class=\"button\">Accepter invitation</a></div>\
                     <div class=\"expiry-note\"><p>Denne invitation udløber den {expiry}</p></div>\
                     <p class=\"muted\">Hvis du ikke forventede denne invitation, kan du ignorere denne email.</p>"
                ),
            ),
            Language::En => (
                format!("You've been invited to \"{}\" on {app_name}", self.stash_name),
                format!(
                    "<h1>You're Invited!</h1>\
                     <p><span class=\"highlight\">{inviter}</span> ({inviter_email}) has invited you to join their stash <span class=\"highlight\">\"{stash}\"</span> on {app_name}.</p>\
                     <p>As a member, you'll be able to view, add, and manage items in this shared stash.</p>\
                     <div class=\"button-container\"><a href=\"{accept_url}\" class=\"button\">Accept Invitation</a></div>\
                     <div class=\"expiry-note\"><p>This invitation expires on {expiry}</p></div>\
                     <p class=\"muted\">If you weren't expecting this invitation, you can safely ignore this email.</p>"
                ),
            ),
        };

        EmailContent {
            subject,
            html: layout(&content, self.language, app_url),
        }
    }
}

impl PasswordResetEmail<'_> {
    /// Render the reset message with a link under `app_url`.
    pub fn render(&self, app_url: &str) -> EmailContent {
        let app_name = self.language.app_name();
        let reset_url = format!("{app_url}/reset-password?token={}", self.reset_token);
        let expiry = self.expires_at.format("%H:%M UTC");
        let user = escape_html(self.user_name);

        let (subject, content) = match self.language {
            Language::Da => (
                format!("Nulstil din adgangskode - {app_name}"),
                format!(
                    "<h1>Nulstil adgangskode</h1>\
                     <p>Hej <span class=\"highlight\">{user}</span>,</p>\
                     <p>Vi modtog en anmodning om at nulstille adgangskoden til din {app_name}-konto.</p>\
                     <div class=\"button-container\"><a href=\"{reset_url}\" class=\"button\">Nulstil adgangskode</a></div>\
                     <div class=\"expiry-note\"><p>Dette link udløber kl. {expiry} (om 1 time)</p></div>\
                     <p class=\"muted\">Hvis du ikke anmodede om denne nulstilling, kan du ignorere denne email. Din adgangskode forbliver uændret.</p>"
                ),
            ),
            Language::En => (
                format!("Reset your password - {app_name}"),
                format!(
                    "<h1>Reset Password</h1>\
                     <p>Hi <span class=\"highlight\">{user}</span>,</p>\
                     <p>We received a request to reset the password for your {app_name} account.</p>\
                     <div class=\"button-container\"><a href=\"{reset_url}\" class=\"button\">Reset Password</a></div>\
                     <div class=\"expiry-note\"><p>This link expires at {expiry} (in 1 hour)</p></div>\
                     <p class=\"muted\">If you didn't request this reset, you can safely ignore this email. Your password will remain unchanged.</p>"
                ),
            ),
        };

        EmailContent {
            subject,
            html: layout(&content, self.language, app_url),
        }
    }
}

fn layout(content: &str, language: Language, app_url: &str) -> String {
    let app_name = language.app_name();
    let footer = match language {
        Language::Da => format!("Denne email blev sendt af {app_name}"),
        Language::En => format!("This email was sent by {app_name}"),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <style>{BASE_STYLES}</style>\n</head>\n<body>\n\
         <div class=\"container\"><div class=\"card\">\
         <div class=\"logo\"><img src=\"{app_url}/icon.png\" alt=\"{app_name}\" /><div class=\"logo-text\">{app_name}</div></div>\
         {content}</div>\
         <div class=\"footer\"><p>{footer}</p><p><a href=\"{app_url}\" class=\"link\">{app_url}</a></p></div>\
         </div>\n</body>\n</html>\n"
    )
}

fn format_date(date: DateTime<Utc>, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::Da => format!("{}. {} {}", date.day(), DANISH_MONTHS[month], date.year()),
        Language::En => format!("{} {}, {}", ENGLISH_MONTHS[month], date.day(), date.year()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn invitation(language: Language) -> InvitationEmail<'static> {
        InvitationEmail {
            stash_name: "Sommerhus",
            inviter_name: "Anna",
            inviter_email: "anna@example.com",
            invitation_id: Uuid::nil(),
            expires_at: Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
            language,
        }
    }

    #[test]
    fn test_invitation_danish() {
        let email = invitation(Language::Da).render("https://prep.example");
        assert_eq!(
            email.subject,
            "Du er blevet inviteret til \"Sommerhus\" på Prepperhjælper"
        );
        assert!(email.html.contains("15. juni 2025"));
        assert!(email.html.contains(
            "https://prep.example/accept-invitation?id=00000000-0000-0000-0000-000000000000"
        ));
    }

    #[test]
    fn test_invitation_english() {
        let email = invitation(Language::En).render("https://prep.example");
        assert!(email.subject.starts_with("You've been invited to"));
        assert!(email.html.contains("June 15, 2025"));
        assert!(email.html.contains("This email was sent by Prepper Helper"));
    }

    #[test]
    fn test_reset_link_contains_token() {
        let email = PasswordResetEmail {
            user_name: "Bo",
            reset_token: "abc123",
            expires_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap(),
            language: Language::En,
        }
        .render("https://prep.example");
        assert_eq!(email.subject, "Reset your password - Prepper Helper");
        assert!(email.html.contains("https://prep.example/reset-password?token=abc123"));
        assert!(email.html.contains("10:30 UTC"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut data = invitation(Language::En);
        data.stash_name = "<script>";
        let email = data.render("https://prep.example");
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(!email.html.contains("<script>"));
    }
}
