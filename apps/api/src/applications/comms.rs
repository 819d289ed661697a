//! Outreach templates for an application: a call script, an email, and a
//! LinkedIn message. Tone only changes the greeting and the closing line.

use serde::{Deserialize, Serialize};

use crate::models::application::ApplicationRow;

const DEFAULT_CONTACT: &str = "there";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Direct,
    Warm,
    Confident,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommsTemplates {
    pub call_script: String,
    pub email: String,
    pub linkedin_message: String,
}

struct ToneLines {
    greeting: &'static str,
    closing: &'static str,
}

fn tone_lines(tone: Tone) -> ToneLines {
    match tone {
        Tone::Direct => ToneLines {
            greeting: "Hi",
            closing: "Could you share where things stand and what the next step is?",
        },
        Tone::Warm => ToneLines {
            greeting: "Hope you're doing well",
            closing: "I'd really appreciate any update whenever you have a moment. Thank you!",
        },
        Tone::Confident => ToneLines {
            greeting: "Hello",
            closing: "I'm confident I can add value quickly and would welcome the chance to discuss next steps.",
        },
    }
}

pub fn generate_comms(app: &ApplicationRow, tone: Tone) -> CommsTemplates {
    let contact = app
        .contact_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_CONTACT);
    build_templates(&app.company, &app.role, contact, tone)
}

fn build_templates(company: &str, role: &str, contact: &str, tone: Tone) -> CommsTemplates {
    let ToneLines { greeting, closing } = tone_lines(tone);

    let call_script = format!(
        "{greeting} {contact}, this is a quick follow-up on my application for the {role} \
         position at {company}. I'm still very interested in the role. {closing}"
    );

    let email = format!(
        "Subject: Following up on my {role} application\n\n\
         {greeting} {contact},\n\n\
         I recently applied for the {role} position at {company} and wanted to follow up. \
         I'm excited about the team and how my experience could contribute.\n\n\
         {closing}\n\n\
         Best regards"
    );

    let linkedin_message = format!(
        "{greeting} {contact}, I applied for the {role} role at {company} and would love \
         to connect. {closing}"
    );

    CommsTemplates {
        call_script,
        email,
        linkedin_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn app(contact_name: Option<&str>) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: "Acme".into(),
            role: "Product Manager".into(),
            contact_name: contact_name.map(String::from),
            contact_email: None,
            job_url: None,
            status: ApplicationStatus::Applied,
            applied_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            next_step: None,
            next_step_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_interpolates_company_role_contact() {
        let t = generate_comms(&app(Some("Dana")), Tone::Direct);
        for text in [&t.call_script, &t.email, &t.linkedin_message] {
            assert!(text.contains("Acme"));
            assert!(text.contains("Product Manager"));
            assert!(text.contains("Hi Dana"));
        }
    }

    #[test]
    fn test_missing_or_blank_contact_defaults() {
        let t = generate_comms(&app(None), Tone::Warm);
        assert!(t.email.contains("Hope you're doing well there,"));

        let t = generate_comms(&app(Some("  ")), Tone::Confident);
        assert!(t.linkedin_message.starts_with("Hello there,"));
    }

    #[test]
    fn test_tone_changes_only_greeting_and_closing() {
        let direct = generate_comms(&app(Some("Dana")), Tone::Direct);
        let warm = generate_comms(&app(Some("Dana")), Tone::Warm);
        assert_ne!(direct.email, warm.email);

        let strip = |s: &str, tone: Tone| {
            let lines = tone_lines(tone);
            s.replace(lines.greeting, "").replace(lines.closing, "")
        };
        assert_eq!(
            strip(&direct.email, Tone::Direct),
            strip(&warm.email, Tone::Warm)
        );
    }

    #[test]
    fn test_tone_deserializes_snake_case() {
        let tone: Tone = serde_json::from_str("\"confident\"").unwrap();
        assert_eq!(tone, Tone::Confident);
    }
}
