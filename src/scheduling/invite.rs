//! Invitation mail sent to attendees after a meeting is auto-scheduled.
//! Rendered with Handlebars so caller supplied text is HTML escaped.

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::microsoft::models::{
    EmailAddress, ItemBody, MailMessage, NO_JOIN_URL, Recipient, SendMailRequest,
};

pub const DEFAULT_DESCRIPTION: &str = "Meeting scheduled via auto-scheduler.";

const INVITE_TEMPLATE_NAME: &str = "invite";

const INVITE_TEMPLATE: &str = r#"<p>Hi,</p>
<p>You have been invited to a meeting scheduled by the manager.</p>
<p><strong>Subject:</strong> {{subject}}</p>
<p><strong>Description:</strong> {{description}}</p>
<p><strong>Start:</strong> {{start}}</p>
<p><strong>End:</strong> {{end}}</p>
{{#if join_url}}<p><strong>Join URL:</strong> <a href="{{join_url}}">Click here</a></p>{{else}}<p><strong>Join URL:</strong> {{no_join_url}}</p>{{/if}}
<p>Thanks.</p>
"#;

#[derive(Debug, Serialize)]
pub struct Invite<'a> {
    pub subject: &'a str,
    pub description: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub join_url: Option<&'a str>,
}

#[derive(Serialize)]
struct InviteContext<'a> {
    #[serde(flatten)]
    invite: &'a Invite<'a>,
    no_join_url: &'static str,
}

fn templates<'a>() -> Result<Handlebars<'a>> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_template_string(INVITE_TEMPLATE_NAME, INVITE_TEMPLATE)?;
    Ok(registry)
}

pub fn render_invite(invite: &Invite) -> Result<String> {
    let context = InviteContext {
        invite,
        no_join_url: NO_JOIN_URL,
    };
    Ok(templates()?.render(INVITE_TEMPLATE_NAME, &context)?)
}

/// Build the `sendMail` payload notifying every attendee
pub fn invite_mail(invite: &Invite, attendees: &[String]) -> Result<SendMailRequest> {
    Ok(SendMailRequest {
        message: MailMessage {
            subject: format!("📅 Scheduled Meeting: {}", invite.subject),
            body: ItemBody::html(&render_invite(invite)?),
            to_recipients: attendees
                .iter()
                .map(|address| Recipient {
                    email_address: EmailAddress::new(address),
                })
                .collect(),
        },
        save_to_sent_items: true,
    })
}
