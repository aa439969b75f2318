//! Response composition.
//!
//! Turns a [`Resolution`] into the ordered, timed messages shown to the visitor. Offsets
//! are relative to the start of the turn; pacing them out is the caller's job.

use serde::Serialize;
use std::time::Duration;

use crate::brain::Resolution;
use crate::knowledge::{FaqEntry, ProgrammeEntry};

/// Questions offered as quick-reply buttons.
pub const QUICK_QUESTIONS: &[&str] = &[
    "How do I apply?",
    "What programmes do you offer?",
    "What are the fees?",
    "Do you offer online learning?",
    "What certifications are included?",
    "Where are you located?",
];

const ADMISSIONS_KEYWORDS: &[&str] = &["admission", "apply", "enroll"];
const PROGRAMME_KEYWORDS: &[&str] = &["programme", "course", "diploma", "certificate"];
const FEE_KEYWORDS: &[&str] = &["fee", "cost", "price"];

/// Follow-up tip category of a matched FAQ entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Admissions,
    Programmes,
    Fees,
    None,
}

impl ResponseCategory {
    /// First category, in admissions → programmes → fees order, whose list contains one of
    /// the entry's keywords.
    pub fn classify(entry: &FaqEntry) -> Self {
        let has_any = |list: &[&str]| {
            entry
                .keywords
                .iter()
                .any(|k| list.contains(&k.to_lowercase().as_str()))
        };

        if has_any(ADMISSIONS_KEYWORDS) {
            ResponseCategory::Admissions
        } else if has_any(PROGRAMME_KEYWORDS) {
            ResponseCategory::Programmes
        } else if has_any(FEE_KEYWORDS) {
            ResponseCategory::Fees
        } else {
            ResponseCategory::None
        }
    }
}

/// Something to display in the chat window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    Text(String),
    QuickReplies(Vec<String>),
}

impl MessageBody {
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageBody::Text(t) => Some(t),
            MessageBody::QuickReplies(_) => None,
        }
    }
}

/// A bot message and when to show it, relative to the start of the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledMessage {
    pub offset: Duration,
    pub body: MessageBody,
}

/// Reply pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTiming {
    /// Simulated typing delay before the first message.
    pub typing: Duration,
    /// Gap before a follow-up tip.
    pub tip: Duration,
    /// Spacing between the parts of a multi-message reply.
    pub step: Duration,
}

impl Default for ResponseTiming {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(500),
            tip: Duration::from_millis(1000),
            step: Duration::from_millis(800),
        }
    }
}

/// Contact details quoted in replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            phone: "+232 79 422 442".to_string(),
            email: "admission@kns.edu.sl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseComposer {
    timing: ResponseTiming,
    contact: ContactDetails,
}

impl ResponseComposer {
    pub fn new(timing: ResponseTiming) -> Self {
        Self {
            timing,
            contact: ContactDetails::default(),
        }
    }

    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact = contact;
        self
    }

    /// Opening greeting followed by the quick-reply buttons.
    pub fn welcome(&self) -> Vec<ScheduledMessage> {
        vec![
            self.at(
                Duration::ZERO,
                "Hello! I'm here to help answer your questions about KNS College. What would you like to know?",
            ),
            ScheduledMessage {
                offset: Duration::ZERO,
                body: quick_replies(),
            },
        ]
    }

    pub fn compose(&self, resolution: &Resolution<'_>) -> Vec<ScheduledMessage> {
        match resolution {
            Resolution::Programme { entry } => self.programme(entry),
            Resolution::ProgrammeNotFound { query } => self.programme_not_found(query),
            Resolution::Faq { entry } => self.faq(entry),
            Resolution::NoMatch => self.no_match(),
        }
    }

    fn programme(&self, entry: &ProgrammeEntry) -> Vec<ScheduledMessage> {
        let first = self.timing.typing;
        vec![
            self.at(
                first,
                format!(
                    "Yes! We offer {}. This is a {} with a duration of {} and available in {} mode. Would you like more details about this programme?",
                    entry.name,
                    entry.programme_type.display_label(),
                    entry.duration,
                    entry.mode
                ),
            ),
            self.at(
                first + self.timing.tip,
                format!(
                    "💡 You can visit our programmes page or contact us at {} for detailed information about {}.",
                    self.contact.phone, entry.name
                ),
            ),
        ]
    }

    fn programme_not_found(&self, query: &str) -> Vec<ScheduledMessage> {
        let first = self.timing.typing;
        let step = self.timing.step;
        vec![
            self.at(
                first,
                format!(
                    "I couldn't find a course matching \"{}\" in our current offerings.",
                    query
                ),
            ),
            self.at(
                first + step,
                "We offer Diploma programmes in: Cybersecurity, Telecommunications, Computing & Networking, IT with Business Management, Software Development, Project Management, Enterprise & Small Business, and Applied Computerised Accounting.",
            ),
            self.at(
                first + step * 2,
                "We also offer Certificate programmes in: Digital Marketing, Data Analyst, Front End/Back End/Full Stack Web Development, AI courses, Microsoft certifications, Cisco certifications, and Autodesk courses.",
            ),
            self.at(
                first + step * 3,
                format!(
                    "For a complete list, please visit our programmes page or contact us at {}.",
                    self.contact.phone
                ),
            ),
        ]
    }

    fn faq(&self, entry: &FaqEntry) -> Vec<ScheduledMessage> {
        let first = self.timing.typing;
        let mut messages = vec![self.at(first, entry.answer.clone())];
        if let Some(tip) = self.tip(ResponseCategory::classify(entry)) {
            messages.push(self.at(first + self.timing.tip, tip));
        }
        messages
    }

    fn tip(&self, category: ResponseCategory) -> Option<String> {
        match category {
            ResponseCategory::Admissions => Some(format!(
                "💡 Tip: You can also visit our Admissions page or contact us directly at {} for personalized assistance with your application.",
                self.contact.phone
            )),
            ResponseCategory::Programmes => Some(
                "💡 Tip: Visit our programmes page to see detailed information about all available programmes, including duration, certifications, and learning modes."
                    .to_string(),
            ),
            ResponseCategory::Fees => Some(format!(
                "💡 Tip: For detailed fee information for your specific programme, please contact our admissions office at {} or {}.",
                self.contact.email, self.contact.phone
            )),
            ResponseCategory::None => None,
        }
    }

    fn no_match(&self) -> Vec<ScheduledMessage> {
        let first = self.timing.typing;
        let step = self.timing.step;
        vec![
            self.at(
                first,
                "I'm sorry, I couldn't find a specific answer to that question. Here are some topics I can help with:",
            ),
            self.at(
                first + step,
                "• Admissions and how to apply\n• Available programmes and courses\n• Fees and payment options\n• Online learning options\n• Certifications included\n• Contact information and location",
            ),
            self.at(
                first + step * 2,
                format!(
                    "For more detailed assistance, please contact us:\n📞 Phone/WhatsApp: {}\n📧 Email: {}\n\nOr try rephrasing your question!",
                    self.contact.phone, self.contact.email
                ),
            ),
            ScheduledMessage {
                offset: first + step * 3,
                body: quick_replies(),
            },
        ]
    }

    fn at(&self, offset: Duration, text: impl Into<String>) -> ScheduledMessage {
        ScheduledMessage {
            offset,
            body: MessageBody::Text(text.into()),
        }
    }
}

fn quick_replies() -> MessageBody {
    MessageBody::QuickReplies(QUICK_QUESTIONS.iter().map(|q| q.to_string()).collect())
}
