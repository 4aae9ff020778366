//! Contact form (demo).
//!
//! Validation happens entirely on the page; nothing is sent anywhere. A
//! successful submit only shows a confirmation and clears the form.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ContactField, ValidationError};
use crate::events::Event;
use crate::page::{ids, Page};

/// Current values of the form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub department: String,
    pub subject: String,
    pub message: String,
    pub consent: bool,
}

impl ContactFormInput {
    /// Required fields that are blank after trimming, plus consent if
    /// unchecked, in form order.
    pub fn missing_fields(&self) -> Vec<ContactField> {
        let fields = [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Department, &self.department),
            (ContactField::Subject, &self.subject),
            (ContactField::Message, &self.message),
        ];
        let mut missing: Vec<_> = fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if !self.consent {
            missing.push(ContactField::Consent);
        }
        missing
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::IncompleteForm { missing })
        }
    }
}

/// How the confirmation is scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub smooth: bool,
    pub centered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    input: ContactFormInput,
    /// Confirmation text; `None` while the status element is hidden.
    status: Option<String>,
    scroll: Option<ScrollRequest>,
}

impl ContactForm {
    pub fn mount(page: &Page) -> Option<Self> {
        if !page.has_all(&[ids::CONTACT_FORM, ids::FORM_STATUS]) {
            return None;
        }
        Some(Self::default())
    }

    pub fn input(&self) -> &ContactFormInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ContactFormInput {
        &mut self.input
    }

    pub fn fill(&mut self, input: ContactFormInput) {
        self.input = input;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Scroll requested by the last successful submit, taken once.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll.take()
    }

    /// Form submit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteForm`] when a field is blank or
    /// consent is unchecked; its message is the alert shown to the visitor.
    /// The form is left exactly as it was.
    pub fn submit(&mut self) -> Result<Event, ValidationError> {
        if let Err(err) = self.input.validate() {
            debug!(error = ?err, "contact form rejected");
            return Err(err);
        }

        let status = format!(
            "Thanks, {}. Your message to {} was received.",
            self.input.name.trim(),
            self.input.department.trim()
        );
        info!(department = %self.input.department.trim(), "contact form confirmed");
        self.status = Some(status.clone());
        self.input = ContactFormInput::default();
        self.scroll = Some(ScrollRequest {
            smooth: true,
            centered: true,
        });
        Ok(Event::ContactConfirmed { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageKind;

    fn filled() -> ContactFormInput {
        ContactFormInput {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            department: "Sales".into(),
            subject: "Demo".into(),
            message: "Hello there".into(),
            consent: true,
        }
    }

    fn form() -> ContactForm {
        ContactForm::mount(&Page::builtin(PageKind::Contact, &[])).unwrap()
    }

    #[test]
    fn valid_submit_confirms_and_resets() {
        let mut f = form();
        f.fill(filled());
        let event = f.submit().unwrap();
        assert_eq!(
            f.status(),
            Some("Thanks, Ada. Your message to Sales was received.")
        );
        assert!(matches!(event, Event::ContactConfirmed { .. }));
        assert_eq!(f.input(), &ContactFormInput::default());
        assert_eq!(
            f.take_scroll_request(),
            Some(ScrollRequest {
                smooth: true,
                centered: true
            })
        );
        assert!(f.take_scroll_request().is_none());
    }

    #[test]
    fn missing_consent_blocks_submit() {
        let mut f = form();
        let mut input = filled();
        input.consent = false;
        f.fill(input.clone());
        let err = f.submit().unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteForm {
                missing: vec![ContactField::Consent]
            }
        );
        assert!(f.status().is_none());
        assert_eq!(f.input(), &input);
    }

    #[test]
    fn whitespace_only_field_counts_as_missing() {
        let mut input = filled();
        input.subject = "   ".into();
        input.email.clear();
        assert_eq!(
            input.missing_fields(),
            vec![ContactField::Email, ContactField::Subject]
        );
    }

    #[test]
    fn not_mounted_without_status_element() {
        let page = Page::new("contact").with_elements([ids::CONTACT_FORM]);
        assert!(ContactForm::mount(&page).is_none());
    }
}
