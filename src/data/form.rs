//! State of the quiz submission form.

use url::Url;

use crate::backend::{ApiError, JobResult, QuizRequest};

/// An input field of the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Secret,
    Url,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 3] = [FormField::Email, FormField::Secret, FormField::Url];

    pub fn next(self) -> Self {
        match self {
            FormField::Email => FormField::Secret,
            FormField::Secret => FormField::Url,
            FormField::Url => FormField::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Email => FormField::Url,
            FormField::Secret => FormField::Email,
            FormField::Url => FormField::Secret,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Email => "Email",
            FormField::Secret => "Secret Key",
            FormField::Url => "Quiz URL",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Email => "student@example.com",
            FormField::Secret => "Enter your secret key",
            FormField::Url => "https://example.com/quiz",
        }
    }
}

/// Field values, the focused field and the outcome of the last submission.
#[derive(Debug, Clone, Default)]
pub struct QuizForm {
    pub email: String,
    pub secret: String,
    pub url: String,
    pub focused: FormField,
    /// Validation or submission error from the last attempt.
    pub error: Option<String>,
    /// Response to the last successful submission.
    pub result: Option<JobResult>,
}

impl QuizForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            FormField::Secret => &self.secret,
            FormField::Url => &self.url,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Email => &mut self.email,
            FormField::Secret => &mut self.secret,
            FormField::Url => &mut self.url,
        }
    }

    /// Type a character into the focused field.
    pub fn push(&mut self, c: char) {
        let field = self.focused;
        self.value_mut(field).push(c);
    }

    /// Delete the last character of the focused field.
    pub fn pop(&mut self) {
        let field = self.focused;
        self.value_mut(field).pop();
    }

    /// Clear the focused field.
    pub fn clear_focused(&mut self) {
        let field = self.focused;
        self.value_mut(field).clear();
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Clear all three fields.
    pub fn clear_fields(&mut self) {
        self.email.clear();
        self.secret.clear();
        self.url.clear();
        self.focused = FormField::Email;
    }

    /// Check the fields and build the request body.
    ///
    /// Email and URL are trimmed; the secret is sent as typed.
    pub fn validate(&self) -> Result<QuizRequest, String> {
        let email = self.email.trim();
        let url = self.url.trim();

        for field in FormField::ALL {
            let empty = match field {
                FormField::Secret => self.secret.is_empty(),
                FormField::Email => email.is_empty(),
                FormField::Url => url.is_empty(),
            };
            if empty {
                return Err(format!("{} is required", field.label()));
            }
        }

        if !is_valid_email(email) {
            return Err(format!("'{}' is not a valid email address", email));
        }
        if !is_valid_url(url) {
            return Err(format!("'{}' is not a valid URL", url));
        }

        Ok(QuizRequest {
            email: email.to_string(),
            secret: self.secret.clone(),
            url: url.to_string(),
        })
    }

    /// Reset the outcome panels before a new attempt.
    pub fn begin_submit(&mut self) {
        self.error = None;
        self.result = None;
    }

    /// Record the outcome of a submission.
    ///
    /// Fields are cleared only when the backend reports `"ok"`; otherwise
    /// they stay populated for correction.
    pub fn finish(&mut self, outcome: Result<JobResult, ApiError>) {
        match outcome {
            Ok(result) => {
                if result.is_ok() {
                    self.clear_fields();
                }
                self.result = Some(result);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// The result to show in the success panel, if any.
    pub fn success(&self) -> Option<&JobResult> {
        self.result.as_ref().filter(|r| r.is_ok())
    }
}

/// Email syntax check equivalent to an HTML `type="email"` input.
fn is_valid_email(s: &str) -> bool {
    const LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if !local.chars().all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c)) {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// An absolute URL with a host.
fn is_valid_url(s: &str) -> bool {
    Url::parse(s).map(|u| u.has_host()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QuizForm {
        QuizForm {
            email: "student@example.com".to_string(),
            secret: "s3cret".to_string(),
            url: "https://example.com/quiz".to_string(),
            ..Default::default()
        }
    }

    fn job(status: &str) -> JobResult {
        JobResult {
            status: status.to_string(),
            time_taken: 1.23,
            final_answer: serde_json::json!({"answer": 42}),
            steps: vec![serde_json::json!({"step": "load"})],
            final_url: None,
            quizzes_solved: None,
            chain_complete: None,
            message: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        let request = filled().validate().unwrap();
        assert_eq!(request.email, "student@example.com");
        assert_eq!(request.secret, "s3cret");
        assert_eq!(request.url, "https://example.com/quiz");
    }

    #[test]
    fn test_validate_trims_email_and_url() {
        let mut form = filled();
        form.email = "  student@example.com ".to_string();
        form.url = " https://example.com/quiz\t".to_string();
        let request = form.validate().unwrap();
        assert_eq!(request.email, "student@example.com");
        assert_eq!(request.url, "https://example.com/quiz");
    }

    #[test]
    fn test_validate_required_fields() {
        let mut form = filled();
        form.secret.clear();
        assert_eq!(form.validate().unwrap_err(), "Secret Key is required");

        let form = QuizForm::new();
        assert_eq!(form.validate().unwrap_err(), "Email is required");
    }

    #[test]
    fn test_validate_email_format() {
        for bad in ["student", "@example.com", "student@", "stu dent@example.com", "a@b..c", "a@-b.com"] {
            let mut form = filled();
            form.email = bad.to_string();
            assert!(form.validate().is_err(), "accepted {}", bad);
        }
        for good in ["a@localhost", "first.last+tag@sub.example.co"] {
            let mut form = filled();
            form.email = good.to_string();
            assert!(form.validate().is_ok(), "rejected {}", good);
        }
    }

    #[test]
    fn test_validate_url_format() {
        let mut form = filled();
        form.url = "example.com/quiz".to_string();
        assert!(form.validate().is_err());

        form.url = "http://localhost:5000/quiz?id=1".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_typing_into_focused_field() {
        let mut form = QuizForm::new();
        for c in "me@x.io".chars() {
            form.push(c);
        }
        form.focus_next();
        form.push('k');
        form.pop();
        form.push('p');
        assert_eq!(form.email, "me@x.io");
        assert_eq!(form.secret, "p");
        assert_eq!(form.focused, FormField::Secret);
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focused, FormField::Url);
    }

    #[test]
    fn test_finish_ok_clears_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish(Ok(job("ok")));
        assert!(form.email.is_empty());
        assert!(form.secret.is_empty());
        assert!(form.url.is_empty());
        assert_eq!(form.success().unwrap().time_taken, 1.23);
    }

    #[test]
    fn test_finish_non_ok_keeps_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish(Ok(job("error")));
        assert_eq!(form.email, "student@example.com");
        assert_eq!(form.secret, "s3cret");
        assert_eq!(form.url, "https://example.com/quiz");
        assert!(form.success().is_none());
        assert!(form.error.is_none());
    }

    #[test]
    fn test_finish_error_keeps_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish(Err(ApiError::Backend {
            status: 403,
            detail: "invalid secret".to_string(),
        }));
        assert_eq!(form.error.as_deref(), Some("invalid secret"));
        assert_eq!(form.email, "student@example.com");
    }

    #[test]
    fn test_begin_submit_clears_outcome() {
        let mut form = filled();
        form.error = Some("old".to_string());
        form.result = Some(job("ok"));
        form.begin_submit();
        assert!(form.error.is_none());
        assert!(form.result.is_none());
    }
}
