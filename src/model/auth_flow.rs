//! Auth UI flow: which of the login/signup surfaces is visible.
//!
//! A single enum instead of independent booleans, so states like "both
//! modals open" or "modal open while signed in" are unrepresentable.

/// Fields of the login form, in focus order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

/// Fields of the signup form, in focus order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupField {
    #[default]
    Email,
    Nickname,
    Password,
}

impl SignupField {
    pub fn next(self) -> Self {
        match self {
            Self::Email => Self::Nickname,
            Self::Nickname => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub focus: SignupField,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Credentials captured when a submission starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Login {
        email: String,
        password: String,
    },
    Signup {
        email: String,
        nickname: String,
        password: String,
    },
}

#[derive(Clone, Debug, Default)]
pub enum AuthFlow {
    #[default]
    SignedOut,
    LoginOpen(LoginForm),
    SignupOpen(SignupForm),
    SignedIn,
}

impl AuthFlow {
    /// Login is the only modal entry point while signed out.
    pub fn open_login(&mut self) {
        if matches!(self, AuthFlow::SignedOut) {
            *self = AuthFlow::LoginOpen(LoginForm::default());
        }
    }

    /// Close the open modal, discarding any form input.
    pub fn close(&mut self) {
        if self.is_modal_open() {
            *self = AuthFlow::SignedOut;
        }
    }

    /// Swap between the login and signup forms. Ignored mid-submission.
    pub fn switch_form(&mut self) {
        match self {
            AuthFlow::LoginOpen(form) if !form.submitting => {
                *self = AuthFlow::SignupOpen(SignupForm::default());
            }
            AuthFlow::SignupOpen(form) if !form.submitting => {
                *self = AuthFlow::LoginOpen(LoginForm::default());
            }
            _ => {}
        }
    }

    pub fn focus_next(&mut self) {
        match self {
            AuthFlow::LoginOpen(form) => form.focus = form.focus.next(),
            AuthFlow::SignupOpen(form) => form.focus = form.focus.next(),
            _ => {}
        }
    }

    pub fn input(&mut self, c: char) {
        match self {
            AuthFlow::LoginOpen(form) if !form.submitting => match form.focus {
                LoginField::Email => form.email.push(c),
                LoginField::Password => form.password.push(c),
            },
            AuthFlow::SignupOpen(form) if !form.submitting => match form.focus {
                SignupField::Email => form.email.push(c),
                SignupField::Nickname => form.nickname.push(c),
                SignupField::Password => form.password.push(c),
            },
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self {
            AuthFlow::LoginOpen(form) if !form.submitting => match form.focus {
                LoginField::Email => {
                    form.email.pop();
                }
                LoginField::Password => {
                    form.password.pop();
                }
            },
            AuthFlow::SignupOpen(form) if !form.submitting => match form.focus {
                SignupField::Email => {
                    form.email.pop();
                }
                SignupField::Nickname => {
                    form.nickname.pop();
                }
                SignupField::Password => {
                    form.password.pop();
                }
            },
            _ => {}
        }
    }

    /// Start a submission if the form is complete and nothing is in flight.
    ///
    /// While one attempt is pending this returns `None`, which is what keeps
    /// re-invoking submit from stacking requests.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        match self {
            AuthFlow::LoginOpen(form) => {
                if form.submitting {
                    return None;
                }
                if form.email.trim().is_empty() || form.password.is_empty() {
                    form.error = Some("Email and password are required.".to_string());
                    return None;
                }
                form.submitting = true;
                form.error = None;
                Some(Submission::Login {
                    email: form.email.trim().to_string(),
                    password: form.password.clone(),
                })
            }
            AuthFlow::SignupOpen(form) => {
                if form.submitting {
                    return None;
                }
                if form.email.trim().is_empty() || form.password.is_empty() {
                    form.error = Some("Email and password are required.".to_string());
                    return None;
                }
                form.submitting = true;
                form.error = None;
                Some(Submission::Signup {
                    email: form.email.trim().to_string(),
                    nickname: form.nickname.trim().to_string(),
                    password: form.password.clone(),
                })
            }
            _ => None,
        }
    }

    /// A successful login closes the modal; the session store itself is
    /// updated by the caller.
    pub fn login_succeeded(&mut self) {
        if matches!(self, AuthFlow::LoginOpen(_)) {
            *self = AuthFlow::SignedIn;
        }
    }

    /// Signup lands back on the login form with the email kept. No
    /// auto-authentication until the backend account contract settles.
    pub fn signup_succeeded(&mut self) {
        if let AuthFlow::SignupOpen(form) = self {
            *self = AuthFlow::LoginOpen(LoginForm {
                email: form.email.clone(),
                ..LoginForm::default()
            });
        }
    }

    /// A rejected submission re-enables the form and keeps the modal open.
    pub fn submit_failed(&mut self, message: String) {
        match self {
            AuthFlow::LoginOpen(form) => {
                form.submitting = false;
                form.error = Some(message);
            }
            AuthFlow::SignupOpen(form) => {
                form.submitting = false;
                form.error = Some(message);
            }
            _ => {}
        }
    }

    pub fn signed_out(&mut self) {
        if matches!(self, AuthFlow::SignedIn) {
            *self = AuthFlow::SignedOut;
        }
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self, AuthFlow::LoginOpen(_) | AuthFlow::SignupOpen(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_login() -> AuthFlow {
        let mut flow = AuthFlow::SignedOut;
        flow.open_login();
        for c in "a@b.com".chars() {
            flow.input(c);
        }
        flow.focus_next();
        flow.input('x');
        flow
    }

    #[test]
    fn login_opens_only_from_signed_out() {
        let mut flow = AuthFlow::SignedOut;
        flow.open_login();
        assert!(matches!(flow, AuthFlow::LoginOpen(_)));

        let mut flow = AuthFlow::SignedIn;
        flow.open_login();
        assert!(matches!(flow, AuthFlow::SignedIn));
    }

    #[test]
    fn close_discards_form_input() {
        let mut flow = filled_login();
        flow.close();
        assert!(matches!(flow, AuthFlow::SignedOut));

        flow.open_login();
        let AuthFlow::LoginOpen(form) = &flow else {
            panic!("expected login form");
        };
        assert!(form.email.is_empty());
        assert!(form.password.is_empty());
    }

    #[test]
    fn switch_cycles_between_login_and_signup() {
        let mut flow = AuthFlow::SignedOut;
        flow.open_login();
        flow.switch_form();
        assert!(matches!(flow, AuthFlow::SignupOpen(_)));
        flow.switch_form();
        assert!(matches!(flow, AuthFlow::LoginOpen(_)));
    }

    #[test]
    fn empty_fields_block_submission() {
        let mut flow = AuthFlow::SignedOut;
        flow.open_login();
        assert_eq!(flow.begin_submit(), None);
        let AuthFlow::LoginOpen(form) = &flow else {
            panic!("modal must stay open");
        };
        assert!(form.error.is_some());
        assert!(!form.submitting);
    }

    #[test]
    fn at_most_one_submission_in_flight() {
        let mut flow = filled_login();
        let first = flow.begin_submit();
        assert_eq!(
            first,
            Some(Submission::Login {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
        );
        // Submit again while pending: no second attempt
        assert_eq!(flow.begin_submit(), None);
    }

    #[test]
    fn successful_login_closes_the_modal() {
        let mut flow = filled_login();
        flow.begin_submit().unwrap();
        flow.login_succeeded();
        assert!(matches!(flow, AuthFlow::SignedIn));
    }

    #[test]
    fn failed_submission_keeps_the_modal_open() {
        let mut flow = filled_login();
        flow.begin_submit().unwrap();
        flow.submit_failed("backend said no".to_string());
        let AuthFlow::LoginOpen(form) = &flow else {
            panic!("modal must stay open");
        };
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("backend said no"));
        assert_eq!(form.email, "a@b.com");
    }

    #[test]
    fn signup_success_returns_to_login_with_email_kept() {
        let mut flow = AuthFlow::SignedOut;
        flow.open_login();
        flow.switch_form();
        for c in "new@user.io".chars() {
            flow.input(c);
        }
        flow.focus_next(); // nickname
        flow.focus_next(); // password
        flow.input('p');
        flow.begin_submit().unwrap();
        flow.signup_succeeded();

        let AuthFlow::LoginOpen(form) = &flow else {
            panic!("expected login form");
        };
        assert_eq!(form.email, "new@user.io");
        assert!(form.password.is_empty());
        assert!(!form.submitting);
    }

    #[test]
    fn logout_returns_to_signed_out() {
        let mut flow = AuthFlow::SignedIn;
        flow.signed_out();
        assert!(matches!(flow, AuthFlow::SignedOut));
    }
}
