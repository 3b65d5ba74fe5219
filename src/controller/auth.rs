//! Auth submission lifecycle (login, signup, logout)

use super::AppController;
use crate::auth;
use crate::model::Submission;

impl AppController {
    /// Account key: open the login modal when signed out, log out otherwise.
    pub async fn handle_account_key(&self) {
        let model = self.model.lock().await;
        if model.is_signed_in() {
            model.logout().await;
        } else {
            model.open_login_modal().await;
        }
    }

    /// Run a submission claimed by `begin_auth_submit` to completion.
    pub async fn submit_auth(&self, submission: Submission) {
        match submission {
            Submission::Login { email, password } => match auth::login(&email, &password).await {
                Ok(user) => {
                    tracing::info!(nickname = %user.nickname, "login succeeded");
                    let model = self.model.lock().await;
                    model.auth_login_succeeded(user).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    let model = self.model.lock().await;
                    model.auth_submit_failed(e.to_string()).await;
                }
            },
            Submission::Signup {
                email,
                nickname,
                password,
            } => match auth::signup(&email, &nickname, &password).await {
                Ok(()) => {
                    tracing::info!(email, "signup succeeded");
                    let model = self.model.lock().await;
                    model.auth_signup_succeeded().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "signup failed");
                    let model = self.model.lock().await;
                    model.auth_submit_failed(e.to_string()).await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;
    use crate::config::Config;
    use crate::model::{ApiClient, AppModel, AuthFlow, Session};

    fn test_model() -> Arc<Mutex<AppModel>> {
        let config = Config {
            api_key: "test-key".to_string(),
            server_url: "http://api.local".to_string(),
            provider_url: "http://provider.local".to_string(),
        };
        let api = ApiClient::new(&config).unwrap();
        Arc::new(Mutex::new(AppModel::new(api)))
    }

    async fn type_into(model: &Arc<Mutex<AppModel>>, text: &str) {
        let m = model.lock().await;
        for c in text.chars() {
            m.auth_input(c).await;
        }
    }

    #[tokio::test]
    async fn login_submission_signs_in_with_derived_nickname() {
        let model = test_model();
        let controller = AppController::new(model.clone());

        model.lock().await.open_login_modal().await;
        type_into(&model, "a@b.com").await;
        model.lock().await.auth_focus_next().await;
        type_into(&model, "x").await;

        let submission = model
            .lock()
            .await
            .begin_auth_submit()
            .await
            .expect("submission starts");
        controller.submit_auth(submission).await;

        let m = model.lock().await;
        let Session::SignedIn(user) = m.session_snapshot() else {
            panic!("expected a signed-in session");
        };
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.nickname, "a");
        assert!(!m.is_auth_modal_open().await);
        assert!(matches!(m.get_auth_flow().await, AuthFlow::SignedIn));
    }

    #[tokio::test]
    async fn signup_submission_returns_to_login_without_a_session() {
        let model = test_model();
        let controller = AppController::new(model.clone());

        {
            let m = model.lock().await;
            m.open_login_modal().await;
            m.switch_auth_form().await;
        }
        type_into(&model, "new@user.io").await;
        {
            let m = model.lock().await;
            m.auth_focus_next().await; // nickname
            m.auth_focus_next().await; // password
        }
        type_into(&model, "pw").await;

        let submission = model
            .lock()
            .await
            .begin_auth_submit()
            .await
            .expect("submission starts");
        controller.submit_auth(submission).await;

        let m = model.lock().await;
        assert_eq!(m.session_snapshot(), Session::SignedOut);
        let AuthFlow::LoginOpen(form) = m.get_auth_flow().await else {
            panic!("expected the login form");
        };
        assert_eq!(form.email, "new@user.io");
        assert!(!form.submitting);
    }

    #[tokio::test]
    async fn account_key_toggles_between_login_modal_and_logout() {
        let model = test_model();
        let controller = AppController::new(model.clone());

        controller.handle_account_key().await;
        assert!(model.lock().await.is_auth_modal_open().await);

        // Close without submitting: session untouched
        model.lock().await.close_auth_modal().await;
        assert_eq!(model.lock().await.session_snapshot(), Session::SignedOut);

        // Sign in, then the same key logs out
        model.lock().await.open_login_modal().await;
        type_into(&model, "a@b.com").await;
        model.lock().await.auth_focus_next().await;
        type_into(&model, "x").await;
        let submission = model.lock().await.begin_auth_submit().await.unwrap();
        controller.submit_auth(submission).await;
        assert!(model.lock().await.is_signed_in());

        controller.handle_account_key().await;
        let m = model.lock().await;
        assert_eq!(m.session_snapshot(), Session::SignedOut);
        assert!(matches!(m.get_auth_flow().await, AuthFlow::SignedOut));
    }
}
