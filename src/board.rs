use crate::{
    endpoints::{self, EndpointError},
    message::MessageArea,
    session::SessionManager,
    view::{render, BoardView},
};
use reqwest::Client;
use url::Url;

/// Fetches the activity roster and carries out signups and removals,
/// consulting the [`SessionManager`] for who is logged in and what they get
/// to see.
///
/// Hiding the removal controls from non-teachers is purely cosmetic; the
/// server makes the real authorization decision on every mutation.
#[derive(Debug)]
pub struct ActivityBoard {
    client: Client,
    base: Url,
}

impl ActivityBoard {
    pub fn new(client: Client, base: Url) -> ActivityBoard {
        ActivityBoard { client, base }
    }

    /// Fetch a fresh snapshot and render the whole board from scratch.
    ///
    /// Fetch failures never bubble up; they come back as an inline error
    /// line in place of the list.
    pub async fn fetch_and_render(&self, session: &SessionManager) -> String {
        match endpoints::get_activities(&self.client, &self.base).await {
            Ok(activities) => {
                render(&BoardView::project(&activities, session.current_user()))
            },
            Err(e) => format!("Failed to load activities: {}", e),
        }
    }

    /// Enroll a student, then re-fetch and re-render.
    ///
    /// Returns the fresh rendering when the enrollment went through, and
    /// `None` when it was aborted or rejected, with the outcome reported
    /// through `messages` either way. The client-side guards here are UX
    /// only and never replace the server's own checks.
    pub async fn signup(
        &self,
        session: &SessionManager,
        messages: &mut MessageArea,
        activity: &str,
        email: &str,
    ) -> Option<String> {
        let token = match session.token() {
            Some(token) => token,
            None => {
                messages.error(
                    "You must be logged in as a teacher to enroll students",
                );
                return None;
            },
        };

        if activity.is_empty() {
            messages.error("Please select an activity");
            return None;
        }

        match endpoints::signup(&self.client, &self.base, token, activity, email)
            .await
        {
            Ok(()) => {
                messages.success("Student signed up successfully!");
                Some(self.fetch_and_render(session).await)
            },
            Err(EndpointError::Rejected(rejection)) => {
                messages.error(rejection.detail_or("Failed to sign up"));
                None
            },
            Err(e) => {
                messages.error(format!("Error: {}", e));
                None
            },
        }
    }

    /// Remove a student after asking for confirmation, then re-fetch and
    /// re-render.
    ///
    /// `confirm` is handed the question to put to the user and blocks until
    /// they answer; declining makes no server call at all.
    pub async fn unregister(
        &self,
        session: &SessionManager,
        messages: &mut MessageArea,
        activity: &str,
        email: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<String> {
        let token = match session.token() {
            Some(token) => token,
            None => {
                messages
                    .error("You must be logged in to remove participants");
                return None;
            },
        };

        if activity.is_empty() {
            messages.error("Please select an activity");
            return None;
        }

        let question = format!("Remove {} from {}?", email, activity);
        if !confirm(&question) {
            return None;
        }

        match endpoints::unregister(
            &self.client,
            &self.base,
            token,
            activity,
            email,
        )
        .await
        {
            Ok(()) => {
                messages.success("Student removed successfully");
                Some(self.fetch_and_render(session).await)
            },
            Err(EndpointError::Rejected(rejection)) => {
                messages.error(rejection.detail_or("Failed to remove student"));
                None
            },
            Err(e) => {
                messages.error(format!("Error: {}", e));
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::TokenStore;

    // an address nothing listens on; the guards under test must return
    // before any request is attempted
    fn unreachable_board() -> ActivityBoard {
        ActivityBoard::new(
            Client::new(),
            Url::parse("http://127.0.0.1:1/").unwrap(),
        )
    }

    fn logged_out_session(dir: &tempfile::TempDir) -> SessionManager {
        SessionManager::new(TokenStore::new(dir.path().join("auth-token")))
    }

    #[tokio::test]
    async fn signup_without_a_session_is_stopped_before_the_network() {
        let temp = tempfile::tempdir().unwrap();
        let board = unreachable_board();
        let session = logged_out_session(&temp);
        let mut messages = MessageArea::new();

        let outcome = board
            .signup(&session, &mut messages, "Chess Club", "a@x.com")
            .await;

        assert!(outcome.is_none());
        assert_eq!(
            messages.current().map(|m| m.text.as_str()),
            Some("You must be logged in as a teacher to enroll students")
        );
    }

    #[tokio::test]
    async fn signup_needs_an_activity_to_be_picked() {
        let temp = tempfile::tempdir().unwrap();
        let board = unreachable_board();
        let mut session = logged_out_session(&temp);
        force_login(&mut session);
        let mut messages = MessageArea::new();

        let outcome =
            board.signup(&session, &mut messages, "", "a@x.com").await;

        assert!(outcome.is_none());
        assert_eq!(
            messages.current().map(|m| m.text.as_str()),
            Some("Please select an activity")
        );
    }

    #[tokio::test]
    async fn unregister_without_a_session_is_stopped_before_confirmation() {
        let temp = tempfile::tempdir().unwrap();
        let board = unreachable_board();
        let session = logged_out_session(&temp);
        let mut messages = MessageArea::new();

        let outcome = board
            .unregister(&session, &mut messages, "Chess Club", "a@x.com", |_| {
                panic!("the confirmation prompt should never be reached")
            })
            .await;

        assert!(outcome.is_none());
        assert_eq!(
            messages.current().map(|m| m.text.as_str()),
            Some("You must be logged in to remove participants")
        );
    }

    #[tokio::test]
    async fn unregister_needs_an_activity_to_be_picked() {
        let temp = tempfile::tempdir().unwrap();
        let board = unreachable_board();
        let mut session = logged_out_session(&temp);
        force_login(&mut session);
        let mut messages = MessageArea::new();

        let outcome = board
            .unregister(&session, &mut messages, "", "a@x.com", |_| {
                panic!("the confirmation prompt should never be reached")
            })
            .await;

        assert!(outcome.is_none());
        assert_eq!(
            messages.current().map(|m| m.text.as_str()),
            Some("Please select an activity")
        );
    }

    #[tokio::test]
    async fn declining_the_confirmation_makes_no_call_and_no_message() {
        let temp = tempfile::tempdir().unwrap();
        let board = unreachable_board();
        let mut session = logged_out_session(&temp);
        force_login(&mut session);
        let mut messages = MessageArea::new();
        let mut asked = None;

        let outcome = board
            .unregister(
                &session,
                &mut messages,
                "Chess Club",
                "a@x.com",
                |question| {
                    asked = Some(question.to_string());
                    false
                },
            )
            .await;

        assert!(outcome.is_none());
        assert_eq!(asked.as_deref(), Some("Remove a@x.com from Chess Club?"));
        assert!(messages.current().is_none());
    }

    // gives the manager a session without going through the network
    fn force_login(session: &mut SessionManager) {
        use crate::{Role, Session, User};

        session.set_session(Session {
            token: String::from("test-token"),
            user: User {
                username: String::from("mrs.frizzle"),
                role: Role::Teacher,
            },
        });
    }
}
