//! Per-request page context: the signed-in visitor and their queued notices.

use url::form_urlencoded;

use crate::domain::{Error, User};

use super::session::{Flash, SessionContext};
use super::state::HttpState;
use super::views::Chrome;

/// Everything the page chrome needs about the current visitor.
#[derive(Debug, Default)]
pub struct PageContext {
    pub user: Option<User>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Resolve the session user and drain queued notices.
    ///
    /// A session pointing at a user that no longer exists is treated as
    /// anonymous.
    pub async fn load(state: &HttpState, session: &SessionContext) -> Result<Self, Error> {
        let user = match session.user_id()? {
            Some(id) => state.profile.fetch_profile(&id).await?,
            None => None,
        };
        let flashes = session.take_flashes()?;
        Ok(Self { user, flashes })
    }

    /// Resolve only the session user, leaving notices queued.
    pub async fn current_user(
        state: &HttpState,
        session: &SessionContext,
    ) -> Result<Option<User>, Error> {
        match session.user_id()? {
            Some(id) => state.profile.fetch_profile(&id).await,
            None => Ok(None),
        }
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Chrome borrowing this context.
    pub fn chrome<'a>(&'a self, state: &'a HttpState) -> Chrome<'a> {
        Chrome {
            app_name: &state.site.app_name,
            user: self.user.as_ref(),
            flashes: &self.flashes,
        }
    }
}

/// Login page location that returns the visitor to `next` afterwards.
///
/// # Examples
/// ```
/// use vidensbank::inbound::http::context::login_location;
///
/// assert_eq!(login_location(Some("/dashboard")), "/login?next=%2Fdashboard");
/// assert_eq!(login_location(None), "/login");
/// ```
pub fn login_location(next: Option<&str>) -> String {
    match next.filter(|target| !target.is_empty()) {
        Some(target) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("next", target)
                .finish();
            format!("/login?{query}")
        }
        None => "/login".to_owned(),
    }
}
