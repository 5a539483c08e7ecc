//! Browser-backed collaborators: session store, router navigation and the
//! compact-layout breakpoint signal

use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};
use sigil_common::auth::{AuthenticatedUser, Navigator, SessionStore};
use std::rc::Rc;

const SESSION_KEY: &str = "sigil_user";

/// Signed-in user, mirrored to local storage
#[derive(Clone, Copy)]
pub struct SessionContext {
    user: RwSignal<Option<AuthenticatedUser>>,
}

impl SessionContext {
    /// Picks up a user persisted by an earlier visit
    pub fn restore() -> Self {
        let user = LocalStorage::get::<AuthenticatedUser>(SESSION_KEY).ok();
        Self {
            user: create_rw_signal(user),
        }
    }

    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.user.get()
    }

    pub fn sign_out(&self) {
        LocalStorage::delete(SESSION_KEY);
        self.user.set(None);
    }
}

impl SessionStore for SessionContext {
    fn set_user(&self, user: AuthenticatedUser) {
        if let Err(err) = LocalStorage::set(SESSION_KEY, &user) {
            logging::warn!("Could not persist session: {}", err);
        }
        self.user.set(Some(user));
    }
}

/// Navigation through the leptos router
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl RouterNavigator {
    /// Must be called under a `<Router>`
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        Self {
            navigate: Rc::new(move |path: &str, options: NavigateOptions| navigate(path, options)),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate_to(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }
}

pub fn is_compact(viewport_width: u32, compact_max_width: u32) -> bool {
    viewport_width <= compact_max_width
}

fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(u32::MAX)
}

/// True while the viewport is at most `compact_max_width` pixels wide
pub fn use_compact_layout(compact_max_width: u32) -> Signal<bool> {
    let width = create_rw_signal(viewport_width());
    let handle = window_event_listener(ev::resize, move |_| width.set(viewport_width()));
    on_cleanup(move || handle.remove());

    Signal::derive(move || is_compact(width.get(), compact_max_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(is_compact(320, 639));
        assert!(is_compact(639, 639));
        assert!(!is_compact(640, 639));
        assert!(!is_compact(u32::MAX, 639));
    }
}
