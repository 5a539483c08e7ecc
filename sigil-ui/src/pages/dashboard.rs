use crate::components::ActionButton;
use crate::session::SessionContext;
use crate::LOGIN_ROUTE;
use leptos::*;
use leptos_router::{use_navigate, Redirect};
use sigil_common::button::{ActionButton as ButtonModel, ButtonVariant};

/// Landing page after sign-in; bounces back to the login form without a session
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let logout = ButtonModel::labeled("Logout")
        .variant(ButtonVariant::Outline)
        .left_icon("⎋")
        .on_click(move || {
            session.sign_out();
            navigate(LOGIN_ROUTE, Default::default());
        });
    let logout = Signal::derive(move || logout.clone());

    view! {
        <Show
            when=move || session.user().is_some()
            fallback=|| view! { <Redirect path=LOGIN_ROUTE/> }
        >
            <div class="dashboard-page">
                <h1>"Dashboard"</h1>
                {move || {
                    session
                        .user()
                        .map(|user| {
                            view! {
                                <p class="welcome">
                                    "Signed in as " <strong>{user.username}</strong>
                                    " (" {user.role.to_string()} ")"
                                </p>
                            }
                        })
                }}
                <ActionButton button=logout/>
            </div>
        </Show>
    }
}
