use crate::components::{ActionButton, InputField, Toaster};
use crate::session::{use_compact_layout, RouterNavigator, SessionContext};
use leptos::*;
use sigil_common::config::SigilConfig;
use sigil_common::login::{Collaborators, LoginFlow};
use std::rc::Rc;

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<Rc<SigilConfig>>();
    let session = expect_context::<SessionContext>();
    let toaster = expect_context::<Toaster>();

    let collaborators = Collaborators {
        credentials: Rc::new(config.credential_check()),
        session: Rc::new(session),
        navigator: Rc::new(RouterNavigator::from_router()),
        notifier: Rc::new(toaster),
    };

    let flow = match LoginFlow::new(collaborators, config.login.clone()) {
        Ok(flow) => Rc::new(flow),
        Err(err) => {
            logging::error!("Failed to build login form: {}", err);
            return view! { <p class="login-unavailable">"Login is currently unavailable."</p> }
                .into_view();
        }
    };

    let revision = create_trigger();
    flow.form().subscribe(move || revision.notify());

    let form = flow.form().clone();
    let username = flow.username_field();
    let password = flow.password_field();
    let flow = store_value(flow);

    let submit_button = Signal::derive(move || {
        revision.track();
        flow.with_value(|flow| flow.submit_button())
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match flow.get_value().submit() {
            Ok(pending) => spawn_local(async move {
                pending.await;
            }),
            Err(rejected) => logging::log!("Login not submitted: {}", rejected),
        }
    };

    let compact = use_compact_layout(config.layout.compact_max_width);

    view! {
        <div class="login-page" class:compact=move || compact.get()>
            <div class="login-card">
                <h1>"Sign in"</h1>
                <p class="tagline">"Use your account credentials to continue"</p>

                <form class="login-form" novalidate=true on:submit=on_submit>
                    <InputField field=username form=form.clone() revision=revision/>
                    <InputField field=password form=form revision=revision/>
                    <ActionButton button=submit_button/>
                </form>
            </div>
        </div>
    }
    .into_view()
}
