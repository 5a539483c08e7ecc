//! Leptos rendering of the action-button model

use leptos::*;
use sigil_common::button::{
    ActionButton as ButtonModel, ButtonActivation, ButtonContent, ButtonElement, ButtonView,
};

/// Anchor in link mode, native button in control mode.
///
/// Clicks go through `ButtonModel::activate`, so a disabled or loading
/// button swallows them in both modes.
#[component]
pub fn ActionButton(
    /// Button model, re-read whenever the signal changes
    button: Signal<ButtonModel>,
) -> impl IntoView {
    let model = create_memo(move |_| button.with(|b| b.render()));

    let on_click = move |ev: ev::MouseEvent| {
        if button.with_untracked(|b| b.activate()) == ButtonActivation::Suppressed {
            ev.prevent_default();
        }
    };

    move || {
        let ButtonView {
            element,
            class,
            disabled,
            interactive,
            left_icon,
            content,
            right_icon,
        } = model.get();

        let left = left_icon.map(|icon| view! { <span class="btn-icon-left" aria-hidden="true">{icon}</span> });
        let right = right_icon.map(|icon| view! { <span class="btn-icon-right" aria-hidden="true">{icon}</span> });
        let busy = content == ButtonContent::Spinner;
        let body = match content {
            ButtonContent::Spinner => view! { <span class="btn-spinner" aria-label="Loading"></span> }.into_view(),
            ButtonContent::Label(label) => view! { <span class="btn-label">{label}</span> }.into_view(),
            ButtonContent::Empty => ().into_view(),
        };

        match element {
            ButtonElement::Anchor { href } => view! {
                <a
                    href=href
                    class=class
                    aria-disabled=disabled.to_string()
                    tabindex=(!interactive).then_some("-1")
                    on:click=on_click
                >
                    {left}
                    {body}
                    {right}
                </a>
            }
            .into_view(),
            ButtonElement::Button { button_type } => view! {
                <button
                    type=button_type.as_str()
                    class=class
                    disabled=disabled
                    aria-busy=busy.to_string()
                    on:click=on_click
                >
                    {left}
                    {body}
                    {right}
                </button>
            }
            .into_view(),
        }
    }
}
