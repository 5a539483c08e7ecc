//! Leptos binding for the input-field controller
//!
//! The controller keeps focus and reveal state and produces the render model;
//! this component forwards DOM events into it and paints what it returns.
//! Markup is chosen once from the variant, attributes track the model.

use super::feedback::FieldError;
use leptos::*;
use sigil_common::field::{
    Affordance, FieldEffect, FieldEvent, FieldView, InputField as FieldController, LabelPosition,
    LabelStyle, LabelView, RenderedField, TextInputView,
};
use sigil_common::form::FormState;

#[component]
pub fn InputField(
    /// Controller for this instance; its variant picks the widget
    field: FieldController,
    /// Form the field reads its value and error from
    form: FormState,
    /// Notified by the owner after every form mutation
    revision: Trigger,
    /// Focus and blur reported to the caller
    #[prop(optional)]
    on_focus_change: Option<Callback<bool>>,
) -> impl IntoView {
    let caption = field.props().label.clone();
    let name = store_value(field.props().name.clone());
    let controller = create_rw_signal(field);
    let form = store_value(form);

    let rendered = create_memo(move |_| {
        revision.track();
        let (value, error) = name.with_value(|name| {
            form.with_value(|form| (form.value(name).unwrap_or_default(), form.error(name)))
        });
        controller.with(|c| c.render(&value, error.as_deref()))
    });

    let dispatch = move |event: FieldEvent| {
        let form = form.get_value();
        let name = name.get_value();
        let value = form.value(&name).unwrap_or_default();

        match controller.try_update(|c| c.handle(event, &value)).flatten() {
            Some(FieldEffect::Change(next)) => {
                if let Err(err) = form.set_field_value(&name, next) {
                    logging::error!("Failed to update field '{}': {}", name, err);
                }
            }
            Some(FieldEffect::FocusChange(focused)) => {
                if let Some(callback) = on_focus_change {
                    callback.call(focused);
                }
            }
            None => {}
        }
    };

    let initial = rendered.get_untracked();
    let control = match &initial.control {
        FieldView::TextLike(text) => text_control(&initial, text, rendered, dispatch).into_view(),
        FieldView::Checkbox { label_position, .. } => {
            checkbox_control(&initial, *label_position, caption, rendered, dispatch).into_view()
        }
        FieldView::Switch(_) => switch_control(&initial, rendered, dispatch).into_view(),
        FieldView::Radio(radio) => {
            let option = radio.option.clone();
            let option_label = radio.option_label.clone().unwrap_or_else(|| option.clone());
            let class = format!("radio {}", position_class(radio.label_position));
            let id = format!("{}-{}", initial.id, option);
            view! {
                <label class=class for=id.clone()>
                    <input
                        type="radio"
                        id=id
                        name=initial.name.clone()
                        value=option
                        required=initial.required
                        prop:checked=move || rendered.with(|r| matches!(&r.control, FieldView::Radio(v) if v.checked))
                        disabled=move || rendered.with(|r| r.disabled)
                        on:change=move |_| dispatch(FieldEvent::Activate)
                    />
                    <span class="radio-label">{option_label}</span>
                </label>
            }
            .into_view()
        }
    };

    let label_for = initial.id.clone();
    view! {
        <div class=move || rendered.with(wrapper_class)>
            {move || {
                rendered
                    .with(|r| r.label.clone())
                    .map(|label| {
                        view! {
                            <label for=label_for.clone() class=label_class(&label)>
                                {label.text}
                                {label.required_marker.then(|| view! { <span class="required-marker">" *"</span> })}
                            </label>
                        }
                    })
            }}
            {control}
            {move || rendered.with(|r| r.error.clone()).map(|message| view! { <FieldError message=message/> })}
        </div>
    }
}

fn text_control(
    initial: &RenderedField,
    text: &TextInputView,
    rendered: Memo<RenderedField>,
    dispatch: impl Fn(FieldEvent) + Copy + 'static,
) -> impl IntoView {
    let revealed = move || {
        text_attr(rendered, |t| {
            matches!(t.affordance, Affordance::VisibilityToggle { revealed: true })
        })
        .unwrap_or(false)
    };

    let affordance = match text.affordance {
        Affordance::VisibilityToggle { .. } => view! {
            <button
                type="button"
                class="visibility-toggle"
                aria-label=move || if revealed() { "Hide password" } else { "Show password" }
                disabled=move || rendered.with(|r| r.disabled)
                on:click=move |_| dispatch(FieldEvent::ToggleVisibility)
            >
                {move || if revealed() { "🙈" } else { "👁" }}
            </button>
        }
        .into_view(),
        Affordance::EmailIcon => view! { <span class="input-icon" aria-hidden="true">"✉"</span> }.into_view(),
        Affordance::None => ().into_view(),
    };

    view! {
        <div class="input-wrapper">
            <input
                id=initial.id.clone()
                name=initial.name.clone()
                type=move || text_attr(rendered, |t| t.input_type.as_str()).unwrap_or("text")
                prop:value=move || text_attr(rendered, |t| t.value.clone()).unwrap_or_default()
                placeholder=text.placeholder.clone()
                minlength=text.min_length.map(|n| n.to_string())
                maxlength=text.max_length.map(|n| n.to_string())
                inputmode=text.input_mode.clone()
                autofocus=text.autofocus
                required=initial.required
                disabled=move || rendered.with(|r| r.disabled)
                aria-invalid=move || text_attr(rendered, |t| t.invalid.to_string())
                on:focus=move |_| dispatch(FieldEvent::Focus)
                on:blur=move |_| dispatch(FieldEvent::Blur)
                on:input=move |ev| dispatch(FieldEvent::Input(event_target_value(&ev)))
            />
            {affordance}
        </div>
    }
}

fn checkbox_control(
    initial: &RenderedField,
    position: LabelPosition,
    caption: Option<String>,
    rendered: Memo<RenderedField>,
    dispatch: impl Fn(FieldEvent) + Copy + 'static,
) -> impl IntoView {
    view! {
        <label class=format!("checkbox {}", position_class(position)) for=initial.id.clone()>
            <input
                type="checkbox"
                id=initial.id.clone()
                name=initial.name.clone()
                required=initial.required
                prop:checked=move || rendered.with(|r| matches!(r.control, FieldView::Checkbox { checked: true, .. }))
                disabled=move || rendered.with(|r| r.disabled)
                on:change=move |_| dispatch(FieldEvent::Activate)
            />
            {caption.map(|text| view! { <span class="checkbox-label">{text}</span> })}
        </label>
    }
}

fn switch_control(
    initial: &RenderedField,
    rendered: Memo<RenderedField>,
    dispatch: impl Fn(FieldEvent) + Copy + 'static,
) -> impl IntoView {
    let switch = move || match rendered.with(|r| r.control.clone()) {
        FieldView::Switch(view) => Some(view),
        _ => None,
    };
    let checked = move || switch().is_some_and(|s| s.checked);
    let label = match &initial.control {
        FieldView::Switch(view) => view.label.clone(),
        _ => None,
    };

    view! {
        <label class="switch" for=initial.id.clone()>
            <input
                type="checkbox"
                role="switch"
                class="switch-input"
                id=initial.id.clone()
                name=initial.name.clone()
                prop:checked=checked
                aria-checked=move || checked().to_string()
                disabled=move || rendered.with(|r| r.disabled)
                on:change=move |_| dispatch(FieldEvent::Activate)
            />
            <span
                class="switch-track"
                style=move || switch().map(|s| format!("background-color: {}", s.track_color))
            >
                <span
                    class="switch-thumb"
                    style=move || switch().and_then(|s| s.thumb_color).map(|c| format!("background-color: {}", c))
                ></span>
            </span>
            {label.map(|text| view! { <span class="switch-label">{text}</span> })}
        </label>
    }
}

fn text_attr<T>(rendered: Memo<RenderedField>, f: impl Fn(&TextInputView) -> T) -> Option<T> {
    rendered.with(|r| match &r.control {
        FieldView::TextLike(view) => Some(f(view)),
        _ => None,
    })
}

/// Container class; checkbox and switch shrink to their content
pub fn wrapper_class(rendered: &RenderedField) -> String {
    let mut classes = vec!["form-field"];
    if rendered.fit_content {
        classes.push("fit-content");
    }
    if rendered.error.is_some() {
        classes.push("has-error");
    }
    if rendered.disabled {
        classes.push("is-disabled");
    }
    classes.join(" ")
}

pub fn label_class(label: &LabelView) -> String {
    let mut classes = vec!["field-label"];
    if label.style == LabelStyle::Collapsed {
        classes.push("label-collapsed");
        if label.shrink {
            classes.push("label-shrink");
        }
    }
    classes.join(" ")
}

fn position_class(position: LabelPosition) -> &'static str {
    match position {
        LabelPosition::Left => "label-left",
        LabelPosition::Right => "label-right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_common::form::FieldValue;

    #[test]
    fn test_wrapper_class() {
        let checkbox = FieldController::checkbox("remember").with_label("Remember me");
        let rendered = checkbox.render(&FieldValue::Bool(false), None);
        assert_eq!(wrapper_class(&rendered), "form-field fit-content");

        let mut username = FieldController::text("username");
        username.set_disabled(true);
        let rendered = username.render(&"ab".into(), Some("Username must be at least 3 characters long"));
        assert_eq!(wrapper_class(&rendered), "form-field has-error is-disabled");
    }

    #[test]
    fn test_label_class_follows_shrink() {
        let mut field = FieldController::text("username")
            .with_label("Username")
            .with_label_style(LabelStyle::Collapsed);

        let empty = field.render(&"".into(), None).label.unwrap();
        assert_eq!(label_class(&empty), "field-label label-collapsed");

        field.handle(FieldEvent::Focus, &"".into());
        let focused = field.render(&"".into(), None).label.unwrap();
        assert_eq!(label_class(&focused), "field-label label-collapsed label-shrink");

        let standard = FieldController::text("username").with_label("Username");
        let label = standard.render(&"admin".into(), None).label.unwrap();
        assert_eq!(label_class(&label), "field-label");
    }

    #[test]
    fn test_position_class() {
        assert_eq!(position_class(LabelPosition::Left), "label-left");
        assert_eq!(position_class(LabelPosition::default()), "label-right");
    }
}
