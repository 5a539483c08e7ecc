//! Polymorphic input field engine
//!
//! One `InputField` presents six widget kinds behind a single contract. The
//! variant-specific options live in `InputVariant`, the transient
//! presentation state in `InteractionState`; both are tagged so a branch can
//! only see its own part. The controller turns DOM-level events into
//! `FieldEffect`s for the caller and renders a `RenderedField` view model.

use crate::form::FieldValue;
use crate::validation::FieldDescriptor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Widget kind of a form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Password,
    Email,
    Checkbox,
    Switch,
    Radio,
}

impl FieldKind {
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Checkbox | FieldKind::Switch => FieldValue::Bool(false),
            // radio stores the selected option of its group
            FieldKind::Text | FieldKind::Password | FieldKind::Email | FieldKind::Radio => {
                FieldValue::Text(String::new())
            }
        }
    }

    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Checkbox | FieldKind::Switch, FieldValue::Bool(_))
                | (
                    FieldKind::Text | FieldKind::Password | FieldKind::Email | FieldKind::Radio,
                    FieldValue::Text(_)
                )
        )
    }

    pub fn value_kind(&self) -> &'static str {
        match self {
            FieldKind::Checkbox | FieldKind::Switch => "boolean",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Static label above the control
    #[default]
    Standard,
    /// Floating label that moves out of the input while it shrinks
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextOptions {
    pub placeholder: String,
    pub label_style: LabelStyle,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub autofocus: bool,
    pub input_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    pub text: TextOptions,
    /// Render the reveal toggle
    pub visibility_toggle: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            text: TextOptions::default(),
            visibility_toggle: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckboxOptions {
    pub label_position: LabelPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOptions {
    pub label: Option<String>,
    pub thumb_color: Option<String>,
    pub track_color: String,
    pub track_color_checked: String,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            label: None,
            thumb_color: None,
            track_color: "#d1d5db".to_string(),
            track_color_checked: "#184B55".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RadioOptions {
    /// Identity of this option within its group
    pub option: String,
    pub option_label: Option<String>,
    pub label_position: LabelPosition,
}

/// Variant-specific display options, one arm per widget kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputVariant {
    Text(TextOptions),
    Email(TextOptions),
    Password(PasswordOptions),
    Checkbox(CheckboxOptions),
    Switch(SwitchOptions),
    Radio(RadioOptions),
}

impl InputVariant {
    pub fn kind(&self) -> FieldKind {
        match self {
            InputVariant::Text(_) => FieldKind::Text,
            InputVariant::Email(_) => FieldKind::Email,
            InputVariant::Password(_) => FieldKind::Password,
            InputVariant::Checkbox(_) => FieldKind::Checkbox,
            InputVariant::Switch(_) => FieldKind::Switch,
            InputVariant::Radio(_) => FieldKind::Radio,
        }
    }

    fn text_options_mut(&mut self) -> Option<&mut TextOptions> {
        match self {
            InputVariant::Text(o) | InputVariant::Email(o) => Some(o),
            InputVariant::Password(p) => Some(&mut p.text),
            _ => None,
        }
    }
}

/// Per-instance presentation state. Never shared with the form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    TextLike { focused: bool },
    Password { focused: bool, revealed: bool },
    /// Checkbox, switch and radio hold nothing of their own
    Stateless,
}

impl InteractionState {
    pub fn for_variant(variant: &InputVariant) -> Self {
        match variant {
            InputVariant::Text(_) | InputVariant::Email(_) => {
                InteractionState::TextLike { focused: false }
            }
            InputVariant::Password(_) => InteractionState::Password {
                focused: false,
                revealed: false,
            },
            InputVariant::Checkbox(_) | InputVariant::Switch(_) | InputVariant::Radio(_) => {
                InteractionState::Stateless
            }
        }
    }

    pub fn is_focused(&self) -> bool {
        match self {
            InteractionState::TextLike { focused } | InteractionState::Password { focused, .. } => {
                *focused
            }
            InteractionState::Stateless => false,
        }
    }

    pub fn is_password_visible(&self) -> bool {
        matches!(self, InteractionState::Password { revealed: true, .. })
    }

    fn set_focused(&mut self, value: bool) {
        match self {
            InteractionState::TextLike { focused } | InteractionState::Password { focused, .. } => {
                *focused = value
            }
            InteractionState::Stateless => {}
        }
    }
}

/// Label position is derived on every render, never stored
pub fn label_shrinks(focused: bool, value: &FieldValue) -> bool {
    focused || matches!(value, FieldValue::Text(s) if !s.is_empty())
}

/// Props shared by every variant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldProps {
    pub name: String,
    pub id: Option<String>,
    pub label: Option<String>,
    pub required: bool,
    pub disabled: bool,
}

/// DOM-level interaction forwarded into the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
    /// New raw text from a text-like input
    Input(String),
    /// Click or keyboard activation of a checkbox, switch or radio
    Activate,
    /// Click on the password reveal control
    ToggleVisibility,
}

/// What the caller must hear about after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEffect {
    Change(FieldValue),
    FocusChange(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
        }
    }
}

/// Decoration drawn inside a text-like input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    None,
    VisibilityToggle { revealed: bool },
    EmailIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    pub text: String,
    pub style: LabelStyle,
    pub shrink: bool,
    pub required_marker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputView {
    pub input_type: InputType,
    pub value: String,
    pub placeholder: String,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub autofocus: bool,
    pub input_mode: Option<String>,
    pub invalid: bool,
    pub affordance: Affordance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchView {
    pub checked: bool,
    pub thumb_color: Option<String>,
    pub track_color: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioView {
    pub option: String,
    pub checked: bool,
    pub option_label: Option<String>,
    pub label_position: LabelPosition,
}

/// Variant-specific part of the render model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldView {
    TextLike(TextInputView),
    Checkbox { checked: bool, label_position: LabelPosition },
    Switch(SwitchView),
    Radio(RadioView),
}

/// Complete render model of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: String,
    pub id: String,
    pub disabled: bool,
    pub required: bool,
    /// Checkbox and switch shrink to their content
    pub fit_content: bool,
    pub label: Option<LabelView>,
    pub control: FieldView,
    /// Present only for a non-empty message
    pub error: Option<String>,
}

impl RenderedField {
    pub fn shrink(&self) -> bool {
        self.label.as_ref().is_some_and(|l| l.shrink)
    }
}

/// Controller for one field instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    props: FieldProps,
    variant: InputVariant,
    interaction: InteractionState,
}

impl InputField {
    pub fn new(name: impl Into<String>, variant: InputVariant) -> Self {
        let interaction = InteractionState::for_variant(&variant);
        Self {
            props: FieldProps {
                name: name.into(),
                ..Default::default()
            },
            variant,
            interaction,
        }
    }

    /// Binds a field to its schema entry: name and required flag come from
    /// the descriptor, and the variant must render the declared kind.
    pub fn for_descriptor(descriptor: &FieldDescriptor, variant: InputVariant) -> Result<Self> {
        if variant.kind() != descriptor.kind {
            return Err(Error::VariantMismatch {
                field: descriptor.name.clone(),
                declared: descriptor.kind,
                rendered: variant.kind(),
            });
        }
        Ok(Self::new(descriptor.name.clone(), variant).required(descriptor.required))
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, InputVariant::Text(TextOptions::default()))
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, InputVariant::Email(TextOptions::default()))
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, InputVariant::Password(PasswordOptions::default()))
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, InputVariant::Checkbox(CheckboxOptions::default()))
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(name, InputVariant::Switch(SwitchOptions::default()))
    }

    /// One option of the radio group `name`
    pub fn radio(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self::new(
            name,
            InputVariant::Radio(RadioOptions {
                option: option.into(),
                ..Default::default()
            }),
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.props.label = Some(label.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.props.id = Some(id.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.props.required = required;
        self
    }

    /// Sets the placeholder on text-like variants; ignored elsewhere
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        if let Some(options) = self.variant.text_options_mut() {
            options.placeholder = placeholder.into();
        }
        self
    }

    /// Sets the label style on text-like variants; ignored elsewhere
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        if let Some(options) = self.variant.text_options_mut() {
            options.label_style = style;
        }
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
    }

    pub fn props(&self) -> &FieldProps {
        &self.props
    }

    pub fn variant(&self) -> &InputVariant {
        &self.variant
    }

    pub fn kind(&self) -> FieldKind {
        self.variant.kind()
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn is_focused(&self) -> bool {
        self.interaction.is_focused()
    }

    pub fn shrink(&self, value: &FieldValue) -> bool {
        label_shrinks(self.interaction.is_focused(), value)
    }

    /// Applies `event` to the local state and reports what the caller must
    /// hear about. Local state is always updated first.
    pub fn handle(&mut self, event: FieldEvent, value: &FieldValue) -> Option<FieldEffect> {
        if self.props.disabled {
            trace!(field = %self.props.name, ?event, "event ignored on disabled field");
            return None;
        }

        match event {
            FieldEvent::Focus => {
                self.interaction.set_focused(true);
                Some(FieldEffect::FocusChange(true))
            }
            FieldEvent::Blur => {
                self.interaction.set_focused(false);
                Some(FieldEffect::FocusChange(false))
            }
            FieldEvent::Input(raw) => self.handle_input(raw),
            FieldEvent::Activate => self.handle_activate(value),
            FieldEvent::ToggleVisibility => {
                self.toggle_visibility();
                None
            }
        }
    }

    /// `handle`, then `emit` with the effect and the post-update render model
    pub fn dispatch(
        &mut self,
        event: FieldEvent,
        value: &FieldValue,
        error: Option<&str>,
        mut emit: impl FnMut(&FieldEffect, &RenderedField),
    ) -> Option<FieldEffect> {
        let effect = self.handle(event, value)?;
        let current = match &effect {
            FieldEffect::Change(next) => next,
            FieldEffect::FocusChange(_) => value,
        };
        let rendered = self.render(current, error);
        emit(&effect, &rendered);
        Some(effect)
    }

    fn handle_input(&self, raw: String) -> Option<FieldEffect> {
        let options = match &self.variant {
            InputVariant::Text(o) | InputVariant::Email(o) => o,
            InputVariant::Password(p) => &p.text,
            InputVariant::Checkbox(_) | InputVariant::Switch(_) | InputVariant::Radio(_) => {
                return None
            }
        };

        // same truncation a browser applies for maxlength
        let text = match options.max_length {
            Some(max) if raw.chars().count() > max => raw.chars().take(max).collect(),
            _ => raw,
        };
        Some(FieldEffect::Change(FieldValue::Text(text)))
    }

    fn handle_activate(&self, value: &FieldValue) -> Option<FieldEffect> {
        match &self.variant {
            InputVariant::Checkbox(_) | InputVariant::Switch(_) => {
                let checked = value.as_bool().unwrap_or(false);
                Some(FieldEffect::Change(FieldValue::Bool(!checked)))
            }
            InputVariant::Radio(radio) => {
                if radio_checked(value, &radio.option) {
                    None
                } else {
                    Some(FieldEffect::Change(FieldValue::Text(radio.option.clone())))
                }
            }
            InputVariant::Text(_) | InputVariant::Email(_) | InputVariant::Password(_) => None,
        }
    }

    fn toggle_visibility(&mut self) {
        let enabled = matches!(&self.variant, InputVariant::Password(p) if p.visibility_toggle);
        if let (true, InteractionState::Password { revealed, .. }) = (enabled, &mut self.interaction)
        {
            *revealed = !*revealed;
        }
    }

    /// Builds the render model from the current local state and the bound value
    pub fn render(&self, value: &FieldValue, error: Option<&str>) -> RenderedField {
        let error = error.filter(|e| !e.is_empty()).map(str::to_string);
        let invalid = error.is_some();
        let shrink = self.shrink(value);

        let control = match &self.variant {
            InputVariant::Text(options) => {
                FieldView::TextLike(self.text_view(InputType::Text, options, value, invalid, Affordance::None))
            }
            InputVariant::Email(options) => FieldView::TextLike(self.text_view(
                InputType::Email,
                options,
                value,
                invalid,
                Affordance::EmailIcon,
            )),
            InputVariant::Password(options) => {
                let revealed = self.interaction.is_password_visible();
                let input_type = if revealed {
                    InputType::Text
                } else {
                    InputType::Password
                };
                let affordance = if options.visibility_toggle {
                    Affordance::VisibilityToggle { revealed }
                } else {
                    Affordance::None
                };
                FieldView::TextLike(self.text_view(input_type, &options.text, value, invalid, affordance))
            }
            InputVariant::Checkbox(options) => FieldView::Checkbox {
                checked: value.as_bool().unwrap_or(false),
                label_position: options.label_position,
            },
            InputVariant::Switch(options) => {
                let checked = value.as_bool().unwrap_or(false);
                FieldView::Switch(SwitchView {
                    checked,
                    thumb_color: options.thumb_color.clone(),
                    track_color: if checked {
                        options.track_color_checked.clone()
                    } else {
                        options.track_color.clone()
                    },
                    label: options.label.clone(),
                })
            }
            InputVariant::Radio(options) => FieldView::Radio(RadioView {
                option: options.option.clone(),
                checked: radio_checked(value, &options.option),
                option_label: options.option_label.clone(),
                label_position: options.label_position,
            }),
        };

        let fit_content = matches!(self.variant, InputVariant::Checkbox(_) | InputVariant::Switch(_));
        let label = match (&self.props.label, fit_content) {
            (Some(text), false) => Some(LabelView {
                text: text.clone(),
                style: self.label_style(),
                shrink,
                required_marker: self.props.required,
            }),
            _ => None,
        };

        RenderedField {
            name: self.props.name.clone(),
            id: self.props.id.clone().unwrap_or_else(|| self.props.name.clone()),
            disabled: self.props.disabled,
            required: self.props.required,
            fit_content,
            label,
            control,
            error,
        }
    }

    fn label_style(&self) -> LabelStyle {
        match &self.variant {
            InputVariant::Text(o) | InputVariant::Email(o) => o.label_style,
            InputVariant::Password(p) => p.text.label_style,
            _ => LabelStyle::Standard,
        }
    }

    fn text_view(
        &self,
        input_type: InputType,
        options: &TextOptions,
        value: &FieldValue,
        invalid: bool,
        affordance: Affordance,
    ) -> TextInputView {
        TextInputView {
            input_type,
            value: value.as_text().unwrap_or_default().to_string(),
            placeholder: options.placeholder.clone(),
            min_length: options.min_length,
            max_length: options.max_length,
            autofocus: options.autofocus,
            input_mode: options.input_mode.clone(),
            invalid,
            affordance,
        }
    }
}

/// Radio membership: checked iff the shared group value is this option
fn radio_checked(group_value: &FieldValue, option: &str) -> bool {
    matches!(group_value, FieldValue::Text(selected) if selected == option)
}
