//! Polymorphic action button model
//!
//! A button is either a navigational link or an activatable control, never
//! both. Loading implies disabled, and a disabled button suppresses every
//! activation whatever its mode.

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
    Destructive,
    IconOnly,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Outline => "btn-outline",
            ButtonVariant::Ghost => "btn-ghost",
            ButtonVariant::Destructive => "btn-destructive",
            ButtonVariant::IconOnly => "btn-icon",
        }
    }
}

/// Native `type` attribute of a control-mode button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }
}

#[derive(Clone)]
pub enum ButtonMode {
    Link {
        href: String,
    },
    Control {
        button_type: ButtonType,
        on_click: Option<Rc<dyn Fn()>>,
    },
}

impl fmt::Debug for ButtonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonMode::Link { href } => f.debug_struct("Link").field("href", href).finish(),
            ButtonMode::Control {
                button_type,
                on_click,
            } => f
                .debug_struct("Control")
                .field("button_type", button_type)
                .field("on_click", &on_click.is_some())
                .finish(),
        }
    }
}

/// Result of a click on the button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonActivation {
    /// Link mode: the caller should navigate here
    Navigated(String),
    /// The action callback ran
    Invoked,
    /// Submit control without a callback; the enclosing form handles it
    Submitted,
    /// Disabled or loading
    Suppressed,
    /// Plain control without a callback
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonElement {
    Anchor { href: String },
    Button { button_type: ButtonType },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonContent {
    Spinner,
    Label(String),
    Empty,
}

/// Render model of a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub element: ButtonElement,
    pub class: String,
    pub disabled: bool,
    /// False while disabled or loading, in both modes
    pub interactive: bool,
    pub left_icon: Option<String>,
    pub content: ButtonContent,
    pub right_icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ActionButton {
    variant: ButtonVariant,
    label: Option<String>,
    mode: ButtonMode,
    loading: bool,
    disabled: bool,
    left_icon: Option<String>,
    right_icon: Option<String>,
    disable_hover: bool,
    extra_class: Option<String>,
}

impl ActionButton {
    fn with_label(label: Option<String>, variant: ButtonVariant) -> Self {
        Self {
            variant,
            label,
            mode: ButtonMode::Control {
                button_type: ButtonType::Button,
                on_click: None,
            },
            loading: false,
            disabled: false,
            left_icon: None,
            right_icon: None,
            disable_hover: false,
            extra_class: None,
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self::with_label(Some(label.into()), ButtonVariant::Primary)
    }

    /// Icon-only buttons take no label
    pub fn icon_only(icon: impl Into<String>) -> Self {
        let mut button = Self::with_label(None, ButtonVariant::IconOnly);
        button.left_icon = Some(icon.into());
        button
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Switches to link mode; drops any action callback
    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.mode = ButtonMode::Link { href: href.into() };
        self
    }

    /// Switches to control mode with an action callback
    pub fn on_click(mut self, action: impl Fn() + 'static) -> Self {
        let button_type = self.button_type().unwrap_or_default();
        self.mode = ButtonMode::Control {
            button_type,
            on_click: Some(Rc::new(action)),
        };
        self
    }

    pub fn button_type(&self) -> Option<ButtonType> {
        match &self.mode {
            ButtonMode::Control { button_type, .. } => Some(*button_type),
            ButtonMode::Link { .. } => None,
        }
    }

    pub fn with_type(mut self, button_type: ButtonType) -> Self {
        let on_click = match self.mode {
            ButtonMode::Control { on_click, .. } => on_click,
            ButtonMode::Link { .. } => None,
        };
        self.mode = ButtonMode::Control {
            button_type,
            on_click,
        };
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn left_icon(mut self, icon: impl Into<String>) -> Self {
        self.left_icon = Some(icon.into());
        self
    }

    pub fn right_icon(mut self, icon: impl Into<String>) -> Self {
        self.right_icon = Some(icon.into());
        self
    }

    pub fn disable_hover(mut self, disable: bool) -> Self {
        self.disable_hover = disable;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.extra_class = Some(class.into());
        self
    }

    pub fn mode(&self) -> &ButtonMode {
        &self.mode
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled || self.loading
    }

    pub fn activate(&self) -> ButtonActivation {
        if self.is_disabled() {
            return ButtonActivation::Suppressed;
        }

        match &self.mode {
            ButtonMode::Link { href } => ButtonActivation::Navigated(href.clone()),
            ButtonMode::Control {
                on_click: Some(action),
                ..
            } => {
                action();
                ButtonActivation::Invoked
            }
            ButtonMode::Control {
                button_type: ButtonType::Submit,
                on_click: None,
            } => ButtonActivation::Submitted,
            ButtonMode::Control { on_click: None, .. } => ButtonActivation::Inert,
        }
    }

    pub fn render(&self) -> ButtonView {
        let disabled = self.is_disabled();

        let content = if self.loading {
            ButtonContent::Spinner
        } else {
            match (&self.label, self.variant) {
                (_, ButtonVariant::IconOnly) | (None, _) => ButtonContent::Empty,
                (Some(label), _) => ButtonContent::Label(label.clone()),
            }
        };

        let mut classes = vec!["btn", self.variant.class()];
        if !self.disable_hover {
            classes.push("btn-hover");
        }
        if let Some(extra) = &self.extra_class {
            classes.push(extra.as_str());
        }
        if disabled {
            classes.push("btn-disabled");
        }

        let element = match &self.mode {
            ButtonMode::Link { href } => ButtonElement::Anchor { href: href.clone() },
            ButtonMode::Control { button_type, .. } => ButtonElement::Button {
                button_type: *button_type,
            },
        };

        ButtonView {
            element,
            class: classes.join(" "),
            disabled,
            interactive: !disabled,
            left_icon: self.left_icon.clone(),
            content,
            right_icon: self.right_icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_link_and_action_are_exclusive() {
        let button = ActionButton::labeled("Docs").on_click(|| {}).link("/docs");
        assert!(matches!(button.mode(), ButtonMode::Link { .. }));
        assert_eq!(button.activate(), ButtonActivation::Navigated("/docs".to_string()));

        let button = ActionButton::labeled("Save").link("/docs").on_click(|| {});
        assert!(matches!(button.mode(), ButtonMode::Control { on_click: Some(_), .. }));
    }

    #[test]
    fn test_action_runs_once_per_click() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let button = ActionButton::labeled("Delete")
            .variant(ButtonVariant::Destructive)
            .on_click(move || counter.set(counter.get() + 1));

        assert_eq!(button.activate(), ButtonActivation::Invoked);
        assert_eq!(button.activate(), ButtonActivation::Invoked);
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_disabled_is_flag_or_loading() {
        for (disabled, loading) in [(false, false), (true, false), (false, true), (true, true)] {
            let button = ActionButton::labeled("Login")
                .disabled(disabled)
                .loading(loading);
            assert_eq!(button.is_disabled(), disabled || loading);
            assert_eq!(button.render().disabled, disabled || loading);
        }
    }

    #[test]
    fn test_loading_suppresses_both_modes() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let action = ActionButton::labeled("Login")
            .on_click(move || counter.set(counter.get() + 1))
            .loading(true);
        assert_eq!(action.activate(), ButtonActivation::Suppressed);
        assert_eq!(clicks.get(), 0);

        let link = ActionButton::labeled("Home").link("/").loading(true);
        assert_eq!(link.activate(), ButtonActivation::Suppressed);
        let view = link.render();
        assert!(!view.interactive);
        assert_eq!(view.content, ButtonContent::Spinner);
    }

    #[test]
    fn test_icon_only_never_renders_label() {
        let button = ActionButton::icon_only("gear");
        let view = button.render();
        assert_eq!(view.content, ButtonContent::Empty);
        assert_eq!(view.left_icon.as_deref(), Some("gear"));

        let forced = ActionButton::labeled("Settings").variant(ButtonVariant::IconOnly);
        assert_eq!(forced.render().content, ButtonContent::Empty);
    }

    #[test]
    fn test_submit_without_callback() {
        let button = ActionButton::labeled("Login").with_type(ButtonType::Submit);
        assert_eq!(button.activate(), ButtonActivation::Submitted);
        assert_eq!(
            button.render().element,
            ButtonElement::Button {
                button_type: ButtonType::Submit
            }
        );
        assert_eq!(ActionButton::labeled("Noop").activate(), ButtonActivation::Inert);
    }

    #[test]
    fn test_classes() {
        let view = ActionButton::labeled("Login").class("mt-4").render();
        assert_eq!(view.class, "btn btn-primary btn-hover mt-4");

        let view = ActionButton::labeled("Cancel")
            .variant(ButtonVariant::Ghost)
            .disable_hover(true)
            .disabled(true)
            .render();
        assert_eq!(view.class, "btn btn-ghost btn-disabled");
    }
}
