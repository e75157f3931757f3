// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding values and the configuration derived from them.
//!
//! ## Shapes
//!
//! A [`Binding`] carries the value a host attached to an element plus its
//! modifiers. The value is either plain text or an options object:
//!
//! ```
//! use understory_tooltip::config::{Binding, Configuration, TooltipValue};
//!
//! let binding: Binding = serde_json::from_str(
//!     r#"{ "value": { "value": "Save", "showDelay": 300, "escape": true } }"#,
//! ).unwrap();
//! let config = Configuration::from_binding(&binding).unwrap();
//! assert_eq!(config.text, "Save");
//! assert_eq!(config.show_delay_ms, 300);
//! assert!(config.escape_html);
//! assert!(config.fit_content);
//!
//! let plain = Binding::from(TooltipValue::from("Delete"));
//! assert!(!Configuration::from_binding(&plain).unwrap().escape_html);
//! ```
//!
//! Fields with the wrong type fall back to their defaults instead of failing
//! the whole binding.

use alloc::collections::BTreeMap;
use alloc::string::String;

use serde::{Deserialize, Deserializer};

use crate::types::Modifiers;

/// Default z-index base for the `tooltip` stacking category.
pub const DEFAULT_Z_INDEX: i32 = 1100;

/// Default fade-in duration in milliseconds.
pub const DEFAULT_FADE_MS: u32 = 250;

/// Errors produced while turning a binding into a [`Configuration`].
///
/// The controller never surfaces these; an error simply leaves the attachment
/// inert.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The binding has no value, or the options object has no `value` text.
    #[error("tooltip binding has no text")]
    MissingText,
    /// The text is empty or only whitespace.
    #[error("tooltip text is blank")]
    BlankText,
    /// The binding could not be parsed as JSON.
    #[cfg(feature = "json")]
    #[error("malformed tooltip binding: {0}")]
    Json(#[from] serde_json::Error),
}

/// The value half of a binding: plain text or an options object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TooltipValue {
    /// Text with every option at its default.
    Text(String),
    /// Text plus per-field options.
    Options(TooltipOptions),
}

impl From<&str> for TooltipValue {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for TooltipValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TooltipOptions> for TooltipValue {
    fn from(options: TooltipOptions) -> Self {
        Self::Options(options)
    }
}

/// The options-object form of a [`TooltipValue`].
///
/// Every field is optional. Missing or mistyped fields take the default noted
/// on each field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipOptions {
    /// Tooltip text. Required for activation.
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,
    /// Suppress showing while keeping listeners bound. Default `false`.
    #[serde(deserialize_with = "lenient")]
    pub disabled: Option<bool>,
    /// Insert the text as escaped plain text. Default `false` (markup).
    #[serde(deserialize_with = "lenient")]
    pub escape: Option<bool>,
    /// Extra class appended to the overlay.
    #[serde(deserialize_with = "lenient")]
    pub class: Option<String>,
    /// Size the overlay with `width: fit-content`. Default `true`.
    #[serde(deserialize_with = "lenient")]
    pub fit_content: Option<bool>,
    /// Fixed overlay id; blank means generate one.
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    /// Delay before showing, in milliseconds. Default `0`.
    #[serde(deserialize_with = "lenient")]
    pub show_delay: Option<u32>,
    /// Delay before hiding, in milliseconds. Default `0`.
    #[serde(deserialize_with = "lenient")]
    pub hide_delay: Option<u32>,
}

impl TooltipOptions {
    /// Options with the given text and everything else defaulted.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Object-style argument: `{ event, position }` translated into modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingArg {
    /// Trigger name, e.g. `"focus"`.
    #[serde(deserialize_with = "lenient")]
    pub event: Option<String>,
    /// Side name, e.g. `"top"`.
    #[serde(deserialize_with = "lenient")]
    pub position: Option<String>,
}

impl BindingArg {
    /// Translate the argument values into modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_names(
            [self.event.as_deref(), self.position.as_deref()]
                .into_iter()
                .flatten(),
        )
    }
}

/// Everything a host passes when it attaches or reconfigures an element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Binding {
    /// The tooltip value; `None` disables the behavior.
    #[serde(deserialize_with = "lenient")]
    pub value: Option<TooltipValue>,
    /// Explicit modifier flags. When non-empty they win over [`Binding::arg`].
    #[serde(deserialize_with = "modifier_map")]
    pub modifiers: Modifiers,
    /// Object-style argument used when no modifiers are set.
    #[serde(deserialize_with = "lenient")]
    pub arg: Option<BindingArg>,
    /// Host-configured z-index base for tooltips.
    #[serde(deserialize_with = "lenient")]
    pub z_index: Option<i32>,
}

impl Binding {
    /// A binding with the given value and no modifiers.
    pub fn new(value: impl Into<TooltipValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Replace the modifier flags.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the object-style argument.
    #[must_use]
    pub fn with_arg(mut self, arg: BindingArg) -> Self {
        self.arg = Some(arg);
        self
    }

    /// Replace the z-index base.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Effective modifiers: explicit flags first, then the argument, else none.
    pub fn resolved_modifiers(&self) -> Modifiers {
        if !self.modifiers.is_empty() {
            return self.modifiers;
        }
        self.arg
            .as_ref()
            .map(BindingArg::modifiers)
            .unwrap_or_default()
    }

    /// Parse a binding from JSON text.
    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<TooltipValue> for Binding {
    fn from(value: TooltipValue) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Binding {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Active per-attachment configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Non-blank tooltip text.
    pub text: String,
    /// Showing is suppressed while `true`.
    pub disabled: bool,
    /// `true` inserts the text escaped; `false` inserts it as markup.
    pub escape_html: bool,
    /// Apply `width: fit-content` to the overlay.
    pub fit_content: bool,
    /// Extra overlay class.
    pub custom_class: Option<String>,
    /// Fixed overlay id.
    pub id_override: Option<String>,
    /// Delay before showing, in milliseconds.
    pub show_delay_ms: u32,
    /// Delay before hiding, in milliseconds.
    pub hide_delay_ms: u32,
    /// Stacking base; `None` uses [`ControllerOptions::z_index_base`].
    pub z_index_base: Option<i32>,
}

impl Configuration {
    /// Defaults for plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disabled: false,
            escape_html: false,
            fit_content: true,
            custom_class: None,
            id_override: None,
            show_delay_ms: 0,
            hide_delay_ms: 0,
            z_index_base: None,
        }
    }

    /// Derive the active configuration for a binding.
    pub fn from_binding(binding: &Binding) -> Result<Self, ConfigError> {
        let value = binding.value.as_ref().ok_or(ConfigError::MissingText)?;
        let mut config = Self::try_from(value)?;
        config.z_index_base = binding.z_index;
        Ok(config)
    }
}

impl TryFrom<&TooltipValue> for Configuration {
    type Error = ConfigError;

    fn try_from(value: &TooltipValue) -> Result<Self, Self::Error> {
        match value {
            TooltipValue::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ConfigError::BlankText);
                }
                Ok(Self::text(text.clone()))
            }
            TooltipValue::Options(options) => {
                let text = options.value.as_ref().ok_or(ConfigError::MissingText)?;
                if text.trim().is_empty() {
                    return Err(ConfigError::BlankText);
                }
                Ok(Self {
                    text: text.clone(),
                    disabled: options.disabled.unwrap_or(false),
                    escape_html: options.escape.unwrap_or(false),
                    fit_content: options.fit_content.unwrap_or(true),
                    custom_class: options.class.clone().filter(|c| !c.trim().is_empty()),
                    id_override: options.id.clone().filter(|id| !id.is_empty()),
                    show_delay_ms: options.show_delay.unwrap_or(0),
                    hide_delay_ms: options.hide_delay.unwrap_or(0),
                    z_index_base: None,
                })
            }
        }
    }
}

/// Controller-wide settings shared by every attachment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerOptions {
    /// Stacking base used when a binding has no z-index.
    pub z_index_base: i32,
    /// Fade-in duration in milliseconds.
    pub fade_ms: u32,
    /// Class marking a composite input wrapper whose inner input receives listeners.
    pub wrapper_class: String,
    /// Category name passed to the stacking registry.
    pub category: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            z_index_base: DEFAULT_Z_INDEX,
            fade_ms: DEFAULT_FADE_MS,
            wrapper_class: "p-inputwrapper".into(),
            category: "tooltip".into(),
        }
    }
}

/// Accepts a value of type `T` or anything else; anything else becomes `None`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    #[allow(dead_code, reason = "Only the variant matters; the value is discarded.")]
    Invalid(serde::de::IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => Some(value),
        Lenient::Invalid(_) => None,
    })
}

/// Modifiers arrive as `{ "focus": true, "top": true }`.
///
/// Entries are decoded one by one; a non-boolean entry is skipped on its own.
fn modifier_map<'de, D>(deserializer: D) -> Result<Modifiers, D::Error>
where
    D: Deserializer<'de>,
{
    let map: Option<BTreeMap<String, Lenient<bool>>> = lenient(deserializer)?;
    Ok(map
        .map(|map| {
            Modifiers::from_names(
                map.iter()
                    .filter(|(_, enabled)| matches!(enabled, Lenient::Valid(true)))
                    .map(|(name, _)| name.as_str()),
            )
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn parse(json: &str) -> Binding {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn plain_text_takes_string_defaults() {
        let config = Configuration::from_binding(&parse(r#"{ "value": "Hello" }"#)).unwrap();
        assert_eq!(config, Configuration::text("Hello"));
        assert!(config.fit_content);
        assert!(!config.escape_html);
        assert!(!config.disabled);
    }

    #[test]
    fn blank_or_missing_text_is_rejected() {
        assert!(matches!(
            Configuration::from_binding(&Binding::default()),
            Err(ConfigError::MissingText)
        ));
        assert!(matches!(
            Configuration::from_binding(&Binding::from("   ")),
            Err(ConfigError::BlankText)
        ));
        assert!(matches!(
            Configuration::from_binding(&parse(r#"{ "value": { "disabled": true } }"#)),
            Err(ConfigError::MissingText)
        ));
        assert!(matches!(
            Configuration::from_binding(&parse(r#"{ "value": { "value": "\t\n" } }"#)),
            Err(ConfigError::BlankText)
        ));
    }

    #[test]
    fn mistyped_fields_fall_back_to_defaults() {
        let binding = parse(
            r#"{ "value": { "value": "x", "disabled": "yes", "escape": 1,
                 "fitContent": null, "showDelay": -5, "hideDelay": "soon", "id": 7 } }"#,
        );
        let config = Configuration::from_binding(&binding).unwrap();
        assert!(!config.disabled);
        assert!(!config.escape_html);
        assert!(config.fit_content);
        assert_eq!(config.show_delay_ms, 0);
        assert_eq!(config.hide_delay_ms, 0);
        assert_eq!(config.id_override, None);
    }

    #[test]
    fn non_text_values_disable() {
        assert_eq!(parse(r#"{ "value": 42 }"#).value, None);
        assert_eq!(parse(r#"{ "value": null }"#).value, None);
        assert_eq!(parse(r#"{ "value": false }"#).value, None);
    }

    #[test]
    fn options_are_carried_over() {
        let binding = parse(
            r#"{ "value": { "value": "x", "disabled": true, "escape": true, "class": "warn",
                 "fitContent": false, "id": "fixed", "showDelay": 10, "hideDelay": 20 },
                 "zIndex": 3000 }"#,
        );
        let config = Configuration::from_binding(&binding).unwrap();
        assert!(config.disabled);
        assert!(config.escape_html);
        assert!(!config.fit_content);
        assert_eq!(config.custom_class.as_deref(), Some("warn"));
        assert_eq!(config.id_override.as_deref(), Some("fixed"));
        assert_eq!(config.show_delay_ms, 10);
        assert_eq!(config.hide_delay_ms, 20);
        assert_eq!(config.z_index_base, Some(3000));
    }

    #[test]
    fn modifiers_win_over_arg() {
        let binding = parse(
            r#"{ "value": "x", "modifiers": { "focus": true, "bottom": true, "left": false },
                 "arg": { "event": "hover", "position": "top" } }"#,
        );
        let m = binding.resolved_modifiers();
        assert_eq!(m, Modifiers::FOCUS | Modifiers::BOTTOM);
        assert_eq!(m.side(), Side::Bottom);
    }

    #[test]
    fn mistyped_modifier_entries_are_skipped_alone() {
        let binding = parse(r#"{ "value": "x", "modifiers": { "focus": true, "top": 1 } }"#);
        assert_eq!(binding.modifiers, Modifiers::FOCUS);
        let binding = parse(r#"{ "value": "x", "modifiers": { "left": "yes", "bottom": true } }"#);
        assert_eq!(binding.resolved_modifiers().side(), Side::Bottom);
        assert_eq!(parse(r#"{ "value": "x", "modifiers": [1] }"#).modifiers, Modifiers::empty());
    }

    #[test]
    fn arg_translates_when_no_modifiers() {
        let binding = parse(r#"{ "value": "x", "arg": { "event": "focus", "position": "left" } }"#);
        assert_eq!(
            binding.resolved_modifiers(),
            Modifiers::FOCUS | Modifiers::LEFT
        );
        assert_eq!(Binding::from("x").resolved_modifiers(), Modifiers::empty());
    }

    #[test]
    fn controller_options_defaults() {
        let options: ControllerOptions = serde_json::from_str(r#"{ "fadeMs": 100 }"#).unwrap();
        assert_eq!(options.fade_ms, 100);
        assert_eq!(options.z_index_base, DEFAULT_Z_INDEX);
        assert_eq!(options.wrapper_class, "p-inputwrapper");
        assert_eq!(options.category, "tooltip");
    }
}
