// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Decode hint configuration.
//!
//! Hints are optional, per-request parameters for the engine. A kind that is
//! absent from a [`HintConfiguration`] means "use the engine default", which is
//! not the same thing as an explicit `false`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of hint kinds understood by the engine.
///
/// Declaration order is the order hints are serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HintKind {
    // text-valued
    Other,
    PossibleFormats,
    CharacterSet,
    AllowedLengths,
    AllowedEanExtensions,
    // boolean-valued
    PureBarcode,
    TryHarder,
    AssumeCode39CheckDigit,
    ReturnCodabarStartEnd,
    AssumeGs1,
    AlsoInverted,
    TelepenAsNumeric,
}

/// Value type carried by a hint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintValueType {
    Text,
    Flag,
}

impl HintKind {
    pub const TEXT_KINDS: [HintKind; 5] = [
        HintKind::Other,
        HintKind::PossibleFormats,
        HintKind::CharacterSet,
        HintKind::AllowedLengths,
        HintKind::AllowedEanExtensions,
    ];

    pub const FLAG_KINDS: [HintKind; 7] = [
        HintKind::PureBarcode,
        HintKind::TryHarder,
        HintKind::AssumeCode39CheckDigit,
        HintKind::ReturnCodabarStartEnd,
        HintKind::AssumeGs1,
        HintKind::AlsoInverted,
        HintKind::TelepenAsNumeric,
    ];

    pub fn value_type(self) -> HintValueType {
        match self {
            HintKind::Other
            | HintKind::PossibleFormats
            | HintKind::CharacterSet
            | HintKind::AllowedLengths
            | HintKind::AllowedEanExtensions => HintValueType::Text,
            HintKind::PureBarcode
            | HintKind::TryHarder
            | HintKind::AssumeCode39CheckDigit
            | HintKind::ReturnCodabarStartEnd
            | HintKind::AssumeGs1
            | HintKind::AlsoInverted
            | HintKind::TelepenAsNumeric => HintValueType::Flag,
        }
    }

    pub fn is_flag(self) -> bool {
        self.value_type() == HintValueType::Flag
    }

    pub fn name(self) -> &'static str {
        match self {
            HintKind::Other => "Other",
            HintKind::PossibleFormats => "PossibleFormats",
            HintKind::CharacterSet => "CharacterSet",
            HintKind::AllowedLengths => "AllowedLengths",
            HintKind::AllowedEanExtensions => "AllowedEanExtensions",
            HintKind::PureBarcode => "PureBarcode",
            HintKind::TryHarder => "TryHarder",
            HintKind::AssumeCode39CheckDigit => "AssumeCode39CheckDigit",
            HintKind::ReturnCodabarStartEnd => "ReturnCodabarStartEnd",
            HintKind::AssumeGs1 => "AssumeGs1",
            HintKind::AlsoInverted => "AlsoInverted",
            HintKind::TelepenAsNumeric => "TelepenAsNumeric",
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hint value, typed by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintValue {
    Text(String),
    Flag(bool),
}

impl HintValue {
    /// Wire representation; flags become the literal strings `"true"`/`"false"`.
    pub fn to_wire(&self) -> String {
        match self {
            HintValue::Text(text) => text.clone(),
            HintValue::Flag(flag) => flag.to_string(),
        }
    }
}

/// Serialized hint set, as handed to the engine.
pub type WireHints = BTreeMap<HintKind, String>;

/// Ordered map from hint kind to value. Each kind appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintConfiguration {
    entries: BTreeMap<HintKind, HintValue>,
}

impl HintConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `kind`.
    ///
    /// Returns `false` and leaves the configuration untouched when the value is
    /// empty, or when `kind` is boolean-valued and `value` is not `"true"`/`"false"`.
    /// Setting `PureBarcode` to `"false"` removes it instead of storing it.
    pub fn set_hint(&mut self, kind: HintKind, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }

        match kind.value_type() {
            HintValueType::Text => {
                self.entries.insert(kind, HintValue::Text(value.to_string()));
                true
            }
            HintValueType::Flag => {
                let Ok(flag) = value.parse::<bool>() else {
                    return false;
                };
                self.set_flag(kind, flag)
            }
        }
    }

    /// Typed setter for boolean-valued kinds. Returns `false` for text kinds.
    pub fn set_flag(&mut self, kind: HintKind, flag: bool) -> bool {
        if !kind.is_flag() {
            return false;
        }

        // the engine default for PureBarcode differs from an explicit false
        if kind == HintKind::PureBarcode && !flag {
            self.entries.remove(&kind);
        } else {
            self.entries.insert(kind, HintValue::Flag(flag));
        }
        true
    }

    /// Delete the entry for `kind`. Returns whether an entry was present.
    pub fn remove_hint(&mut self, kind: HintKind) -> bool {
        self.entries.remove(&kind).is_some()
    }

    pub fn get(&self, kind: HintKind) -> Option<&HintValue> {
        self.entries.get(&kind)
    }

    pub fn contains(&self, kind: HintKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HintKind, &HintValue)> {
        self.entries.iter().map(|(kind, value)| (*kind, value))
    }

    pub fn to_wire(&self) -> WireHints {
        self.entries
            .iter()
            .map(|(kind, value)| (*kind, value.to_wire()))
            .collect()
    }

    /// JSON object form passed across the engine boundary.
    pub fn to_wire_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_wire())
    }

    /// Build a configuration from host form state.
    ///
    /// Empty text fields are skipped. Every checkbox is transmitted as
    /// `"true"`/`"false"`, except an unchecked `PureBarcode`, which is omitted.
    pub fn from_form(form: &HintForm) -> Self {
        let mut hints = Self::new();
        for (kind, value) in &form.text_hints {
            if !kind.is_flag() {
                hints.set_hint(*kind, value);
            }
        }
        for (kind, checked) in &form.flag_hints {
            hints.set_flag(*kind, *checked);
        }
        hints
    }
}

/// Host UI state a hint configuration is built from: text inputs and checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HintForm {
    #[serde(default)]
    pub text_hints: BTreeMap<HintKind, String>,
    #[serde(default)]
    pub flag_hints: BTreeMap<HintKind, bool>,
}

impl HintForm {
    /// Kinds placed in the wrong section of the form.
    pub fn misplaced_kinds(&self) -> Vec<HintKind> {
        let text = self.text_hints.keys().filter(|kind| kind.is_flag());
        let flags = self.flag_hints.keys().filter(|kind| !kind.is_flag());
        text.chain(flags).copied().collect()
    }
}
