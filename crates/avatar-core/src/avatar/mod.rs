// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The avatar descriptor: equipped items and body-part colors.
//!
//! Only `items.face` and the six `colors` entries drive rendering; every other
//! field is accepted and carried along untouched.

mod body_part;

pub use body_part::*;

use crate::{error::RenderError, math::Rgba};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The descriptor used when a request arrives without one.
pub const DEFAULT_AVATAR_JSON: &str = r#"{"user_id":13,"items":{"face":0,"hats":[20121,0,0,0,0],"head":0,"tool":0,"pants":0,"shirt":0,"figure":0,"tshirt":0},"colors":{"head":"eab372","torso":"85ad00","left_arm":"eab372","left_leg":"37302c","right_arm":"eab372","right_leg":"37302c"}}"#;

/// A character's equipped items and body-part colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// The owning user's identifier. Not used by rendering.
    #[serde(default)]
    pub user_id: i64,
    /// Equipped items keyed by slot name. Values are item ids or arrays of ids.
    #[serde(default)]
    pub items: Map<String, Value>,
    /// Hex colors keyed by body-part name (`head`, `torso`, `left_arm`, ...).
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Avatar {
    /// Parses an avatar descriptor from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the built-in default avatar.
    pub fn default_avatar() -> Self {
        serde_json::from_str(DEFAULT_AVATAR_JSON).unwrap_or_else(|e| {
            log::error!("Built-in avatar descriptor failed to parse: {e}");
            Self::default()
        })
    }

    /// Returns the raw `items.face` value, if present.
    pub fn face_item(&self) -> Option<&Value> {
        self.items.get("face")
    }

    /// Resolves the color of a body part.
    ///
    /// Fails with [`RenderError::MissingColor`] if the descriptor has no entry
    /// for the part and [`RenderError::InvalidColor`] if the entry is not hex.
    pub fn color(&self, part: BodyPart) -> Result<Rgba, RenderError> {
        let hex = self
            .colors
            .get(part.color_key())
            .ok_or(RenderError::MissingColor(part.color_key()))?;
        Rgba::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_parses() {
        let avatar = Avatar::from_json(DEFAULT_AVATAR_JSON).unwrap();
        assert_eq!(avatar.user_id, 13);
        assert_eq!(avatar.face_item(), Some(&Value::from(0)));
        assert_eq!(avatar.colors.len(), 6);
        assert_eq!(avatar, Avatar::default_avatar());
    }

    #[test]
    fn test_colors_resolve_per_body_part() {
        let avatar = Avatar::default_avatar();
        assert_eq!(avatar.color(BodyPart::Torso).unwrap().to_hex(), "85ad00");
        assert_eq!(avatar.color(BodyPart::LeftLeg).unwrap().to_hex(), "37302c");
        assert_eq!(avatar.color(BodyPart::Head).unwrap().to_hex(), "eab372");
    }

    #[test]
    fn test_missing_and_invalid_colors_are_errors() {
        let mut avatar = Avatar::default_avatar();
        avatar.colors.remove("right_arm");
        avatar.colors.insert("head".into(), "skin".into());

        assert!(matches!(
            avatar.color(BodyPart::RightArm),
            Err(RenderError::MissingColor("right_arm"))
        ));
        assert!(matches!(
            avatar.color(BodyPart::Head),
            Err(RenderError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_unknown_fields_are_accepted() {
        let avatar = Avatar::from_json(
            r#"{"user_id":1,"items":{"hats":[1,2]},"colors":{},"extra":{"nested":true}}"#,
        )
        .unwrap();
        assert_eq!(avatar.face_item(), None);
        assert_eq!(avatar.items["hats"], serde_json::json!([1, 2]));
    }
}
