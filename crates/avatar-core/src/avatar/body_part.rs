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

/// Which shared texture a body part wears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// The shirt template (torso and arms).
    Shirt,
    /// The pants template (legs).
    Pants,
    /// The resolved face texture (head).
    Face,
}

/// One of the six meshes an avatar is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    /// The torso.
    Torso,
    /// The head, which carries the face texture.
    Head,
    /// The left arm.
    LeftArm,
    /// The left leg.
    LeftLeg,
    /// The right arm.
    RightArm,
    /// The right leg.
    RightLeg,
}

impl BodyPart {
    /// All body parts, in scene order.
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Torso,
        BodyPart::Head,
        BodyPart::LeftArm,
        BodyPart::LeftLeg,
        BodyPart::RightArm,
        BodyPart::RightLeg,
    ];

    /// The file stem of the part's OBJ mesh on the content host.
    pub const fn mesh_name(self) -> &'static str {
        match self {
            BodyPart::Torso => "Torso",
            BodyPart::Head => "Head",
            BodyPart::LeftArm => "LeftArm",
            BodyPart::LeftLeg => "LeftLeg",
            BodyPart::RightArm => "RightArm",
            BodyPart::RightLeg => "RightLeg",
        }
    }

    /// The key of the part's entry in `Avatar::colors`.
    pub const fn color_key(self) -> &'static str {
        match self {
            BodyPart::Torso => "torso",
            BodyPart::Head => "head",
            BodyPart::LeftArm => "left_arm",
            BodyPart::LeftLeg => "left_leg",
            BodyPart::RightArm => "right_arm",
            BodyPart::RightLeg => "right_leg",
        }
    }

    /// The texture the part is drawn with.
    pub const fn texture_slot(self) -> TextureSlot {
        match self {
            BodyPart::Head => TextureSlot::Face,
            BodyPart::LeftLeg | BodyPart::RightLeg => TextureSlot::Pants,
            BodyPart::Torso | BodyPart::LeftArm | BodyPart::RightArm => TextureSlot::Shirt,
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.color_key())
    }
}
