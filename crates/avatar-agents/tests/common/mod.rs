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

//! Fixtures shared by the integration tests: a blocky stand-in avatar served
//! from an in-memory asset source.

#![allow(dead_code)]

use avatar_agents::asset_agent::{AssetSettings, MemoryAssetSource};
use avatar_core::avatar::BodyPart;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Face item whose metadata lists a texture.
pub const FACE_ITEM: u64 = 20121;
/// Asset reference of that texture, without its `asset://` prefix.
pub const FACE_ASSET_REF: &str = "c0ffee";

/// OBJ text for an axis-aligned box with outward, counter-clockwise faces.
pub fn box_obj(min: [f32; 3], max: [f32; 3]) -> String {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let mut obj = String::from("o Box\n");
    for (x, y, z) in [
        (x0, y0, z0),
        (x1, y0, z0),
        (x1, y1, z0),
        (x0, y1, z0),
        (x0, y0, z1),
        (x1, y0, z1),
        (x1, y1, z1),
        (x0, y1, z1),
    ] {
        obj.push_str(&format!("v {x} {y} {z}\n"));
    }
    obj.push_str("vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n");
    for [a, b, c, d] in [
        [5, 6, 7, 8],
        [2, 1, 4, 3],
        [6, 2, 3, 7],
        [1, 5, 8, 4],
        [8, 7, 3, 4],
        [1, 2, 6, 5],
    ] {
        obj.push_str(&format!("f {a}/1 {b}/2 {c}/3 {d}/4\n"));
    }
    obj
}

/// The box a body part occupies in the stand-in avatar.
pub fn part_bounds(part: BodyPart) -> ([f32; 3], [f32; 3]) {
    match part {
        BodyPart::Torso => ([-0.5, -0.5, -0.25], [0.5, 0.5, 0.25]),
        BodyPart::Head => ([-0.3, 0.5, -0.3], [0.3, 1.1, 0.3]),
        BodyPart::LeftArm => ([0.5, -0.5, -0.2], [0.9, 0.5, 0.2]),
        BodyPart::RightArm => ([-0.9, -0.5, -0.2], [-0.5, 0.5, 0.2]),
        BodyPart::LeftLeg => ([0.0, -1.5, -0.2], [0.45, -0.5, 0.2]),
        BodyPart::RightLeg => ([-0.45, -1.5, -0.2], [0.0, -0.5, 0.2]),
    }
}

/// PNG bytes of a `width` x `height` image filled with one color.
pub fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encoding a fixture PNG cannot fail");
    out.into_inner()
}

/// A source serving every asset the stand-in avatar needs, including the
/// metadata and texture of [`FACE_ITEM`].
pub fn fixture_source(settings: &AssetSettings) -> MemoryAssetSource {
    let mut source = MemoryAssetSource::new();
    for part in BodyPart::ALL {
        let (min, max) = part_bounds(part);
        source.insert(settings.mesh_url(part), box_obj(min, max));
    }
    source.insert(settings.template_url(), png(4, 4, [200, 30, 30, 128]));
    source.insert(settings.default_face_url(), png(2, 2, [0, 0, 0, 255]));
    source.insert(
        settings.poly_url(FACE_ITEM),
        format!(r#"[{{"texture":"asset://{FACE_ASSET_REF}","mesh":"asset://ignored"}}]"#),
    );
    source.insert(settings.asset_url(FACE_ASSET_REF), png(2, 2, [255, 255, 0, 255]));
    source
}
