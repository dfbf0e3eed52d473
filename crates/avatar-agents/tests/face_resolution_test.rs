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

mod common;

use anyhow::Result;
use avatar_agents::asset_agent::{
    AssetAgent, AssetError, AssetSettings, FaceId, FaceResolver, FaceTexture, MemoryAssetSource,
};
use common::{FACE_ASSET_REF, FACE_ITEM};
use std::sync::Arc;

fn resolve(
    source: MemoryAssetSource,
    settings: &AssetSettings,
    face: Option<FaceId>,
) -> (Result<FaceTexture, AssetError>, Vec<String>) {
    let source = Arc::new(source);
    let agent = AssetAgent::new(source.clone());
    let result = FaceResolver::new(&agent, settings).resolve(face);
    (result, source.requests())
}

#[test]
fn test_no_face_loads_default_without_api_call() -> Result<()> {
    let settings = AssetSettings::default();
    let (face, requests) = resolve(common::fixture_source(&settings), &settings, None);

    assert!(matches!(face?, FaceTexture::Default(_)));
    assert_eq!(requests, vec![settings.default_face_url()]);
    assert!(requests
        .iter()
        .all(|url| !url.starts_with(&settings.asset_api_base)));
    Ok(())
}

#[test]
fn test_face_item_calls_get_poly_then_get() -> Result<()> {
    let settings = AssetSettings::default();
    let (face, requests) = resolve(
        common::fixture_source(&settings),
        &settings,
        Some(FaceId(FACE_ITEM)),
    );

    let face = face?;
    let FaceTexture::Item { id, texture } = &face else {
        panic!("expected an item face, got {face:?}");
    };
    assert_eq!(*id, FaceId(FACE_ITEM));
    assert_eq!(&texture.pixels()[..4], &[255, 255, 0, 255]);
    assert_eq!(
        requests,
        vec![
            "https://api.brick-hill.com/v1/assets/getPoly/1/20121".to_string(),
            format!("https://api.brick-hill.com/v1/assets/get/{FACE_ASSET_REF}"),
        ]
    );
    Ok(())
}

#[test]
fn test_empty_metadata_leaves_head_untextured() -> Result<()> {
    let settings = AssetSettings::default();
    let source = MemoryAssetSource::new().with(settings.poly_url(7), "[]");
    let (face, requests) = resolve(source, &settings, Some(FaceId(7)));

    let face = face?;
    assert!(matches!(face, FaceTexture::Missing(FaceId(7))));
    assert!(face.texture().is_none());
    assert_eq!(requests, vec![settings.poly_url(7)]);
    Ok(())
}

#[test]
fn test_bad_metadata_is_an_error() {
    let settings = AssetSettings::default();
    let cases = [
        (r#"[{"mesh":"asset://x"}]"#, "missing texture"),
        (r#"[{"texture":"https://cdn/x.png"}]"#, "missing prefix"),
        (r#"{"error":"not found"}"#, "not an array"),
        ("<html>", "not json"),
    ];

    for (body, label) in cases {
        let source = MemoryAssetSource::new().with(settings.poly_url(9), body);
        let (face, requests) = resolve(source, &settings, Some(FaceId(9)));
        let err = face.expect_err(label);
        match label {
            "missing texture" => assert!(matches!(err, AssetError::MissingTexture { item_id: 9 })),
            "missing prefix" => assert!(matches!(err, AssetError::InvalidTextureRef(_))),
            _ => assert!(matches!(err, AssetError::Metadata { .. }), "{label}: {err}"),
        }
        assert_eq!(requests.len(), 1, "{label}: no download after bad metadata");
    }
}

#[test]
fn test_metadata_http_failure_is_fatal() {
    let settings = AssetSettings::default();
    let (face, _) = resolve(MemoryAssetSource::new(), &settings, Some(FaceId(FACE_ITEM)));
    assert!(matches!(face, Err(AssetError::Status { status: 404, .. })));
}
