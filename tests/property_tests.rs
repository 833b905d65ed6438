//! Property-based tests for identity resolution and metadata extraction.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use valexport::core::types::ArtifactIdentity;
use valexport::metadata::extract_package_metadata;

/// Strategy for generating URL path segments that need no escaping.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,24}"
}

fn host() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("https://www.val.town".to_string()),
        Just("https://val.town".to_string()),
        Just("http://localhost:8080".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn marker_owner_name_resolves(base in host(), owner in segment(), name in segment()) {
        let url = format!("{}/v/{}/{}", base, owner, name);
        let id = ArtifactIdentity::resolve(&url).unwrap();
        prop_assert_eq!(id.owner(), owner.as_str());
        prop_assert_eq!(id.name(), name.as_str());
    }

    #[test]
    fn extra_slashes_do_not_matter(owner in segment(), name in segment(), pad in 1usize..4) {
        let slashes = "/".repeat(pad);
        let url = format!("https://www.val.town{s}v{s}{}{s}{}{s}", owner, name, s = slashes);
        let id = ArtifactIdentity::resolve(&url).unwrap();
        prop_assert_eq!(id.to_string(), format!("{}/{}", owner, name));
    }

    #[test]
    fn any_other_marker_is_rejected(
        marker in segment().prop_filter("not the val marker", |m| m != "v"),
        owner in segment(),
        name in segment(),
    ) {
        let url = format!("https://www.val.town/{}/{}/{}", marker, owner, name);
        prop_assert!(ArtifactIdentity::resolve(&url).is_err());
    }

    #[test]
    fn wrong_segment_count_is_rejected(
        parts in prop::collection::vec(segment(), 0..7)
            .prop_filter("owner and name only", |p| p.len() != 2),
    ) {
        let url = format!("https://www.val.town/v/{}", parts.join("/"));
        prop_assert!(ArtifactIdentity::resolve(&url).is_err());
    }

    #[test]
    fn extraction_accepts_any_text(text in "(?s).{0,400}") {
        let first = extract_package_metadata(&text);
        let second = extract_package_metadata(&text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn package_block_is_found_among_prose(
        before in "[a-zA-Z .,\n]{0,120}",
        after in "[a-zA-Z .,\n]{0,120}",
        name in "[a-z][a-z0-9-]{0,20}",
    ) {
        let readme = format!(
            "{}\n```json\n{{\"package\": {{\"name\": \"{}\"}}}}\n```\n{}",
            before, name, after
        );
        let meta = extract_package_metadata(&readme);
        prop_assert_eq!(
            meta.get("package").and_then(|p| p["name"].as_str()),
            Some(name.as_str())
        );
    }
}
