//! Property tests for URI conversion.

use lsp_wire::types::{DocumentUri, PathStyle};
use proptest::prelude::*;

/// A path segment, including the `.` and `..` segments that must be kept
/// verbatim.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[a-zA-Z0-9 #_.~%àé😛-]{1,8}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn posix_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|parts| format!("/{}", parts.join("/")))
}

fn windows_path() -> impl Strategy<Value = (char, String)> {
    (
        prop::char::ranges(vec!['a'..='z', 'A'..='Z'].into()),
        prop::collection::vec(segment(), 1..5).prop_map(|parts| parts.join("\\")),
    )
}

proptest! {
    #[test]
    fn posix_path_round_trips(path in posix_path()) {
        let uri = DocumentUri::from_path_with_style(&path, PathStyle::Posix);
        let decoded = DocumentUri::from_url(&uri.to_string()).unwrap();
        prop_assert_eq!(decoded.path(), path.as_str());
        prop_assert_eq!(decoded, uri);
    }

    #[test]
    fn windows_path_round_trips((drive, rest) in windows_path()) {
        let path = format!("{}:\\{}", drive, rest);
        let uri = DocumentUri::from_path_with_style(&path, PathStyle::Windows);
        let decoded = DocumentUri::from_url(&uri.to_string()).unwrap();

        let expected = format!("{}:/{}", drive.to_ascii_lowercase(), rest.replace('\\', "/"));
        prop_assert_eq!(decoded.path(), expected.as_str());
    }

    #[test]
    fn drive_letter_case_does_not_change_the_uri((drive, rest) in windows_path()) {
        let upper = format!("{}:\\{}", drive.to_ascii_uppercase(), rest);
        let lower = format!("{}:\\{}", drive.to_ascii_lowercase(), rest);
        let upper = DocumentUri::from_path_with_style(&upper, PathStyle::Windows);
        let lower = DocumentUri::from_path_with_style(&lower, PathStyle::Windows);

        prop_assert_eq!(upper.to_string(), lower.to_string());
        let expected_prefix = format!("file:///{}%3A/", drive.to_ascii_lowercase());
        prop_assert!(upper.to_string().starts_with(&expected_prefix));
    }

    #[test]
    fn encoding_is_stable_under_redecoding(path in posix_path()) {
        let first = DocumentUri::from_path_with_style(&path, PathStyle::Posix).to_string();
        let second = DocumentUri::from_url(&first).unwrap().to_string();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.contains(' ') && !first.contains('#'));
        prop_assert!(first.is_ascii());
    }
}
