use serde::{Deserialize, Serialize};

use super::options::IOOptions;

/// One bridge call as a host sends it over JSON.
///
/// The `op` field picks the operation, e.g.
/// `{"op":"readFile","path":"notes.txt","options":{"mode":"Text"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    WriteFile {
        path: String,
        content: String,
        #[serde(default)]
        options: IOOptions,
    },
    ReadFile {
        path: String,
        #[serde(default)]
        options: IOOptions,
    },
    MoveFile {
        source: String,
        target: String,
    },
    RemoveFile {
        path: String,
    },
    CopyFile {
        src: String,
        dst: String,
    },
    MakeDir {
        path: String,
    },
    ReadDir {
        path: String,
    },
    AbsolutePath {
        path: String,
    },
    UnzipZip {
        path: String,
        output: String,
    },
    UnzipGz {
        path: String,
        output: String,
    },
    FileExists {
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Mode;

    #[test]
    fn parses_tagged_requests() {
        let req: Request = serde_json::from_str(
            r#"{"op":"writeFile","path":"a.bin","content":"AAE=","options":{"mode":"Binary"}}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::WriteFile {
                path: "a.bin".into(),
                content: "AAE=".into(),
                options: IOOptions { mode: Mode::Binary },
            }
        );

        let req: Request =
            serde_json::from_str(r#"{"op":"unzipZip","path":"a.zip","output":"out"}"#).unwrap();
        assert!(matches!(req, Request::UnzipZip { .. }));
    }

    #[test]
    fn options_default_to_text() {
        let req: Request = serde_json::from_str(r#"{"op":"readFile","path":"a"}"#).unwrap();
        assert_eq!(
            req,
            Request::ReadFile {
                path: "a".into(),
                options: IOOptions::text(),
            }
        );
    }

    #[test]
    fn unknown_ops_are_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"op":"format","path":"/"}"#).is_err());
    }
}
