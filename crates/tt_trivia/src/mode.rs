/// Which comment-lexing state machine applies to a file.
///
/// The extension-to-mode mapping is a compile-time constant; there is no
/// runtime configuration or registration of additional modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CFamily,
    Python,
}

const C_FAMILY_EXTENSIONS: &[&str] = &[
    "c", "h", "cpp", "cc", "hpp", "java", "js", "ts", "tsx", "go", "rs", "cs", "kt", "swift",
    "php", "rb", "scala", "m", "mm",
];

impl Mode {
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = file_name.rsplit('.').next()?.to_ascii_lowercase();
        if extension == "py" {
            Some(Self::Python)
        } else if C_FAMILY_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::CFamily)
        } else {
            None
        }
    }
}
