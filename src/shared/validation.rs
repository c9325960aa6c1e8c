use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters stripped from uploaded file names before they are used to
    /// build a stored image name. Anything outside [A-Za-z0-9._-] goes.
    pub static ref UNSAFE_FILE_NAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
}

/// Sanitize an uploaded file's base name for use in a stored path.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_NAME_CHARS.replace_all(name, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_file_name("cardiology.jpg"), "cardiology.jpg");
        assert_eq!(sanitize_file_name("foto_perfil-2"), "foto_perfil-2");
    }

    #[test]
    fn strips_path_separators_and_spaces() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_file_name("mi foto.png"), "mifoto.png");
        assert_eq!(sanitize_file_name("a\\b/c"), "abc");
    }

    #[test]
    fn strips_non_ascii() {
        assert_eq!(sanitize_file_name("radiografía.png"), "radiografa.png");
    }
}
