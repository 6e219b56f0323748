use std::path::Path;

/// Guesses the MIME type of a file from its extension. Unknown extensions give
/// an empty type, matching what an untyped file carries.
pub fn mime_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or("")
}
