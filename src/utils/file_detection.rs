/// The preview format the gallery looks for unless configured otherwise.
pub const DEFAULT_IMAGE_EXTENSION: &str = "webp";

/// Strips an optional leading dot so `".webp"` and `"webp"` configure the same filter.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

/// Determines if a file name ends with `.{extension}`, ignoring ASCII case.
///
/// Only the name is inspected; the file is never opened. A bare `.webp`
/// (hidden file with no stem) still counts, matching a plain suffix check.
pub fn has_image_extension(file_name: &str, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() || file_name.len() <= extension.len() {
        return false;
    }
    let split = file_name.len() - extension.len();
    if !file_name.is_char_boundary(split) {
        return false;
    }
    let (head, suffix) = file_name.split_at(split);
    head.ends_with('.') && suffix.eq_ignore_ascii_case(extension)
}
