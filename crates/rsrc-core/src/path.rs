//! Lexical path normalization.
//!
//! Asset paths travel between hosts on different platforms, so normalization
//! never touches the filesystem and always emits forward slashes.

/// Normalize a path string.
///
/// - Backslashes become `/`
/// - Empty and `.` segments are dropped
/// - `..` pops the previous segment, is dropped directly under a root, and is
///   kept when it leads a relative path
/// - A leading `/` and a Windows drive segment (`D:`) act as roots
/// - An empty result becomes `.`
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let forward = path.replace('\\', "/");
    let absolute = forward.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    let mut rooted = absolute;
    // Leading segments that `..` may not pop (a drive designator).
    let mut floor = 0;

    for (index, segment) in forward.split('/').enumerate() {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if segments.len() > floor && *last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => {
                if index == 0 && is_drive(segment) {
                    rooted = true;
                    floor = 1;
                }
                segments.push(segment);
            }
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// True if the segment is a Windows drive designator such as `D:`.
pub(crate) fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
