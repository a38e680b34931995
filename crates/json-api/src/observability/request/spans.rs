//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse ids in `path` so that labels stay low-cardinality.
///
/// UUID segments become `{id}` and stored file names under `/uploads`
/// become `{file}`.
pub(super) fn route_label(path: &str) -> String {
    if let Some(file) = path.strip_prefix("/uploads/")
        && !file.is_empty()
    {
        return "/uploads/{file}".to_owned();
    }

    let mut label = String::with_capacity(path.len());

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        label.push('/');

        if Uuid::parse_str(segment).is_ok() {
            label.push_str("{id}");
        } else {
            label.push_str(segment);
        }
    }

    if label.is_empty() {
        label.push('/');
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_are_collapsed() {
        assert_eq!(
            route_label("/api/orders/0192b3c4-0000-7000-8000-000000000001/status"),
            "/api/orders/{id}/status"
        );
    }

    #[test]
    fn literal_segments_are_kept() {
        assert_eq!(route_label("/api/products/vendor/me"), "/api/products/vendor/me");
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn upload_files_are_collapsed() {
        assert_eq!(
            route_label("/uploads/0192b3c4-0000-7000-8000-000000000001.png"),
            "/uploads/{file}"
        );
    }
}
