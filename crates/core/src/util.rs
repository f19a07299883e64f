/// Make `path` relative to the workspace root, if it lies under it.
///
/// The root is matched with exactly one trailing separator, so `/work` and `/work/` behave
/// the same and `/workspace/a.js` is not treated as being under `/work`. An unset workspace
/// is the empty root, which only drops a leading `/`.
pub fn strip_workspace<'a>(path: &'a str, workspace: Option<&str>) -> &'a str {
    let root = workspace.unwrap_or_default().trim_end_matches('/');
    if root.is_empty() {
        return path.strip_prefix('/').unwrap_or(path);
    }
    path.strip_prefix(root).and_then(|rest| rest.strip_prefix('/')).unwrap_or(path)
}
