use indexmap::IndexMap;

use crate::ir::{IrEndpoint, IrSpec};

/// Resources that get a generated module. Paths under any other
/// resource are skipped.
pub const SUPPORTED_RESOURCES: &[&str] = &[
    "actions",
    "branches",
    "check-runs",
    "check-suites",
    "collaborators",
    "comments",
    "commits",
    "contents",
    "deployments",
    "environments",
    "forks",
    "hooks",
    "invitations",
    "issues",
    "keys",
    "labels",
    "milestones",
    "pages",
    "projects",
    "pulls",
    "releases",
    "statuses",
    "tags",
    "teams",
    "topics",
    "traffic",
];

/// The container segment for organization-scoped paths.
pub const ORG_CONTAINER: &str = "orgs";

/// The container segment for repository-scoped paths.
pub const REPO_CONTAINER: &str = "repos";

/// Returns the resource key for a path template: the segment after an
/// organization or a repository, or the top segment otherwise.
///
/// Segment positions count the empty segment before the leading `/`.
pub fn resource_key(template: &str) -> Option<&str> {
    let segments: Vec<&str> = template.split('/').collect();
    let index = match segments.get(1).copied() {
        Some(ORG_CONTAINER) => 3,
        Some(REPO_CONTAINER) => 4,
        _ => 1,
    };
    segments.get(index).copied().filter(|key| !key.is_empty())
}

/// Returns `true` if the resource gets a generated module.
#[inline]
pub fn is_supported(resource: &str) -> bool {
    SUPPORTED_RESOURCES.contains(&resource)
}

/// Partitions the endpoints of an API description by resource key. Groups are
/// sorted by key; endpoints keep document order within each group.
/// Endpoints of unsupported resources are dropped.
pub fn group<'s, 'a>(spec: &'s IrSpec<'a>) -> IndexMap<&'a str, Vec<&'s IrEndpoint<'a>>> {
    let mut groups: IndexMap<&'a str, Vec<&'s IrEndpoint<'a>>> = IndexMap::new();
    for path in &spec.paths {
        match resource_key(path.template) {
            Some(resource) if is_supported(resource) => {
                groups.entry(resource).or_default().extend(&path.endpoints);
            }
            resource => {
                tracing::debug!(
                    path = path.template,
                    resource,
                    "skipping path of unsupported resource",
                );
            }
        }
    }
    groups.sort_unstable_keys();
    groups
}
