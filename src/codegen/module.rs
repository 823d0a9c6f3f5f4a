use super::endpoint::SynthesizedEndpoint;

/// The synthesized endpoints of one resource, in module order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceModule {
    pub resource: String,
    pub endpoints: Vec<SynthesizedEndpoint>,
    /// The first endpoint's documentation URL, without its fragment.
    pub docs_url: String,
}

impl ResourceModule {
    /// Orders the endpoints by priority, keeping input order for ties.
    ///
    /// Returns `None` if there are no endpoints; empty resources
    /// don't get a module.
    pub fn new(resource: impl Into<String>, mut endpoints: Vec<SynthesizedEndpoint>) -> Option<Self> {
        endpoints.sort_by_key(|endpoint| endpoint.priority);
        let first = endpoints.first()?;
        let docs_url = strip_fragment(&first.docs_url).to_owned();
        Some(Self {
            resource: resource.into(),
            endpoints,
            docs_url,
        })
    }
}

/// Removes the `#fragment` from a URL.
pub fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(url, _)| url)
}
