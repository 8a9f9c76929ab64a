use http::Extensions;
use rquest_conf::Attributes;

/// A reusable client builder: some transport options of its own plus a
/// type-keyed attribute store.
#[derive(Debug, Default)]
pub struct Bootstrap {
    pub remote: Option<String>,
    attrs: Extensions,
}

impl Bootstrap {
    pub fn new() -> Bootstrap {
        Bootstrap::default()
    }

    pub fn remote(&mut self, remote: &str) -> &mut Bootstrap {
        self.remote = Some(remote.to_owned());
        self
    }

    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }
}

impl Attributes for Bootstrap {
    fn attrs(&self) -> &Extensions {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut Extensions {
        &mut self.attrs
    }
}
