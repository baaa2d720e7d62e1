/// Counter-based id generator for nodes and edges
/// Generates ids like "node-7", "edge-12"
/// Reseeds from imported ids so fresh ids never collide with them

use regex::Regex;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// Prefix before the dash, e.g. "node"
    prefix: String,
    /// Counter for next ID
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 1,
        }
    }

    pub fn for_nodes() -> Self {
        Self::new("node")
    }

    pub fn for_edges() -> Self {
        Self::new("edge")
    }

    /// Generate the next ID that `taken` does not already claim
    pub fn next(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = format!("{}-{}", self.prefix, self.counter);
            self.counter += 1;
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Move the counter past every existing id of the form `<prefix>-<n>`.
    /// The counter never moves backwards, so ids are not reused in a session.
    pub fn reseed<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
        let pattern = format!(r"^{}-(\d+)$", regex::escape(&self.prefix));
        let Ok(re) = Regex::new(&pattern) else {
            return;
        };

        let highest = existing
            .into_iter()
            .filter_map(|id| re.captures(id))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
            .max();

        if let Some(highest) = highest {
            self.counter = self.counter.max(highest.saturating_add(1));
        }
    }
}
