use clap::ValueEnum;

/// The three stored entity collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Roster,
    Events,
    Records,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Roster => "roster",
            Collection::Events => "events",
            Collection::Records => "records",
        }
    }
}
