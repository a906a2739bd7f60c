pub const FULL: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "+git.",
    env!("GOALTREE_GIT_COUNT"),
    ".",
    env!("GOALTREE_GIT_SHA"),
    env!("GOALTREE_GIT_DIRTY")
);
