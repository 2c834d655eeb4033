// src/core/rules.rs

/// A single learning rule: if `trigger` occurs anywhere in the lowercased text,
/// the profile learns `trigger -> replacement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub trigger: &'static str,
    pub replacement: &'static str,
}

const fn rule(trigger: &'static str, replacement: &'static str) -> Rule {
    Rule { trigger, replacement }
}

/// Technical terms with a canonical casing. Learned into `capitalizations`
/// and `technicalVocabulary`.
pub const CAPITALIZATIONS: &[Rule] = &[
    rule("api", "API"),
    rule("json", "JSON"),
    rule("http", "HTTP"),
    rule("url", "URL"),
    rule("github", "GitHub"),
    rule("nodejs", "Node.js"),
    rule("postgresql", "PostgreSQL"),
    rule("kubernetes", "Kubernetes"),
    rule("docker", "Docker"),
    rule("redis", "Redis"),
    rule("graphql", "GraphQL"),
    rule("rest", "REST"),
];

/// Tokens that dictation tends to run together. Learned into `wordCorrections`.
pub const WORD_SPLITS: &[Rule] = &[
    rule("pushto", "push to"),
    rule("committhis", "commit this"),
    rule("followup", "follow up"),
    rule("setup", "set up"),
    rule("signin", "sign in"),
    rule("signout", "sign out"),
    rule("login", "log in"),
    rule("logout", "log out"),
    rule("frontend", "front end"),
    rule("backend", "back end"),
    rule("dropdown", "drop down"),
    rule("builtin", "built in"),
];

/// Rules whose trigger occurs in `lowered`. Plain substring containment, so a
/// trigger inside a longer word ("url" in "curly") matches too.
pub fn matching<'a>(rules: &'a [Rule], lowered: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
    rules.iter().filter(move |r| lowered.contains(r.trigger))
}
